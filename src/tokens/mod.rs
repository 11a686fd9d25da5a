//! Design tokens for the dashboard.
//!
//! Every token has a stable string key (`spacing.md`, `color.blue.6`,
//! `shadow.lg`) and a value that never changes for the lifetime of the
//! process. Component tables in [`crate::theme`] refer to tokens through the
//! typed enums below; [`TokenRegistry`] is the string-keyed view used by
//! configuration and by the reference scan in the test suites.

use std::collections::BTreeMap;

pub const COLOR_STOPS: usize = 10;
pub type ColorScale = [&'static str; COLOR_STOPS];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PaletteKey {
    Slate,
    Gray,
    Red,
    Orange,
    Amber,
    Green,
    Emerald,
    Teal,
    Sky,
    Blue,
    Indigo,
    Violet,
    Pink,
}

impl PaletteKey {
    pub const ALL: [PaletteKey; 13] = [
        PaletteKey::Slate,
        PaletteKey::Gray,
        PaletteKey::Red,
        PaletteKey::Orange,
        PaletteKey::Amber,
        PaletteKey::Green,
        PaletteKey::Emerald,
        PaletteKey::Teal,
        PaletteKey::Sky,
        PaletteKey::Blue,
        PaletteKey::Indigo,
        PaletteKey::Violet,
        PaletteKey::Pink,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slate => "slate",
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Green => "green",
            Self::Emerald => "emerald",
            Self::Teal => "teal",
            Self::Sky => "sky",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Violet => "violet",
            Self::Pink => "pink",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(name))
    }

    /// Hex values for the ten stops, lightest (`0`) to darkest (`9`).
    pub const fn scale(self) -> ColorScale {
        match self {
            Self::Slate => [
                "#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569",
                "#334155", "#1e293b", "#0f172a",
            ],
            Self::Gray => [
                "#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563",
                "#374151", "#1f2937", "#111827",
            ],
            Self::Red => [
                "#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626",
                "#b91c1c", "#991b1b", "#7f1d1d",
            ],
            Self::Orange => [
                "#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c",
                "#c2410c", "#9a3412", "#7c2d12",
            ],
            Self::Amber => [
                "#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706",
                "#b45309", "#92400e", "#78350f",
            ],
            Self::Green => [
                "#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a",
                "#15803d", "#166534", "#14532d",
            ],
            Self::Emerald => [
                "#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669",
                "#047857", "#065f46", "#064e3b",
            ],
            Self::Teal => [
                "#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488",
                "#0f766e", "#115e59", "#134e4a",
            ],
            Self::Sky => [
                "#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7",
                "#0369a1", "#075985", "#0c4a6e",
            ],
            Self::Blue => [
                "#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb",
                "#1d4ed8", "#1e40af", "#1e3a8a",
            ],
            Self::Indigo => [
                "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5",
                "#4338ca", "#3730a3", "#312e81",
            ],
            Self::Violet => [
                "#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6", "#7c3aed",
                "#6d28d9", "#5b21b6", "#4c1d95",
            ],
            Self::Pink => [
                "#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777",
                "#be185d", "#9d174d", "#831843",
            ],
        }
    }
}

pub fn palette_store() -> BTreeMap<PaletteKey, ColorScale> {
    PaletteKey::ALL
        .into_iter()
        .map(|key| (key, key.scale()))
        .collect()
}

pub fn color_key(key: PaletteKey, shade: u8) -> String {
    format!("color.{}.{}", key.as_str(), shade)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Space {
    None,
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Space {
    pub const ALL: [Space; 8] = [
        Space::None,
        Space::Xxs,
        Space::Xs,
        Space::Sm,
        Space::Md,
        Space::Lg,
        Space::Xl,
        Space::Xxl,
    ];

    pub const fn px(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Xxs => 2.0,
            Self::Xs => 4.0,
            Self::Sm => 8.0,
            Self::Md => 12.0,
            Self::Lg => 16.0,
            Self::Xl => 24.0,
            Self::Xxl => 32.0,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::None => "spacing.none",
            Self::Xxs => "spacing.xxs",
            Self::Xs => "spacing.xs",
            Self::Sm => "spacing.sm",
            Self::Md => "spacing.md",
            Self::Lg => "spacing.lg",
            Self::Xl => "spacing.xl",
            Self::Xxl => "spacing.xxl",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RadiusToken {
    None,
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Full,
}

impl RadiusToken {
    pub const ALL: [RadiusToken; 7] = [
        RadiusToken::None,
        RadiusToken::Xs,
        RadiusToken::Sm,
        RadiusToken::Md,
        RadiusToken::Lg,
        RadiusToken::Xl,
        RadiusToken::Full,
    ];

    pub const fn px(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Xs => 2.0,
            Self::Sm => 4.0,
            Self::Md => 8.0,
            Self::Lg => 12.0,
            Self::Xl => 16.0,
            Self::Full => 9999.0,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::None => "radius.none",
            Self::Xs => "radius.xs",
            Self::Sm => "radius.sm",
            Self::Md => "radius.md",
            Self::Lg => "radius.lg",
            Self::Xl => "radius.xl",
            Self::Full => "radius.full",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FontSize {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl FontSize {
    pub const ALL: [FontSize; 6] = [
        FontSize::Xs,
        FontSize::Sm,
        FontSize::Md,
        FontSize::Lg,
        FontSize::Xl,
        FontSize::Xxl,
    ];

    pub const fn px(self) -> f32 {
        match self {
            Self::Xs => 12.0,
            Self::Sm => 14.0,
            Self::Md => 16.0,
            Self::Lg => 18.0,
            Self::Xl => 20.0,
            Self::Xxl => 28.0,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Xs => "font-size.xs",
            Self::Sm => "font-size.sm",
            Self::Md => "font-size.md",
            Self::Lg => "font-size.lg",
            Self::Xl => "font-size.xl",
            Self::Xxl => "font-size.xxl",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FontWeightToken {
    Regular,
    Medium,
    Semibold,
    Bold,
}

impl FontWeightToken {
    pub const ALL: [FontWeightToken; 4] = [
        FontWeightToken::Regular,
        FontWeightToken::Medium,
        FontWeightToken::Semibold,
        FontWeightToken::Bold,
    ];

    pub const fn weight(self) -> u16 {
        match self {
            Self::Regular => 400,
            Self::Medium => 500,
            Self::Semibold => 600,
            Self::Bold => 700,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Regular => "font-weight.regular",
            Self::Medium => "font-weight.medium",
            Self::Semibold => "font-weight.semibold",
            Self::Bold => "font-weight.bold",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum LineHeight {
    Tight,
    Normal,
    Relaxed,
}

impl LineHeight {
    pub const ALL: [LineHeight; 3] = [LineHeight::Tight, LineHeight::Normal, LineHeight::Relaxed];

    pub const fn ratio(self) -> f32 {
        match self {
            Self::Tight => 1.25,
            Self::Normal => 1.5,
            Self::Relaxed => 1.75,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Tight => "line-height.tight",
            Self::Normal => "line-height.normal",
            Self::Relaxed => "line-height.relaxed",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum IconSize {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl IconSize {
    pub const ALL: [IconSize; 5] = [
        IconSize::Xs,
        IconSize::Sm,
        IconSize::Md,
        IconSize::Lg,
        IconSize::Xl,
    ];

    pub const fn px(self) -> f32 {
        match self {
            Self::Xs => 12.0,
            Self::Sm => 14.0,
            Self::Md => 16.0,
            Self::Lg => 20.0,
            Self::Xl => 24.0,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Xs => "icon-size.xs",
            Self::Sm => "icon-size.sm",
            Self::Md => "icon-size.md",
            Self::Lg => "icon-size.lg",
            Self::Xl => "icon-size.xl",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowSpec {
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Shadow {
    None,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Shadow {
    pub const ALL: [Shadow; 5] = [Shadow::None, Shadow::Sm, Shadow::Md, Shadow::Lg, Shadow::Xl];

    pub const fn spec(self) -> Option<ShadowSpec> {
        match self {
            Self::None => None,
            Self::Sm => Some(ShadowSpec {
                offset_y: 1.0,
                blur: 2.0,
                spread: 0.0,
                opacity: 0.05,
            }),
            Self::Md => Some(ShadowSpec {
                offset_y: 4.0,
                blur: 6.0,
                spread: -1.0,
                opacity: 0.1,
            }),
            Self::Lg => Some(ShadowSpec {
                offset_y: 10.0,
                blur: 15.0,
                spread: -3.0,
                opacity: 0.1,
            }),
            Self::Xl => Some(ShadowSpec {
                offset_y: 20.0,
                blur: 25.0,
                spread: -5.0,
                opacity: 0.1,
            }),
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::None => "shadow.none",
            Self::Sm => "shadow.sm",
            Self::Md => "shadow.md",
            Self::Lg => "shadow.lg",
            Self::Xl => "shadow.xl",
        }
    }

    fn css(self) -> String {
        match self.spec() {
            None => "none".to_string(),
            Some(spec) => format!(
                "0 {}px {}px {}px rgb(0 0 0 / {})",
                spec.offset_y, spec.blur, spec.spread, spec.opacity
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Transition {
    Fast,
    Normal,
    Slow,
}

impl Transition {
    pub const ALL: [Transition; 3] = [Transition::Fast, Transition::Normal, Transition::Slow];

    pub const fn ms(self) -> u16 {
        match self {
            Self::Fast => 150,
            Self::Normal => 200,
            Self::Slow => 300,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Fast => "transition.fast",
            Self::Normal => "transition.normal",
            Self::Slow => "transition.slow",
        }
    }
}

/// String-keyed view over every token.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenRegistry {
    entries: BTreeMap<String, String>,
}

impl TokenRegistry {
    pub fn standard() -> Self {
        Self::with_palette(&palette_store())
    }

    pub fn with_palette<S: AsRef<str>>(palette: &BTreeMap<PaletteKey, [S; COLOR_STOPS]>) -> Self {
        let mut entries = BTreeMap::new();
        for (key, scale) in palette {
            for (shade, hex) in scale.iter().enumerate() {
                entries.insert(color_key(*key, shade as u8), hex.as_ref().to_string());
            }
        }
        entries.insert("color.white".to_string(), "#ffffff".to_string());
        entries.insert("color.black".to_string(), "#000000".to_string());
        entries.insert("color.transparent".to_string(), "transparent".to_string());

        for token in Space::ALL {
            entries.insert(token.key().to_string(), format!("{}px", token.px()));
        }
        for token in RadiusToken::ALL {
            entries.insert(token.key().to_string(), format!("{}px", token.px()));
        }
        for token in FontSize::ALL {
            entries.insert(token.key().to_string(), format!("{}px", token.px()));
        }
        for token in FontWeightToken::ALL {
            entries.insert(token.key().to_string(), token.weight().to_string());
        }
        for token in LineHeight::ALL {
            entries.insert(token.key().to_string(), token.ratio().to_string());
        }
        for token in IconSize::ALL {
            entries.insert(token.key().to_string(), format!("{}px", token.px()));
        }
        for token in Shadow::ALL {
            entries.insert(token.key().to_string(), token.css());
        }
        for token in Transition::ALL {
            entries.insert(token.key().to_string(), format!("{}ms", token.ms()));
        }

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_complete_and_ordered_light_to_dark() {
        let store = palette_store();
        assert_eq!(store.len(), PaletteKey::ALL.len());
        for scale in store.values() {
            assert_eq!(scale.len(), COLOR_STOPS);
            assert!(scale.iter().all(|hex| hex.starts_with('#') && hex.len() == 7));
        }
    }

    #[test]
    fn palette_names_round_trip() {
        for key in PaletteKey::ALL {
            assert_eq!(PaletteKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(PaletteKey::from_name("BLUE"), Some(PaletteKey::Blue));
        assert_eq!(PaletteKey::from_name("chartreuse"), None);
    }

    #[test]
    fn registry_exposes_every_scale() {
        let registry = TokenRegistry::standard();
        assert_eq!(registry.get("spacing.md"), Some("12px"));
        assert_eq!(registry.get("color.blue.6"), Some("#2563eb"));
        assert_eq!(registry.get("font-weight.semibold"), Some("600"));
        assert_eq!(registry.get("transition.fast"), Some("150ms"));
        assert_eq!(registry.get("shadow.none"), Some("none"));
        assert!(registry.contains("radius.full"));
        assert!(!registry.contains("color.blue.10"));
    }

    #[test]
    fn scales_grow_monotonically() {
        let spacing = Space::ALL.map(Space::px);
        assert!(spacing.windows(2).all(|pair| pair[0] < pair[1]));
        let fonts = FontSize::ALL.map(FontSize::px);
        assert!(fonts.windows(2).all(|pair| pair[0] < pair[1]));
        let radii = RadiusToken::ALL.map(RadiusToken::px);
        assert!(radii.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
