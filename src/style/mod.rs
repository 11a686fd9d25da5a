pub mod resolver;

pub use resolver::{
    Cursor, Paint, ResolvedStyle, SizeScale, SizeSpec, StateStyles, StyleRecipe, VariantSpec,
    resolve_surface,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Variant {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Outline,
    White,
    Ghost,
    Gradient,
}

impl Variant {
    pub const ALL: [Variant; 10] = [
        Variant::Primary,
        Variant::Secondary,
        Variant::Success,
        Variant::Danger,
        Variant::Warning,
        Variant::Info,
        Variant::Outline,
        Variant::White,
        Variant::Ghost,
        Variant::Gradient,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Outline => "outline",
            Self::White => "white",
            Self::Ghost => "ghost",
            Self::Gradient => "gradient",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("error") {
            return Some(Self::Danger);
        }
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(name))
    }

    /// Unknown names resolve to [`Variant::Primary`].
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::trace!(variant = name, "unknown variant, falling back to primary");
            Self::Primary
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Accepts both the long names and the `sm`/`md`/`lg` aliases.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sm" | "small" => Some(Self::Small),
            "md" | "medium" => Some(Self::Medium),
            "lg" | "large" => Some(Self::Large),
            _ => None,
        }
    }

    /// Unknown names resolve to [`Size::Medium`].
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::trace!(size = name, "unknown size, falling back to medium");
            Self::Medium
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Shape {
    #[default]
    Rounded,
    Pill,
    Square,
    Circle,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Rounded, Shape::Pill, Shape::Square, Shape::Circle];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rounded => "rounded",
            Self::Pill => "pill",
            Self::Square => "square",
            Self::Circle => "circle",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(name))
    }

    /// Unknown names resolve to [`Shape::Rounded`].
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::trace!(shape = name, "unknown shape, falling back to rounded");
            Self::Rounded
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Transient per-instance interaction state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum InteractionState {
    #[default]
    Default,
    Hover,
    Active,
    Focus,
    Disabled,
    Loading,
}

impl InteractionState {
    pub const ALL: [InteractionState; 6] = [
        InteractionState::Default,
        InteractionState::Hover,
        InteractionState::Active,
        InteractionState::Focus,
        InteractionState::Disabled,
        InteractionState::Loading,
    ];

    /// Disabled and loading instances ignore pointer input.
    pub const fn is_inert(self) -> bool {
        matches!(self, Self::Disabled | Self::Loading)
    }

    /// Collapses a pointer-derived state onto the inert states when the
    /// component is disabled or loading.
    pub fn gated(self, disabled: bool, loading: bool) -> Self {
        if loading {
            Self::Loading
        } else if disabled {
            Self::Disabled
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_aliases_resolve_identically() {
        assert_eq!(Size::from_name("sm"), Size::from_name("small"));
        assert_eq!(Size::from_name("md"), Size::from_name("medium"));
        assert_eq!(Size::from_name("LG"), Size::from_name("large"));
    }

    #[test]
    fn unknown_names_fall_back_to_documented_defaults() {
        assert_eq!(Variant::from_name("sparkly"), Variant::Primary);
        assert_eq!(Size::from_name("huge"), Size::Medium);
        assert_eq!(Shape::from_name("hexagon"), Shape::Rounded);
        assert_eq!(Variant::from_name(""), Variant::default());
        assert_eq!(Size::from_name(""), Size::default());
    }

    #[test]
    fn variant_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::parse(variant.as_str()), Some(variant));
        }
        assert_eq!(Variant::parse("error"), Some(Variant::Danger));
    }

    #[test]
    fn gating_prefers_loading_over_disabled() {
        assert_eq!(
            InteractionState::Hover.gated(true, true),
            InteractionState::Loading
        );
        assert_eq!(
            InteractionState::Active.gated(true, false),
            InteractionState::Disabled
        );
        assert_eq!(
            InteractionState::Focus.gated(false, false),
            InteractionState::Focus
        );
        assert!(InteractionState::Loading.is_inert());
        assert!(!InteractionState::Hover.is_inert());
    }
}
