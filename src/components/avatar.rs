use gpui::{InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString, Styled, div, px};

use crate::id::{ComponentId, fnv1a64};
use crate::style::Size;
use crate::theme::{ColorValue, LocalTheme, Theme};
use crate::tokens::{PaletteKey, RadiusToken};

/// Up to two uppercase initials: the first letter of the first and last
/// words. Blank names give `"?"`.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return "?".to_string();
    };
    let mut out: String = first.chars().take(1).flat_map(char::to_uppercase).collect();
    if let Some(last) = words.last() {
        out.extend(last.chars().take(1).flat_map(char::to_uppercase));
    }
    out
}

/// Palette a name is painted with. Stable for a given name and swatch list.
pub fn swatch_for(name: &str, swatches: &[PaletteKey]) -> Option<PaletteKey> {
    if swatches.is_empty() {
        return None;
    }
    let normalized = name.trim().to_lowercase();
    let index = fnv1a64(normalized.as_bytes()) % swatches.len() as u64;
    swatches.get(index as usize).copied()
}

fn diameter(theme: &Theme, size: Size) -> f32 {
    let [small, medium, large] = theme.components.avatar.diameters;
    f32::from(match size {
        Size::Small => small,
        Size::Medium => medium,
        Size::Large => large,
    })
}

fn background(theme: &Theme, name: &str) -> ColorValue {
    let tokens = &theme.components.avatar;
    swatch_for(name, &tokens.swatches)
        .map(|key| ColorValue::palette(key, tokens.shade))
        .unwrap_or_else(|| theme.semantic.text_muted.clone())
}

#[derive(IntoElement)]
pub struct Avatar {
    id: ComponentId,
    name: SharedString,
    size: Size,
    ring: bool,
    theme: LocalTheme,
}

impl Avatar {
    #[track_caller]
    pub fn new(name: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("avatar"),
            name: name.into(),
            size: Size::Medium,
            ring: false,
            theme: LocalTheme::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Separates stacked avatars with a surface-coloured ring.
    pub fn ring(mut self, ring: bool) -> Self {
        self.ring = ring;
        self
    }
}

impl RenderOnce for Avatar {
    fn render(mut self, _window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let tokens = &self.theme.components.avatar;
        let font_size = match self.size {
            Size::Small => tokens.font_sizes[0],
            Size::Medium => tokens.font_sizes[1],
            Size::Large => tokens.font_sizes[2],
        };

        let mut root = div()
            .id(self.id.clone())
            .flex()
            .flex_none()
            .items_center()
            .justify_center()
            .size(px(diameter(&self.theme, self.size)))
            .rounded(px(RadiusToken::Full.px()))
            .bg(self.theme.resolve_hsla(&background(&self.theme, &self.name)))
            .text_color(self.theme.resolve_hsla(&tokens.fg))
            .text_size(px(font_size.px()))
            .font_weight(gpui::FontWeight::SEMIBOLD);
        if self.ring {
            root = root
                .border_2()
                .border_color(self.theme.resolve_hsla(&tokens.ring));
        }
        root.child(initials(&self.name))
    }
}

crate::impl_theme_overridable!(Avatar);

impl crate::contracts::Sizeable for Avatar {
    fn size(self, value: Size) -> Self {
        Avatar::size(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_use_first_and_last_words() {
        assert_eq!(initials("ada lovelace"), "AL");
        assert_eq!(initials("  Grace  Brewster Hopper "), "GH");
        assert_eq!(initials("Ravi"), "R");
        assert_eq!(initials("   "), "?");
        assert_eq!(initials("émile zola"), "ÉZ");
    }

    #[test]
    fn swatch_is_stable_and_case_insensitive() {
        let swatches = Theme::default().components.avatar.swatches.clone();
        let first = swatch_for("Priya Nair", &swatches);
        assert!(first.is_some());
        assert_eq!(first, swatch_for("priya nair ", &swatches));
        assert_eq!(swatch_for("anyone", &[]), None);
    }

    #[test]
    fn empty_swatch_list_falls_back_to_muted_text() {
        let mut theme = Theme::default();
        theme.components.avatar.swatches.clear();
        assert_eq!(background(&theme, "Sam"), theme.semantic.text_muted);
    }
}
