use super::toggle_group::{ToggleGroupModel, ToggleOptionRecipe};
use super::*;
use crate::style::{Cursor, InteractionState, Paint, Shape, Size, StyleRecipe, Variant};
use crate::theme::{ColorScheme, Theme};
use crate::tokens::{PaletteKey, Shadow};

fn button(variant: Variant) -> ButtonRecipe {
    ButtonRecipe {
        variant,
        size: Size::Medium,
        shape: Shape::Rounded,
        icon_only: false,
    }
}

#[test]
fn resolution_is_pure_for_every_variant_and_state() {
    let theme = Theme::default();
    for variant in Variant::ALL {
        for state in InteractionState::ALL {
            assert_eq!(
                button(variant).resolve(&theme, state),
                button(variant).resolve(&theme, state),
                "{variant:?} {state:?}"
            );
        }
    }
}

#[test]
fn inert_buttons_get_no_pointer_deltas() {
    let theme = Theme::default();
    for (disabled, loading) in [(true, false), (false, true), (true, true)] {
        let styles = button(Variant::Primary).state_styles(&theme, disabled, loading);
        assert!(styles.hover.is_none());
        assert!(styles.active.is_none());
        assert!(styles.focus.is_none());
        assert_eq!(styles.base.cursor, Cursor::NotAllowed);
        assert!(styles.base.opacity < 1.0);
    }
}

#[test]
fn interactive_buttons_carry_hover_and_focus_deltas() {
    let theme = Theme::default();
    let styles = button(Variant::Primary).state_styles(&theme, false, false);
    assert_eq!(styles.base.cursor, Cursor::Pointer);
    assert!(styles.hover.is_some());
    assert!(styles.focus.as_ref().is_some_and(|focus| focus.ring.is_some()));
}

#[test]
fn outline_and_ghost_buttons_are_flat() {
    let theme = Theme::default();
    for variant in [Variant::Outline, Variant::Ghost] {
        let style = button(variant).resolve(&theme, InteractionState::Default);
        assert_eq!(style.shadow, Shadow::None, "{variant:?}");
    }
    let filled = button(Variant::Primary).resolve(&theme, InteractionState::Default);
    assert_eq!(filled.shadow, theme.components.button.shadow);
}

#[test]
fn only_the_gradient_variant_paints_gradients() {
    let theme = Theme::default();
    for variant in Variant::ALL {
        let style = button(variant).resolve(&theme, InteractionState::Default);
        let is_gradient = matches!(style.background, Paint::Gradient { .. });
        assert_eq!(is_gradient, variant == Variant::Gradient, "{variant:?}");
    }
}

#[test]
fn larger_sizes_never_shrink_padding_or_type() {
    let theme = Theme::default();
    let styles: Vec<_> = Size::ALL
        .into_iter()
        .map(|size| {
            ButtonRecipe {
                size,
                ..button(Variant::Primary)
            }
            .resolve(&theme, InteractionState::Default)
        })
        .collect();
    for pair in styles.windows(2) {
        assert!(pair[0].padding_x <= pair[1].padding_x);
        assert!(pair[0].font_size <= pair[1].font_size);
    }
}

#[test]
fn primary_colour_flows_into_primary_buttons() {
    let indigo = Theme::default();
    let teal = Theme::default().with_primary_color(PaletteKey::Teal);
    let resolve = |theme: &Theme| button(Variant::Primary).resolve(theme, InteractionState::Default);
    assert_ne!(resolve(&indigo).background, resolve(&teal).background);
}

#[test]
fn dark_scheme_changes_badge_colours() {
    let light = Theme::default();
    let dark = Theme::default().with_color_scheme(ColorScheme::Dark);
    let recipe = BadgeRecipe {
        variant: Variant::Success,
        size: Size::Small,
        shape: Shape::Pill,
    };
    let light_style = recipe.resolve(&light, InteractionState::Default);
    let dark_style = recipe.resolve(&dark, InteractionState::Default);
    assert_ne!(light_style, dark_style);
    assert_eq!(light_style.radius, dark_style.radius);
}

#[test]
fn active_toggle_option_ignores_hover() {
    let theme = Theme::default();
    let mut model = ToggleGroupModel::new([
        ToggleOption::new("all", "All"),
        ToggleOption::new("open", "Open"),
    ]);
    model.click("open");

    let active = model.recipe("open", Size::Medium);
    assert!(active.state_styles(&theme, false, false).hover.is_none());

    let inactive = model.recipe("all", Size::Medium);
    assert!(inactive.state_styles(&theme, false, false).hover.is_some());
    assert_ne!(
        active.resolve(&theme, InteractionState::Default),
        ToggleOptionRecipe {
            active: false,
            size: Size::Medium,
        }
        .resolve(&theme, InteractionState::Default)
    );
}

#[test]
fn tag_and_badge_tables_cover_every_variant() {
    let theme = Theme::default();
    for variant in Variant::ALL {
        let badge = Badge::new("x").variant(variant).recipe();
        let tag = Tag::new("x").variant(variant).recipe();
        for style in [
            badge.resolve(&theme, InteractionState::Default),
            tag.resolve(&theme, InteractionState::Default),
        ] {
            assert!(style.foreground.starts_with('#'), "{variant:?}");
        }
    }
}
