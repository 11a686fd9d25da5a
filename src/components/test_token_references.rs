use crate::theme::{ColorScheme, ColorValue, Theme};
use crate::tokens::{PaletteKey, TokenRegistry};

fn themes() -> impl Iterator<Item = Theme> {
    PaletteKey::ALL.into_iter().flat_map(|primary| {
        [ColorScheme::Light, ColorScheme::Dark]
            .into_iter()
            .map(move |scheme| Theme::default().with_primary_color(primary).with_color_scheme(scheme))
    })
}

#[test]
fn every_theme_references_only_registered_tokens() {
    for theme in themes() {
        let registry = theme.token_registry();
        let missing: Vec<_> = theme
            .token_refs()
            .into_iter()
            .filter(|key| !registry.contains(key))
            .collect();
        assert!(
            missing.is_empty(),
            "{:?}/{:?} references unknown tokens: {missing:?}",
            theme.primary_color,
            theme.color_scheme
        );
    }
}

#[test]
fn every_registered_colour_resolves_to_the_same_value() {
    let theme = Theme::default();
    let registry = theme.token_registry();
    for key in PaletteKey::ALL {
        for shade in 0..10u8 {
            let value = ColorValue::palette(key, shade);
            let token = value.token_key();
            assert_eq!(
                token.as_deref().and_then(|token| registry.get(token)),
                theme.try_resolve_color(&value).as_deref()
            );
        }
    }
}

#[test]
fn semantic_colours_resolve_under_both_schemes() {
    for theme in themes() {
        for value in theme.semantic.values() {
            assert!(
                theme.try_resolve_color(value).is_some(),
                "{value:?} does not resolve"
            );
        }
    }
}

#[test]
fn palette_overrides_show_up_in_the_registry() {
    let scale = [
        "#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7", "#0369a1",
        "#075985", "#0c4a6e",
    ]
    .map(str::to_string);
    let theme = Theme::default().with_palette_override(PaletteKey::Indigo, scale);
    let registry = theme.token_registry();
    assert_eq!(registry.get("color.indigo.6"), Some("#0284c7"));
    assert_eq!(
        theme.resolve_color(&ColorValue::palette(PaletteKey::Indigo, 6)),
        "#0284c7"
    );
}

#[test]
fn standard_registry_matches_the_default_theme() {
    assert_eq!(TokenRegistry::standard(), Theme::default().token_registry());
}

/// Rendering sources that lay out with the token scale.
const RENDER_SOURCES: &[(&str, &str)] = &[
    ("avatar.rs", include_str!("avatar.rs")),
    ("badge.rs", include_str!("badge.rs")),
    ("banner.rs", include_str!("banner.rs")),
    ("button.rs", include_str!("button.rs")),
    ("date_picker.rs", include_str!("date_picker.rs")),
    ("drawer.rs", include_str!("drawer.rs")),
    ("modal.rs", include_str!("modal.rs")),
    ("overlay.rs", include_str!("overlay.rs")),
    ("popover.rs", include_str!("popover.rs")),
    ("popup.rs", include_str!("popup.rs")),
    ("primitives.rs", include_str!("primitives.rs")),
    ("select.rs", include_str!("select.rs")),
    ("spinner.rs", include_str!("spinner.rs")),
    ("stat_card.rs", include_str!("stat_card.rs")),
    ("tag.rs", include_str!("tag.rs")),
    ("toggle_group.rs", include_str!("toggle_group.rs")),
    ("tooltip.rs", include_str!("tooltip.rs")),
    ("utils.rs", include_str!("utils.rs")),
    ("complaint_board.rs", include_str!("../views/complaint_board.rs")),
    ("remote.rs", include_str!("../views/remote.rs")),
    ("room_changes.rs", include_str!("../views/room_changes.rs")),
];

/// gpui's fixed spacing, type and radius scales. Each step duplicates a
/// value the token scale already names.
const FIXED_SCALE_CALLS: &[&str] = &[
    ".p_", ".px_", ".py_", ".pt_", ".pb_", ".pl_", ".pr_", ".m_", ".mx_", ".my_", ".mt_",
    ".mb_", ".ml_", ".mr_", ".gap_", ".text_xs()", ".text_sm()", ".text_base()",
    ".text_lg()", ".text_xl()", ".text_2xl()", ".text_3xl()", ".rounded_none()",
    ".rounded_xs()", ".rounded_sm()", ".rounded_md()", ".rounded_lg()", ".rounded_xl()",
    ".rounded_full()",
];

/// Layout setters that must be fed from a token, never a numeric literal.
const TOKEN_SETTERS: &[&str] = &[
    ".size(px(", ".w(px(", ".h(px(", ".p(px(", ".px(px(", ".py(px(", ".pt(px(", ".gap(px(",
    ".text_size(px(", ".rounded(px(",
];

#[test]
fn components_never_hard_code_token_values() {
    let mut offenders = Vec::new();
    for (file, source) in RENDER_SOURCES {
        for (line_no, line) in source.lines().enumerate() {
            let code = line.split("//").next().unwrap_or_default();
            for call in FIXED_SCALE_CALLS {
                if code.contains(call) {
                    offenders.push(format!("{file}:{} {}", line_no + 1, line.trim()));
                }
            }
            for setter in TOKEN_SETTERS {
                let literal = code.match_indices(setter).any(|(at, _)| {
                    code[at + setter.len()..]
                        .chars()
                        .next()
                        .is_some_and(|ch| ch.is_ascii_digit())
                });
                if literal {
                    offenders.push(format!("{file}:{} {}", line_no + 1, line.trim()));
                }
            }
        }
    }
    assert!(offenders.is_empty(), "raw scale values: {offenders:#?}");
}

#[test]
fn panel_layouts_reference_registered_tokens() {
    let theme = Theme::default();
    let registry = theme.token_registry();
    let components = &theme.components;
    for layout in [
        components.modal.layout,
        components.drawer.layout,
        components.popover.layout,
        components.date_picker.layout,
        components.banner.layout,
        components.stat_card.layout,
        components.select.field,
        components.select.dropdown,
    ] {
        for key in [layout.padding.key(), layout.gap.key(), layout.item_gap.key()] {
            assert!(registry.contains(key), "{key}");
        }
        assert!(registry.contains(layout.body_size.key()));
    }
}
