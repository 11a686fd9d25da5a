pub mod config;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use crate::style::{SizeScale, SizeSpec, Variant, VariantSpec};
use crate::tokens::{
    COLOR_STOPS, FontSize, FontWeightToken, IconSize, PaletteKey, RadiusToken, Shadow, Space,
    TokenRegistry, color_key,
};

pub use config::{ThemeConfig, ThemeConfigError};

pub type PaletteScale = [String; COLOR_STOPS];

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ColorValue {
    Palette { key: PaletteKey, shade: u8 },
    White,
    Black,
    Transparent,
    Custom(String),
}

impl ColorValue {
    pub const fn palette(key: PaletteKey, shade: u8) -> Self {
        Self::Palette { key, shade }
    }

    /// Parses `white`, `black`, `transparent`, `#rrggbb[aa]` or `<palette>.<shade>`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().as_str() {
            "white" => return Some(Self::White),
            "black" => return Some(Self::Black),
            "transparent" => return Some(Self::Transparent),
            _ => {}
        }

        if let Some(hex) = raw.strip_prefix('#') {
            let valid = matches!(hex.len(), 3 | 4 | 6 | 8)
                && hex.chars().all(|ch| ch.is_ascii_hexdigit());
            return valid.then(|| Self::Custom(raw.to_string()));
        }

        let (name, shade) = raw.split_once('.')?;
        let key = PaletteKey::from_name(name)?;
        let shade = shade.parse::<u8>().ok()?;
        (usize::from(shade) < COLOR_STOPS).then_some(Self::Palette { key, shade })
    }

    /// One palette stop darker, clamped at the last stop. Keywords and literal
    /// colours have no scale to step along and come back unchanged.
    pub fn darker(&self) -> Self {
        match self {
            Self::Palette { key, shade } => Self::Palette {
                key: *key,
                shade: (*shade + 1).min(COLOR_STOPS as u8 - 1),
            },
            other => other.clone(),
        }
    }

    /// Registry key this value refers to; literal colours have none.
    pub fn token_key(&self) -> Option<String> {
        match self {
            Self::Palette { key, shade } => Some(color_key(*key, *shade)),
            Self::White => Some("color.white".to_string()),
            Self::Black => Some("color.black".to_string()),
            Self::Transparent => Some("color.transparent".to_string()),
            Self::Custom(_) => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SemanticColors {
    pub text_primary: ColorValue,
    pub text_secondary: ColorValue,
    pub text_muted: ColorValue,
    pub bg_canvas: ColorValue,
    pub bg_surface: ColorValue,
    pub bg_soft: ColorValue,
    pub border_subtle: ColorValue,
    pub border_strong: ColorValue,
    pub focus_ring: ColorValue,
    pub focus_ring_danger: ColorValue,
    pub status_info: ColorValue,
    pub status_success: ColorValue,
    pub status_warning: ColorValue,
    pub status_error: ColorValue,
    pub overlay_mask: ColorValue,
}

impl SemanticColors {
    pub const NAMES: [&'static str; 15] = [
        "text_primary",
        "text_secondary",
        "text_muted",
        "bg_canvas",
        "bg_surface",
        "bg_soft",
        "border_subtle",
        "border_strong",
        "focus_ring",
        "focus_ring_danger",
        "status_info",
        "status_success",
        "status_warning",
        "status_error",
        "overlay_mask",
    ];

    pub fn defaults_for(primary: PaletteKey, scheme: ColorScheme) -> Self {
        use PaletteKey::{Amber, Green, Red, Sky, Slate};
        match scheme {
            ColorScheme::Light => Self {
                text_primary: ColorValue::palette(Slate, 9),
                text_secondary: ColorValue::palette(Slate, 6),
                text_muted: ColorValue::palette(Slate, 5),
                bg_canvas: ColorValue::palette(Slate, 1),
                bg_surface: ColorValue::White,
                bg_soft: ColorValue::palette(Slate, 0),
                border_subtle: ColorValue::palette(Slate, 2),
                border_strong: ColorValue::palette(Slate, 3),
                focus_ring: ColorValue::palette(primary, 5),
                focus_ring_danger: ColorValue::palette(Red, 5),
                status_info: ColorValue::palette(Sky, 6),
                status_success: ColorValue::palette(Green, 6),
                status_warning: ColorValue::palette(Amber, 5),
                status_error: ColorValue::palette(Red, 6),
                overlay_mask: ColorValue::Custom("#0f172a80".to_string()),
            },
            ColorScheme::Dark => Self {
                text_primary: ColorValue::palette(Slate, 0),
                text_secondary: ColorValue::palette(Slate, 3),
                text_muted: ColorValue::palette(Slate, 4),
                bg_canvas: ColorValue::palette(Slate, 9),
                bg_surface: ColorValue::palette(Slate, 8),
                bg_soft: ColorValue::palette(Slate, 7),
                border_subtle: ColorValue::palette(Slate, 7),
                border_strong: ColorValue::palette(Slate, 6),
                focus_ring: ColorValue::palette(primary, 4),
                focus_ring_danger: ColorValue::palette(Red, 4),
                status_info: ColorValue::palette(Sky, 4),
                status_success: ColorValue::palette(Green, 4),
                status_warning: ColorValue::palette(Amber, 4),
                status_error: ColorValue::palette(Red, 4),
                overlay_mask: ColorValue::Custom("#020617b3".to_string()),
            },
        }
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut ColorValue> {
        let field = match name {
            "text_primary" => &mut self.text_primary,
            "text_secondary" => &mut self.text_secondary,
            "text_muted" => &mut self.text_muted,
            "bg_canvas" => &mut self.bg_canvas,
            "bg_surface" => &mut self.bg_surface,
            "bg_soft" => &mut self.bg_soft,
            "border_subtle" => &mut self.border_subtle,
            "border_strong" => &mut self.border_strong,
            "focus_ring" => &mut self.focus_ring,
            "focus_ring_danger" => &mut self.focus_ring_danger,
            "status_info" => &mut self.status_info,
            "status_success" => &mut self.status_success,
            "status_warning" => &mut self.status_warning,
            "status_error" => &mut self.status_error,
            "overlay_mask" => &mut self.overlay_mask,
            _ => return None,
        };
        Some(field)
    }

    pub(crate) fn values(&self) -> [&ColorValue; 15] {
        [
            &self.text_primary,
            &self.text_secondary,
            &self.text_muted,
            &self.bg_canvas,
            &self.bg_surface,
            &self.bg_soft,
            &self.border_subtle,
            &self.border_strong,
            &self.focus_ring,
            &self.focus_ring_danger,
            &self.status_info,
            &self.status_success,
            &self.status_warning,
            &self.status_error,
            &self.overlay_mask,
        ]
    }
}

/// One [`VariantSpec`] per [`Variant`]; lookups are exhaustive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariantTable {
    pub primary: VariantSpec,
    pub secondary: VariantSpec,
    pub success: VariantSpec,
    pub danger: VariantSpec,
    pub warning: VariantSpec,
    pub info: VariantSpec,
    pub outline: VariantSpec,
    pub white: VariantSpec,
    pub ghost: VariantSpec,
    pub gradient: VariantSpec,
}

impl VariantTable {
    pub fn get(&self, variant: Variant) -> &VariantSpec {
        match variant {
            Variant::Primary => &self.primary,
            Variant::Secondary => &self.secondary,
            Variant::Success => &self.success,
            Variant::Danger => &self.danger,
            Variant::Warning => &self.warning,
            Variant::Info => &self.info,
            Variant::Outline => &self.outline,
            Variant::White => &self.white,
            Variant::Ghost => &self.ghost,
            Variant::Gradient => &self.gradient,
        }
    }

    pub fn get_mut(&mut self, variant: Variant) -> &mut VariantSpec {
        match variant {
            Variant::Primary => &mut self.primary,
            Variant::Secondary => &mut self.secondary,
            Variant::Success => &mut self.success,
            Variant::Danger => &mut self.danger,
            Variant::Warning => &mut self.warning,
            Variant::Info => &mut self.info,
            Variant::Outline => &mut self.outline,
            Variant::White => &mut self.white,
            Variant::Ghost => &mut self.ghost,
            Variant::Gradient => &mut self.gradient,
        }
    }

    /// Solid, interactive colours used by buttons and toggle groups.
    pub fn solid(primary: PaletteKey, scheme: ColorScheme) -> Self {
        use PaletteKey::{Amber, Green, Red, Sky, Slate, Violet};
        let dark = scheme == ColorScheme::Dark;
        let filled = |key: PaletteKey, shade: u8| {
            VariantSpec::new(ColorValue::palette(key, shade), ColorValue::White)
                .hover(ColorValue::palette(key, shade + 1), ColorValue::White)
        };

        Self {
            primary: filled(primary, 6),
            secondary: if dark {
                VariantSpec::new(ColorValue::palette(Slate, 7), ColorValue::palette(Slate, 1))
                    .hover(ColorValue::palette(Slate, 6), ColorValue::palette(Slate, 0))
            } else {
                VariantSpec::new(ColorValue::palette(Slate, 1), ColorValue::palette(Slate, 8))
                    .hover(ColorValue::palette(Slate, 2), ColorValue::palette(Slate, 9))
            },
            success: filled(Green, 6),
            danger: filled(Red, 6),
            warning: filled(Amber, 5),
            info: filled(Sky, 6),
            outline: VariantSpec::new(ColorValue::Transparent, ColorValue::palette(primary, 6))
                .border(ColorValue::palette(primary, 6))
                .hover(
                    ColorValue::palette(primary, if dark { 9 } else { 0 }),
                    ColorValue::palette(primary, if dark { 4 } else { 7 }),
                ),
            white: VariantSpec::new(ColorValue::White, ColorValue::palette(Slate, 8))
                .border(ColorValue::palette(Slate, 2))
                .hover(ColorValue::palette(Slate, 0), ColorValue::palette(Slate, 9)),
            ghost: VariantSpec::new(
                ColorValue::Transparent,
                ColorValue::palette(Slate, if dark { 2 } else { 7 }),
            )
            .hover(
                ColorValue::palette(Slate, if dark { 7 } else { 1 }),
                ColorValue::palette(Slate, if dark { 0 } else { 9 }),
            ),
            gradient: VariantSpec::new(ColorValue::palette(primary, 5), ColorValue::White)
                .hover(ColorValue::palette(primary, 6), ColorValue::White)
                .gradient(ColorValue::palette(Violet, 6), ColorValue::palette(Violet, 7)),
        }
    }

    /// Soft tinted colours used by badges and tags; hover equals rest.
    pub fn soft(primary: PaletteKey, scheme: ColorScheme) -> Self {
        use PaletteKey::{Amber, Green, Red, Sky, Slate, Violet};
        let (bg_shade, fg_shade) = match scheme {
            ColorScheme::Light => (1, 8),
            ColorScheme::Dark => (9, 2),
        };
        let tint = |key: PaletteKey| {
            VariantSpec::new(
                ColorValue::palette(key, bg_shade),
                ColorValue::palette(key, fg_shade),
            )
        };

        Self {
            primary: tint(primary),
            secondary: tint(Slate),
            success: tint(Green),
            danger: tint(Red),
            warning: tint(Amber),
            info: tint(Sky),
            outline: VariantSpec::new(ColorValue::Transparent, ColorValue::palette(primary, 7))
                .border(ColorValue::palette(primary, 3)),
            white: VariantSpec::new(ColorValue::White, ColorValue::palette(Slate, 7))
                .border(ColorValue::palette(Slate, 2)),
            ghost: VariantSpec::new(ColorValue::Transparent, ColorValue::palette(Slate, 6)),
            gradient: VariantSpec::new(ColorValue::palette(primary, 5), ColorValue::White)
                .gradient(ColorValue::palette(Violet, 5), ColorValue::palette(Violet, 5)),
        }
    }

    fn collect_tokens(&self, out: &mut BTreeSet<String>) {
        for variant in Variant::ALL {
            self.get(variant).collect_tokens(out);
        }
    }
}

/// Spacing and type a panel lays its content out with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PanelLayout {
    pub padding: Space,
    /// Between stacked sections.
    pub gap: Space,
    /// Between items inside one row.
    pub item_gap: Space,
    pub title_size: FontSize,
    pub body_size: FontSize,
    pub caption_size: FontSize,
}

impl PanelLayout {
    pub const fn new(padding: Space, gap: Space, item_gap: Space) -> Self {
        Self {
            padding,
            gap,
            item_gap,
            title_size: FontSize::Lg,
            body_size: FontSize::Sm,
            caption_size: FontSize::Xs,
        }
    }

    pub const fn title_size(mut self, value: FontSize) -> Self {
        self.title_size = value;
        self
    }

    fn collect_tokens(&self, out: &mut BTreeSet<String>) {
        for space in [self.padding, self.gap, self.item_gap] {
            out.insert(space.key().to_string());
        }
        for size in [self.title_size, self.body_size, self.caption_size] {
            out.insert(size.key().to_string());
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ButtonTokens {
    pub variants: VariantTable,
    pub sizes: SizeScale,
    pub radius: RadiusToken,
    pub font_weight: FontWeightToken,
    pub shadow: Shadow,
    pub ripple: ColorValue,
    pub spinner: ColorValue,
    /// Between buttons of a detached group.
    pub group_gap: Space,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconButtonTokens {
    pub sizes: SizeScale,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToggleGroupTokens {
    pub track_bg: ColorValue,
    pub track_border: ColorValue,
    pub active: VariantSpec,
    pub inactive: VariantSpec,
    pub sizes: SizeScale,
    pub radius: RadiusToken,
    pub track_padding: Space,
    pub gap: Space,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectTokens {
    pub bg: ColorValue,
    pub fg: ColorValue,
    pub placeholder: ColorValue,
    pub border: ColorValue,
    pub border_focus: ColorValue,
    pub border_error: ColorValue,
    pub disabled_bg: ColorValue,
    pub dropdown_bg: ColorValue,
    pub dropdown_border: ColorValue,
    pub option_hover_bg: ColorValue,
    pub option_selected_bg: ColorValue,
    pub option_selected_fg: ColorValue,
    pub option_disabled_fg: ColorValue,
    pub label: ColorValue,
    pub error_text: ColorValue,
    pub sizes: SizeScale,
    pub radius: RadiusToken,
    pub field: PanelLayout,
    pub dropdown: PanelLayout,
    pub option_padding_x: Space,
    pub option_padding_y: Space,
    pub option_radius: RadiusToken,
    /// Dropdown width in px before the trigger has been measured.
    pub dropdown_min_width: u16,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DatePickerTokens {
    pub panel_bg: ColorValue,
    pub panel_border: ColorValue,
    pub header_fg: ColorValue,
    pub weekday_fg: ColorValue,
    pub day_fg: ColorValue,
    pub day_outside_fg: ColorValue,
    pub day_disabled_fg: ColorValue,
    pub day_hover_bg: ColorValue,
    pub day_selected_bg: ColorValue,
    pub day_selected_fg: ColorValue,
    pub today_border: ColorValue,
    pub shadow: Shadow,
    pub radius: RadiusToken,
    pub layout: PanelLayout,
    /// Side of one day cell in px.
    pub cell_size: u16,
    pub cell_radius: RadiusToken,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadgeTokens {
    pub variants: VariantTable,
    pub sizes: SizeScale,
    pub radius: RadiusToken,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TagTokens {
    pub variants: VariantTable,
    pub sizes: SizeScale,
    pub radius: RadiusToken,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AvatarTokens {
    pub fg: ColorValue,
    pub shade: u8,
    pub ring: ColorValue,
    pub swatches: Vec<PaletteKey>,
    pub font_sizes: [FontSize; 3],
    /// Small, medium and large diameters in px.
    pub diameters: [u16; 3],
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatCardTokens {
    pub bg: ColorValue,
    pub border: ColorValue,
    pub title: ColorValue,
    pub value: ColorValue,
    pub subtitle: ColorValue,
    pub trend_up: ColorValue,
    pub trend_down: ColorValue,
    pub trend_flat: ColorValue,
    pub accents: VariantTable,
    pub radius: RadiusToken,
    pub shadow: Shadow,
    pub hover_shadow: Shadow,
    pub layout: PanelLayout,
    /// Side of the accent icon tile in px.
    pub icon_tile: u16,
    pub grid_gap: Space,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BannerTokens {
    pub info: VariantSpec,
    pub success: VariantSpec,
    pub warning: VariantSpec,
    pub error: VariantSpec,
    pub radius: RadiusToken,
    pub layout: PanelLayout,
    pub icon_size: IconSize,
    pub dismiss_radius: RadiusToken,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModalTokens {
    pub overlay_bg: ColorValue,
    pub panel_bg: ColorValue,
    pub panel_border: ColorValue,
    pub title: ColorValue,
    pub body: ColorValue,
    pub radius: RadiusToken,
    pub shadow: Shadow,
    pub layout: PanelLayout,
    /// Gap kept between the panel and the window edge.
    pub inset: Space,
    /// Side of the close button in px.
    pub close_size: u16,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DrawerTokens {
    pub overlay_bg: ColorValue,
    pub panel_bg: ColorValue,
    pub panel_border: ColorValue,
    pub title: ColorValue,
    pub body: ColorValue,
    pub shadow: Shadow,
    pub layout: PanelLayout,
    pub close_size: u16,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PopoverTokens {
    pub bg: ColorValue,
    pub border: ColorValue,
    pub fg: ColorValue,
    pub radius: RadiusToken,
    pub shadow: Shadow,
    pub layout: PanelLayout,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TooltipTokens {
    pub bg: ColorValue,
    pub fg: ColorValue,
    pub radius: RadiusToken,
    pub font_size: FontSize,
    pub padding_x: Space,
    pub padding_y: Space,
    pub max_width: u16,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComponentTokens {
    pub button: ButtonTokens,
    pub icon_button: IconButtonTokens,
    pub toggle_group: ToggleGroupTokens,
    pub select: SelectTokens,
    pub date_picker: DatePickerTokens,
    pub badge: BadgeTokens,
    pub tag: TagTokens,
    pub avatar: AvatarTokens,
    pub stat_card: StatCardTokens,
    pub banner: BannerTokens,
    pub modal: ModalTokens,
    pub drawer: DrawerTokens,
    pub popover: PopoverTokens,
    pub tooltip: TooltipTokens,
}

impl ComponentTokens {
    pub fn defaults_for(primary: PaletteKey, scheme: ColorScheme) -> Self {
        use PaletteKey::{Amber, Green, Red, Sky, Slate};
        let semantic = SemanticColors::defaults_for(primary, scheme);
        let dark = scheme == ColorScheme::Dark;
        let solid = VariantTable::solid(primary, scheme);
        let soft = VariantTable::soft(primary, scheme);

        let button_sizes = SizeScale {
            small: SizeSpec::new(Space::Md, Space::Xs, FontSize::Sm, IconSize::Sm, Space::Xs),
            medium: SizeSpec::new(Space::Lg, Space::Sm, FontSize::Sm, IconSize::Md, Space::Sm),
            large: SizeSpec::new(Space::Xl, Space::Md, FontSize::Md, IconSize::Lg, Space::Sm),
        };
        let banner = |key: PaletteKey| {
            VariantSpec::new(
                ColorValue::palette(key, if dark { 9 } else { 0 }),
                ColorValue::palette(key, if dark { 2 } else { 8 }),
            )
            .border(ColorValue::palette(key, if dark { 7 } else { 2 }))
        };

        Self {
            button: ButtonTokens {
                variants: solid.clone(),
                sizes: button_sizes.clone(),
                radius: RadiusToken::Md,
                font_weight: FontWeightToken::Semibold,
                shadow: Shadow::Sm,
                ripple: ColorValue::Custom("#ffffff59".to_string()),
                spinner: ColorValue::White,
                group_gap: Space::Sm,
            },
            icon_button: IconButtonTokens {
                sizes: SizeScale {
                    small: SizeSpec::new(Space::Xs, Space::Xs, FontSize::Xs, IconSize::Sm, Space::None),
                    medium: SizeSpec::new(Space::Sm, Space::Sm, FontSize::Sm, IconSize::Md, Space::None),
                    large: SizeSpec::new(Space::Md, Space::Md, FontSize::Md, IconSize::Lg, Space::None),
                },
            },
            toggle_group: ToggleGroupTokens {
                track_bg: semantic.bg_soft.clone(),
                track_border: semantic.border_subtle.clone(),
                active: solid.primary.clone(),
                inactive: VariantSpec::new(ColorValue::Transparent, semantic.text_secondary.clone())
                    .hover(semantic.bg_surface.clone(), semantic.text_primary.clone()),
                sizes: SizeScale {
                    small: SizeSpec::new(Space::Sm, Space::Xs, FontSize::Xs, IconSize::Xs, Space::Xs),
                    medium: SizeSpec::new(Space::Md, Space::Xs, FontSize::Sm, IconSize::Sm, Space::Xs),
                    large: SizeSpec::new(Space::Lg, Space::Sm, FontSize::Md, IconSize::Md, Space::Sm),
                },
                radius: RadiusToken::Md,
                track_padding: Space::Xxs,
                gap: Space::Xs,
            },
            select: SelectTokens {
                bg: semantic.bg_surface.clone(),
                fg: semantic.text_primary.clone(),
                placeholder: semantic.text_muted.clone(),
                border: semantic.border_strong.clone(),
                border_focus: ColorValue::palette(primary, 5),
                border_error: ColorValue::palette(Red, 5),
                disabled_bg: semantic.bg_soft.clone(),
                dropdown_bg: semantic.bg_surface.clone(),
                dropdown_border: semantic.border_subtle.clone(),
                option_hover_bg: semantic.bg_soft.clone(),
                option_selected_bg: ColorValue::palette(primary, if dark { 9 } else { 0 }),
                option_selected_fg: ColorValue::palette(primary, if dark { 3 } else { 7 }),
                option_disabled_fg: semantic.text_muted.clone(),
                label: semantic.text_secondary.clone(),
                error_text: semantic.status_error.clone(),
                sizes: SizeScale {
                    small: SizeSpec::new(Space::Md, Space::Xs, FontSize::Sm, IconSize::Sm, Space::Xs),
                    medium: SizeSpec::new(Space::Md, Space::Sm, FontSize::Sm, IconSize::Md, Space::Sm),
                    large: SizeSpec::new(Space::Lg, Space::Md, FontSize::Md, IconSize::Lg, Space::Sm),
                },
                radius: RadiusToken::Md,
                field: PanelLayout::new(Space::None, Space::Sm, Space::Xs),
                dropdown: PanelLayout::new(Space::Xs, Space::Xxs, Space::Xs),
                option_padding_x: Space::Md,
                option_padding_y: Space::Sm,
                option_radius: RadiusToken::Sm,
                dropdown_min_width: 160,
            },
            date_picker: DatePickerTokens {
                panel_bg: semantic.bg_surface.clone(),
                panel_border: semantic.border_subtle.clone(),
                header_fg: semantic.text_primary.clone(),
                weekday_fg: semantic.text_muted.clone(),
                day_fg: semantic.text_primary.clone(),
                day_outside_fg: semantic.text_muted.clone(),
                day_disabled_fg: semantic.border_strong.clone(),
                day_hover_bg: semantic.bg_soft.clone(),
                day_selected_bg: ColorValue::palette(primary, 6),
                day_selected_fg: ColorValue::White,
                today_border: ColorValue::palette(primary, 4),
                shadow: Shadow::Lg,
                radius: RadiusToken::Lg,
                layout: PanelLayout::new(Space::Md, Space::Xs, Space::Sm),
                cell_size: 34,
                cell_radius: RadiusToken::Md,
            },
            badge: BadgeTokens {
                variants: soft.clone(),
                sizes: SizeScale {
                    small: SizeSpec::new(Space::Xs, Space::None, FontSize::Xs, IconSize::Xs, Space::Xxs),
                    medium: SizeSpec::new(Space::Sm, Space::Xxs, FontSize::Xs, IconSize::Xs, Space::Xs),
                    large: SizeSpec::new(Space::Md, Space::Xs, FontSize::Sm, IconSize::Sm, Space::Xs),
                },
                radius: RadiusToken::Full,
            },
            tag: TagTokens {
                variants: soft.clone(),
                sizes: SizeScale {
                    small: SizeSpec::new(Space::Sm, Space::Xxs, FontSize::Xs, IconSize::Xs, Space::Xs),
                    medium: SizeSpec::new(Space::Md, Space::Xs, FontSize::Sm, IconSize::Sm, Space::Xs),
                    large: SizeSpec::new(Space::Lg, Space::Xs, FontSize::Md, IconSize::Md, Space::Sm),
                },
                radius: RadiusToken::Sm,
            },
            avatar: AvatarTokens {
                fg: ColorValue::White,
                shade: 6,
                ring: semantic.bg_surface.clone(),
                swatches: vec![
                    PaletteKey::Blue,
                    PaletteKey::Emerald,
                    PaletteKey::Violet,
                    PaletteKey::Orange,
                    PaletteKey::Pink,
                    PaletteKey::Teal,
                    PaletteKey::Indigo,
                    PaletteKey::Amber,
                ],
                font_sizes: [FontSize::Xs, FontSize::Sm, FontSize::Lg],
                diameters: [28, 36, 48],
            },
            stat_card: StatCardTokens {
                bg: semantic.bg_surface.clone(),
                border: semantic.border_subtle.clone(),
                title: semantic.text_secondary.clone(),
                value: semantic.text_primary.clone(),
                subtitle: semantic.text_muted.clone(),
                trend_up: ColorValue::palette(Green, if dark { 4 } else { 6 }),
                trend_down: ColorValue::palette(Red, if dark { 4 } else { 6 }),
                trend_flat: ColorValue::palette(Slate, if dark { 4 } else { 5 }),
                accents: soft,
                radius: RadiusToken::Xl,
                shadow: Shadow::Sm,
                hover_shadow: Shadow::Md,
                layout: PanelLayout::new(Space::Xl, Space::Xs, Space::Md).title_size(FontSize::Xxl),
                icon_tile: 44,
                grid_gap: Space::Lg,
            },
            banner: BannerTokens {
                info: banner(Sky),
                success: banner(Green),
                warning: banner(Amber),
                error: banner(Red),
                radius: RadiusToken::Md,
                layout: PanelLayout::new(Space::Md, Space::Xxs, Space::Sm).title_size(FontSize::Md),
                icon_size: IconSize::Lg,
                dismiss_radius: RadiusToken::Sm,
            },
            modal: ModalTokens {
                overlay_bg: semantic.overlay_mask.clone(),
                panel_bg: semantic.bg_surface.clone(),
                panel_border: semantic.border_subtle.clone(),
                title: semantic.text_primary.clone(),
                body: semantic.text_secondary.clone(),
                radius: RadiusToken::Xl,
                shadow: Shadow::Xl,
                layout: PanelLayout::new(Space::Xl, Space::Lg, Space::Md),
                inset: Space::Lg,
                close_size: 28,
            },
            drawer: DrawerTokens {
                overlay_bg: semantic.overlay_mask.clone(),
                panel_bg: semantic.bg_surface.clone(),
                panel_border: semantic.border_subtle.clone(),
                title: semantic.text_primary.clone(),
                body: semantic.text_secondary.clone(),
                shadow: Shadow::Xl,
                layout: PanelLayout::new(Space::Xl, Space::Lg, Space::Md),
                close_size: 28,
            },
            popover: PopoverTokens {
                bg: semantic.bg_surface.clone(),
                border: semantic.border_subtle.clone(),
                fg: semantic.text_primary.clone(),
                radius: RadiusToken::Lg,
                shadow: Shadow::Lg,
                layout: PanelLayout::new(Space::Md, Space::Sm, Space::Sm),
            },
            tooltip: TooltipTokens {
                bg: ColorValue::palette(Slate, if dark { 0 } else { 8 }),
                fg: ColorValue::palette(Slate, if dark { 9 } else { 0 }),
                radius: RadiusToken::Sm,
                font_size: FontSize::Xs,
                padding_x: Space::Sm,
                padding_y: Space::Xs,
                max_width: 280,
            },
        }
    }

    /// Every token key referenced by a component table.
    pub fn token_refs(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let colors = |out: &mut BTreeSet<String>, values: &[&ColorValue]| {
            for value in values {
                if let Some(key) = value.token_key() {
                    out.insert(key);
                }
            }
        };

        let button = &self.button;
        button.variants.collect_tokens(&mut out);
        button.sizes.collect_tokens(&mut out);
        out.insert(button.radius.key().to_string());
        out.insert(button.font_weight.key().to_string());
        out.insert(button.shadow.key().to_string());
        colors(&mut out, &[&button.ripple, &button.spinner]);
        out.insert(button.group_gap.key().to_string());

        self.icon_button.sizes.collect_tokens(&mut out);

        let toggle = &self.toggle_group;
        colors(&mut out, &[&toggle.track_bg, &toggle.track_border]);
        toggle.active.collect_tokens(&mut out);
        toggle.inactive.collect_tokens(&mut out);
        toggle.sizes.collect_tokens(&mut out);
        out.insert(toggle.radius.key().to_string());
        out.insert(toggle.track_padding.key().to_string());
        out.insert(toggle.gap.key().to_string());

        let select = &self.select;
        colors(
            &mut out,
            &[
                &select.bg,
                &select.fg,
                &select.placeholder,
                &select.border,
                &select.border_focus,
                &select.border_error,
                &select.disabled_bg,
                &select.dropdown_bg,
                &select.dropdown_border,
                &select.option_hover_bg,
                &select.option_selected_bg,
                &select.option_selected_fg,
                &select.option_disabled_fg,
                &select.label,
                &select.error_text,
            ],
        );
        select.sizes.collect_tokens(&mut out);
        out.insert(select.radius.key().to_string());
        select.field.collect_tokens(&mut out);
        select.dropdown.collect_tokens(&mut out);
        out.insert(select.option_padding_x.key().to_string());
        out.insert(select.option_padding_y.key().to_string());
        out.insert(select.option_radius.key().to_string());

        let picker = &self.date_picker;
        colors(
            &mut out,
            &[
                &picker.panel_bg,
                &picker.panel_border,
                &picker.header_fg,
                &picker.weekday_fg,
                &picker.day_fg,
                &picker.day_outside_fg,
                &picker.day_disabled_fg,
                &picker.day_hover_bg,
                &picker.day_selected_bg,
                &picker.day_selected_fg,
                &picker.today_border,
            ],
        );
        out.insert(picker.shadow.key().to_string());
        out.insert(picker.radius.key().to_string());
        out.insert(picker.cell_radius.key().to_string());
        picker.layout.collect_tokens(&mut out);

        self.badge.variants.collect_tokens(&mut out);
        self.badge.sizes.collect_tokens(&mut out);
        out.insert(self.badge.radius.key().to_string());
        self.tag.variants.collect_tokens(&mut out);
        self.tag.sizes.collect_tokens(&mut out);
        out.insert(self.tag.radius.key().to_string());

        let avatar = &self.avatar;
        colors(&mut out, &[&avatar.fg, &avatar.ring]);
        for swatch in &avatar.swatches {
            out.insert(color_key(*swatch, avatar.shade));
        }
        for size in avatar.font_sizes {
            out.insert(size.key().to_string());
        }

        let card = &self.stat_card;
        colors(
            &mut out,
            &[
                &card.bg,
                &card.border,
                &card.title,
                &card.value,
                &card.subtitle,
                &card.trend_up,
                &card.trend_down,
                &card.trend_flat,
            ],
        );
        card.accents.collect_tokens(&mut out);
        out.insert(card.radius.key().to_string());
        out.insert(card.shadow.key().to_string());
        out.insert(card.hover_shadow.key().to_string());
        out.insert(card.grid_gap.key().to_string());
        card.layout.collect_tokens(&mut out);

        let banner = &self.banner;
        for spec in [&banner.info, &banner.success, &banner.warning, &banner.error] {
            spec.collect_tokens(&mut out);
        }
        out.insert(banner.radius.key().to_string());
        out.insert(banner.dismiss_radius.key().to_string());
        out.insert(banner.icon_size.key().to_string());
        banner.layout.collect_tokens(&mut out);

        let modal = &self.modal;
        colors(
            &mut out,
            &[
                &modal.overlay_bg,
                &modal.panel_bg,
                &modal.panel_border,
                &modal.title,
                &modal.body,
            ],
        );
        out.insert(modal.radius.key().to_string());
        out.insert(modal.shadow.key().to_string());
        out.insert(modal.inset.key().to_string());
        modal.layout.collect_tokens(&mut out);

        let drawer = &self.drawer;
        colors(
            &mut out,
            &[
                &drawer.overlay_bg,
                &drawer.panel_bg,
                &drawer.panel_border,
                &drawer.title,
                &drawer.body,
            ],
        );
        out.insert(drawer.shadow.key().to_string());
        drawer.layout.collect_tokens(&mut out);

        let popover = &self.popover;
        colors(&mut out, &[&popover.bg, &popover.border, &popover.fg]);
        out.insert(popover.radius.key().to_string());
        out.insert(popover.shadow.key().to_string());
        popover.layout.collect_tokens(&mut out);

        let tooltip = &self.tooltip;
        colors(&mut out, &[&tooltip.bg, &tooltip.fg]);
        out.insert(tooltip.radius.key().to_string());
        out.insert(tooltip.font_size.key().to_string());
        out.insert(tooltip.padding_x.key().to_string());
        out.insert(tooltip.padding_y.key().to_string());

        out
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Theme {
    pub primary_color: PaletteKey,
    pub color_scheme: ColorScheme,
    pub palette: BTreeMap<PaletteKey, PaletteScale>,
    pub semantic: SemanticColors,
    pub components: ComponentTokens,
    /// Every patch merged so far. Regenerating the defaults for a new
    /// primary colour or scheme re-applies it.
    overrides: ThemePatch,
}

impl Default for Theme {
    fn default() -> Self {
        let primary = PaletteKey::Indigo;
        Self {
            primary_color: primary,
            color_scheme: ColorScheme::Light,
            palette: PaletteKey::ALL
                .into_iter()
                .map(|key| (key, key.scale().map(str::to_string)))
                .collect(),
            semantic: SemanticColors::defaults_for(primary, ColorScheme::Light),
            components: ComponentTokens::defaults_for(primary, ColorScheme::Light),
            overrides: ThemePatch::default(),
        }
    }
}

impl Theme {
    pub fn with_primary_color(mut self, primary: PaletteKey) -> Self {
        self.primary_color = primary;
        self.regenerate();
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self.regenerate();
        self
    }

    pub fn overrides(&self) -> &ThemePatch {
        &self.overrides
    }

    fn regenerate(&mut self) {
        self.semantic = SemanticColors::defaults_for(self.primary_color, self.color_scheme);
        self.components = ComponentTokens::defaults_for(self.primary_color, self.color_scheme);
        let overrides = std::mem::take(&mut self.overrides);
        self.apply(&overrides);
        self.overrides = overrides;
    }

    pub fn with_palette_override(mut self, key: PaletteKey, scale: PaletteScale) -> Self {
        self.palette.insert(key, scale);
        self
    }

    /// `None` when a palette reference points outside the palette.
    pub fn try_resolve_color(&self, token: &ColorValue) -> Option<String> {
        match token {
            ColorValue::Palette { key, shade } => self
                .palette
                .get(key)
                .and_then(|scale| scale.get(usize::from(*shade)))
                .cloned(),
            ColorValue::White => Some("#ffffff".to_string()),
            ColorValue::Black => Some("#000000".to_string()),
            ColorValue::Transparent => Some("transparent".to_string()),
            ColorValue::Custom(value) => Some(value.clone()),
        }
    }

    pub fn resolve_color(&self, token: &ColorValue) -> String {
        self.try_resolve_color(token)
            .unwrap_or_else(|| "#000000".to_string())
    }

    pub fn resolve_hsla(&self, token: &ColorValue) -> gpui::Hsla {
        hsla_from_hex(&self.resolve_color(token))
    }

    pub fn token_registry(&self) -> TokenRegistry {
        TokenRegistry::with_palette(&self.palette)
    }

    /// Token keys referenced by the semantic layer and every component table.
    pub fn token_refs(&self) -> BTreeSet<String> {
        let mut refs = self.components.token_refs();
        for value in self.semantic.values() {
            if let Some(key) = value.token_key() {
                refs.insert(key);
            }
        }
        refs
    }

    /// Layers `patch` over this theme. Overrides from earlier merges survive
    /// a later change of primary colour or scheme.
    pub fn merged(&self, patch: &ThemePatch) -> Self {
        let mut next = self.clone();
        next.overrides.layer(patch);
        let regenerate = patch.primary_color.is_some() || patch.color_scheme.is_some();
        if let Some(primary) = patch.primary_color {
            next.primary_color = primary;
        }
        if let Some(scheme) = patch.color_scheme {
            next.color_scheme = scheme;
        }
        if regenerate {
            next.regenerate();
        } else {
            next.apply(patch);
        }
        next
    }

    fn apply(&mut self, patch: &ThemePatch) {
        for (key, scale) in &patch.palette_overrides {
            self.palette.insert(*key, scale.clone());
        }
        for (name, value) in &patch.semantic {
            match self.semantic.field_mut(name) {
                Some(slot) => *slot = value.clone(),
                None => tracing::warn!(token = %name, "ignoring unknown semantic colour override"),
            }
        }
        for (variant, variant_patch) in &patch.button_variants {
            variant_patch.apply(self.components.button.variants.get_mut(*variant));
        }
        for (variant, variant_patch) in &patch.badge_variants {
            variant_patch.apply(self.components.badge.variants.get_mut(*variant));
        }
    }
}

pub(crate) fn hsla_from_hex(raw: &str) -> gpui::Hsla {
    if raw == "transparent" {
        return gpui::transparent_black();
    }
    gpui::Rgba::try_from(raw)
        .map(Into::into)
        .unwrap_or_else(|_| gpui::black())
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VariantPatch {
    pub background: Option<ColorValue>,
    pub foreground: Option<ColorValue>,
    pub border: Option<ColorValue>,
    pub hover_background: Option<ColorValue>,
    pub hover_foreground: Option<ColorValue>,
}

impl VariantPatch {
    fn layer(&mut self, other: &VariantPatch) {
        let fields = [
            (&mut self.background, &other.background),
            (&mut self.foreground, &other.foreground),
            (&mut self.border, &other.border),
            (&mut self.hover_background, &other.hover_background),
            (&mut self.hover_foreground, &other.hover_foreground),
        ];
        for (slot, value) in fields {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
    }

    fn apply(&self, spec: &mut VariantSpec) {
        if let Some(value) = &self.background {
            spec.background = value.clone();
        }
        if let Some(value) = &self.foreground {
            spec.foreground = value.clone();
        }
        if let Some(value) = &self.border {
            spec.border = Some(value.clone());
        }
        if let Some(value) = &self.hover_background {
            spec.hover_background = value.clone();
        }
        if let Some(value) = &self.hover_foreground {
            spec.hover_foreground = value.clone();
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ThemePatch {
    pub primary_color: Option<PaletteKey>,
    pub color_scheme: Option<ColorScheme>,
    pub palette_overrides: BTreeMap<PaletteKey, PaletteScale>,
    pub semantic: BTreeMap<String, ColorValue>,
    pub button_variants: BTreeMap<Variant, VariantPatch>,
    pub badge_variants: BTreeMap<Variant, VariantPatch>,
}

impl ThemePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Folds `other` into this patch; its values win.
    pub fn layer(&mut self, other: &ThemePatch) {
        if other.primary_color.is_some() {
            self.primary_color = other.primary_color;
        }
        if other.color_scheme.is_some() {
            self.color_scheme = other.color_scheme;
        }
        self.palette_overrides.extend(
            other
                .palette_overrides
                .iter()
                .map(|(key, scale)| (*key, scale.clone())),
        );
        self.semantic.extend(
            other
                .semantic
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        for (variant, patch) in &other.button_variants {
            self.button_variants.entry(*variant).or_default().layer(patch);
        }
        for (variant, patch) in &other.badge_variants {
            self.badge_variants.entry(*variant).or_default().layer(patch);
        }
    }
}

/// Theme as seen by one component instance: the provider's theme plus an
/// optional instance-level patch.
#[derive(Clone, Debug, Default)]
pub struct LocalTheme {
    resolved: Option<Arc<Theme>>,
    patch: Option<ThemePatch>,
}

impl LocalTheme {
    pub fn with_patch(mut self, patch: ThemePatch) -> Self {
        self.set_patch(Some(patch));
        self
    }

    pub fn set_patch(&mut self, patch: Option<ThemePatch>) {
        self.patch = patch;
        self.resolved = None;
    }

    pub fn update_patch(&mut self, configure: impl FnOnce(ThemePatch) -> ThemePatch) {
        let current = self.patch.take().unwrap_or_default();
        self.set_patch(Some(configure(current)));
    }

    pub fn sync_from_provider(&mut self, cx: &gpui::App) {
        let base = crate::provider::HostelProvider::theme(cx);
        self.sync_from(base);
    }

    pub fn sync_from(&mut self, base: Arc<Theme>) {
        self.resolved = Some(match &self.patch {
            Some(patch) if !patch.is_empty() => Arc::new(base.merged(patch)),
            _ => base,
        });
    }

    fn fallback_theme() -> &'static Theme {
        static FALLBACK: OnceLock<Theme> = OnceLock::new();
        FALLBACK.get_or_init(Theme::default)
    }
}

impl std::ops::Deref for LocalTheme {
    type Target = Theme;

    fn deref(&self) -> &Self::Target {
        match self.resolved.as_deref() {
            Some(resolved) => resolved,
            None => Self::fallback_theme(),
        }
    }
}
