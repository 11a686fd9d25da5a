use std::collections::BTreeSet;

use crate::theme::{ColorValue, Theme};
use crate::tokens::{FontSize, FontWeightToken, IconSize, RadiusToken, Shadow, Space};

use super::{InteractionState, Shape, Size};

const INERT_OPACITY: f32 = 0.55;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GradientSpec {
    pub to: ColorValue,
    pub hover_to: ColorValue,
}

/// Colours of one variant at rest and under the pointer.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VariantSpec {
    pub background: ColorValue,
    pub foreground: ColorValue,
    pub border: Option<ColorValue>,
    pub hover_background: ColorValue,
    pub hover_foreground: ColorValue,
    pub gradient: Option<GradientSpec>,
}

impl VariantSpec {
    /// Hover colours default to the resting ones.
    pub fn new(background: ColorValue, foreground: ColorValue) -> Self {
        Self {
            hover_background: background.clone(),
            hover_foreground: foreground.clone(),
            background,
            foreground,
            border: None,
            gradient: None,
        }
    }

    pub fn hover(mut self, background: ColorValue, foreground: ColorValue) -> Self {
        self.hover_background = background;
        self.hover_foreground = foreground;
        self
    }

    pub fn border(mut self, border: ColorValue) -> Self {
        self.border = Some(border);
        self
    }

    pub fn gradient(mut self, to: ColorValue, hover_to: ColorValue) -> Self {
        self.gradient = Some(GradientSpec { to, hover_to });
        self
    }

    pub(crate) fn collect_tokens(&self, out: &mut BTreeSet<String>) {
        let mut values = vec![
            &self.background,
            &self.foreground,
            &self.hover_background,
            &self.hover_foreground,
        ];
        values.extend(self.border.as_ref());
        if let Some(gradient) = &self.gradient {
            values.push(&gradient.to);
            values.push(&gradient.hover_to);
        }
        out.extend(values.into_iter().filter_map(ColorValue::token_key));
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SizeSpec {
    pub padding_x: Space,
    pub padding_y: Space,
    pub font_size: FontSize,
    pub icon_size: IconSize,
    pub gap: Space,
}

impl SizeSpec {
    pub const fn new(
        padding_x: Space,
        padding_y: Space,
        font_size: FontSize,
        icon_size: IconSize,
        gap: Space,
    ) -> Self {
        Self {
            padding_x,
            padding_y,
            font_size,
            icon_size,
            gap,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SizeScale {
    pub small: SizeSpec,
    pub medium: SizeSpec,
    pub large: SizeSpec,
}

impl SizeScale {
    pub fn for_size(&self, size: Size) -> &SizeSpec {
        match size {
            Size::Small => &self.small,
            Size::Medium => &self.medium,
            Size::Large => &self.large,
        }
    }

    pub(crate) fn collect_tokens(&self, out: &mut BTreeSet<String>) {
        for spec in [&self.small, &self.medium, &self.large] {
            out.insert(spec.padding_x.key().to_string());
            out.insert(spec.padding_y.key().to_string());
            out.insert(spec.font_size.key().to_string());
            out.insert(spec.icon_size.key().to_string());
            out.insert(spec.gap.key().to_string());
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Transparent,
    Solid(String),
    Gradient { from: String, to: String, angle_deg: f32 },
}

impl Paint {
    fn solid(value: String) -> Self {
        if value == "transparent" {
            Self::Transparent
        } else {
            Self::Solid(value)
        }
    }

    pub fn to_background(&self) -> gpui::Background {
        match self {
            Self::Transparent => gpui::transparent_black().into(),
            Self::Solid(hex) => crate::theme::hsla_from_hex(hex).into(),
            Self::Gradient {
                from,
                to,
                angle_deg,
            } => gpui::linear_gradient(
                *angle_deg,
                gpui::linear_color_stop(crate::theme::hsla_from_hex(from), 0.0),
                gpui::linear_color_stop(crate::theme::hsla_from_hex(to), 1.0),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Cursor {
    #[default]
    Pointer,
    Default,
    NotAllowed,
}

/// Concrete style of one component instance in one interaction state.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    pub background: Paint,
    pub foreground: String,
    pub border: Option<String>,
    pub ring: Option<String>,
    pub opacity: f32,
    pub cursor: Cursor,
    pub padding_x: f32,
    pub padding_y: f32,
    pub font_size: f32,
    pub icon_size: f32,
    pub gap: f32,
    pub radius: f32,
    pub font_weight: u16,
    pub shadow: Shadow,
}

/// Everything about a surface that does not depend on interaction state.
#[derive(Clone, Copy, Debug)]
pub struct Surface<'a> {
    pub variant: &'a VariantSpec,
    pub size: &'a SizeSpec,
    pub radius: RadiusToken,
    pub font_weight: FontWeightToken,
    pub shadow: Shadow,
}

pub fn shape_radius(shape: Shape, base: RadiusToken) -> RadiusToken {
    match shape {
        Shape::Rounded => base,
        Shape::Pill | Shape::Circle => RadiusToken::Full,
        Shape::Square => RadiusToken::None,
    }
}

/// Resolves a surface against the theme. Pure: identical inputs give equal
/// outputs. Pressing steps the hover colours one palette stop darker. Inert
/// states keep the resting colours so hover and press never show through.
pub fn resolve_surface(theme: &Theme, surface: Surface<'_>, state: InteractionState) -> ResolvedStyle {
    let spec = surface.variant;
    let pressed = state == InteractionState::Active;
    let hovered = pressed || state == InteractionState::Hover;

    let (background, foreground) = if hovered {
        (&spec.hover_background, &spec.hover_foreground)
    } else {
        (&spec.background, &spec.foreground)
    };
    let press = |color: &ColorValue| {
        if pressed { color.darker() } else { color.clone() }
    };

    let background = match &spec.gradient {
        Some(gradient) => Paint::Gradient {
            from: theme.resolve_color(&press(background)),
            to: theme.resolve_color(&press(if hovered {
                &gradient.hover_to
            } else {
                &gradient.to
            })),
            angle_deg: 135.0,
        },
        None => Paint::solid(theme.resolve_color(&press(background))),
    };

    let (opacity, cursor) = if state.is_inert() {
        (INERT_OPACITY, Cursor::NotAllowed)
    } else {
        (1.0, Cursor::Pointer)
    };

    let shadow = match state {
        InteractionState::Active => Shadow::None,
        _ => surface.shadow,
    };

    let ring = (state == InteractionState::Focus)
        .then(|| theme.resolve_color(&theme.semantic.focus_ring));

    ResolvedStyle {
        background,
        foreground: theme.resolve_color(foreground),
        border: spec.border.as_ref().map(|border| theme.resolve_color(border)),
        ring,
        opacity,
        cursor,
        padding_x: surface.size.padding_x.px(),
        padding_y: surface.size.padding_y.px(),
        font_size: surface.size.font_size.px(),
        icon_size: surface.size.icon_size.px(),
        gap: surface.size.gap.px(),
        radius: surface.radius.px(),
        font_weight: surface.font_weight.weight(),
        shadow,
    }
}

/// A component's declarative props reduced to a style per interaction state.
pub trait StyleRecipe {
    fn resolve(&self, theme: &Theme, state: InteractionState) -> ResolvedStyle;

    /// Resting style plus the deltas gpui applies on hover, press and focus.
    /// Inert instances get no deltas at all.
    fn state_styles(&self, theme: &Theme, disabled: bool, loading: bool) -> StateStyles {
        let rest = InteractionState::Default.gated(disabled, loading);
        let base = self.resolve(theme, rest);
        if rest.is_inert() {
            return StateStyles {
                base,
                hover: None,
                active: None,
                focus: None,
            };
        }

        let differs = |state| {
            let style = self.resolve(theme, state);
            (style != base).then_some(style)
        };
        StateStyles {
            hover: differs(InteractionState::Hover),
            active: differs(InteractionState::Active),
            focus: differs(InteractionState::Focus),
            base,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StateStyles {
    pub base: ResolvedStyle,
    pub hover: Option<ResolvedStyle>,
    pub active: Option<ResolvedStyle>,
    pub focus: Option<ResolvedStyle>,
}
