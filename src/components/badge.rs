use gpui::{
    AnyElement, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    div,
};

use crate::id::ComponentId;
use crate::style::resolver::{Surface, shape_radius};
use crate::style::{InteractionState, ResolvedStyle, Shape, Size, StyleRecipe, Variant, resolve_surface};
use crate::theme::{LocalTheme, Theme};
use crate::tokens::{FontWeightToken, Shadow};

use super::utils::apply_resolved;

type SlotRenderer = Box<dyn FnOnce() -> AnyElement>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BadgeRecipe {
    pub variant: Variant,
    pub size: Size,
    pub shape: Shape,
}

impl StyleRecipe for BadgeRecipe {
    fn resolve(&self, theme: &Theme, state: InteractionState) -> ResolvedStyle {
        let tokens = &theme.components.badge;
        resolve_surface(
            theme,
            Surface {
                variant: tokens.variants.get(self.variant),
                size: tokens.sizes.for_size(self.size),
                radius: shape_radius(self.shape, tokens.radius),
                font_weight: FontWeightToken::Medium,
                shadow: Shadow::None,
            },
            state,
        )
    }
}

/// Static status label.
#[derive(IntoElement)]
pub struct Badge {
    id: ComponentId,
    label: SharedString,
    variant: Variant,
    size: Size,
    shape: Shape,
    left_slot: Option<SlotRenderer>,
    theme: LocalTheme,
}

impl Badge {
    #[track_caller]
    pub fn new(label: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("badge"),
            label: label.into(),
            variant: Variant::Primary,
            size: Size::Small,
            shape: Shape::Pill,
            left_slot: None,
            theme: LocalTheme::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn left_slot(mut self, content: impl IntoElement + 'static) -> Self {
        self.left_slot = Some(Box::new(|| content.into_any_element()));
        self
    }

    pub fn recipe(&self) -> BadgeRecipe {
        BadgeRecipe {
            variant: self.variant,
            size: self.size,
            shape: self.shape,
        }
    }
}

impl RenderOnce for Badge {
    fn render(mut self, window: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let style = self.recipe().resolve(&self.theme, InteractionState::Default);

        let mut root = div()
            .id(self.id.clone())
            .flex()
            .flex_row()
            .flex_none()
            .items_center()
            .whitespace_nowrap();
        root = apply_resolved(root, &style, window);
        if let Some(left) = self.left_slot.take() {
            root = root.child(left());
        }
        root.child(self.label)
    }
}

crate::impl_variant_size_shape_via_methods!(Badge);
crate::impl_theme_overridable!(Badge);
