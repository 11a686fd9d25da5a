use std::rc::Rc;

use gpui::{
    InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::id::ComponentId;
use crate::style::resolver::{Surface, shape_radius};
use crate::style::{InteractionState, ResolvedStyle, Shape, Size, StyleRecipe, Variant, resolve_surface};
use crate::theme::{LocalTheme, Theme};
use crate::tokens::{FontWeightToken, RadiusToken, Shadow};

use super::interaction_adapter::{ClickActivateHandler, PressAdapter, bind_press_adapter};
use super::utils::{apply_resolved, hsla};

type CloseHandler = Rc<dyn Fn(&SharedString, &mut Window, &mut gpui::App)>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TagRecipe {
    pub variant: Variant,
    pub size: Size,
    pub shape: Shape,
}

impl StyleRecipe for TagRecipe {
    fn resolve(&self, theme: &Theme, state: InteractionState) -> ResolvedStyle {
        let tokens = &theme.components.tag;
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

/// Label chip, optionally removable through a trailing close control.
#[derive(IntoElement)]
pub struct Tag {
    id: ComponentId,
    label: SharedString,
    variant: Variant,
    size: Size,
    shape: Shape,
    disabled: bool,
    on_close: Option<CloseHandler>,
    theme: LocalTheme,
}

impl Tag {
    #[track_caller]
    pub fn new(label: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("tag"),
            label: label.into(),
            variant: Variant::Secondary,
            size: Size::Medium,
            shape: Shape::Rounded,
            disabled: false,
            on_close: None,
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

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Makes the tag closable. The handler receives the tag label.
    pub fn on_close(
        mut self,
        handler: impl Fn(&SharedString, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_close = Some(Rc::new(handler));
        self
    }

    pub fn closable(&self) -> bool {
        self.on_close.is_some()
    }

    pub fn recipe(&self) -> TagRecipe {
        TagRecipe {
            variant: self.variant,
            size: self.size,
            shape: self.shape,
        }
    }
}

impl RenderOnce for Tag {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let styles = self.recipe().state_styles(&self.theme, self.disabled, false);

        let mut root = div()
            .id(self.id.clone())
            .flex()
            .flex_row()
            .flex_none()
            .items_center()
            .whitespace_nowrap();
        root = apply_resolved(root, &styles.base, window);
        root = root.child(self.label.clone());

        let Some(on_close) = self.on_close.clone() else {
            return root;
        };

        let label = self.label.clone();
        let close: ClickActivateHandler = Rc::new(
            move |_: &gpui::ClickEvent, window: &mut Window, cx: &mut gpui::App| {
                (on_close)(&label, window, cx);
            },
        );
        let fg = hsla(&styles.base.foreground);
        let icon_size = styles.base.icon_size;
        let close_button = div()
            .id(self.id.slot("close"))
            .flex()
            .items_center()
            .justify_center()
            .size(px(icon_size))
            .rounded(px(RadiusToken::Full.px()))
            .text_color(fg)
            .opacity(0.7)
            .child("×");
        let close_button = if self.disabled {
            close_button.cursor_not_allowed()
        } else {
            close_button
                .cursor_pointer()
                .hover(move |style| style.opacity(1.0).bg(fg.opacity(0.12)))
        };
        root.child(bind_press_adapter(
            close_button,
            PressAdapter::new(self.id.slot("close"))
                .enabled(!self.disabled)
                .on_click(Some(close)),
        ))
    }
}

crate::impl_variant_size_shape_via_methods!(Tag);
crate::impl_disableable!(Tag);
crate::impl_theme_overridable!(Tag);
