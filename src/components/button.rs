use std::rc::Rc;

use gpui::{
    AnyElement, ClickEvent, FocusHandle, InteractiveElement, IntoElement, MouseButton,
    ParentElement, RenderOnce, SharedString, Styled, Window, canvas, div, px,
};

use crate::contracts::MotionAware;
use crate::id::ComponentId;
use crate::motion::MotionConfig;
use crate::style::{
    InteractionState, Orientation, ResolvedStyle, Shape, Size, StyleRecipe, Variant,
    resolve_surface,
};
use crate::style::resolver::{Surface, shape_radius};
use crate::theme::Theme;
use crate::tokens::{RadiusToken, Shadow};

use super::control;
use super::interaction_adapter::{PressAdapter, bind_press_adapter, press_allowed};
use super::primitives::{fill_layer, h_stack};
use super::ripple;
use super::spinner::Spinner;
use super::transition::TransitionExt;
use super::utils::{PressHandler, apply_resolved, apply_state_styles, hsla};

type SlotRenderer = Box<dyn FnOnce() -> AnyElement>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ButtonAnimation {
    #[default]
    None,
    Ripple,
}

/// Style inputs of a button-like surface.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ButtonRecipe {
    pub variant: Variant,
    pub size: Size,
    pub shape: Shape,
    pub icon_only: bool,
}

impl StyleRecipe for ButtonRecipe {
    fn resolve(&self, theme: &Theme, state: InteractionState) -> ResolvedStyle {
        let tokens = &theme.components.button;
        let sizes = if self.icon_only {
            &theme.components.icon_button.sizes
        } else {
            &tokens.sizes
        };
        let shadow = match self.variant {
            Variant::Outline | Variant::Ghost => Shadow::None,
            _ => tokens.shadow,
        };
        resolve_surface(
            theme,
            Surface {
                variant: tokens.variants.get(self.variant),
                size: sizes.for_size(self.size),
                radius: shape_radius(self.shape, tokens.radius),
                font_weight: tokens.font_weight,
                shadow,
            },
            state,
        )
    }
}

/// Which outer corners of a grouped button keep their radius.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Corners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

impl Corners {
    pub const ALL: Corners = Corners {
        top_left: true,
        top_right: true,
        bottom_right: true,
        bottom_left: true,
    };
    pub const NONE: Corners = Corners {
        top_left: false,
        top_right: false,
        bottom_right: false,
        bottom_left: false,
    };
}

/// Corner rule for attached groups: the first child keeps its leading
/// corners, the last its trailing corners, the middle ones none.
pub fn attached_corners(index: usize, len: usize, orientation: Orientation) -> Corners {
    if len <= 1 {
        return Corners::ALL;
    }
    let first = index == 0;
    let last = index + 1 == len;
    match orientation {
        Orientation::Horizontal => Corners {
            top_left: first,
            bottom_left: first,
            top_right: last,
            bottom_right: last,
        },
        Orientation::Vertical => Corners {
            top_left: first,
            top_right: first,
            bottom_left: last,
            bottom_right: last,
        },
    }
}

fn apply_corners<T: Styled>(node: T, corners: Corners, radius: f32) -> T {
    let corner = |keep: bool| px(if keep { radius } else { 0.0 });
    node.rounded_tl(corner(corners.top_left))
        .rounded_tr(corner(corners.top_right))
        .rounded_br(corner(corners.bottom_right))
        .rounded_bl(corner(corners.bottom_left))
}

#[derive(IntoElement)]
pub struct Button {
    id: ComponentId,
    label: Option<SharedString>,
    variant: Variant,
    size: Size,
    shape: Shape,
    disabled: bool,
    loading: bool,
    full_width: bool,
    animation: ButtonAnimation,
    left_icon: Option<SlotRenderer>,
    right_icon: Option<SlotRenderer>,
    corners: Option<Corners>,
    theme: crate::theme::LocalTheme,
    motion: MotionConfig,
    on_click: Option<PressHandler>,
    focus_handle: Option<FocusHandle>,
}

impl Button {
    #[track_caller]
    pub fn new(label: impl Into<SharedString>) -> Self {
        Self::without_label().label(label)
    }

    #[track_caller]
    pub fn without_label() -> Self {
        Self {
            id: ComponentId::auto("button"),
            label: None,
            variant: Variant::Primary,
            size: Size::Medium,
            shape: Shape::Rounded,
            disabled: false,
            loading: false,
            full_width: false,
            animation: ButtonAnimation::None,
            left_icon: None,
            right_icon: None,
            corners: None,
            theme: crate::theme::LocalTheme::default(),
            motion: MotionConfig::none(),
            on_click: None,
            focus_handle: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
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

    /// Shortcut for the gradient variant.
    pub fn gradient(mut self, gradient: bool) -> Self {
        if gradient {
            self.variant = Variant::Gradient;
        }
        self
    }

    /// Shortcut for the pill shape.
    pub fn rounded(mut self, rounded: bool) -> Self {
        if rounded {
            self.shape = Shape::Pill;
        }
        self
    }

    pub fn icon(self, content: impl IntoElement + 'static) -> Self {
        self.left_icon(content)
    }

    pub fn left_icon(mut self, content: impl IntoElement + 'static) -> Self {
        self.left_icon = Some(Box::new(|| content.into_any_element()));
        self
    }

    pub fn right_icon(mut self, content: impl IntoElement + 'static) -> Self {
        self.right_icon = Some(Box::new(|| content.into_any_element()));
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn animation(mut self, animation: ButtonAnimation) -> Self {
        self.animation = animation;
        self
    }

    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    pub fn focus_handle(mut self, value: FocusHandle) -> Self {
        self.focus_handle = Some(value);
        self
    }

    pub(crate) fn corners(mut self, corners: Corners) -> Self {
        self.corners = Some(corners);
        self
    }

    pub fn recipe(&self) -> ButtonRecipe {
        ButtonRecipe {
            variant: self.variant,
            size: self.size,
            shape: self.shape,
            icon_only: false,
        }
    }

    fn render_content(&mut self, style: &ResolvedStyle) -> AnyElement {
        let fg = hsla(&style.foreground);
        let mut row = h_stack().gap(px(style.gap)).text_color(fg);
        if let Some(left) = self.left_icon.take() {
            row = row.child(left());
        }
        if let Some(label) = self.label.clone() {
            row = row.child(div().child(label));
        }
        if let Some(right) = self.right_icon.take() {
            row = row.child(right());
        }

        if !self.loading {
            return row.into_any_element();
        }

        div()
            .relative()
            .child(row.invisible())
            .child(
                fill_layer().flex().items_center().justify_center().child(
                    Spinner::new()
                        .with_id(self.id.slot("spinner"))
                        .size(Size::Small)
                        .color(fg),
                ),
            )
            .into_any_element()
    }

    fn render_ripple(&self) -> Option<AnyElement> {
        let active = ripple::active_for(&self.id)?;
        let tint = hsla(&self.theme.resolve_color(&self.theme.components.button.ripple));
        let duration_ms = ripple::RIPPLE_DURATION.as_millis() as u16;
        Some(
            div()
                .id(self.id.slot_index("ripple", active.serial))
                .absolute()
                .left(px(active.left))
                .top(px(active.top))
                .size(px(active.diameter))
                .rounded(px(RadiusToken::Full.px()))
                .bg(tint)
                .with_repeating_transition(
                    self.id.slot_index("ripple-anim", active.serial),
                    duration_ms,
                    |this, delta| this.opacity(1.0 - delta),
                )
                .into_any_element(),
        )
    }
}

fn measure_box(id: ComponentId) -> impl IntoElement {
    canvas(
        move |bounds, _window, _cx| {
            control::set_f32_state(&id, "box-x", f32::from(bounds.origin.x));
            control::set_f32_state(&id, "box-y", f32::from(bounds.origin.y));
            control::set_f32_state(&id, "box-w", f32::from(bounds.size.width));
            control::set_f32_state(&id, "box-h", f32::from(bounds.size.height));
        },
        |_, _, _, _| {},
    )
    .absolute()
    .size_full()
}

fn measured_box(id: &str) -> Option<((f32, f32), (f32, f32))> {
    Some((
        (control::f32_state(id, "box-x")?, control::f32_state(id, "box-y")?),
        (control::f32_state(id, "box-w")?, control::f32_state(id, "box-h")?),
    ))
}

impl MotionAware for Button {
    fn motion(mut self, value: MotionConfig) -> Self {
        self.motion = value;
        self
    }
}

impl RenderOnce for Button {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let styles = self
            .recipe()
            .state_styles(&self.theme, self.disabled, self.loading);
        let allowed = press_allowed(self.disabled, self.loading);

        let mut root = div()
            .id(self.id.clone())
            .relative()
            .overflow_hidden()
            .flex()
            .flex_row()
            .items_center()
            .justify_center();
        root = apply_resolved(root, &styles.base, window);
        root = apply_state_styles(root, &styles);
        if let Some(corners) = self.corners {
            root = apply_corners(root, corners, styles.base.radius);
        }
        if self.full_width {
            root = root.w_full();
        }

        if allowed && self.animation == ButtonAnimation::Ripple {
            let id = self.id.clone();
            root = root
                .child(measure_box(self.id.clone()))
                .on_mouse_down(MouseButton::Left, move |event, window, _cx| {
                    if let Some((origin, size)) = measured_box(&id) {
                        let pointer = (f32::from(event.position.x), f32::from(event.position.y));
                        ripple::spawn_for(&id, pointer, origin, size);
                        window.refresh();
                    }
                });
            if let Some(ripple) = self.render_ripple() {
                root = root.child(ripple);
            }
        }

        root = bind_press_adapter(
            root,
            PressAdapter::new(self.id.clone())
                .enabled(allowed)
                .on_click(self.on_click.clone())
                .focus_handle(self.focus_handle.clone()),
        );

        let content = self.render_content(&styles.base);
        root.child(content)
            .with_enter_transition(self.id.slot("enter"), self.motion)
    }
}

#[derive(IntoElement)]
pub struct IconButton {
    id: ComponentId,
    icon: Option<SlotRenderer>,
    aria_label: Option<SharedString>,
    variant: Variant,
    size: Size,
    shape: Shape,
    disabled: bool,
    loading: bool,
    theme: crate::theme::LocalTheme,
    on_click: Option<PressHandler>,
    focus_handle: Option<FocusHandle>,
}

/// True when the label would leave an icon-only control unnamed.
pub fn aria_label_missing(label: Option<&str>) -> bool {
    label.is_none_or(|label| label.trim().is_empty())
}

impl IconButton {
    #[track_caller]
    pub fn new(icon: impl IntoElement + 'static) -> Self {
        Self {
            id: ComponentId::auto("icon-button"),
            icon: Some(Box::new(|| icon.into_any_element())),
            aria_label: None,
            variant: Variant::Ghost,
            size: Size::Medium,
            shape: Shape::Circle,
            disabled: false,
            loading: false,
            theme: crate::theme::LocalTheme::default(),
            on_click: None,
            focus_handle: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn aria_label(mut self, label: impl Into<SharedString>) -> Self {
        self.aria_label = Some(label.into());
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

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    pub fn focus_handle(mut self, value: FocusHandle) -> Self {
        self.focus_handle = Some(value);
        self
    }

    pub fn recipe(&self) -> ButtonRecipe {
        ButtonRecipe {
            variant: self.variant,
            size: self.size,
            shape: self.shape,
            icon_only: true,
        }
    }
}

impl RenderOnce for IconButton {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        if aria_label_missing(self.aria_label.as_deref().map(|v| &**v)) {
            #[cfg(debug_assertions)]
            tracing::warn!(id = %self.id, "icon button rendered without an accessible label");
        }

        let styles = self
            .recipe()
            .state_styles(&self.theme, self.disabled, self.loading);
        let allowed = press_allowed(self.disabled, self.loading);
        let side = px(styles.base.icon_size + styles.base.padding_x * 2.0);

        let mut root = div()
            .id(self.id.clone())
            .flex()
            .items_center()
            .justify_center()
            .size(side);
        root = apply_resolved(root, &styles.base, window);
        root = apply_state_styles(root, &styles);
        root = bind_press_adapter(
            root,
            PressAdapter::new(self.id.clone())
                .enabled(allowed)
                .on_click(self.on_click.clone())
                .focus_handle(self.focus_handle.clone()),
        );

        let fg = hsla(&styles.base.foreground);
        if self.loading {
            root.child(
                Spinner::new()
                    .with_id(self.id.slot("spinner"))
                    .size(Size::Small)
                    .color(fg),
            )
        } else {
            let icon = self.icon.take().map(|icon| icon());
            root.text_color(fg)
                .text_size(px(styles.base.icon_size))
                .children(icon)
        }
    }
}

#[derive(IntoElement)]
pub struct ButtonGroup {
    id: ComponentId,
    buttons: Vec<Button>,
    orientation: Orientation,
    attached: bool,
    size: Option<Size>,
    variant: Option<Variant>,
}

impl ButtonGroup {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("button-group"),
            buttons: Vec::new(),
            orientation: Orientation::Horizontal,
            attached: false,
            size: None,
            variant: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn child(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn children(mut self, buttons: impl IntoIterator<Item = Button>) -> Self {
        self.buttons.extend(buttons);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn attached(mut self, attached: bool) -> Self {
        self.attached = attached;
        self
    }

    /// Overrides the size of every child.
    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Overrides the variant of every child.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }
}

impl RenderOnce for ButtonGroup {
    fn render(self, _window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        let gap = crate::provider::HostelProvider::theme(cx)
            .components
            .button
            .group_gap;
        let len = self.buttons.len();
        let children = self
            .buttons
            .into_iter()
            .enumerate()
            .map(|(index, mut button)| {
                if let Some(size) = self.size {
                    button = button.size(size);
                }
                if let Some(variant) = self.variant {
                    button = button.variant(variant);
                }
                if self.attached {
                    button = button.corners(attached_corners(index, len, self.orientation));
                }
                button
            });

        let root = div().id(self.id.clone()).flex().tab_group();
        let root = match self.orientation {
            Orientation::Horizontal => root.flex_row(),
            Orientation::Vertical => root.flex_col(),
        };
        let root = if self.attached {
            root
        } else {
            root.gap(px(gap.px()))
        };
        root.children(children)
    }
}

crate::impl_variant_size_shape_via_methods!(Button);
crate::impl_variant_size_shape_via_methods!(IconButton);
crate::impl_disableable!(Button);
crate::impl_disableable!(IconButton);
crate::impl_theme_overridable!(Button);
crate::impl_theme_overridable!(IconButton);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attached_horizontal_group_rounds_only_outer_corners() {
        let first = attached_corners(0, 3, Orientation::Horizontal);
        let middle = attached_corners(1, 3, Orientation::Horizontal);
        let last = attached_corners(2, 3, Orientation::Horizontal);

        assert!(first.top_left && first.bottom_left);
        assert!(!first.top_right && !first.bottom_right);
        assert_eq!(middle, Corners::NONE);
        assert!(last.top_right && last.bottom_right);
        assert!(!last.top_left && !last.bottom_left);
    }

    #[test]
    fn attached_vertical_group_rounds_top_and_bottom() {
        let first = attached_corners(0, 2, Orientation::Vertical);
        let last = attached_corners(1, 2, Orientation::Vertical);
        assert!(first.top_left && first.top_right);
        assert!(!first.bottom_left && !first.bottom_right);
        assert!(last.bottom_left && last.bottom_right);
        assert!(!last.top_left && !last.top_right);
    }

    #[test]
    fn single_attached_child_keeps_every_corner() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            assert_eq!(attached_corners(0, 1, orientation), Corners::ALL);
        }
    }

    #[test]
    fn missing_or_blank_label_is_flagged() {
        assert!(aria_label_missing(None));
        assert!(aria_label_missing(Some("  ")));
        assert!(!aria_label_missing(Some("Close")));
    }

    #[test]
    fn icon_recipe_uses_icon_scale() {
        let theme = Theme::default();
        let recipe = ButtonRecipe {
            variant: Variant::Ghost,
            size: Size::Large,
            shape: Shape::Circle,
            icon_only: true,
        };
        let style = recipe.resolve(&theme, InteractionState::Default);
        assert_eq!(style.icon_size, 20.0);
        assert_eq!(style.radius, 9999.0);
        assert_eq!(style.shadow, Shadow::None);
    }
}
