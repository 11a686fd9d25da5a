use std::rc::Rc;

use gpui::{
    AnyElement, FocusHandle, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::contracts::MotionAware;
use crate::id::ComponentId;
use crate::motion::MotionConfig;
use crate::theme::LocalTheme;

use super::control;
use super::overlay::{self, CloseHandler, Dismissal};
use super::overlay_state::{self, CloseReason, OverlayConfig};
use super::popup::PopupState;
use super::primitives::{h_stack, v_stack};
use super::transition::TransitionExt;
use super::utils::{box_shadow, quantized_stroke_px};

type SlotRenderer = Box<dyn FnOnce() -> AnyElement>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum DrawerPlacement {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl DrawerPlacement {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Named drawer extents; `Px` takes an explicit width (left/right) or
/// height (top/bottom).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DrawerSize {
    Sm,
    #[default]
    Md,
    Lg,
    Full,
    Px(f32),
}

impl DrawerSize {
    /// Extent along the drawer's open axis, given the viewport extent on
    /// that axis.
    pub fn extent(self, viewport: f32) -> f32 {
        let extent = match self {
            Self::Sm => 320.0,
            Self::Md => 420.0,
            Self::Lg => 640.0,
            Self::Full => viewport,
            Self::Px(value) => value.max(0.0),
        };
        extent.min(viewport)
    }
}

/// Edge-anchored panel. Locks page scroll while open and releases it on
/// every close path: close button, Escape, mask click, rendering it closed,
/// or no longer rendering it at all.
#[derive(IntoElement)]
pub struct Drawer {
    id: ComponentId,
    opened: Option<bool>,
    default_opened: bool,
    title: SharedString,
    body: Option<SharedString>,
    content: Option<SlotRenderer>,
    placement: DrawerPlacement,
    size: DrawerSize,
    close_button: bool,
    config: OverlayConfig,
    focus_handle: Option<FocusHandle>,
    theme: LocalTheme,
    motion: MotionConfig,
    on_close: Option<CloseHandler>,
}

impl Drawer {
    #[track_caller]
    pub fn new(title: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("drawer"),
            opened: None,
            default_opened: false,
            title: title.into(),
            body: None,
            content: None,
            placement: DrawerPlacement::Right,
            size: DrawerSize::Md,
            close_button: true,
            config: OverlayConfig::drawer(),
            focus_handle: None,
            theme: LocalTheme::default(),
            motion: MotionConfig::default(),
            on_close: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn opened(mut self, value: bool) -> Self {
        self.opened = Some(value);
        self
    }

    pub fn default_opened(mut self, value: bool) -> Self {
        self.default_opened = value;
        self
    }

    pub fn body(mut self, value: impl Into<SharedString>) -> Self {
        self.body = Some(value.into());
        self
    }

    pub fn content(mut self, content: impl IntoElement + 'static) -> Self {
        self.content = Some(Box::new(|| content.into_any_element()));
        self
    }

    pub fn placement(mut self, value: DrawerPlacement) -> Self {
        self.placement = value;
        self
    }

    pub fn size(mut self, value: DrawerSize) -> Self {
        self.size = value;
        self
    }

    pub fn close_button(mut self, value: bool) -> Self {
        self.close_button = value;
        self
    }

    pub fn close_on_escape(mut self, value: bool) -> Self {
        self.config = self.config.close_on_escape(value);
        self
    }

    pub fn close_on_click_outside(mut self, value: bool) -> Self {
        self.config = self.config.close_on_outside_click(value);
        self
    }

    pub fn focus_handle(mut self, value: FocusHandle) -> Self {
        self.focus_handle = Some(value);
        self
    }

    pub fn on_close(
        mut self,
        handler: impl Fn(CloseReason, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_close = Some(Rc::new(handler));
        self
    }
}

impl MotionAware for Drawer {
    fn motion(mut self, value: MotionConfig) -> Self {
        self.motion = value;
        self
    }
}

impl RenderOnce for Drawer {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let state = PopupState::resolve(&self.id, self.opened, self.default_opened);
        if !overlay_state::sync(&self.id, state.opened, self.config) {
            overlay::reset_focus_on_open(&self.id);
            return div().into_any_element();
        }
        let focus = overlay::mount(&self.id, self.focus_handle.as_ref(), window, cx);
        overlay::focus_on_open(&self.id, &focus, window, cx);

        let tokens = &self.theme.components.drawer;
        let stroke = quantized_stroke_px(window, 1.0);
        let dismissal = Dismissal::new(self.id.clone(), state.controlled, self.on_close.clone());
        let title_color = self.theme.resolve_hsla(&tokens.title);
        let border = self.theme.resolve_hsla(&tokens.panel_border);
        let layout = tokens.layout;

        let mut header = h_stack()
            .justify_between()
            .gap(px(layout.item_gap.px()))
            .child(
                div()
                    .text_size(px(layout.title_size.px()))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .text_color(title_color)
                    .truncate()
                    .child(self.title.clone()),
            );
        if self.close_button {
            header = header.child(overlay::close_button(
                &self.id,
                title_color,
                border,
                stroke,
                tokens.close_size,
                dismissal.clone(),
            ));
        }

        let mut scroller = v_stack()
            .id(self.id.slot("scroll"))
            .flex_1()
            .min_h_0()
            .gap(px(layout.item_gap.px()))
            .overflow_y_scroll();
        if let Some(body) = self.body.clone() {
            scroller = scroller.child(
                div()
                    .text_size(px(layout.body_size.px()))
                    .text_color(self.theme.resolve_hsla(&tokens.body))
                    .child(body),
            );
        }
        if let Some(content) = self.content.take() {
            scroller = scroller.child(content());
        }

        let viewport = window.viewport_size();
        let panel = v_stack()
            .id(self.id.slot("panel"))
            .occlude()
            .absolute()
            .gap(px(layout.gap.px()))
            .p(px(layout.padding.px()))
            .bg(self.theme.resolve_hsla(&tokens.panel_bg))
            .border_color(border)
            .shadow(box_shadow(tokens.shadow))
            .child(header)
            .child(scroller);
        let panel = match self.placement {
            DrawerPlacement::Left => panel
                .top_0()
                .left_0()
                .h_full()
                .w(px(self.size.extent(f32::from(viewport.width))))
                .border_r(stroke),
            DrawerPlacement::Right => panel
                .top_0()
                .right_0()
                .h_full()
                .w(px(self.size.extent(f32::from(viewport.width))))
                .border_l(stroke),
            DrawerPlacement::Top => panel
                .top_0()
                .left_0()
                .w_full()
                .h(px(self.size.extent(f32::from(viewport.height))))
                .border_b(stroke),
            DrawerPlacement::Bottom => panel
                .bottom_0()
                .left_0()
                .w_full()
                .h(px(self.size.extent(f32::from(viewport.height))))
                .border_t(stroke),
        };

        let escape = dismissal.clone();
        let root = div()
            .id(self.id.clone())
            .track_focus(&focus)
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .on_key_down(move |event, window, cx| {
                if control::is_escape_keystroke(event)
                    && escape.dismiss(CloseReason::EscapeKey, window, cx)
                {
                    cx.stop_propagation();
                }
            });

        root.child(overlay::backdrop(
            &self.id,
            self.theme.resolve_hsla(&tokens.overlay_bg),
            dismissal,
        ))
        .child(panel.with_enter_transition(self.id.slot("panel-enter"), self.motion))
        .into_any_element()
    }
}

crate::impl_openable!(Drawer);
crate::impl_placeable!(Drawer, DrawerPlacement);
crate::impl_theme_overridable!(Drawer);
