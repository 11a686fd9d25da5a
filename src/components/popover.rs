use std::rc::Rc;

use gpui::{
    AnyElement, ClickEvent, FocusHandle, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::contracts::MotionAware;
use crate::id::ComponentId;
use crate::motion::MotionConfig;
use crate::theme::LocalTheme;

use super::overlay_state::{self, CloseReason, OverlayConfig};
use super::placement::{Placement, Rect};
use super::popup::{self, PopupState};
use super::transition::TransitionExt;
use super::utils::{box_shadow, quantized_stroke_px};
use super::{control, overlay};

type SlotRenderer = Box<dyn FnOnce() -> AnyElement>;
type OpenChangeHandler = Rc<dyn Fn(bool, &mut Window, &mut gpui::App)>;

/// Size assumed for the panel until it has been measured once.
const PANEL_ESTIMATE: (f32, f32) = (240.0, 120.0);

fn contains(rect: Rect, x: f32, y: f32) -> bool {
    x >= rect.x && x <= rect.right() && y >= rect.y && y <= rect.bottom()
}

/// Click-triggered floating panel. Closes on outside click or Escape and
/// never locks page scroll.
#[derive(IntoElement)]
pub struct Popover {
    id: ComponentId,
    opened: Option<bool>,
    default_opened: bool,
    disabled: bool,
    placement: Placement,
    config: OverlayConfig,
    theme: LocalTheme,
    motion: MotionConfig,
    trigger: Option<SlotRenderer>,
    content: Option<SlotRenderer>,
    on_open_change: Option<OpenChangeHandler>,
}

impl Popover {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("popover"),
            opened: None,
            default_opened: false,
            disabled: false,
            placement: Placement::Bottom,
            config: OverlayConfig::popover(),
            theme: LocalTheme::default(),
            motion: MotionConfig::default(),
            trigger: None,
            content: None,
            on_open_change: None,
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

    pub fn disabled(mut self, value: bool) -> Self {
        self.disabled = value;
        self
    }

    pub fn placement(mut self, value: Placement) -> Self {
        self.placement = value;
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

    pub fn trigger(mut self, content: impl IntoElement + 'static) -> Self {
        self.trigger = Some(Box::new(|| content.into_any_element()));
        self
    }

    pub fn content(mut self, content: impl IntoElement + 'static) -> Self {
        self.content = Some(Box::new(|| content.into_any_element()));
        self
    }

    pub fn on_open_change(
        mut self,
        handler: impl Fn(bool, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_open_change = Some(Rc::new(handler));
        self
    }

    fn render_panel(
        &mut self,
        window: &Window,
        focus: &FocusHandle,
        controlled: bool,
    ) -> AnyElement {
        let tokens = &self.theme.components.popover;
        let mut panel = div()
            .id(self.id.slot("panel"))
            .track_focus(focus)
            .occlude()
            .relative()
            .p(px(tokens.layout.padding.px()))
            .rounded(px(tokens.radius.px()))
            .border(quantized_stroke_px(window, 1.0))
            .border_color(self.theme.resolve_hsla(&tokens.border))
            .bg(self.theme.resolve_hsla(&tokens.bg))
            .text_color(self.theme.resolve_hsla(&tokens.fg))
            .shadow(box_shadow(tokens.shadow))
            .child(popup::measure_floating(self.id.clone()));
        if let Some(content) = self.content.take() {
            panel = panel.child(content());
        }

        let id = self.id.clone();
        let handler = self.on_open_change.clone();
        let escape_id = self.id.clone();
        let escape_handler = self.on_open_change.clone();
        panel
            .on_mouse_down_out(move |event, window, cx| {
                // The trigger toggles on its own click.
                let on_trigger = popup::trigger_bounds(&id).is_some_and(|rect| {
                    contains(rect, f32::from(event.position.x), f32::from(event.position.y))
                });
                if !on_trigger {
                    close(&id, controlled, CloseReason::OutsideClick, &handler, window, cx);
                }
            })
            .on_key_down(move |event, window, cx| {
                if control::is_escape_keystroke(event)
                    && close(
                        &escape_id,
                        controlled,
                        CloseReason::EscapeKey,
                        &escape_handler,
                        window,
                        cx,
                    )
                {
                    cx.stop_propagation();
                }
            })
            .with_enter_transition(self.id.slot("panel-enter"), self.motion)
            .into_any_element()
    }
}

fn close(
    id: &ComponentId,
    controlled: bool,
    reason: CloseReason,
    handler: &Option<OpenChangeHandler>,
    window: &mut Window,
    cx: &mut gpui::App,
) -> bool {
    if !overlay_state::request_close(id, reason) {
        return false;
    }
    popup::apply_opened(id, controlled, false);
    if let Some(handler) = handler.as_ref() {
        (handler)(false, window, cx);
    }
    window.refresh();
    true
}

impl Default for Popover {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl MotionAware for Popover {
    fn motion(mut self, value: MotionConfig) -> Self {
        self.motion = value;
        self
    }
}

impl RenderOnce for Popover {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let state = PopupState::resolve(&self.id, self.opened, self.default_opened);
        let opened = overlay_state::sync(&self.id, state.opened && !self.disabled, self.config);

        let trigger_content = self
            .trigger
            .take()
            .map(|render| render())
            .unwrap_or_else(|| div().into_any_element());
        let mut trigger = div()
            .id(self.id.slot("trigger"))
            .relative()
            .child(trigger_content)
            .child(popup::measure_trigger(self.id.clone()));

        if self.disabled {
            trigger = trigger.cursor_default().opacity(0.55);
        } else {
            let id = self.id.clone();
            let controlled = state.controlled;
            let handler = self.on_open_change.clone();
            trigger = trigger.cursor_pointer().on_click(
                move |_: &ClickEvent, window: &mut Window, cx: &mut gpui::App| {
                    if opened {
                        close(&id, controlled, CloseReason::Programmatic, &handler, window, cx);
                        return;
                    }
                    popup::apply_opened(&id, controlled, true);
                    if let Some(handler) = handler.as_ref() {
                        (handler)(true, window, cx);
                    }
                    window.refresh();
                },
            );
        }

        let mut root = div().id(self.id.clone()).relative().child(trigger);
        if opened {
            let focus = overlay::mount(&self.id, None, window, cx);
            overlay::focus_on_open(&self.id, &focus, window, cx);
            let panel = self.render_panel(window, &focus, state.controlled);
            let viewport = window.viewport_size();
            match popup::positioned_floating(
                &self.id,
                self.placement,
                (f32::from(viewport.width), f32::from(viewport.height)),
                PANEL_ESTIMATE,
                panel,
                20,
            ) {
                Some((_, floating)) => root = root.child(floating),
                // Trigger not measured yet; place it next frame.
                None => window.request_animation_frame(),
            }
        } else {
            overlay::reset_focus_on_open(&self.id);
        }
        root
    }
}

crate::impl_openable!(Popover);
crate::impl_placeable!(Popover, Placement);
crate::impl_theme_overridable!(Popover);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_hit_test_is_inclusive() {
        let rect = Rect::new(10.0, 10.0, 40.0, 20.0);
        assert!(contains(rect, 10.0, 30.0));
        assert!(contains(rect, 50.0, 10.0));
        assert!(!contains(rect, 51.0, 15.0));
    }
}
