use std::time::Duration;

use gpui::{
    AnyElement, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::contracts::MotionAware;
use crate::id::ComponentId;
use crate::motion::MotionConfig;
use crate::theme::LocalTheme;

use super::placement::Placement;
use super::popup;
use super::tooltip_state::{self, DEFAULT_SHOW_DELAY};
use super::transition::TransitionExt;

type SlotRenderer = Box<dyn FnOnce() -> AnyElement>;

const BUBBLE_ESTIMATE: (f32, f32) = (160.0, 28.0);

/// Hover hint. Appears after the show delay; leaving the trigger first
/// cancels the pending show.
#[derive(IntoElement)]
pub struct Tooltip {
    id: ComponentId,
    label: SharedString,
    placement: Placement,
    delay: Duration,
    disabled: bool,
    trigger: Option<SlotRenderer>,
    theme: LocalTheme,
    motion: MotionConfig,
}

impl Tooltip {
    #[track_caller]
    pub fn new(label: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("tooltip"),
            label: label.into(),
            placement: Placement::Top,
            delay: DEFAULT_SHOW_DELAY,
            disabled: false,
            trigger: None,
            theme: LocalTheme::default(),
            motion: MotionConfig::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn placement(mut self, value: Placement) -> Self {
        self.placement = value;
        self
    }

    pub fn delay(mut self, value: Duration) -> Self {
        self.delay = value;
        self
    }

    pub fn disabled(mut self, value: bool) -> Self {
        self.disabled = value;
        self
    }

    pub fn trigger(mut self, content: impl IntoElement + 'static) -> Self {
        self.trigger = Some(Box::new(|| content.into_any_element()));
        self
    }

    fn render_bubble(&self) -> AnyElement {
        let tokens = &self.theme.components.tooltip;
        div()
            .id(self.id.slot("bubble"))
            .relative()
            .px(px(tokens.padding_x.px()))
            .py(px(tokens.padding_y.px()))
            .max_w(px(f32::from(tokens.max_width)))
            .rounded(px(tokens.radius.px()))
            .text_size(px(tokens.font_size.px()))
            .bg(self.theme.resolve_hsla(&tokens.bg))
            .text_color(self.theme.resolve_hsla(&tokens.fg))
            .child(self.label.clone())
            .child(popup::measure_floating(self.id.clone()))
            .with_enter_transition(self.id.slot("bubble-enter"), self.motion)
            .into_any_element()
    }
}

impl MotionAware for Tooltip {
    fn motion(mut self, value: MotionConfig) -> Self {
        self.motion = value;
        self
    }
}

impl RenderOnce for Tooltip {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let delay = tooltip_state::for_id(&self.id, self.delay);
        if self.disabled {
            delay.cancel();
        }

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

        if !self.disabled {
            let state = delay.clone();
            trigger = trigger.on_hover(move |hovered, window, cx| {
                if !*hovered {
                    state.cancel();
                    window.refresh();
                    return;
                }
                let ticket = state.schedule();
                let pending = state.clone();
                let window_handle = window.window_handle();
                cx.spawn({
                    async move |cx| {
                        if tooltip_state::wait_and_fire(pending, ticket).await {
                            let _ = window_handle.update(cx, |_, window, _| window.refresh());
                        }
                    }
                })
                .detach();
            });
        }

        let mut root = div().id(self.id.clone()).relative().child(trigger);
        if delay.is_visible() && !self.label.is_empty() {
            let viewport = window.viewport_size();
            if let Some((_, bubble)) = popup::positioned_floating(
                &self.id,
                self.placement,
                (f32::from(viewport.width), f32::from(viewport.height)),
                BUBBLE_ESTIMATE,
                self.render_bubble(),
                24,
            ) {
                root = root.child(bubble);
            }
        }
        root
    }
}

crate::impl_disableable!(Tooltip);
crate::impl_placeable!(Tooltip, Placement);
crate::impl_theme_overridable!(Tooltip);
