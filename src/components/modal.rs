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

/// Centered dialog over a window mask. While open it holds the page scroll
/// lock and sits on the overlay stack, so Escape reaches it only when it is
/// the topmost overlay.
#[derive(IntoElement)]
pub struct Modal {
    id: ComponentId,
    opened: Option<bool>,
    default_opened: bool,
    title: Option<SharedString>,
    body: Option<SharedString>,
    content: Option<SlotRenderer>,
    footer: Option<SlotRenderer>,
    width: f32,
    close_button: bool,
    config: OverlayConfig,
    focus_handle: Option<FocusHandle>,
    theme: LocalTheme,
    motion: MotionConfig,
    on_close: Option<CloseHandler>,
}

impl Modal {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            id: ComponentId::auto("modal"),
            opened: None,
            default_opened: false,
            title: None,
            body: None,
            content: None,
            footer: None,
            width: 520.0,
            close_button: true,
            config: OverlayConfig::modal(),
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

    pub fn title(mut self, value: impl Into<SharedString>) -> Self {
        self.title = Some(value.into());
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

    /// Action row under the content, right aligned.
    pub fn footer(mut self, content: impl IntoElement + 'static) -> Self {
        self.footer = Some(Box::new(|| content.into_any_element()));
        self
    }

    pub fn width(mut self, value: f32) -> Self {
        self.width = value.max(160.0);
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

    pub fn lock_scroll(mut self, value: bool) -> Self {
        self.config = self.config.lock_scroll(value);
        self
    }

    /// Focused when the modal opens in place of the modal's own handle.
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

impl Default for Modal {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl MotionAware for Modal {
    fn motion(mut self, value: MotionConfig) -> Self {
        self.motion = value;
        self
    }
}

impl RenderOnce for Modal {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let state = PopupState::resolve(&self.id, self.opened, self.default_opened);
        if !overlay_state::sync(&self.id, state.opened, self.config) {
            overlay::reset_focus_on_open(&self.id);
            return div().into_any_element();
        }
        let focus = overlay::mount(&self.id, self.focus_handle.as_ref(), window, cx);
        overlay::focus_on_open(&self.id, &focus, window, cx);

        let tokens = &self.theme.components.modal;
        let stroke = quantized_stroke_px(window, 1.0);
        let dismissal = Dismissal::new(self.id.clone(), state.controlled, self.on_close.clone());
        let title_color = self.theme.resolve_hsla(&tokens.title);
        let layout = tokens.layout;

        let mut panel = v_stack()
            .id(self.id.slot("panel"))
            .occlude()
            .w(px(self.width))
            .max_w_full()
            .max_h(window.viewport_size().height * 0.9)
            .gap(px(layout.gap.px()))
            .p(px(layout.padding.px()))
            .rounded(px(tokens.radius.px()))
            .border(stroke)
            .border_color(self.theme.resolve_hsla(&tokens.panel_border))
            .bg(self.theme.resolve_hsla(&tokens.panel_bg))
            .shadow(box_shadow(tokens.shadow));

        if self.title.is_some() || self.close_button {
            let mut header = h_stack().gap(px(layout.item_gap.px()));
            header = match self.title.clone() {
                Some(title) => header.justify_between().child(
                    div()
                        .text_size(px(layout.title_size.px()))
                        .font_weight(gpui::FontWeight::SEMIBOLD)
                        .text_color(title_color)
                        .child(title),
                ),
                None => header.justify_end(),
            };
            if self.close_button {
                header = header.child(overlay::close_button(
                    &self.id,
                    title_color,
                    self.theme.resolve_hsla(&tokens.panel_border),
                    stroke,
                    tokens.close_size,
                    dismissal.clone(),
                ));
            }
            panel = panel.child(header);
        }

        if let Some(body) = self.body.clone() {
            panel = panel.child(
                div()
                    .text_size(px(layout.body_size.px()))
                    .text_color(self.theme.resolve_hsla(&tokens.body))
                    .child(body),
            );
        }
        if let Some(content) = self.content.take() {
            panel = panel.child(
                div()
                    .id(self.id.slot("content"))
                    .overflow_y_scroll()
                    .child(content()),
            );
        }
        if let Some(footer) = self.footer.take() {
            panel = panel.child(
                h_stack()
                    .justify_end()
                    .gap(px(layout.item_gap.px()))
                    .child(footer()),
            );
        }

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
        .child(
            div()
                .absolute()
                .top_0()
                .left_0()
                .size_full()
                .flex()
                .items_center()
                .justify_center()
                .p(px(tokens.inset.px()))
                .child(panel.with_enter_transition(self.id.slot("panel-enter"), self.motion)),
        )
        .into_any_element()
    }
}

crate::impl_openable!(Modal);
crate::impl_theme_overridable!(Modal);
