//! Chrome shared by modal surfaces: the window mask, the close glyph and the
//! dismissal path every close trigger funnels through.

use std::rc::Rc;

use gpui::{
    ClickEvent, FocusHandle, Hsla, InteractiveElement, IntoElement, ParentElement, Stateful,
    StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::id::ComponentId;
use crate::tokens::RadiusToken;

use super::control;
use super::overlay_state::{self, CloseReason};
use super::primitives::fill_layer;

pub type CloseHandler = Rc<dyn Fn(CloseReason, &mut Window, &mut gpui::App)>;

/// Everything needed to close one keyed overlay.
#[derive(Clone)]
pub struct Dismissal {
    id: ComponentId,
    controlled: bool,
    on_close: Option<CloseHandler>,
}

impl Dismissal {
    pub fn new(id: ComponentId, controlled: bool, on_close: Option<CloseHandler>) -> Self {
        Self {
            id,
            controlled,
            on_close,
        }
    }

    /// Closes for `reason` if the overlay allows it. Controlled overlays only
    /// report the request; the owner flips `opened`.
    pub fn dismiss(&self, reason: CloseReason, window: &mut Window, cx: &mut gpui::App) -> bool {
        if !overlay_state::request_close(&self.id, reason) {
            return false;
        }
        if !self.controlled {
            control::set_bool_state(&self.id, "opened", false);
        }
        if let Some(handler) = self.on_close.as_ref() {
            (handler)(reason, window, cx);
        }
        window.refresh();
        true
    }
}

const AUTOFOCUSED_SLOT: &str = "autofocused";

/// Element-scoped state of an open overlay. It lives only as long as the
/// overlay keeps rendering.
struct MountedOverlay {
    _guard: overlay_state::MountGuard,
    focus: FocusHandle,
}

/// Keeps the keyed overlay for `id` alive for as long as it renders and
/// returns the focus handle its root tracks. A caller-supplied handle wins
/// over the overlay's own.
pub fn mount(
    id: &ComponentId,
    supplied: Option<&FocusHandle>,
    window: &mut Window,
    cx: &mut gpui::App,
) -> FocusHandle {
    let key = id.to_string();
    let mounted = window.use_keyed_state(id.slot("mount"), cx, move |_, cx| MountedOverlay {
        _guard: overlay_state::mount(&key),
        focus: cx.focus_handle(),
    });
    match supplied {
        Some(handle) => handle.clone(),
        None => mounted.read(cx).focus.clone(),
    }
}

/// Moves focus into the overlay once per open, so Escape reaches its key
/// handler without stealing focus back from inner fields on later frames.
pub fn focus_on_open(
    id: &ComponentId,
    handle: &FocusHandle,
    window: &mut Window,
    cx: &mut gpui::App,
) {
    if claim_autofocus(id) && !handle.contains_focused(window, cx) {
        window.focus(handle);
    }
}

/// True once per open: the first render after [`reset_focus_on_open`].
pub(crate) fn claim_autofocus(id: &ComponentId) -> bool {
    if control::bool_state(id, AUTOFOCUSED_SLOT, None, false) {
        return false;
    }
    control::set_bool_state(id, AUTOFOCUSED_SLOT, true);
    true
}

pub fn reset_focus_on_open(id: &ComponentId) {
    control::set_bool_state(id, AUTOFOCUSED_SLOT, false);
}

/// Window-covering mask; clicking it is an outside click.
pub fn backdrop(id: &ComponentId, color: Hsla, dismissal: Dismissal) -> Stateful<gpui::Div> {
    fill_layer()
        .id(id.slot("backdrop"))
        .bg(color)
        .on_click(move |_: &ClickEvent, window: &mut Window, cx: &mut gpui::App| {
            dismissal.dismiss(CloseReason::OutsideClick, window, cx);
        })
}

pub fn close_button(
    id: &ComponentId,
    color: Hsla,
    border: Hsla,
    stroke: gpui::Pixels,
    side: u16,
    dismissal: Dismissal,
) -> Stateful<gpui::Div> {
    div()
        .id(id.slot("close"))
        .flex()
        .flex_none()
        .items_center()
        .justify_center()
        .size(px(f32::from(side)))
        .rounded(px(RadiusToken::Full.px()))
        .border(stroke)
        .border_color(border)
        .text_color(color)
        .cursor_pointer()
        .hover(|style| style.opacity(0.8))
        .child("×")
        .on_click(move |_: &ClickEvent, window: &mut Window, cx: &mut gpui::App| {
            dismissal.dismiss(CloseReason::CloseButton, window, cx);
            cx.stop_propagation();
        })
}
