use std::rc::Rc;

use gpui::{ClickEvent, FocusHandle, InteractiveElement, StatefulInteractiveElement, Window};

use crate::id::ComponentId;

use super::control;

pub type ClickActivateHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut gpui::App)>;

/// Whether a pointer or keyboard press may reach the click handler.
pub fn press_allowed(disabled: bool, loading: bool) -> bool {
    !disabled && !loading
}

#[derive(Clone)]
pub struct PressAdapter {
    pub id: ComponentId,
    pub enabled: bool,
    pub focus_handle: Option<FocusHandle>,
    pub on_click: Option<ClickActivateHandler>,
}

impl PressAdapter {
    pub fn new(id: impl Into<ComponentId>) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            focus_handle: None,
            on_click: None,
        }
    }

    pub fn enabled(mut self, value: bool) -> Self {
        self.enabled = value;
        self
    }

    pub fn on_click(mut self, value: Option<ClickActivateHandler>) -> Self {
        self.on_click = value;
        self
    }

    pub fn focus_handle(mut self, value: Option<FocusHandle>) -> Self {
        self.focus_handle = value;
        self
    }
}

/// Binds click, Enter/Space activation and focus tracking. A disabled
/// adapter binds nothing, so handlers cannot fire.
pub fn bind_press_adapter<T>(mut node: T, adapter: PressAdapter) -> T
where
    T: InteractiveElement + StatefulInteractiveElement,
{
    let Some(handler) = adapter.on_click.filter(|_| adapter.enabled) else {
        return node;
    };

    node = node.focusable();
    if let Some(focus_handle) = adapter.focus_handle.as_ref() {
        node = node.track_focus(focus_handle);
    }

    let click_handler = handler.clone();
    let id_for_click = adapter.id.clone();
    let focus_for_click = adapter.focus_handle.clone();
    node = node.on_click(move |event, window, cx| {
        control::set_focused_state(&id_for_click, true);
        if let Some(focus_handle) = focus_for_click.as_ref() {
            window.focus(focus_handle);
        }
        (click_handler)(event, window, cx);
        window.refresh();
    });

    let id_for_key = adapter.id.clone();
    node = node.on_key_down(move |event, window, cx| {
        if !control::is_activation_keystroke(event) {
            return;
        }
        control::set_focused_state(&id_for_key, true);
        (handler)(&ClickEvent::default(), window, cx);
        window.refresh();
        cx.stop_propagation();
    });

    let id_for_blur = adapter.id.clone();
    node.on_mouse_down_out(move |_, window, _cx| {
        control::set_focused_state(&id_for_blur, false);
        window.refresh();
    })
}

#[cfg(test)]
mod tests {
    use super::press_allowed;

    #[test]
    fn presses_require_enabled_and_idle() {
        assert!(press_allowed(false, false));
        assert!(!press_allowed(true, false));
        assert!(!press_allowed(false, true));
        assert!(!press_allowed(true, true));
    }
}
