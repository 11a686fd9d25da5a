//! Keyed state for uncontrolled components.
//!
//! `RenderOnce` components are rebuilt every frame, so anything that must
//! outlive a frame (an uncontrolled value, an open flag, the focused flag) is
//! stored here under `"{component id}::{slot}"`.

use std::{
    collections::HashMap,
    sync::{LazyLock, Mutex},
};

static BOOL_STATE: LazyLock<Mutex<HashMap<String, bool>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static TEXT_STATE: LazyLock<Mutex<HashMap<String, String>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static OPT_TEXT_STATE: LazyLock<Mutex<HashMap<String, Option<String>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
static F32_STATE: LazyLock<Mutex<HashMap<String, f32>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

pub const FOCUSED_SLOT: &str = "focused";
pub const HOVERED_SLOT: &str = "hovered";

fn key(id: &str, slot: &str) -> String {
    format!("{id}::{slot}")
}

pub fn bool_state(id: &str, slot: &str, controlled: Option<bool>, default: bool) -> bool {
    if let Some(value) = controlled {
        return value;
    }

    let composed = key(id, slot);
    if let Ok(mut state) = BOOL_STATE.lock() {
        return *state.entry(composed).or_insert(default);
    }
    default
}

pub fn set_bool_state(id: &str, slot: &str, value: bool) {
    let composed = key(id, slot);
    if let Ok(mut state) = BOOL_STATE.lock() {
        state.insert(composed, value);
    }
}

pub fn focused_state(id: &str, controlled: Option<bool>, default: bool) -> bool {
    bool_state(id, FOCUSED_SLOT, controlled, default)
}

pub fn set_focused_state(id: &str, value: bool) {
    set_bool_state(id, FOCUSED_SLOT, value);
}

pub fn hovered_state(id: &str) -> bool {
    bool_state(id, HOVERED_SLOT, None, false)
}

pub fn set_hovered_state(id: &str, value: bool) {
    set_bool_state(id, HOVERED_SLOT, value);
}

pub fn is_activation_key(key: &str) -> bool {
    key == "space" || key == "enter"
}

pub fn is_activation_keystroke(event: &gpui::KeyDownEvent) -> bool {
    is_activation_key(event.keystroke.key.as_str())
}

pub fn is_escape_keystroke(event: &gpui::KeyDownEvent) -> bool {
    event.keystroke.key.as_str() == "escape"
}

pub fn text_state(id: &str, slot: &str, controlled: Option<String>, default: String) -> String {
    if let Some(value) = controlled {
        return value;
    }

    let composed = key(id, slot);
    if let Ok(mut state) = TEXT_STATE.lock() {
        return state.entry(composed).or_insert(default).clone();
    }
    default
}

pub fn set_text_state(id: &str, slot: &str, value: String) {
    let composed = key(id, slot);
    if let Ok(mut state) = TEXT_STATE.lock() {
        state.insert(composed, value);
    }
}

pub fn optional_text_state(
    id: &str,
    slot: &str,
    controlled: Option<Option<String>>,
    default: Option<String>,
) -> Option<String> {
    if let Some(value) = controlled {
        return value;
    }

    let composed = key(id, slot);
    if let Ok(mut state) = OPT_TEXT_STATE.lock() {
        return state.entry(composed).or_insert(default).clone();
    }
    default
}

pub fn set_optional_text_state(id: &str, slot: &str, value: Option<String>) {
    let composed = key(id, slot);
    if let Ok(mut state) = OPT_TEXT_STATE.lock() {
        state.insert(composed, value);
    }
}

/// Last measured geometry (trigger bounds, box origin); absent until the
/// first paint.
pub fn f32_state(id: &str, slot: &str) -> Option<f32> {
    let composed = key(id, slot);
    F32_STATE
        .lock()
        .ok()
        .and_then(|state| state.get(&composed).copied())
}

pub fn set_f32_state(id: &str, slot: &str, value: f32) {
    let composed = key(id, slot);
    if let Ok(mut state) = F32_STATE.lock() {
        state.insert(composed, value);
    }
}

#[cfg(test)]
pub(crate) fn clear_all() {
    if let Ok(mut state) = BOOL_STATE.lock() {
        state.clear();
    }
    if let Ok(mut state) = TEXT_STATE.lock() {
        state.clear();
    }
    if let Ok(mut state) = OPT_TEXT_STATE.lock() {
        state.clear();
    }
    if let Ok(mut state) = F32_STATE.lock() {
        state.clear();
    }
}
