use gpui::{
    AnyElement, Corner, InteractiveElement, IntoElement, ParentElement, Styled, anchored, deferred,
    div, point, px,
};

use crate::id::ComponentId;

use super::control;
use super::placement::{
    Placement, Rect, TRIGGER_OFFSET, VIEWPORT_PADDING, flip_below_to_above, position_floating,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PopupPlacement {
    Top,
    Bottom,
}

/// Open flag of a dropdown-style popup, controlled or keyed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PopupState {
    pub opened: bool,
    pub controlled: bool,
}

impl PopupState {
    pub fn resolve(id: &str, opened: Option<bool>, default_opened: bool) -> Self {
        Self {
            opened: control::bool_state(id, "opened", opened, default_opened),
            controlled: opened.is_some(),
        }
    }
}

/// Stores the next open flag for uncontrolled popups. Returns whether a
/// refresh is needed.
pub fn apply_opened(id: &str, controlled: bool, next: bool) -> bool {
    if controlled {
        return false;
    }
    control::set_bool_state(id, "opened", next);
    true
}

pub fn set_trigger_bounds(id: &str, rect: Rect) {
    control::set_f32_state(id, "trigger-x", rect.x);
    control::set_f32_state(id, "trigger-y", rect.y);
    control::set_f32_state(id, "trigger-w", rect.width);
    control::set_f32_state(id, "trigger-h", rect.height);
}

pub fn trigger_bounds(id: &str) -> Option<Rect> {
    Some(Rect::new(
        control::f32_state(id, "trigger-x")?,
        control::f32_state(id, "trigger-y")?,
        control::f32_state(id, "trigger-w")?,
        control::f32_state(id, "trigger-h")?,
    ))
}

/// Side a dropdown opens on, recomputed from the last measured trigger
/// bounds every frame so scrolling and resizing re-evaluate it.
pub fn dropdown_placement(id: &str, viewport_height: f32, popup_height: f32) -> PopupPlacement {
    match trigger_bounds(id) {
        Some(trigger) if flip_below_to_above(trigger, viewport_height, popup_height) => {
            PopupPlacement::Top
        }
        _ => PopupPlacement::Bottom,
    }
}

/// Canvas that records the trigger's window bounds after layout.
pub fn measure_trigger(id: ComponentId) -> impl IntoElement {
    gpui::canvas(
        move |bounds, _window, _cx| set_trigger_bounds(&id, Rect::from_bounds(bounds)),
        |_, _, _, _| {},
    )
    .absolute()
    .size_full()
}

/// Zero-size host on the trigger edge carrying a deferred, window-snapped
/// floating surface.
pub fn anchored_host(
    id: &ComponentId,
    slot: &str,
    placement: PopupPlacement,
    floating: AnyElement,
    priority: usize,
) -> AnyElement {
    let anchor_corner = match placement {
        PopupPlacement::Top => Corner::BottomLeft,
        PopupPlacement::Bottom => Corner::TopLeft,
    };
    let offset = match placement {
        PopupPlacement::Top => point(px(0.0), px(-TRIGGER_OFFSET)),
        PopupPlacement::Bottom => point(px(0.0), px(TRIGGER_OFFSET)),
    };
    let panel = anchored()
        .anchor(anchor_corner)
        .offset(offset)
        .snap_to_window_with_margin(px(VIEWPORT_PADDING))
        .child(floating);
    let host = match placement {
        PopupPlacement::Top => div().id(id.slot(slot)).absolute().top_0().left_0(),
        PopupPlacement::Bottom => div().id(id.slot(slot)).absolute().bottom_0().left_0(),
    };
    host.w_full()
        .h_0()
        .child(deferred(panel).priority(priority))
        .into_any_element()
}

/// Canvas that records the floating surface's size after layout, so the
/// next frame can place it without guessing.
pub fn measure_floating(id: ComponentId) -> impl IntoElement {
    gpui::canvas(
        move |bounds, _window, _cx| {
            control::set_f32_state(&id, "floating-w", f32::from(bounds.size.width));
            control::set_f32_state(&id, "floating-h", f32::from(bounds.size.height));
        },
        |_, _, _, _| {},
    )
    .absolute()
    .size_full()
}

pub fn floating_size(id: &str, fallback: (f32, f32)) -> (f32, f32) {
    match (
        control::f32_state(id, "floating-w"),
        control::f32_state(id, "floating-h"),
    ) {
        (Some(width), Some(height)) if width > 0.0 && height > 0.0 => (width, height),
        _ => fallback,
    }
}

/// Places `floating` next to the measured trigger of `id`, flipped and
/// clamped inside the viewport. Recomputed every frame, so scrolling and
/// resizing while open keep it on screen.
pub fn positioned_floating(
    id: &str,
    preferred: Placement,
    viewport: (f32, f32),
    fallback_size: (f32, f32),
    floating: AnyElement,
    priority: usize,
) -> Option<(Placement, AnyElement)> {
    let trigger = trigger_bounds(id)?;
    let size = floating_size(id, fallback_size);
    let (placement, x, y) = position_floating(trigger, size, viewport, preferred);
    let panel = anchored().position(point(px(x), px(y))).child(floating);
    Some((placement, deferred(panel).priority(priority).into_any_element()))
}
