use std::sync::{LazyLock, Mutex, MutexGuard};
use std::time::Duration;

use futures::executor::block_on;

use super::overlay_state::{self, CloseReason, OverlayConfig};
use super::placement::{Placement, Rect};
use super::scroll_lock::ScrollLock;
use super::{control, overlay, popup, ripple, select_state, tooltip_state};
use crate::id::ComponentId;

static STATE_TEST_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

struct StateTestGuard {
    _lock: MutexGuard<'static, ()>,
}

fn guard() -> StateTestGuard {
    let lock = match STATE_TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    control::clear_all();
    overlay_state::clear_all();
    tooltip_state::clear_all();
    ripple::clear_all();
    StateTestGuard { _lock: lock }
}

impl Drop for StateTestGuard {
    fn drop(&mut self) {
        control::clear_all();
        overlay_state::clear_all();
        tooltip_state::clear_all();
        ripple::clear_all();
    }
}

#[test]
fn uncontrolled_popup_state_persists_between_renders() {
    let _guard = guard();
    let state = popup::PopupState::resolve("state-popup", None, false);
    assert!(!state.opened);
    assert!(!state.controlled);

    assert!(popup::apply_opened("state-popup", state.controlled, true));
    assert!(popup::PopupState::resolve("state-popup", None, false).opened);
}

#[test]
fn controlled_popup_ignores_internal_writes() {
    let _guard = guard();
    let state = popup::PopupState::resolve("state-controlled", Some(false), true);
    assert!(state.controlled);
    assert!(!state.opened);
    assert!(!popup::apply_opened("state-controlled", true, true));
    assert!(!popup::PopupState::resolve("state-controlled", Some(false), true).opened);
}

#[test]
fn trigger_bounds_need_every_coordinate() {
    let _guard = guard();
    assert_eq!(popup::trigger_bounds("state-bounds"), None);
    control::set_f32_state("state-bounds", "trigger-x", 4.0);
    assert_eq!(popup::trigger_bounds("state-bounds"), None);

    let rect = Rect::new(10.0, 20.0, 120.0, 32.0);
    popup::set_trigger_bounds("state-bounds", rect);
    assert_eq!(popup::trigger_bounds("state-bounds"), Some(rect));
}

#[test]
fn floating_size_falls_back_until_measured() {
    let _guard = guard();
    assert_eq!(popup::floating_size("state-float", (240.0, 120.0)), (240.0, 120.0));
    control::set_f32_state("state-float", "floating-w", 300.0);
    control::set_f32_state("state-float", "floating-h", 90.0);
    assert_eq!(popup::floating_size("state-float", (240.0, 120.0)), (300.0, 90.0));
}

#[test]
fn dropdown_flips_when_the_trigger_sits_low() {
    let _guard = guard();
    popup::set_trigger_bounds("state-flip", Rect::new(0.0, 700.0, 200.0, 36.0));
    assert_eq!(
        popup::dropdown_placement("state-flip", 800.0, 240.0),
        popup::PopupPlacement::Top
    );
    popup::set_trigger_bounds("state-flip", Rect::new(0.0, 40.0, 200.0, 36.0));
    assert_eq!(
        popup::dropdown_placement("state-flip", 800.0, 240.0),
        popup::PopupPlacement::Bottom
    );
}

#[test]
fn keyed_drawer_releases_scroll_lock_on_every_dismissal() {
    let _guard = guard();
    let lock = ScrollLock::global();
    let baseline = lock.holders();

    for reason in [
        CloseReason::CloseButton,
        CloseReason::EscapeKey,
        CloseReason::OutsideClick,
    ] {
        assert!(overlay_state::sync("state-drawer", true, OverlayConfig::drawer()));
        assert_eq!(lock.holders(), baseline + 1);
        assert!(overlay_state::request_close("state-drawer", reason), "{reason:?}");
        assert_eq!(lock.holders(), baseline, "{reason:?}");
    }

    assert!(overlay_state::sync("state-drawer", true, OverlayConfig::drawer()));
    assert!(!overlay_state::sync("state-drawer", false, OverlayConfig::drawer()));
    assert_eq!(lock.holders(), baseline);
}

#[test]
fn repeated_sync_does_not_stack_locks() {
    let _guard = guard();
    let lock = ScrollLock::global();
    let baseline = lock.holders();
    for _ in 0..3 {
        overlay_state::sync("state-modal", true, OverlayConfig::modal());
    }
    assert_eq!(lock.holders(), baseline + 1);
    overlay_state::release("state-modal");
    assert_eq!(lock.holders(), baseline);
}

#[test]
fn unmounting_an_open_drawer_unlocks_scrolling() {
    let _guard = guard();
    let lock = ScrollLock::global();
    let baseline = lock.holders();

    let mounted = overlay_state::mount("state-unmounted");
    for _ in 0..2 {
        assert!(overlay_state::sync("state-unmounted", true, OverlayConfig::drawer()));
    }
    assert_eq!(lock.holders(), baseline + 1);
    assert!(overlay_state::is_topmost("state-unmounted"));

    // The parent stops rendering it; no close handler runs.
    drop(mounted);
    assert_eq!(lock.holders(), baseline);
    assert!(!overlay_state::is_topmost("state-unmounted"));
    assert!(!overlay_state::request_close("state-unmounted", CloseReason::CloseButton));
}

#[test]
fn overlays_take_focus_once_per_open() {
    let _guard = guard();
    let id = ComponentId::from("state-focus");
    assert!(overlay::claim_autofocus(&id));
    assert!(!overlay::claim_autofocus(&id));

    overlay::reset_focus_on_open(&id);
    assert!(overlay::claim_autofocus(&id));
    assert!(overlay::claim_autofocus(&id.slot("nested")));
}

#[test]
fn popover_never_locks_scroll() {
    let _guard = guard();
    let lock = ScrollLock::global();
    let baseline = lock.holders();
    assert!(overlay_state::sync("state-popover", true, OverlayConfig::popover()));
    assert_eq!(lock.holders(), baseline);
    assert!(overlay_state::is_topmost("state-popover"));
}

#[test]
fn escape_skips_a_modal_covered_by_a_popover() {
    let _guard = guard();
    overlay_state::sync("state-lower", true, OverlayConfig::modal());
    overlay_state::sync("state-upper", true, OverlayConfig::popover());

    assert!(!overlay_state::request_close("state-lower", CloseReason::EscapeKey));
    assert!(overlay_state::request_close("state-upper", CloseReason::EscapeKey));
    assert!(overlay_state::is_topmost("state-lower"));
    assert!(overlay_state::request_close("state-lower", CloseReason::EscapeKey));
}

#[test]
fn disabled_outside_click_keeps_the_modal_open() {
    let _guard = guard();
    let config = OverlayConfig::modal().close_on_outside_click(false);
    overlay_state::sync("state-sticky", true, config);
    assert!(!overlay_state::request_close("state-sticky", CloseReason::OutsideClick));
    assert!(overlay_state::request_close("state-sticky", CloseReason::CloseButton));
}

#[test]
fn request_close_on_unknown_overlay_is_a_no_op() {
    let _guard = guard();
    assert!(!overlay_state::request_close("state-missing", CloseReason::Programmatic));
}

#[test]
fn keyed_tooltip_delay_is_shared_across_renders() {
    let _guard = guard();
    let first = tooltip_state::for_id("state-tip", Duration::from_millis(5));
    let ticket = first.schedule();
    let second = tooltip_state::for_id("state-tip", Duration::from_millis(5));
    assert!(block_on(tooltip_state::wait_and_fire(second.clone(), ticket)));
    assert!(first.is_visible());

    second.cancel();
    assert!(!first.is_visible());
}

#[test]
fn hover_out_then_in_only_honours_the_latest_ticket() {
    let _guard = guard();
    let state = tooltip_state::for_id("state-rehover", Duration::ZERO);
    let stale = state.schedule();
    state.cancel();
    let fresh = state.schedule();
    assert!(!block_on(tooltip_state::wait_and_fire(state.clone(), stale)));
    assert!(block_on(tooltip_state::wait_and_fire(state.clone(), fresh)));
}

#[test]
fn select_commit_carries_the_option_value() {
    let options = select_state::normalize_options(["pending", "resolved"]);
    let event = select_state::commit(&options, "resolved");
    assert_eq!(
        event.map(|event| event.target.value),
        Some("resolved".into())
    );
}

#[test]
fn required_select_placeholder_cannot_be_committed() {
    let placeholder = select_state::placeholder_option(&"Choose".into(), true);
    let options = vec![placeholder, select_state::SelectOption::new("a")];
    assert_eq!(select_state::commit(&options, ""), None);
}

#[test]
fn placement_opposites_pair_up() {
    for placement in [
        Placement::Top,
        Placement::Bottom,
        Placement::Left,
        Placement::Right,
    ] {
        assert_eq!(placement.opposite().opposite(), placement);
    }
}

#[test]
fn keyed_ripple_keeps_one_per_button() {
    let _guard = guard();
    assert!(ripple::active_for("state-ripple").is_none());
    let first = ripple::spawn_for("state-ripple", (30.0, 20.0), (10.0, 10.0), (120.0, 40.0));
    let second = ripple::spawn_for("state-ripple", (90.0, 20.0), (10.0, 10.0), (120.0, 40.0));
    assert!(first.is_some());
    assert_eq!(ripple::active_for("state-ripple"), second);
    assert!(ripple::active_for("state-other").is_none());
}
