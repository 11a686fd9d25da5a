//! Open/close lifecycle shared by modals, drawers and popovers.
//!
//! An [`OverlayHandle`] owns everything an open overlay acquires: the scroll
//! lock guard and its registration on the [`OverlayStack`]. Both are
//! released on every path to closed, including dropping the handle without
//! closing it first.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, RwLock};

use super::scroll_lock::{ScrollLock, ScrollLockGuard};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OverlayPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CloseReason {
    Programmatic,
    CloseButton,
    EscapeKey,
    OutsideClick,
    Unmount,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OverlayConfig {
    pub close_on_escape: bool,
    pub close_on_outside_click: bool,
    pub lock_scroll: bool,
    pub animated: bool,
}

impl OverlayConfig {
    pub const fn modal() -> Self {
        Self {
            close_on_escape: true,
            close_on_outside_click: true,
            lock_scroll: true,
            animated: false,
        }
    }

    pub const fn drawer() -> Self {
        Self::modal()
    }

    pub const fn popover() -> Self {
        Self {
            close_on_escape: true,
            close_on_outside_click: true,
            lock_scroll: false,
            animated: false,
        }
    }

    pub const fn close_on_escape(mut self, value: bool) -> Self {
        self.close_on_escape = value;
        self
    }

    pub const fn close_on_outside_click(mut self, value: bool) -> Self {
        self.close_on_outside_click = value;
        self
    }

    pub const fn lock_scroll(mut self, value: bool) -> Self {
        self.lock_scroll = value;
        self
    }

    pub const fn animated(mut self, value: bool) -> Self {
        self.animated = value;
        self
    }

    fn allows(&self, reason: CloseReason) -> bool {
        match reason {
            CloseReason::EscapeKey => self.close_on_escape,
            CloseReason::OutsideClick => self.close_on_outside_click,
            CloseReason::Programmatic | CloseReason::CloseButton | CloseReason::Unmount => true,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct OverlayId(pub u64);

#[derive(Default)]
struct StackState {
    entries: Vec<OverlayId>,
}

/// Open overlays in the order they were opened; the last one is on top.
#[derive(Clone, Default)]
pub struct OverlayStack {
    next_id: Arc<AtomicU64>,
    state: Arc<RwLock<StackState>>,
}

static GLOBAL_STACK: LazyLock<OverlayStack> = LazyLock::new(OverlayStack::new);

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> Self {
        GLOBAL_STACK.clone()
    }

    pub fn register(&self) -> ListenerRegistration {
        let id = OverlayId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        if let Ok(mut state) = self.state.write() {
            state.entries.push(id);
        }
        ListenerRegistration {
            id,
            stack: self.clone(),
        }
    }

    pub fn topmost(&self) -> Option<OverlayId> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.entries.last().copied())
    }

    pub fn len(&self) -> usize {
        self.state.read().map(|state| state.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, id: OverlayId) {
        if let Ok(mut state) = self.state.write() {
            state.entries.retain(|entry| *entry != id);
        }
    }
}

/// An overlay's Escape / outside-click listeners. Dropping it detaches
/// them, wherever it sits in the stack.
pub struct ListenerRegistration {
    id: OverlayId,
    stack: OverlayStack,
}

impl ListenerRegistration {
    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn is_topmost(&self) -> bool {
        self.stack.topmost() == Some(self.id)
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        self.stack.remove(self.id);
    }
}

pub struct OverlayHandle {
    config: OverlayConfig,
    phase: OverlayPhase,
    last_close: Option<CloseReason>,
    scroll_guard: Option<ScrollLockGuard>,
    listeners: Option<ListenerRegistration>,
    scroll_lock: ScrollLock,
    stack: OverlayStack,
}

impl OverlayHandle {
    pub fn new(config: OverlayConfig) -> Self {
        Self::with_resources(config, ScrollLock::global(), OverlayStack::global())
    }

    pub fn with_resources(
        config: OverlayConfig,
        scroll_lock: ScrollLock,
        stack: OverlayStack,
    ) -> Self {
        Self {
            config,
            phase: OverlayPhase::Closed,
            last_close: None,
            scroll_guard: None,
            listeners: None,
            scroll_lock,
            stack,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn config(&self) -> OverlayConfig {
        self.config
    }

    pub fn last_close(&self) -> Option<CloseReason> {
        self.last_close
    }

    /// True while opening or open.
    pub fn is_open(&self) -> bool {
        matches!(self.phase, OverlayPhase::Opening | OverlayPhase::Open)
    }

    /// True until the exit transition has finished.
    pub fn is_visible(&self) -> bool {
        self.phase != OverlayPhase::Closed
    }

    pub fn is_topmost(&self) -> bool {
        self.listeners
            .as_ref()
            .is_some_and(ListenerRegistration::is_topmost)
    }

    pub fn holds_scroll_lock(&self) -> bool {
        self.scroll_guard.is_some()
    }

    /// Returns whether the phase changed.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        if self.config.lock_scroll && self.scroll_guard.is_none() {
            self.scroll_guard = Some(self.scroll_lock.acquire());
        }
        if self.listeners.is_none() {
            self.listeners = Some(self.stack.register());
        }
        self.last_close = None;
        self.phase = if self.config.animated {
            OverlayPhase::Opening
        } else {
            OverlayPhase::Open
        };
        tracing::debug!(phase = ?self.phase, "overlay opened");
        true
    }

    /// Closes for `reason` unless the config rules it out. Escape only
    /// reaches the topmost overlay. Resources are released here, before any
    /// exit transition runs.
    pub fn request_close(&mut self, reason: CloseReason) -> bool {
        if !self.is_open() || !self.config.allows(reason) {
            return false;
        }
        if reason == CloseReason::EscapeKey && !self.is_topmost() {
            return false;
        }
        self.release();
        self.last_close = Some(reason);
        self.phase = if self.config.animated {
            OverlayPhase::Closing
        } else {
            OverlayPhase::Closed
        };
        tracing::debug!(?reason, "overlay closed");
        true
    }

    /// Completes a running enter or exit transition.
    pub fn finish_transition(&mut self) {
        self.phase = match self.phase {
            OverlayPhase::Opening => OverlayPhase::Open,
            OverlayPhase::Closing => OverlayPhase::Closed,
            other => other,
        };
    }

    fn release(&mut self) {
        self.scroll_guard = None;
        self.listeners = None;
    }
}

impl Drop for OverlayHandle {
    fn drop(&mut self) {
        if self.is_open() {
            tracing::trace!("overlay dropped while open");
        }
        self.release();
    }
}

static HANDLES: LazyLock<Mutex<HashMap<String, OverlayHandle>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Brings the keyed handle for `id` in line with `opened`, creating or
/// releasing it. Returns whether the overlay is open afterwards.
pub fn sync(id: &str, opened: bool, config: OverlayConfig) -> bool {
    let Ok(mut handles) = HANDLES.lock() else {
        return opened;
    };
    if opened {
        let handle = handles
            .entry(id.to_string())
            .or_insert_with(|| OverlayHandle::new(config));
        handle.config = config;
        handle.open();
        handle.finish_transition();
        true
    } else {
        handles.remove(id);
        false
    }
}

/// Asks the keyed overlay to close. Returns whether it closed.
pub fn request_close(id: &str, reason: CloseReason) -> bool {
    let Ok(mut handles) = HANDLES.lock() else {
        return false;
    };
    let closed = handles
        .get_mut(id)
        .is_some_and(|handle| handle.request_close(reason));
    if closed {
        handles.remove(id);
    }
    closed
}

pub fn is_topmost(id: &str) -> bool {
    HANDLES
        .lock()
        .map(|handles| handles.get(id).is_some_and(OverlayHandle::is_topmost))
        .unwrap_or(false)
}

/// Drops the keyed handle for an overlay that is no longer rendered.
pub fn release(id: &str) {
    if let Ok(mut handles) = HANDLES.lock() {
        if handles.remove(id).is_some() {
            tracing::trace!(id, "keyed overlay released");
        }
    }
}

/// Ties the keyed handle for `id` to whatever owns the guard. Rendered
/// overlays keep it in element state, so an overlay that stops being
/// rendered while open gives up its scroll lock and stack entry.
pub struct MountGuard {
    id: String,
}

impl MountGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        release(&self.id);
    }
}

pub fn mount(id: &str) -> MountGuard {
    MountGuard { id: id.to_string() }
}

#[cfg(test)]
pub(crate) fn clear_all() {
    if let Ok(mut handles) = HANDLES.lock() {
        handles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(config: OverlayConfig, lock: &ScrollLock, stack: &OverlayStack) -> OverlayHandle {
        OverlayHandle::with_resources(config, lock.clone(), stack.clone())
    }

    #[test]
    fn every_close_path_releases_the_scroll_lock() {
        for reason in [
            CloseReason::CloseButton,
            CloseReason::EscapeKey,
            CloseReason::OutsideClick,
            CloseReason::Programmatic,
        ] {
            let lock = ScrollLock::new();
            let stack = OverlayStack::new();
            let mut drawer = handle(OverlayConfig::drawer(), &lock, &stack);
            drawer.open();
            assert_eq!(lock.body_overflow(), "hidden");
            assert!(drawer.request_close(reason));
            assert_eq!(lock.body_overflow(), "", "{reason:?}");
            assert!(stack.is_empty());
        }
    }

    #[test]
    fn dropping_an_open_handle_cleans_up() {
        let lock = ScrollLock::new();
        let stack = OverlayStack::new();
        let mut modal = handle(OverlayConfig::modal(), &lock, &stack);
        modal.open();
        assert!(lock.is_locked());
        drop(modal);
        assert!(!lock.is_locked());
        assert!(stack.is_empty());
    }

    #[test]
    fn escape_reaches_only_the_topmost_overlay() {
        let lock = ScrollLock::new();
        let stack = OverlayStack::new();
        let mut lower = handle(OverlayConfig::modal(), &lock, &stack);
        let mut upper = handle(OverlayConfig::popover(), &lock, &stack);
        lower.open();
        upper.open();

        assert!(!lower.request_close(CloseReason::EscapeKey));
        assert!(lower.is_open());
        assert!(upper.request_close(CloseReason::EscapeKey));
        assert!(lower.is_topmost());
        assert!(lower.request_close(CloseReason::EscapeKey));
    }

    #[test]
    fn nested_modals_keep_scroll_locked_until_the_last_closes() {
        let lock = ScrollLock::new();
        let stack = OverlayStack::new();
        let mut first = handle(OverlayConfig::modal(), &lock, &stack);
        let mut second = handle(OverlayConfig::modal(), &lock, &stack);
        first.open();
        second.open();
        first.request_close(CloseReason::Programmatic);
        assert_eq!(lock.body_overflow(), "hidden");
        second.request_close(CloseReason::CloseButton);
        assert_eq!(lock.body_overflow(), "");
    }

    #[test]
    fn disabled_dismissal_paths_are_ignored() {
        let lock = ScrollLock::new();
        let stack = OverlayStack::new();
        let config = OverlayConfig::modal()
            .close_on_escape(false)
            .close_on_outside_click(false);
        let mut modal = handle(config, &lock, &stack);
        modal.open();
        assert!(!modal.request_close(CloseReason::EscapeKey));
        assert!(!modal.request_close(CloseReason::OutsideClick));
        assert!(modal.is_open());
        assert!(modal.request_close(CloseReason::CloseButton));
        assert_eq!(modal.last_close(), Some(CloseReason::CloseButton));
    }

    #[test]
    fn animated_overlays_pass_through_transition_phases() {
        let lock = ScrollLock::new();
        let stack = OverlayStack::new();
        let mut modal = handle(OverlayConfig::modal().animated(true), &lock, &stack);

        modal.open();
        assert_eq!(modal.phase(), OverlayPhase::Opening);
        assert!(!modal.open());
        modal.finish_transition();
        assert_eq!(modal.phase(), OverlayPhase::Open);

        modal.request_close(CloseReason::Programmatic);
        assert_eq!(modal.phase(), OverlayPhase::Closing);
        assert!(modal.is_visible());
        assert!(!lock.is_locked());
        modal.finish_transition();
        assert_eq!(modal.phase(), OverlayPhase::Closed);
    }

    #[test]
    fn popovers_never_lock_scroll() {
        let lock = ScrollLock::new();
        let stack = OverlayStack::new();
        let mut popover = handle(OverlayConfig::popover(), &lock, &stack);
        popover.open();
        assert!(!popover.holds_scroll_lock());
        assert_eq!(stack.len(), 1);
    }
}
