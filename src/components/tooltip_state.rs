//! Delayed tooltip reveal.
//!
//! Hovering schedules a [`ShowTicket`]; leaving cancels it. A ticket only
//! fires if nothing newer was scheduled or cancelled in the meantime, so a
//! tooltip never appears after the pointer has already gone.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex};
use std::time::Duration;

use futures_timer::Delay;

pub const DEFAULT_SHOW_DELAY: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShowTicket {
    generation: u64,
    delay: Duration,
}

impl ShowTicket {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Clone, Debug)]
pub struct TooltipDelay {
    delay: Duration,
    generation: Arc<AtomicU64>,
    visible: Arc<AtomicBool>,
}

impl Default for TooltipDelay {
    fn default() -> Self {
        Self::new(DEFAULT_SHOW_DELAY)
    }
}

impl TooltipDelay {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            visible: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Starts a new wait, invalidating any ticket still pending.
    pub fn schedule(&self) -> ShowTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        ShowTicket {
            generation,
            delay: self.delay,
        }
    }

    /// Invalidates pending tickets and hides the tooltip.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.visible.store(false, Ordering::SeqCst);
    }

    /// Shows the tooltip if `ticket` is still the latest one.
    pub fn fire(&self, ticket: ShowTicket) -> bool {
        let current = self.generation.load(Ordering::SeqCst) == ticket.generation;
        if current {
            self.visible.store(true, Ordering::SeqCst);
        }
        current
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

/// Waits out the ticket's delay, then fires it. Resolves to whether the
/// tooltip became visible.
pub async fn wait_and_fire(state: TooltipDelay, ticket: ShowTicket) -> bool {
    if !ticket.delay.is_zero() {
        Delay::new(ticket.delay).await;
    }
    state.fire(ticket)
}

static DELAYS: LazyLock<Mutex<HashMap<String, TooltipDelay>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Delay state for the tooltip keyed by `id`, created on first use.
pub fn for_id(id: &str, delay: Duration) -> TooltipDelay {
    let Ok(mut delays) = DELAYS.lock() else {
        return TooltipDelay::new(delay);
    };
    let state = delays
        .entry(id.to_string())
        .or_insert_with(|| TooltipDelay::new(delay));
    state.set_delay(delay);
    state.clone()
}

#[cfg(test)]
pub(crate) fn clear_all() {
    if let Ok(mut delays) = DELAYS.lock() {
        delays.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn default_delay_is_two_hundred_ms() {
        assert_eq!(TooltipDelay::default().schedule().delay(), Duration::from_millis(200));
    }

    #[test]
    fn ticket_fires_after_its_delay() {
        let state = TooltipDelay::new(Duration::from_millis(5));
        let ticket = state.schedule();
        assert!(!state.is_visible());
        assert!(block_on(wait_and_fire(state.clone(), ticket)));
        assert!(state.is_visible());
    }

    #[test]
    fn leaving_before_the_delay_cancels_the_show() {
        let state = TooltipDelay::new(Duration::from_millis(5));
        let ticket = state.schedule();
        state.cancel();
        assert!(!block_on(wait_and_fire(state.clone(), ticket)));
        assert!(!state.is_visible());
    }

    #[test]
    fn only_the_latest_hover_fires() {
        let state = TooltipDelay::new(Duration::ZERO);
        let stale = state.schedule();
        let fresh = state.schedule();
        assert!(!state.fire(stale));
        assert!(state.fire(fresh));
    }

    #[test]
    fn keyed_state_is_shared_per_id() {
        let a = for_id("tooltip-shared-test", Duration::ZERO);
        let b = for_id("tooltip-shared-test", Duration::ZERO);
        let ticket = a.schedule();
        assert!(b.fire(ticket));
        assert!(a.is_visible());
    }
}
