use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};
use std::time::{Duration, Instant};

pub const RIPPLE_DURATION: Duration = Duration::from_millis(600);

/// One press ripple, in coordinates relative to the pressed box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub serial: u64,
    pub left: f32,
    pub top: f32,
    pub diameter: f32,
    pub started_at: Instant,
}

impl Ripple {
    pub fn progress(&self, now: Instant, duration: Duration) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f32();
        (elapsed / duration.as_secs_f32().max(f32::EPSILON)).clamp(0.0, 1.0)
    }
}

/// At most one ripple per box; a new press replaces the running one.
#[derive(Clone, Debug)]
pub struct RippleState {
    current: Option<Ripple>,
    next_serial: u64,
    duration: Duration,
}

impl Default for RippleState {
    fn default() -> Self {
        Self::new(RIPPLE_DURATION)
    }
}

impl RippleState {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            next_serial: 0,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts a ripple centred on the pointer. `pointer` and `origin` are in
    /// window coordinates; `size` is the box size.
    pub fn spawn(
        &mut self,
        pointer: (f32, f32),
        origin: (f32, f32),
        size: (f32, f32),
        now: Instant,
    ) -> Ripple {
        let diameter = size.0.max(size.1);
        let ripple = Ripple {
            serial: self.next_serial,
            left: pointer.0 - origin.0 - diameter / 2.0,
            top: pointer.1 - origin.1 - diameter / 2.0,
            diameter,
            started_at: now,
        };
        self.next_serial += 1;
        self.current = Some(ripple);
        ripple
    }

    pub fn prune(&mut self, now: Instant) {
        if self
            .current
            .is_some_and(|ripple| now.saturating_duration_since(ripple.started_at) >= self.duration)
        {
            self.current = None;
        }
    }

    pub fn active(&mut self, now: Instant) -> Option<Ripple> {
        self.prune(now);
        self.current
    }
}

static RIPPLES: LazyLock<Mutex<HashMap<String, RippleState>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

pub(crate) fn spawn_for(
    id: &str,
    pointer: (f32, f32),
    origin: (f32, f32),
    size: (f32, f32),
) -> Option<Ripple> {
    let mut ripples = RIPPLES.lock().ok()?;
    Some(
        ripples
            .entry(id.to_string())
            .or_default()
            .spawn(pointer, origin, size, Instant::now()),
    )
}

/// Current ripple of a box; expired ripples are dropped on read.
pub(crate) fn active_for(id: &str) -> Option<Ripple> {
    let mut ripples = RIPPLES.lock().ok()?;
    let state = ripples.get_mut(id)?;
    let active = state.active(Instant::now());
    if active.is_none() {
        ripples.remove(id);
    }
    active
}

#[cfg(test)]
pub(crate) fn clear_all() {
    if let Ok(mut ripples) = RIPPLES.lock() {
        ripples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripple_is_centred_on_pointer_relative_to_box() {
        let mut state = RippleState::default();
        let ripple = state.spawn((130.0, 60.0), (100.0, 40.0), (80.0, 36.0), Instant::now());
        assert_eq!(ripple.diameter, 80.0);
        assert_eq!(ripple.left, 30.0 - 40.0);
        assert_eq!(ripple.top, 20.0 - 40.0);
    }

    #[test]
    fn new_press_replaces_running_ripple() {
        let mut state = RippleState::default();
        let start = Instant::now();
        let first = state.spawn((10.0, 10.0), (0.0, 0.0), (40.0, 20.0), start);
        let second = state.spawn((20.0, 10.0), (0.0, 0.0), (40.0, 20.0), start);
        let active = state.active(start).expect("ripple running");
        assert_ne!(first.serial, second.serial);
        assert_eq!(active.serial, second.serial);
    }

    #[test]
    fn ripple_is_pruned_after_its_duration() {
        let mut state = RippleState::new(Duration::from_millis(100));
        let start = Instant::now();
        state.spawn((0.0, 0.0), (0.0, 0.0), (10.0, 10.0), start);
        assert!(state.active(start + Duration::from_millis(99)).is_some());
        assert!(state.active(start + Duration::from_millis(100)).is_none());
    }

    #[test]
    fn progress_is_clamped() {
        let mut state = RippleState::new(Duration::from_millis(200));
        let start = Instant::now();
        let ripple = state.spawn((0.0, 0.0), (0.0, 0.0), (10.0, 10.0), start);
        assert_eq!(ripple.progress(start + Duration::from_millis(100), state.duration()), 0.5);
        assert_eq!(ripple.progress(start + Duration::from_secs(5), state.duration()), 1.0);
    }
}
