//! Reference-counted page scroll lock.
//!
//! Every open overlay that wants the page frozen holds a
//! [`ScrollLockGuard`]. The page stays locked while at least one guard is
//! alive, so closing one of several stacked overlays never unlocks scrolling
//! for the others.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<ScrollLock> = LazyLock::new(ScrollLock::new);

#[derive(Clone, Debug, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock shared by every overlay in the process.
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        if self.holders.fetch_add(1, Ordering::SeqCst) == 0 {
            tracing::debug!("page scroll locked");
        }
        ScrollLockGuard {
            holders: self.holders.clone(),
        }
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    /// Overflow value the page body should carry right now.
    pub fn body_overflow(&self) -> &'static str {
        if self.is_locked() { "hidden" } else { "" }
    }
}

/// Releases its hold on drop.
#[derive(Debug)]
#[must_use = "the page unlocks as soon as the guard is dropped"]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        if self.holders.fetch_sub(1, Ordering::SeqCst) == 1 {
            tracing::debug!("page scroll released");
        }
    }
}

pub fn body_overflow() -> &'static str {
    GLOBAL.body_overflow()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_guards_keep_the_page_locked() {
        let lock = ScrollLock::new();
        assert_eq!(lock.body_overflow(), "");

        let outer = lock.acquire();
        let inner = lock.acquire();
        assert_eq!(lock.holders(), 2);

        drop(outer);
        assert_eq!(lock.body_overflow(), "hidden");
        drop(inner);
        assert_eq!(lock.body_overflow(), "");
    }

    #[test]
    fn guards_release_during_unwinding() {
        let lock = ScrollLock::new();
        let inner = lock.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = inner.acquire();
            panic!("render failed");
        });
        assert!(result.is_err());
        assert!(!lock.is_locked());
    }
}
