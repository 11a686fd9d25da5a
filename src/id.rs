use std::fmt;
use std::ops::Deref;

use gpui::{ElementId, SharedString};

/// Identity of a rendered component. Keyed state (opened flags, measured
/// bounds, overlay handles) is stored against this id, so two instances must
/// not share one unless they are meant to share state.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ComponentId(SharedString);

impl ComponentId {
    #[track_caller]
    pub fn auto(prefix: &str) -> Self {
        Self(stable_auto_id(prefix).into())
    }

    pub fn slot(&self, name: impl AsRef<str>) -> Self {
        Self(format!("{}::{}", self.0, name.as_ref()).into())
    }

    pub fn slot_index(&self, name: impl AsRef<str>, index: impl fmt::Display) -> Self {
        Self(format!("{}::{}-{}", self.0, name.as_ref(), index).into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl Default for ComponentId {
    #[track_caller]
    fn default() -> Self {
        Self::auto("component")
    }
}

impl Deref for ComponentId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(SharedString::from(value.to_string()))
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<SharedString> for ComponentId {
    fn from(value: SharedString) -> Self {
        Self(value)
    }
}

impl From<ComponentId> for ElementId {
    fn from(value: ComponentId) -> Self {
        ElementId::Name(value.0)
    }
}

impl From<&ComponentId> for ElementId {
    fn from(value: &ComponentId) -> Self {
        ElementId::Name(value.0.clone())
    }
}

#[track_caller]
pub fn stable_auto_id(prefix: &str) -> String {
    let location = std::panic::Location::caller();
    let seed = format!(
        "{prefix}:{}:{}:{}",
        location.file(),
        location.line(),
        location.column()
    );
    format!("{prefix}-{:016x}", fnv1a64(seed.as_bytes()))
}

pub(crate) fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn call_once() -> ComponentId {
        ComponentId::auto("button")
    }

    #[test]
    fn id_is_stable_for_same_callsite() {
        let ids = (0..3).map(|_| call_once()).collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn id_differs_for_different_callsites() {
        let first = call_once();
        let second = ComponentId::auto("button");
        assert_ne!(first, second);
    }

    #[test]
    fn slots_are_namespaced_under_the_parent() {
        let id = ComponentId::from("drawer");
        assert_eq!(id.slot("panel").as_str(), "drawer::panel");
        assert_eq!(id.slot_index("item", 2).as_str(), "drawer::item-2");
    }
}
