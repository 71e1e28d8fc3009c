//! In-process storage tier.
//!
//! Stands in for browser storage on native hosts and in tests. Clones share
//! the same map and state, so a test can keep a handle after giving the tier
//! to a store.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{StorageTier, TierError, TierKind};

/// How a [`MemoryTier`] responds to operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierState {
    #[default]
    Available,
    /// Behaves as if the backend API did not exist
    Unavailable,
    /// Backend exists but every operation throws
    Denied,
}

#[derive(Clone)]
pub struct MemoryTier {
    kind: TierKind,
    entries: Rc<RefCell<HashMap<String, String>>>,
    state: Rc<Cell<TierState>>,
}

impl MemoryTier {
    pub fn new(kind: TierKind) -> Self {
        Self {
            kind,
            entries: Rc::new(RefCell::new(HashMap::new())),
            state: Rc::new(Cell::new(TierState::Available)),
        }
    }

    pub fn set_state(&self, state: TierState) {
        self.state.set(state);
    }

    /// Raw stored text, bypassing the tier state
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Seed raw text, bypassing the tier state
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    /// Drop every entry (e.g. the user cleared site data)
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn check(&self) -> Result<(), TierError> {
        match self.state.get() {
            TierState::Available => Ok(()),
            TierState::Unavailable => Err(TierError::Unavailable),
            TierState::Denied => Err(TierError::Access(format!("{} access denied", self.kind))),
        }
    }
}

impl StorageTier for MemoryTier {
    fn kind(&self) -> TierKind {
        self.kind
    }

    fn read(&self, key: &str) -> Result<Option<String>, TierError> {
        self.check()?;
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, raw: &str) -> Result<(), TierError> {
        self.check()?;
        self.insert_raw(key, raw);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), TierError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let tier = MemoryTier::new(TierKind::Session);
        let handle = tier.clone();
        tier.write("a", "1").unwrap();
        assert_eq!(handle.raw("a").as_deref(), Some("1"));
    }

    #[test]
    fn state_gates_operations() {
        let tier = MemoryTier::new(TierKind::Durable);
        tier.insert_raw("a", "1");

        tier.set_state(TierState::Unavailable);
        assert_eq!(tier.read("a"), Err(TierError::Unavailable));

        tier.set_state(TierState::Denied);
        assert!(matches!(tier.write("a", "2"), Err(TierError::Access(_))));
        assert_eq!(tier.raw("a").as_deref(), Some("1"));
    }
}
