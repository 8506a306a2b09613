//! Snapshot persistence. Both directions are best effort: a missing or
//! corrupt snapshot means "start fresh", a failed save is only logged.

use serde_json::Value;

use crate::error::{GameError, Result};
use crate::model::PlayerState;
use crate::reducer::GameAction;

pub trait SnapshotStore {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, raw: &str) -> Result<()>;

    fn load(&self) -> Option<Value> {
        match self.read() {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable snapshot");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "snapshot load failed");
                None
            }
        }
    }

    fn save(&self, state: &PlayerState) {
        let outcome = serde_json::to_string(state)
            .map_err(GameError::from)
            .and_then(|raw| self.write(&raw));
        if let Err(err) = outcome {
            tracing::warn!(error = %err, "snapshot save failed");
        }
    }
}

/// Action that replays the stored snapshot at startup, if any.
pub fn restore_action<S: SnapshotStore + ?Sized>(store: &S) -> Option<GameAction> {
    store.load().map(|snapshot| GameAction::LoadGame { snapshot })
}

/// Saves only once the session is initialized so the placeholder state
/// never overwrites a real snapshot.
pub fn persist_if_ready<S: SnapshotStore + ?Sized>(store: &S, state: &PlayerState) -> bool {
    if !state.is_initialized {
        return false;
    }
    store.save(state);
    true
}

/// `window.localStorage` under a fixed key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalStore {
    key: String,
}

impl LocalStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or(GameError::StorageUnavailable)?
            .local_storage()
            .map_err(|e| GameError::Storage(format!("{e:?}")))?
            .ok_or(GameError::StorageUnavailable)
    }

    pub fn clear(&self) -> Result<()> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }
}

impl SnapshotStore for LocalStore {
    fn read(&self) -> Result<Option<String>> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }

    fn write(&self, raw: &str) -> Result<()> {
        Self::storage()?
            .set_item(&self.key, raw)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore {
        slot: RefCell<Option<String>>,
        broken: bool,
    }

    impl SnapshotStore for MemoryStore {
        fn read(&self) -> Result<Option<String>> {
            if self.broken {
                return Err(GameError::StorageUnavailable);
            }
            Ok(self.slot.borrow().clone())
        }

        fn write(&self, raw: &str) -> Result<()> {
            if self.broken {
                return Err(GameError::Storage("quota exceeded".into()));
            }
            *self.slot.borrow_mut() = Some(raw.to_string());
            Ok(())
        }
    }

    fn initialized() -> PlayerState {
        let mut s = PlayerState::with_referral_code("ABC123".into());
        s.is_initialized = true;
        s
    }

    #[test]
    fn empty_store_restores_nothing() {
        assert_eq!(restore_action(&MemoryStore::default()), None);
    }

    #[test]
    fn saved_state_replays_through_load_game() {
        let store = MemoryStore::default();
        let mut s = initialized();
        s.coins = 321;
        assert!(persist_if_ready(&store, &s));

        let action = restore_action(&store).expect("snapshot saved");
        let restored = PlayerState::with_referral_code("NEW000".into())
            .apply(action, 0)
            .unwrap();
        assert_eq!(restored, s);
    }

    #[test]
    fn uninitialized_state_is_not_persisted() {
        let store = MemoryStore::default();
        assert!(!persist_if_ready(&store, &PlayerState::with_referral_code("X".into())));
        assert!(store.slot.borrow().is_none());
    }

    #[test]
    fn corrupt_snapshot_is_treated_as_absent() {
        let store = MemoryStore::default();
        store.write("{not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn failing_storage_never_panics() {
        let store = MemoryStore { broken: true, ..Default::default() };
        assert_eq!(store.load(), None);
        store.save(&initialized());
    }
}
