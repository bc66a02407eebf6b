//! Snapshot serialization for window layouts

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PersistenceError;
use crate::window::Window;
use super::KeyValueStore;

/// Snapshot of the window layout for persistence
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Version for migration support
    pub version: u32,
    /// Windows in creation order
    pub windows: Vec<Window>,
    /// Next window ID at capture time
    pub next_id: u64,
    /// Next z-order value at capture time
    pub next_z: u64,
}

impl Snapshot {
    /// Current snapshot version
    pub const CURRENT_VERSION: u32 = 1;

    /// Largest id or z-order a layout may carry.
    ///
    /// Ids cross into JavaScript as `f64`, so counters stay within the safe
    /// integer range.
    pub const MAX_COUNTER: u64 = (1 << 53) - 1;

    /// Create a new snapshot
    pub fn new(windows: Vec<Window>, next_id: u64, next_z: u64) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            windows,
            next_id,
            next_z,
        }
    }

    /// Check if snapshot needs migration
    pub fn needs_migration(&self) -> bool {
        self.version < Self::CURRENT_VERSION
    }

    /// Migrate snapshot to current version
    pub fn migrate(&mut self) {
        // Version 0 only lacked the version stamp
        self.version = Self::CURRENT_VERSION;
    }

    /// Serialize into a store under `key`
    pub fn save(&self, store: &mut dyn KeyValueStore, key: &str) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(self)?;
        store.set(key, json)?;
        debug!(key, windows = self.windows.len(), "layout saved");
        Ok(())
    }

    /// Load from a store. `Ok(None)` if nothing is stored under `key`.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<Option<Self>, PersistenceError> {
        let Some(json) = store.get(key)? else {
            return Ok(None);
        };

        let mut snapshot: Snapshot = serde_json::from_str(&json)?;
        if snapshot.version > Self::CURRENT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: snapshot.version,
                supported: Self::CURRENT_VERSION,
            });
        }
        if snapshot.needs_migration() {
            snapshot.migrate();
        }
        snapshot.check_counters()?;
        Ok(Some(snapshot))
    }

    /// Reject ids, z-orders and counters beyond `MAX_COUNTER`
    pub fn check_counters(&self) -> Result<(), PersistenceError> {
        let stored = self
            .windows
            .iter()
            .flat_map(|w| [("window id", w.id), ("z-order", w.z_order)]);
        let counters = [("next_id", self.next_id), ("next_z", self.next_z)];

        match stored.chain(counters).find(|&(_, value)| value > Self::MAX_COUNTER) {
            Some((field, value)) => Err(PersistenceError::CounterOutOfRange {
                field,
                value,
                max: Self::MAX_COUNTER,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::window::{WindowManager, WindowOptions};

    fn layout() -> Snapshot {
        let mut wm = WindowManager::new();
        wm.create_window(WindowOptions::app("terminal").title("Terminal"));
        wm.create_window(WindowOptions::app("notes"));
        wm.snapshot()
    }

    #[test]
    fn test_snapshot_creation() {
        let snapshot = layout();
        assert_eq!(snapshot.version, Snapshot::CURRENT_VERSION);
        assert_eq!(snapshot.windows.len(), 2);
        assert_eq!(snapshot.next_id, 3);
    }

    #[test]
    fn test_snapshot_default() {
        let snapshot: Snapshot = Default::default();
        assert_eq!(snapshot.version, 0); // Default doesn't set CURRENT_VERSION
        assert!(snapshot.windows.is_empty());
        assert!(snapshot.needs_migration());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let snapshot = layout();
        snapshot.save(&mut store, "layout").unwrap();

        let restored = Snapshot::load(&store, "layout").unwrap().unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.windows[0].title, "Terminal");
    }

    #[test]
    fn test_load_missing_key() {
        let store = MemoryStore::new();
        assert!(Snapshot::load(&store, "layout").unwrap().is_none());
    }

    #[test]
    fn test_load_migrates_old_version() {
        let mut store = MemoryStore::new();
        let mut snapshot = layout();
        snapshot.version = 0;
        snapshot.save(&mut store, "layout").unwrap();

        let restored = Snapshot::load(&store, "layout").unwrap().unwrap();
        assert_eq!(restored.version, Snapshot::CURRENT_VERSION);
    }

    #[test]
    fn test_load_rejects_newer_version() {
        let mut store = MemoryStore::new();
        let mut snapshot = layout();
        snapshot.version = Snapshot::CURRENT_VERSION + 1;
        snapshot.save(&mut store, "layout").unwrap();

        assert!(matches!(
            Snapshot::load(&store, "layout"),
            Err(PersistenceError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut store = MemoryStore::new();
        store.set("layout", "{not json".to_string()).unwrap();
        assert!(matches!(
            Snapshot::load(&store, "layout"),
            Err(PersistenceError::Malformed(_))
        ));
    }

    #[test]
    fn test_load_rejects_exhausted_window_id() {
        let mut store = MemoryStore::new();
        let json = serde_json::to_string(&layout()).unwrap().replacen(
            "\"id\":1,",
            "\"id\":18446744073709551615,",
            1,
        );
        store.set("layout", json).unwrap();

        assert!(matches!(
            Snapshot::load(&store, "layout"),
            Err(PersistenceError::CounterOutOfRange { field: "window id", value: u64::MAX, .. })
        ));
    }

    /// Store whose backend refuses every operation
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Storage("SecurityError".to_string()))
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), PersistenceError> {
            Err(PersistenceError::Storage("QuotaExceededError".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Storage("SecurityError".to_string()))
        }
    }

    #[test]
    fn test_storage_failures_propagate() {
        let mut store = BrokenStore;
        assert!(matches!(
            layout().save(&mut store, "layout"),
            Err(PersistenceError::Storage(reason)) if reason == "QuotaExceededError"
        ));
        assert!(matches!(
            Snapshot::load(&store, "layout"),
            Err(PersistenceError::Storage(_))
        ));
    }
}
