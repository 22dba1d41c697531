//! Best-distance record
//!
//! Persisted as `{"distance": N}`: a JSON file on native builds, LocalStorage
//! on the web. A missing or unreadable record counts as 0 and never stops the
//! game.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestDistance {
    pub distance: u32,
}

impl BestDistance {
    pub fn new(distance: u32) -> Self {
        Self { distance }
    }

    /// Whole units shown and stored for a session distance
    pub fn from_session(distance: f32) -> u32 {
        if distance.is_finite() && distance > 0.0 {
            distance.floor().min(u32::MAX as f32) as u32
        } else {
            0
        }
    }

    /// Check if a session distance beats the record
    pub fn is_beaten_by(&self, distance: f32) -> bool {
        Self::from_session(distance) > self.distance
    }
}

/// Why the record could not be read or written
#[derive(Debug)]
pub enum RecordError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Storage backend not present (e.g. LocalStorage disabled)
    Unavailable,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Io(e) => write!(f, "record I/O failed: {}", e),
            RecordError::Parse(e) => write!(f, "record is corrupt: {}", e),
            RecordError::Unavailable => write!(f, "record storage unavailable"),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Io(e) => Some(e),
            RecordError::Parse(e) => Some(e),
            RecordError::Unavailable => None,
        }
    }
}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        RecordError::Io(e)
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Parse(e)
    }
}

/// Somewhere the best distance can live
pub trait RecordStore {
    /// `Ok(None)` when no record has been written yet
    fn read(&self) -> Result<Option<BestDistance>, RecordError>;

    fn write(&mut self, record: BestDistance) -> Result<(), RecordError>;

    /// Read the record, falling back to 0 on any failure
    fn load(&self) -> BestDistance {
        match self.read() {
            Ok(Some(record)) => {
                log::info!("Loaded best distance {}", record.distance);
                record
            }
            Ok(None) => {
                log::info!("No best distance found, starting fresh");
                BestDistance::default()
            }
            Err(e) => {
                log::warn!("Ignoring best distance: {}", e);
                BestDistance::default()
            }
        }
    }

    /// Write the record; failures are logged, not raised
    fn save(&mut self, record: BestDistance) -> bool {
        match self.write(record) {
            Ok(()) => {
                log::info!("Best distance saved ({})", record.distance);
                true
            }
            Err(e) => {
                log::warn!("Could not save best distance: {}", e);
                false
            }
        }
    }
}

/// JSON file on disk
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileRecordStore {
    /// Well-known file name in the working directory
    pub const DEFAULT_FILE: &'static str = "highscore.json";

    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for FileRecordStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RecordStore for FileRecordStore {
    fn read(&self) -> Result<Option<BestDistance>, RecordError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write(&mut self, record: BestDistance) -> Result<(), RecordError> {
        let json = serde_json::to_string(&record)?;
        // Write beside the target, then swap in
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageRecordStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageRecordStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "chaser_highscore";

    fn storage() -> Result<web_sys::Storage, RecordError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(RecordError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl RecordStore for LocalStorageRecordStore {
    fn read(&self) -> Result<Option<BestDistance>, RecordError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(Some(serde_json::from_str(&json)?)),
            Ok(None) => Ok(None),
            Err(_) => Err(RecordError::Unavailable),
        }
    }

    fn write(&mut self, record: BestDistance) -> Result<(), RecordError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(&record)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| RecordError::Unavailable)
    }
}

/// In-memory store for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    pub record: Option<BestDistance>,
    /// Number of successful writes
    pub writes: usize,
}

impl RecordStore for MemoryRecordStore {
    fn read(&self) -> Result<Option<BestDistance>, RecordError> {
        Ok(self.record)
    }

    fn write(&mut self, record: BestDistance) -> Result<(), RecordError> {
        self.record = Some(record);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("chaser-test-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("highscore.json")
    }

    #[test]
    fn test_from_session_floors() {
        assert_eq!(BestDistance::from_session(0.0), 0);
        assert_eq!(BestDistance::from_session(152.9), 152);
        assert_eq!(BestDistance::from_session(-4.0), 0);
        assert_eq!(BestDistance::from_session(f32::NAN), 0);
    }

    #[test]
    fn test_is_beaten_by() {
        let best = BestDistance::new(100);
        assert!(!best.is_beaten_by(100.9));
        assert!(best.is_beaten_by(101.0));
        assert!(BestDistance::default().is_beaten_by(1.0));
        assert!(!BestDistance::default().is_beaten_by(0.5));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&BestDistance::new(42)).unwrap();
        assert_eq!(json, r#"{"distance":42}"#);
    }

    #[test]
    fn test_file_missing_loads_zero() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        let store = FileRecordStore::new(&path);
        assert!(store.read().unwrap().is_none());
        assert_eq!(store.load(), BestDistance::default());
    }

    #[test]
    fn test_file_corrupt_loads_zero() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        let store = FileRecordStore::new(&path);
        assert!(matches!(store.read(), Err(RecordError::Parse(_))));
        assert_eq!(store.load().distance, 0);
    }

    #[test]
    fn test_file_save_then_load() {
        let path = temp_path("roundtrip");
        let mut store = FileRecordStore::new(&path);
        assert!(store.save(BestDistance::new(377)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"distance":377}"#);
        assert_eq!(FileRecordStore::new(&path).load().distance, 377);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let dir = temp_path("readonly");
        // A directory where the file should be makes the rename fail
        let _ = std::fs::remove_file(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let mut store = FileRecordStore::new(&dir);
        assert!(!store.save(BestDistance::new(5)));
        assert!(matches!(store.read(), Err(RecordError::Io(_))));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryRecordStore::default();
        assert_eq!(store.load().distance, 0);
        store.save(BestDistance::new(9));
        assert_eq!(store.load().distance, 9);
        assert_eq!(store.writes, 1);
    }
}
