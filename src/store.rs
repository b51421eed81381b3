//! Snapshot store
//!
//! Owns the "current snapshot" slot and its JSON document on disk. A new
//! snapshot replaces the previous one as a whole: the document is written to
//! a temporary sibling file and renamed over the target, and only then is the
//! in-memory slot swapped. Readers never see a half-written snapshot.

use crate::error::Result;
use crate::services::Snapshot;
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// `last_update` reported while no snapshot exists
pub const NO_DATA: &str = "Данные отсутствуют";

/// Latest published snapshot, in memory and on disk
pub struct SnapshotStore {
    path: PathBuf,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl SnapshotStore {
    /// Open the store, picking up a previously persisted document if it parses
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match Self::load(&path) {
            Ok(Some(snapshot)) => {
                info!("Loaded snapshot from {:?} ({})", path, snapshot.last_update);
                Some(Arc::new(snapshot))
            }
            Ok(None) => {
                info!("No snapshot at {:?} yet", path);
                None
            }
            Err(e) => {
                warn!("Ignoring unreadable snapshot at {:?}: {}", path, e);
                None
            }
        };

        Self {
            path,
            current: RwLock::new(current),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `snapshot` and make it the current one
    pub fn publish(&self, snapshot: Snapshot) -> Result<Arc<Snapshot>> {
        let document = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, &document)?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        let snapshot = Arc::new(snapshot);
        *self.current.write() = Some(snapshot.clone());

        info!("💾 Snapshot saved to {:?}", self.path);
        Ok(snapshot)
    }

    /// Current snapshot, if one has been produced
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.read().clone()
    }

    pub fn has_data(&self) -> bool {
        self.current.read().is_some()
    }

    /// Display timestamp of the current snapshot
    pub fn last_update(&self) -> String {
        self.current
            .read()
            .as_ref()
            .map(|s| s.last_update.clone())
            .unwrap_or_else(|| NO_DATA.to_string())
    }

    fn load(path: &Path) -> Result<Option<Snapshot>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(path)?;
        Ok(Some(serde_json::from_slice(&data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CmeCloud, FlareActivity, Indicators, KpIndex, MagneticField, SolarWind, SunspotActivity};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn snapshot(minute: u32) -> Snapshot {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 12, minute, 0).unwrap();
        Snapshot::assemble(
            Indicators {
                kp: KpIndex::default(),
                flares: FlareActivity::default(),
                solar_wind: SolarWind::default(),
                sun: SunspotActivity::default(),
                geomagnetic: MagneticField::default(),
                cme: CmeCloud::baseline(at.date_naive()),
                aurora_image: None,
            },
            at,
        )
    }

    #[test]
    fn test_empty_store() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::open(dir.path().join("space_weather_data.json"));

        assert!(store.current().is_none());
        assert!(!store.has_data());
        assert_eq!(store.last_update(), NO_DATA);
    }

    #[test]
    fn test_publish_replaces_whole_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("static").join("space_weather_data.json");
        let store = SnapshotStore::open(&path);

        store.publish(snapshot(0)).unwrap();
        store.publish(snapshot(3)).unwrap();

        assert_eq!(store.last_update(), "18.10.2026 12:03:00");
        assert!(!path.with_extension("json.tmp").exists());

        let on_disk: Snapshot = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, snapshot(3));
    }

    #[test]
    fn test_reopen_loads_persisted_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("space_weather_data.json");
        SnapshotStore::open(&path).publish(snapshot(9)).unwrap();

        let reopened = SnapshotStore::open(&path);
        assert_eq!(reopened.current().as_deref(), Some(&snapshot(9)));
    }

    #[test]
    fn test_corrupt_document_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("space_weather_data.json");
        fs::write(&path, b"{ truncated").unwrap();

        let store = SnapshotStore::open(&path);
        assert!(store.current().is_none());
    }

    #[test]
    fn test_failed_write_keeps_previous_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("space_weather_data.json");
        let store = SnapshotStore::open(&path);
        store.publish(snapshot(0)).unwrap();

        // A directory at the staging path makes the write fail
        fs::create_dir(path.with_extension("json.tmp")).unwrap();
        assert!(store.publish(snapshot(5)).is_err());

        assert_eq!(store.last_update(), "18.10.2026 12:00:00");
    }
}
