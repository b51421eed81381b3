//! Application state management

use crate::scheduler::RefreshHandle;
use crate::store::SnapshotStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// State shared by the API handlers
pub struct AppState {
    /// Latest published snapshot
    pub store: Arc<SnapshotStore>,

    /// Trigger for on-demand refreshes
    pub refresh: RefreshHandle,

    /// Dashboard page served at `/`
    pub index_path: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<SnapshotStore>, refresh: RefreshHandle, index_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            refresh,
            index_path: index_path.into(),
        }
    }

    /// Directory holding the persisted snapshot, served under `/static`
    pub fn static_dir(&self) -> &Path {
        self.store
            .path()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}
