//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{instrument, warn};

use crate::application::services::{SnapshotService, TreeSession};
use crate::config::Settings;
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Snapshot loading
    pub snapshot_service: SnapshotService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let snapshot_service = SnapshotService::new(Arc::clone(&fs));

        Self {
            settings,
            fs,
            snapshot_service,
        }
    }

    /// Load a snapshot and open a session on it.
    ///
    /// Root precedence: `root` argument, then `default_root` from settings,
    /// then the oldest member of the snapshot. An unknown `root` argument is
    /// an error; a configured `default_root` missing from the snapshot is
    /// ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn open_session(&self, snapshot: &Path, root: Option<&str>) -> InfraResult<TreeSession> {
        if !self.fs.exists(snapshot) {
            return Err(InfraError::io(
                format!("snapshot not found: {}", snapshot.display()),
                io::Error::new(io::ErrorKind::NotFound, "file does not exist"),
            ));
        }
        let graph = self.snapshot_service.load(snapshot)?;
        let cache_size = self.settings.cache_size;

        if let Some(root_id) = root {
            return Ok(TreeSession::with_root(graph, root_id, cache_size)?);
        }
        match self.settings.default_root.as_deref() {
            Some(root_id) if graph.contains(root_id) => {
                Ok(TreeSession::with_root(graph, root_id, cache_size)?)
            }
            Some(root_id) => {
                warn!(root = root_id, "Configured default_root not in snapshot, using oldest member");
                Ok(TreeSession::new(graph, cache_size))
            }
            None => Ok(TreeSession::new(graph, cache_size)),
        }
    }
}
