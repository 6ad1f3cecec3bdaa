//! I/O boundary traits for testability
//!
//! These traits abstract external I/O and persistence, allowing services
//! to be tested with in-memory implementations.

use std::io;
use std::path::Path;

use crate::application::ApplicationResult;
use crate::domain::{Grower, Threat};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Read-only access to the grower inventory and threat catalogue.
///
/// Each call returns a fresh snapshot; callers needing a consistent view
/// across calls must obtain it in a single call.
pub trait InventoryRepository: Send + Sync {
    /// Grower with all locations and trees, or `None` if unknown.
    fn grower(&self, grower_id: &str) -> ApplicationResult<Option<Grower>>;

    /// Identifiers of all growers in inventory order.
    fn grower_ids(&self) -> ApplicationResult<Vec<String>>;

    /// Pest and disease catalogue.
    fn threats(&self) -> ApplicationResult<Vec<Threat>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
