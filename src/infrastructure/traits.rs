//! I/O boundary traits for testability
//!
//! Template loading goes through these traits so services can be tested
//! with in-memory implementations.

use std::io;
use std::path::Path;

use crate::domain::SeatDescriptor;
use crate::infrastructure::InfraResult;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Source of bracket shapes.
///
/// Given a bracket size, returns the seat descriptors to insert, in order.
/// Positions must be unique; repeated positions are skipped when building.
pub trait TemplateProvider: Send + Sync {
    fn seats(&self, size: usize) -> InfraResult<Vec<SeatDescriptor>>;
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

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
