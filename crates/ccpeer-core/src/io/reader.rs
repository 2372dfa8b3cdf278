//! Package file access.

use std::path::Path;

/// Reads a package file into memory.
pub trait Reader: Send + Sync {
    /// Full contents of the file at `path`.
    fn read_file(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// [`Reader`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemReader;

impl Reader for FilesystemReader {
    fn read_file(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
