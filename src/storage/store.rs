//! On-disk chunk storage
//!
//! Each chunk is a flat file `<chunk_dir>/<fileName>_<index>.data`. There is
//! no manifest tying chunks back together; reconstruction order comes from
//! the numeric index suffix. Writes create or silently overwrite.

use crate::common::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File name for a chunk of `file_name` at sequence position `index`.
pub fn chunk_file_name(file_name: &str, index: usize) -> String {
    format!("{}_{}.data", file_name, index)
}

/// Flat-directory chunk store rooted at the configured chunk directory.
#[derive(Debug, Clone)]
pub struct ChunkStore {
    root: PathBuf,
}

impl ChunkStore {
    /// Open the store, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one named chunk, overwriting any previous content.
    pub fn write(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, data)?;
        tracing::debug!("Wrote chunk {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_chunk_file_name() {
        assert_eq!(chunk_file_name("book", 0), "book_0.data");
        assert_eq!(chunk_file_name("book", 12), "book_12.data");
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let store = ChunkStore::open(dir.path().join("chunks")).unwrap();

        let path = store.write(&chunk_file_name("book", 0), b"hello").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"hello");
    }

    #[test]
    fn test_duplicate_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = ChunkStore::open(dir.path()).unwrap();

        store.write("book_0.data", b"first").unwrap();
        let path = store.write("book_0.data", b"second").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"second");
    }
}
