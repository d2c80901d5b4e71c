//! Read-only virtual file system for the mirage shell emulator.
//!
//! The VFS is a static mapping from absolute directory path to an ordered
//! listing of entries, plus contents for the handful of readable files.
//! Nothing here touches a real disk: the tree is seeded once at session
//! start and commands only ever read from it.

mod memory;
mod seed;

use serde::{Deserialize, Serialize};

pub use memory::MemoryVfs;
pub use seed::seed_vfs;

/// Whether an entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A single named entry inside a directory listing.
///
/// Entries never reference entries of another path; the tree structure
/// exists only through the directory-path keys of the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Byte size; listings substitute 4096 when absent.
    pub size: Option<u64>,
    /// POSIX-style mode string, e.g. `-rw-r--r--`.
    pub mode: Option<String>,
    /// Human-readable modification date, e.g. `Jan 15 10:30`.
    pub modified: Option<String>,
}

impl VfsEntry {
    /// A directory entry with default metadata.
    pub fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::Directory,
            size: None,
            mode: Some("drwxr-xr-x".to_string()),
            modified: None,
        }
    }

    /// A file entry with an explicit size.
    pub fn file(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::File,
            size: Some(size),
            mode: Some("-rw-r--r--".to_string()),
            modified: None,
        }
    }

    /// Set the modification date label.
    pub fn modified(mut self, date: &str) -> Self {
        self.modified = Some(date.to_string());
        self
    }

    /// Set the mode string.
    pub fn mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }
}

/// Read-only view over the virtual file tree.
pub trait Vfs {
    /// Entries of the directory at `path`, or `None` if the path is not a
    /// known directory. Order is the seeded listing order.
    fn list(&self, path: &str) -> Option<&[VfsEntry]>;

    /// Contents of the file at `path`, or `None` if no readable file is
    /// seeded there.
    fn read(&self, path: &str) -> Option<&str>;

    /// Whether `path` is a known directory.
    fn is_dir(&self, path: &str) -> bool;

    /// Metadata for the entry named by `path`, looked up in its parent's
    /// listing. Root has no parent entry and returns `None`.
    fn stat(&self, path: &str) -> Option<&VfsEntry>;
}
