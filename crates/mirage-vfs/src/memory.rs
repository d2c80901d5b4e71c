//! In-memory VFS implementation.
//!
//! The whole tree lives in two `BTreeMap`s keyed by normalized absolute
//! paths: one for directory listings, one for file contents. The maps are
//! populated once (see `seed`) and never mutated afterwards.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::{Vfs, VfsEntry};

/// A fully in-memory, read-only virtual file system.
#[derive(Debug, Default)]
pub struct MemoryVfs {
    /// Absolute directory path -> ordered listing.
    dirs: BTreeMap<String, Vec<VfsEntry>>,
    /// Absolute file path -> contents.
    files: BTreeMap<String, String>,
}

impl MemoryVfs {
    /// Create an empty VFS containing only the root directory.
    pub fn new() -> Self {
        let mut dirs = BTreeMap::new();
        dirs.insert("/".to_string(), Vec::new());
        Self {
            dirs,
            files: BTreeMap::new(),
        }
    }

    /// Insert (or replace) a directory listing.
    pub fn insert_dir(&mut self, path: &str, entries: Vec<VfsEntry>) {
        self.dirs.insert(normalize(path).into_owned(), entries);
    }

    /// Insert (or replace) a readable file's contents.
    pub fn insert_file(&mut self, path: &str, contents: &str) {
        self.files
            .insert(normalize(path).into_owned(), contents.to_string());
    }

    /// Number of seeded directories.
    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }
}

/// Check whether a path is already in normal form (starts with `/`, no
/// `//`, no trailing `/` unless root).
fn is_normalized(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    if path.len() > 1 && path.ends_with('/') {
        return false;
    }
    !path.contains("//")
}

/// Normalize a path: ensure leading `/`, collapse `//`, strip trailing `/`
/// (except for root). Returns the input unchanged (zero-alloc) when already
/// in normal form.
pub(crate) fn normalize(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }
    let path_str = if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    };
    let mut result = String::with_capacity(path_str.len());
    let mut prev_slash = false;
    for ch in path_str.chars() {
        if ch == '/' {
            if !prev_slash {
                result.push(ch);
            }
            prev_slash = true;
        } else {
            result.push(ch);
            prev_slash = false;
        }
    }
    if result.len() > 1 && result.ends_with('/') {
        result.pop();
    }
    Cow::Owned(result)
}

/// Split a normalized path into (parent, entry name).
fn split_parent(path: &str) -> Option<(&str, &str)> {
    if path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some(("/", &path[1..])),
        Some(i) => Some((&path[..i], &path[i + 1..])),
        None => None,
    }
}

impl Vfs for MemoryVfs {
    fn list(&self, path: &str) -> Option<&[VfsEntry]> {
        let path = normalize(path);
        self.dirs.get(path.as_ref()).map(|v| v.as_slice())
    }

    fn read(&self, path: &str) -> Option<&str> {
        let path = normalize(path);
        self.files.get(path.as_ref()).map(|s| s.as_str())
    }

    fn is_dir(&self, path: &str) -> bool {
        let path = normalize(path);
        self.dirs.contains_key(path.as_ref())
    }

    fn stat(&self, path: &str) -> Option<&VfsEntry> {
        let path = normalize(path);
        let (parent, name) = split_parent(path.as_ref())?;
        self.dirs
            .get(parent)?
            .iter()
            .find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryKind;

    fn sample() -> MemoryVfs {
        let mut vfs = MemoryVfs::new();
        vfs.insert_dir(
            "/",
            vec![VfsEntry::dir("home"), VfsEntry::dir("tmp")],
        );
        vfs.insert_dir("/home", vec![VfsEntry::dir("user")]);
        vfs.insert_dir(
            "/home/user",
            vec![
                VfsEntry::dir("projects"),
                VfsEntry::file("readme.txt", 1240),
            ],
        );
        vfs.insert_file("/home/user/readme.txt", "welcome\n");
        vfs
    }

    #[test]
    fn root_exists() {
        let vfs = MemoryVfs::new();
        assert!(vfs.is_dir("/"));
        assert!(vfs.list("/").unwrap().is_empty());
    }

    #[test]
    fn list_known_directory() {
        let vfs = sample();
        let entries = vfs.list("/home/user").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "projects");
        assert_eq!(entries[1].kind, EntryKind::File);
    }

    #[test]
    fn list_unknown_directory_is_none() {
        let vfs = sample();
        assert!(vfs.list("/nowhere").is_none());
    }

    #[test]
    fn listing_order_is_seed_order() {
        let mut vfs = MemoryVfs::new();
        vfs.insert_dir(
            "/",
            vec![VfsEntry::dir("zebra"), VfsEntry::dir("alpha")],
        );
        let names: Vec<&str> = vfs.list("/").unwrap().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["zebra", "alpha"]);
    }

    #[test]
    fn read_seeded_file() {
        let vfs = sample();
        assert_eq!(vfs.read("/home/user/readme.txt"), Some("welcome\n"));
    }

    #[test]
    fn read_unknown_file_is_none() {
        let vfs = sample();
        assert!(vfs.read("/home/user/missing.txt").is_none());
        // Directories have no contents.
        assert!(vfs.read("/home/user").is_none());
    }

    #[test]
    fn stat_finds_entry_in_parent_listing() {
        let vfs = sample();
        let entry = vfs.stat("/home/user/readme.txt").unwrap();
        assert_eq!(entry.size, Some(1240));
        assert_eq!(entry.kind, EntryKind::File);
    }

    #[test]
    fn stat_root_is_none() {
        let vfs = sample();
        assert!(vfs.stat("/").is_none());
    }

    #[test]
    fn paths_are_normalized_on_lookup() {
        let vfs = sample();
        assert!(vfs.is_dir("/home/user/"));
        assert!(vfs.is_dir("//home//user"));
        assert_eq!(vfs.read("//home/user/readme.txt"), Some("welcome\n"));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_is_idempotent(path in "[/a-z0-9_.]{1,50}") {
                let once = normalize(&path);
                let twice = normalize(&once);
                prop_assert_eq!(&once, &twice);
            }

            #[test]
            fn normalize_never_has_double_slashes(path in "[/a-z0-9_.]{1,50}") {
                let normed = normalize(&path);
                prop_assert!(!normed.contains("//"));
            }

            #[test]
            fn normalize_starts_with_slash(path in "[a-z0-9_./]{0,50}") {
                let normed = normalize(&path);
                prop_assert!(normed.starts_with('/'));
            }

            #[test]
            fn normalize_no_trailing_slash_unless_root(path in "[/a-z0-9_.]{1,50}") {
                let normed = normalize(&path);
                if normed != "/" {
                    prop_assert!(!normed.ends_with('/'));
                }
            }

            #[test]
            fn seeded_dir_is_listable(segments in proptest::collection::vec("[a-z]{1,6}", 1..5)) {
                let mut vfs = MemoryVfs::new();
                let path = format!("/{}", segments.join("/"));
                vfs.insert_dir(&path, Vec::new());
                prop_assert!(vfs.is_dir(&path));
                prop_assert!(vfs.list(&path).is_some());
            }
        }
    }
}
