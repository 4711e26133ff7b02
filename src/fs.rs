//! Filesystem capability used by the lookup
//!
//! The lookup only ever needs three primitives: an existence check, a
//! regular-file check and a full UTF-8 read. `HostFs` forwards them to the
//! real filesystem; `MemoryFs` keeps everything in a map so lookups can be
//! exercised without touching disk.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// The read-only filesystem operations a lookup performs.
pub trait FileSystem {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file, following symlinks.
    fn is_file(&self, path: &Path) -> bool;

    /// Read the whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl FileSystem for HostFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// An in-memory filesystem.
///
/// Adding a file or directory registers all of its ancestors as directories.
/// Files added with [`MemoryFs::with_unreadable_file`] pass the existence and
/// type checks but fail to read, like a file whose permissions were revoked
/// after it was found.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    /// `None` marks an unreadable file
    files: HashMap<PathBuf, Option<String>>,
    dirs: HashSet<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: &str) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.files.insert(path, Some(contents.to_string()));
        self
    }

    pub fn with_unreadable_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.files.insert(path, None);
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_ancestors(&path);
        self.dirs.insert(path);
        self
    }

    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.files.get(path) {
            Some(Some(contents)) => Ok(contents.clone()),
            Some(None) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", path.display()),
            )),
            None if self.dirs.contains(path) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )),
        }
    }
}
