//! File lookup
//!
//! Finds the first of an ordered list of candidate filenames that exists as a
//! regular file in a directory, optionally walking up the directory tree.
//!
//! Candidate order is the priority order: every candidate is tried in the
//! current directory before any parent is consulted. When bubbling, the walk
//! continues through every ancestor until a match is found or there is no
//! parent left.

use crate::fs::{FileSystem, HostFs};
use log::{debug, trace};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Lookup task was cancelled before it completed")]
    Cancelled,
}

/// What to search for and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub directory: PathBuf,
    pub candidates: Vec<String>,
    /// Return the matched file's text instead of its path
    pub contents: bool,
    /// Keep searching in parent directories
    pub bubble: bool,
}

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Path(PathBuf),
    Contents(String),
}

impl LookupRequest {
    pub fn new<I>(directory: impl Into<PathBuf>, candidates: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            directory: directory.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
            contents: false,
            bubble: false,
        }
    }

    pub fn with_contents(mut self) -> Self {
        self.contents = true;
        self
    }

    pub fn with_bubble(mut self) -> Self {
        self.bubble = true;
        self
    }
}

impl LookupResult {
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            LookupResult::Path(path) => Some(path),
            LookupResult::Contents(_) => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            LookupResult::Path(path) => Some(path),
            LookupResult::Contents(_) => None,
        }
    }

    pub fn as_contents(&self) -> Option<&str> {
        match self {
            LookupResult::Contents(contents) => Some(contents),
            LookupResult::Path(_) => None,
        }
    }
}

/// Run a lookup against the host filesystem.
pub fn lookup(request: &LookupRequest) -> Result<Option<LookupResult>, LookupError> {
    lookup_with(&HostFs, request)
}

/// Run a lookup against any [`FileSystem`].
///
/// Returns `Ok(None)` when no candidate matched anywhere in the search chain.
/// The only error is a failed read of an already matched file; once a file
/// has matched, no other candidate or directory is tried.
pub fn lookup_with<F>(fs: &F, request: &LookupRequest) -> Result<Option<LookupResult>, LookupError>
where
    F: FileSystem + ?Sized,
{
    let mut dir = request.directory.clone();
    loop {
        trace!("Searching {dir:?} for {:?}", request.candidates);
        if let Some(path) = first_match(fs, &dir, &request.candidates) {
            debug!("Found {path:?}");
            if !request.contents {
                return Ok(Some(LookupResult::Path(path)));
            }
            let contents = fs
                .read_to_string(&path)
                .map_err(|source| LookupError::Read { path, source })?;
            return Ok(Some(LookupResult::Contents(contents)));
        }

        if !request.bubble {
            return Ok(None);
        }

        match parent_dir(&dir) {
            Some(parent) => {
                trace!("Nothing in {dir:?}, moving up to {parent:?}");
                dir = parent;
            }
            None => {
                debug!(
                    "No match for {:?} above {:?}",
                    request.candidates, request.directory
                );
                return Ok(None);
            }
        }
    }
}

/// Run a lookup on tokio's blocking pool.
///
/// The search itself is the same blocking walk as [`lookup`]; this only keeps
/// it off the async worker threads.
#[cfg(feature = "async")]
pub async fn lookup_async(request: LookupRequest) -> Result<Option<LookupResult>, LookupError> {
    lookup_async_with(HostFs, request).await
}

/// Run a lookup against `fs` on tokio's blocking pool.
///
/// A panic inside the lookup is resumed on the caller. If the blocking task
/// never runs to completion, because its runtime is shutting down, the result
/// is [`LookupError::Cancelled`].
#[cfg(feature = "async")]
pub async fn lookup_async_with<F>(
    fs: F,
    request: LookupRequest,
) -> Result<Option<LookupResult>, LookupError>
where
    F: FileSystem + Send + 'static,
{
    match tokio::task::spawn_blocking(move || lookup_with(&fs, &request)).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(_) => Err(LookupError::Cancelled),
    }
}

/// Find the nearest matching file by walking up from the current directory.
///
/// `filenames` are checked in order at each directory level.
pub fn find_nearest_file(filenames: &[&str]) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_nearest_file_from(&cwd, filenames)
}

/// Find the nearest matching file by walking up from a start directory.
///
/// `filenames` are checked in order at each directory level.
pub fn find_nearest_file_from(start: &Path, filenames: &[&str]) -> Option<PathBuf> {
    let request = LookupRequest::new(start, filenames.iter().copied()).with_bubble();
    lookup(&request).ok().flatten().and_then(LookupResult::into_path)
}

fn first_match<F>(fs: &F, dir: &Path, candidates: &[String]) -> Option<PathBuf>
where
    F: FileSystem + ?Sized,
{
    candidates.iter().find_map(|candidate| {
        let path = join_candidate(dir, candidate);
        if fs.exists(&path) && fs.is_file(&path) {
            Some(path)
        } else {
            trace!("  {path:?} is not a file");
            None
        }
    })
}

/// Join `candidate` under `dir`.
///
/// Root and drive prefixes of the candidate are dropped, so `/etc/x` looked
/// up in `/project` probes `/project/etc/x` and never leaves `dir`.
fn join_candidate(dir: &Path, candidate: &str) -> PathBuf {
    let relative: PathBuf = Path::new(candidate)
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    dir.join(relative)
}

/// The directory a bubbling lookup moves to next, or `None` at the top.
///
/// Purely lexical: `/a/b` -> `/a` -> `/` -> stop, and a relative `a` -> `.`
/// -> stop.
fn parent_dir(dir: &Path) -> Option<PathBuf> {
    match dir.parent() {
        Some(parent) if parent.as_os_str().is_empty() => {
            if dir == Path::new(".") {
                None
            } else {
                Some(PathBuf::from("."))
            }
        }
        Some(parent) if parent == dir => None,
        Some(parent) => Some(parent.to_path_buf()),
        None => None,
    }
}
