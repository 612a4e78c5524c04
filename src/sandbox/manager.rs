//! Sandbox lifecycle and path resolution
//!
//! A `Sandbox` owns the directory tree extracted from an archive. It is the
//! only component allowed to turn user-supplied paths into host paths, and
//! it guarantees that every path it hands out stays below the sandbox root.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, warn};

use super::extract::{extract_archive, ExtractionSummary};
use crate::error::{Result, ShellError};

/// Default prefix for staging directories
pub const DEFAULT_PREFIX: &str = "sandbox-shell-";

/// Where and how the sandbox root is created
#[derive(Debug, Clone)]
pub struct SandboxOptions {
    /// Directory that receives the unique staging directory.
    /// Defaults to the system temp directory.
    pub temp_dir: Option<PathBuf>,
    /// Fixed location for the sandbox root. Any directory already present
    /// there is replaced. Only one session may use a given location at a
    /// time.
    pub location: Option<PathBuf>,
    /// Prefix for the generated staging directory name
    pub prefix: String,
}

impl Default for SandboxOptions {
    fn default() -> Self {
        Self {
            temp_dir: None,
            location: None,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug)]
enum Storage {
    /// Unique directory removed when the guard is closed or dropped
    Scratch(TempDir),
    /// Configured location, removed explicitly
    Fixed(PathBuf),
}

/// A directory tree materialized from an archive
#[derive(Debug)]
pub struct Sandbox {
    /// Canonical root, fixed for the sandbox's lifetime
    root: PathBuf,
    storage: Option<Storage>,
    summary: ExtractionSummary,
}

impl Sandbox {
    /// Extract `archive_path` into a fresh sandbox root.
    ///
    /// Extraction always happens in a staging directory. If it fails the
    /// staging directory is removed and no sandbox is produced.
    pub fn materialize(archive_path: &Path, options: &SandboxOptions) -> Result<Self> {
        if !archive_path.is_file() {
            return Err(ShellError::ExtractionError(format!(
                "archive not found: {}",
                archive_path.display()
            )));
        }

        let staging_parent = match (&options.location, &options.temp_dir) {
            (Some(location), _) => location
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            (None, Some(temp_dir)) => temp_dir.clone(),
            (None, None) => std::env::temp_dir(),
        };
        fs::create_dir_all(&staging_parent)?;

        let staging = tempfile::Builder::new()
            .prefix(&options.prefix)
            .tempdir_in(&staging_parent)?;

        // On error `staging` is dropped here, which wipes the partial tree
        let summary = extract_archive(archive_path, staging.path())?;

        let storage = match &options.location {
            Some(location) => Storage::Fixed(Self::move_into_place(staging, location)?),
            None => Storage::Scratch(staging),
        };

        let root = match &storage {
            Storage::Scratch(dir) => dir.path().canonicalize()?,
            Storage::Fixed(path) => path.canonicalize()?,
        };

        info!(
            archive = %archive_path.display(),
            root = %root.display(),
            "Materialized sandbox ({})",
            summary
        );

        Ok(Self {
            root,
            storage: Some(storage),
            summary,
        })
    }

    fn move_into_place(staging: TempDir, location: &Path) -> Result<PathBuf> {
        match fs::remove_dir_all(location) {
            Ok(()) => debug!(location = %location.display(), "Removed previous sandbox"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        // Once renamed the tree belongs to `location`; until then the guard
        // still cleans up the staging directory
        fs::rename(staging.path(), location)?;
        let _ = staging.keep();

        Ok(location.to_path_buf())
    }

    /// The canonical sandbox root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the sandbox tree is still present
    pub fn is_active(&self) -> bool {
        self.storage.is_some()
    }

    /// What the archive extraction produced
    pub fn summary(&self) -> ExtractionSummary {
        self.summary
    }

    /// Resolve `argument` against `current_dir` to a host path inside the
    /// sandbox.
    ///
    /// Arguments starting with `/` are anchored at the sandbox root. The
    /// target does not have to exist.
    pub fn resolve(&self, current_dir: &Path, argument: &str) -> Result<PathBuf> {
        let resolved = self.resolve_lexical(current_dir, argument)?;

        // Symlinks are only followed by the OS, so check again afterwards
        let canonical = canonicalize_lenient(&resolved)?;
        if !canonical.starts_with(&self.root) {
            debug!(argument, "Resolution left the sandbox through a link");
            return Err(ShellError::OutOfBounds(argument.to_string()));
        }

        Ok(canonical)
    }

    /// Join `argument` onto `current_dir` without following symlinks.
    ///
    /// The last component of the result is the entry the user named, even
    /// when that entry is a link.
    pub fn resolve_lexical(&self, current_dir: &Path, argument: &str) -> Result<PathBuf> {
        if !self.is_active() {
            return Err(ShellError::SandboxClosed);
        }

        let requested = Path::new(argument);
        let mut resolved = if requested.has_root() {
            self.root.clone()
        } else {
            current_dir.to_path_buf()
        };

        if !resolved.starts_with(&self.root) {
            return Err(ShellError::OutOfBounds(argument.to_string()));
        }

        for component in requested.components() {
            match component {
                Component::Prefix(_) => {
                    return Err(ShellError::OutOfBounds(argument.to_string()));
                }
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir => {
                    if resolved == self.root {
                        return Err(ShellError::OutOfBounds(argument.to_string()));
                    }
                    resolved.pop();
                }
                Component::Normal(segment) => resolved.push(segment),
            }
        }

        Ok(resolved)
    }

    /// Remove the sandbox tree. Calling it again is a no-op.
    pub fn teardown(&mut self) -> Result<()> {
        let storage = match self.storage.take() {
            Some(storage) => storage,
            None => return Ok(()),
        };

        let result = match storage {
            Storage::Scratch(dir) => dir.close(),
            Storage::Fixed(path) => fs::remove_dir_all(path),
        };

        match result {
            Ok(()) => {
                info!(root = %self.root.display(), "Sandbox removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            warn!(root = %self.root.display(), "Failed to remove sandbox: {}", e);
        }
    }
}

/// Canonicalize the longest existing prefix of `path` and append the rest
fn canonicalize_lenient(path: &Path) -> Result<PathBuf> {
    let mut missing: Vec<OsString> = Vec::new();
    let mut cursor = path;

    loop {
        match cursor.canonicalize() {
            Ok(mut base) => {
                for segment in missing.iter().rev() {
                    base.push(segment);
                }
                return Ok(base);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(name), Some(parent)) = (cursor.file_name(), cursor.parent()) else {
                    return Err(e.into());
                };
                missing.push(name.to_os_string());
                cursor = parent;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
