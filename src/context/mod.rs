//! Context management for sandbox-shell
//!
//! The context is the session's cursor into the sandbox: the current
//! directory, which is always the sandbox root or one of its descendants.

use std::path::{Path, PathBuf};

/// Current-directory state for one session
#[derive(Debug, Clone)]
pub struct Context {
    /// Canonical sandbox root
    root: PathBuf,

    /// Canonical current directory, always below `root`
    current_dir: PathBuf,
}

impl Context {
    /// Create a context positioned at the sandbox root
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            current_dir: root.to_path_buf(),
        }
    }

    /// The sandbox root this context is bound to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the current working directory
    pub fn current_folder(&self) -> &Path {
        &self.current_dir
    }

    /// How many levels below the root the current directory is
    pub fn depth(&self) -> usize {
        self.current_dir
            .strip_prefix(&self.root)
            .map(|relative| relative.components().count())
            .unwrap_or(0)
    }

    /// Enter a folder that has already been resolved and checked.
    ///
    /// Paths outside the root are ignored so the containment invariant
    /// holds even if a caller skips resolution.
    pub fn enter_folder(&mut self, path: PathBuf) -> bool {
        if !path.starts_with(&self.root) {
            return false;
        }
        self.current_dir = path;
        true
    }

    /// Reset context to the sandbox root
    pub fn reset(&mut self) {
        self.current_dir = self.root.clone();
    }

    /// `/`-rooted rendering of the current directory
    pub fn prompt(&self) -> String {
        let relative = self
            .current_dir
            .strip_prefix(&self.root)
            .unwrap_or(Path::new(""));

        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();

        format!("/{}", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_starts_at_root() {
        let ctx = Context::new(Path::new("/sandbox"));
        assert_eq!(ctx.current_folder(), Path::new("/sandbox"));
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.prompt(), "/");
    }

    #[test]
    fn test_enter_folder() {
        let mut ctx = Context::new(Path::new("/sandbox"));
        assert!(ctx.enter_folder(PathBuf::from("/sandbox/docs/api")));
        assert_eq!(ctx.depth(), 2);
        assert_eq!(ctx.prompt(), "/docs/api");
    }

    #[test]
    fn test_enter_folder_outside_root_is_ignored() {
        let mut ctx = Context::new(Path::new("/sandbox"));
        assert!(!ctx.enter_folder(PathBuf::from("/etc")));
        assert!(!ctx.enter_folder(PathBuf::from("/sandboxed")));
        assert_eq!(ctx.current_folder(), Path::new("/sandbox"));
    }

    #[test]
    fn test_reset_context() {
        let mut ctx = Context::new(Path::new("/sandbox"));
        ctx.enter_folder(PathBuf::from("/sandbox/docs"));
        ctx.reset();
        assert_eq!(ctx.current_folder(), Path::new("/sandbox"));
        assert_eq!(ctx.prompt(), "/");
    }
}
