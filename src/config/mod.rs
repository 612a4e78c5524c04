//! Settings document for sandbox-shell
//!
//! ```yaml
//! filesystem_path: fs.zip
//! startup_script: startup.sh
//! sandbox:
//!   location: temp_fs
//!   prefix: sandbox-shell-
//! ```
//!
//! Relative paths are taken relative to the directory holding the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ShellError};
use crate::sandbox::{SandboxOptions, DEFAULT_PREFIX};

/// Name looked up in the working directory when no config is given
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Archive the sandbox is extracted from
    pub filesystem_path: Option<PathBuf>,
    /// Commands run right after the session opens
    pub startup_script: Option<PathBuf>,
    #[serde(default)]
    pub sandbox: SandboxConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SandboxConfig {
    /// Fixed sandbox root; a unique temp directory is used when absent
    pub location: Option<PathBuf>,
    /// Parent for the unique temp directory
    pub temp_dir: Option<PathBuf>,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            location: None,
            temp_dir: None,
            prefix: default_prefix(),
        }
    }
}

impl Config {
    /// Load a YAML config, anchoring relative paths at its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShellError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_yaml(&content)
            .map_err(|e| ShellError::ConfigError(format!("{}: {}", path.display(), e)))?;

        let base = path.parent().unwrap_or(Path::new(""));
        config.anchor_paths(base);
        Ok(config)
    }

    /// Parse a YAML document without touching the filesystem
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    fn anchor_paths(&mut self, base: &Path) {
        let anchor = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        };
        anchor(&mut self.filesystem_path);
        anchor(&mut self.startup_script);
        anchor(&mut self.sandbox.location);
        anchor(&mut self.sandbox.temp_dir);
    }

    /// The archive path, which every session needs
    pub fn archive(&self) -> Result<&Path> {
        self.filesystem_path.as_deref().ok_or_else(|| {
            ShellError::ConfigError(
                "no archive configured: set filesystem_path or pass --archive".to_string(),
            )
        })
    }

    /// Options for materializing the sandbox
    pub fn sandbox_options(&self) -> SandboxOptions {
        SandboxOptions {
            temp_dir: self.sandbox.temp_dir.clone(),
            location: self.sandbox.location.clone(),
            prefix: self.sandbox.prefix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_original_layout() {
        let config = Config::from_yaml(
            "filesystem_path: fs.zip\nstartup_script: startup.sh\n",
        )
        .unwrap();
        assert_eq!(config.filesystem_path, Some(PathBuf::from("fs.zip")));
        assert_eq!(config.startup_script, Some(PathBuf::from("startup.sh")));
        assert_eq!(config.sandbox.prefix, DEFAULT_PREFIX);
        assert!(config.sandbox.location.is_none());
    }

    #[test]
    fn test_parse_sandbox_section() {
        let config = Config::from_yaml(
            "filesystem_path: fs.zip\nsandbox:\n  location: temp_fs\n  prefix: shell-\n",
        )
        .unwrap();
        assert_eq!(config.sandbox.location, Some(PathBuf::from("temp_fs")));
        assert_eq!(config.sandbox.prefix, "shell-");
    }

    #[test]
    fn test_empty_document() {
        let config = Config::from_yaml("").unwrap();
        assert!(config.filesystem_path.is_none());
        assert!(config.archive().is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(Config::from_yaml("filesystem_path: [unterminated").is_err());
    }

    #[test]
    fn test_load_anchors_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "filesystem_path: fs.zip\nstartup_script: /abs/start.sh\nsandbox:\n  location: temp_fs\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.archive().unwrap(), temp_dir.path().join("fs.zip"));
        assert_eq!(config.startup_script, Some(PathBuf::from("/abs/start.sh")));
        assert_eq!(
            config.sandbox_options().location,
            Some(temp_dir.path().join("temp_fs"))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(&temp_dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ShellError::ConfigError(_))));
    }
}
