//! Zip extraction into a sandbox staging directory

use std::fs::{self, File};
use std::io;
use std::path::Path;

use bytesize::ByteSize;
use zip::ZipArchive;

use crate::error::{Result, ShellError};

/// Totals gathered while extracting an archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub directories: usize,
    pub files: usize,
    pub bytes: u64,
}

impl std::fmt::Display for ExtractionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} directories, {} files, {}",
            self.directories,
            self.files,
            ByteSize(self.bytes)
        )
    }
}

/// Extract every entry of `archive_path` below `destination`.
///
/// Entry names that would land outside `destination` (absolute names,
/// `..` segments) fail the whole extraction.
pub fn extract_archive(archive_path: &Path, destination: &Path) -> Result<ExtractionSummary> {
    let file = File::open(archive_path).map_err(|e| {
        ShellError::ExtractionError(format!(
            "cannot open archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    let mut archive = ZipArchive::new(file).map_err(|e| {
        ShellError::ExtractionError(format!(
            "cannot read archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    let mut summary = ExtractionSummary::default();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| {
            ShellError::ExtractionError(format!("cannot read entry #{}: {}", index, e))
        })?;

        let relative = match entry.enclosed_name() {
            Some(name) => name.to_path_buf(),
            None => {
                return Err(ShellError::ExtractionError(format!(
                    "entry '{}' points outside the archive root",
                    entry.name()
                )))
            }
        };
        let target = destination.join(&relative);

        let conflict = |e: io::Error| {
            ShellError::ExtractionError(format!(
                "cannot place entry '{}': {}",
                relative.display(),
                e
            ))
        };

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(conflict)?;
            summary.directories += 1;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(conflict)?;
        }

        let mut output = File::create(&target).map_err(conflict)?;
        let written = io::copy(&mut entry, &mut output).map_err(|e| {
            ShellError::ExtractionError(format!(
                "corrupt entry '{}': {}",
                relative.display(),
                e
            ))
        })?;

        summary.files += 1;
        summary.bytes += written;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::testing::write_archive;
    use tempfile::TempDir;

    #[test]
    fn test_extract_preserves_structure() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("fs.zip");
        write_archive(
            &archive,
            &[
                ("docs/", None),
                ("docs/readme.txt", Some(b"hello".as_slice())),
                ("bin/tool", Some(b"#!/bin/sh".as_slice())),
            ],
        );

        let destination = temp_dir.path().join("out");
        fs::create_dir(&destination).unwrap();
        let summary = extract_archive(&archive, &destination).unwrap();

        assert_eq!(summary.directories, 1);
        assert_eq!(summary.files, 2);
        assert_eq!(summary.bytes, 14);
        assert!(destination.join("docs").is_dir());
        assert_eq!(
            fs::read_to_string(destination.join("docs/readme.txt")).unwrap(),
            "hello"
        );
        // Parent directories without their own entry are created too
        assert!(destination.join("bin").is_dir());
    }

    #[test]
    fn test_extract_missing_archive() {
        let temp_dir = TempDir::new().unwrap();
        let result = extract_archive(&temp_dir.path().join("absent.zip"), temp_dir.path());
        assert!(matches!(result, Err(ShellError::ExtractionError(_))));
    }

    #[test]
    fn test_extract_corrupt_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("broken.zip");
        fs::write(&archive, b"this is not a zip file").unwrap();

        let result = extract_archive(&archive, temp_dir.path());
        assert!(matches!(result, Err(ShellError::ExtractionError(_))));
    }

    #[test]
    fn test_extract_rejects_escaping_entry() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("evil.zip");
        write_archive(&archive, &[("../escaped.txt", Some(b"x".as_slice()))]);

        let destination = temp_dir.path().join("out");
        fs::create_dir(&destination).unwrap();

        let result = extract_archive(&archive, &destination);
        assert!(matches!(result, Err(ShellError::ExtractionError(_))));
        assert!(!temp_dir.path().join("escaped.txt").exists());
    }

    #[test]
    fn test_extract_conflicting_entries() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("clash.zip");
        write_archive(
            &archive,
            &[("docs", Some(b"a file".as_slice())), ("docs/", None)],
        );

        let destination = temp_dir.path().join("out");
        fs::create_dir(&destination).unwrap();

        let result = extract_archive(&archive, &destination);
        assert!(matches!(result, Err(ShellError::ExtractionError(msg)) if msg.contains("docs")));
    }

    #[test]
    fn test_summary_display() {
        let summary = ExtractionSummary {
            directories: 2,
            files: 3,
            bytes: 0,
        };
        assert!(summary.to_string().starts_with("2 directories, 3 files"));
    }
}
