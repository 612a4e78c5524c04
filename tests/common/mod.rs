#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write a zip archive. Entries with `None` content are directories.
pub fn write_archive(path: &Path, entries: &[(&str, Option<&[u8]>)]) {
    let file = File::create(path).expect("create archive");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, content) in entries {
        match content {
            None => writer.add_directory(*name, options).expect("add directory"),
            Some(bytes) => {
                writer.start_file(*name, options).expect("start file");
                writer.write_all(bytes).expect("write file");
            }
        }
    }

    writer.finish().expect("finish archive");
}

/// Scratch workspace with an archive, a config file and a startup script
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    /// Archive holding `docs/` and `docs/readme.txt`
    pub fn with_docs() -> Self {
        let dir = TempDir::new().expect("temp dir");
        write_archive(
            &dir.path().join("fs.zip"),
            &[
                ("docs/", None),
                ("docs/readme.txt", Some(b"read me".as_slice())),
            ],
        );
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn archive(&self) -> PathBuf {
        self.path().join("fs.zip")
    }

    /// Fixed sandbox location used by the generated config
    pub fn sandbox_location(&self) -> PathBuf {
        self.path().join("temp_fs")
    }

    /// Write `config.yaml`, optionally pointing at a startup script
    pub fn write_config(&self, startup_script: Option<&str>) -> PathBuf {
        let mut yaml = String::from("filesystem_path: fs.zip\nsandbox:\n  location: temp_fs\n");
        if let Some(script) = startup_script {
            fs::write(self.path().join("startup.sh"), script).expect("write script");
            yaml.push_str("startup_script: startup.sh\n");
        }
        let path = self.path().join("config.yaml");
        fs::write(&path, yaml).expect("write config");
        path
    }
}
