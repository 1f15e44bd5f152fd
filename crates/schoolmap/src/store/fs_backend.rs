use super::backend::SlotBackend;
use crate::error::{DirectoryError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DirectoryError::Io)?;
        }
        Ok(())
    }
}

impl SlotBackend for FsBackend {
    fn read_slot(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.slot_path(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DirectoryError::Io(e)),
        }
    }

    fn write_slot(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        fs::write(&tmp_path, bytes).map_err(DirectoryError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, self.slot_path(name)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(DirectoryError::Io(e));
        }

        Ok(())
    }
}
