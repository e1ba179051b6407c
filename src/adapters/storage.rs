use crate::core::render::{check_document, overwrite_document};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, UpdateError};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

/// Exclusive marker file next to the target; removed on drop.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
}

impl FileLock {
    pub fn acquire(target: &Path) -> Result<Self> {
        let mut lock_name = target.as_os_str().to_owned();
        lock_name.push(".lock");
        let path = PathBuf::from(lock_name);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(UpdateError::FileAccess {
                    path: target.display().to_string(),
                    reason: format!("another update holds {}", path.display()),
                });
            }
            Err(e) => return Err(e.into()),
        };

        // The guard owns the file from here on, so a failed write still removes it.
        let lock = Self { path }.stamp(&mut file)?;
        tracing::debug!("Acquired lock {}", lock.path.display());
        Ok(lock)
    }

    fn stamp<W: Write>(self, out: &mut W) -> Result<Self> {
        writeln!(out, "{}", std::process::id())?;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove lock {}: {}", self.path.display(), e);
        }
    }
}

impl Storage for LocalStorage {
    type Lock = FileLock;

    async fn check_target(&self, path: &str) -> Result<()> {
        check_document(&self.resolve(path))
    }

    async fn lock(&self, path: &str) -> Result<FileLock> {
        FileLock::acquire(&self.resolve(path))
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        overwrite_document(&self.resolve(path), data)
    }
}
