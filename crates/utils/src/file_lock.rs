//! Advisory file locks held for the lifetime of a guard

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

const CREATE_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// An open file holding an advisory lock until dropped
///
/// Readers take [`LockMode::Shared`], writers [`LockMode::Exclusive`], so a
/// reader never observes a file a writer is still filling.
#[derive(Debug)]
pub struct LockedFile {
    file: File,
    path: PathBuf,
    mode: LockMode,
}

impl LockedFile {
    /// Open an existing file for reading under a shared lock
    ///
    /// Fails with [`io::ErrorKind::NotFound`] when the file does not exist.
    pub fn open_shared(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        FileExt::lock_shared(&file)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            mode: LockMode::Shared,
        })
    }

    /// Open an existing file for reading and removal under an exclusive lock
    ///
    /// The content is left as is. Fails with [`io::ErrorKind::NotFound`]
    /// when the file does not exist.
    pub fn open_exclusive(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        FileExt::lock_exclusive(&file)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            mode: LockMode::Exclusive,
        })
    }

    /// Open or create a file for writing under an exclusive lock
    ///
    /// The file is truncated only once the lock is held. Missing parent
    /// directories are created. If the file is unlinked while waiting for
    /// the lock, the open is retried so the write lands on the live path.
    pub fn create_exclusive(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        for _ in 0..CREATE_ATTEMPTS {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(path)?;
            FileExt::lock_exclusive(&file)?;
            if !path.exists() {
                tracing::debug!(path = %path.display(), "file removed while waiting for lock, retrying");
                continue;
            }
            file.set_len(0)?;
            file.seek(SeekFrom::Start(0))?;
            return Ok(Self {
                file,
                path: path.to_path_buf(),
                mode: LockMode::Exclusive,
            });
        }
        Err(io::Error::other(format!(
            "'{}' was removed {CREATE_ATTEMPTS} times while waiting for its lock",
            path.display()
        )))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> LockMode {
        self.mode
    }

    /// Read the whole file
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Flush written bytes to disk, then release the lock
    pub fn commit(mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_all()
    }
}

impl Read for LockedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for LockedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release file lock");
        }
    }
}
