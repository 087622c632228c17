//! File-backed region image.

use crate::backend::{check_bounds, StorageBackend};
use crate::error::{StorageError, StorageResult};
use fs2::FileExt;
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A storage region kept in a file of fixed length.
///
/// The file is a byte-for-byte image of the device region, so it can be
/// dumped from or flashed to real hardware. Its length is the region size
/// and never changes after creation.
///
/// # Locking
///
/// The image is held under an exclusive advisory lock for the lifetime of
/// the backend. A second open of the same image fails with
/// [`StorageError::Locked`].
///
/// # Durability
///
/// - `flush()` calls `File::flush()` to push data to the OS
/// - `sync()` calls `File::sync_all()` to ensure data is on disk
///
/// # Example
///
/// ```no_run
/// use wdlog_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::create(Path::new("eeprom.bin"), 1024).unwrap();
/// backend.write_at(0, &[1, 0, 0, 0, 1]).unwrap();
/// backend.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    file: RwLock<File>,
    size: u64,
}

impl FileBackend {
    /// Creates a zero-filled image of exactly `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists, cannot be created, or
    /// is locked.
    pub fn create(path: &Path, size: u64) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_path_buf()),
                _ => StorageError::Io(e),
            })?;

        Self::lock(&file)?;
        file.set_len(size)?;
        file.sync_all()?;

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            size,
        })
    }

    /// Creates an image, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the image
    /// cannot be created.
    pub fn create_with_dirs(path: &Path, size: u64) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::create(path, size)
    }

    /// Opens an existing image. The region size is the file length.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is locked.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Self::lock(&file)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            size,
        })
    }

    /// Returns the path to the image file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(file: &File) -> StorageResult<()> {
        file.try_lock_exclusive().map_err(|_| StorageError::Locked)
    }
}

impl StorageBackend for FileBackend {
    fn size(&self) -> u64 {
        self.size
    }

    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        check_bounds(offset, len, self.size)?;

        if len == 0 {
            return Ok(Vec::new());
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        check_bounds(offset, data.len(), self.size)?;

        if data.is_empty() {
            return Ok(());
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        self.file.write().flush()?;
        Ok(())
    }

    fn sync(&mut self) -> StorageResult<()> {
        self.file.write().sync_all()?;
        Ok(())
    }
}
