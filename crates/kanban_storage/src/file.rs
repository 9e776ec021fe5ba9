//! File-based token store for persistent sessions.

use crate::error::{StoreError, StoreResult};
use crate::store::{TokenEntry, TokenStore, DEFAULT_ENTRY_NAME};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A file-based token store.
///
/// The entry is kept as a small JSON document next to nothing else. Writes
/// go through a temporary file and a rename, so a crash never leaves a
/// half-written token behind.
///
/// # Durability
///
/// - `put()` syncs the temporary file before renaming it into place
/// - a missing file reads as an empty store
///
/// # Example
///
/// ```no_run
/// use kanban_storage::{FileTokenStore, TokenStore};
/// use std::path::Path;
///
/// let store = FileTokenStore::open(Path::new("session/token.json")).unwrap();
/// store.put("a.b.c", None).unwrap();
/// ```
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    name: String,
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Opens a store at `path` using the default entry name.
    ///
    /// Parent directories are created if needed. The file itself is only
    /// created on the first `put`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::open_named(path, DEFAULT_ENTRY_NAME)
    }

    /// Opens a store at `path` with an explicit entry name.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open_named(path: &Path, name: impl Into<String>) -> StoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            name: name.into(),
            lock: Mutex::new(()),
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }

    fn read_entry(&self) -> StoreResult<Option<TokenEntry>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let entry: TokenEntry = serde_json::from_slice(&bytes)?;
        if entry.name != self.name {
            return Err(StoreError::NameMismatch {
                expected: self.name.clone(),
                found: entry.name.clone(),
            });
        }
        Ok(Some(entry))
    }

    fn remove_file(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn put(&self, token: &str, expires: Option<DateTime<Utc>>) -> StoreResult<()> {
        let _guard = self.lock.lock();
        let entry = TokenEntry::new(self.name.as_str(), token, expires);
        let mut bytes = serde_json::to_vec(&entry)?;

        let temp = self.temp_path();
        let result = write_private(&temp, &bytes).and_then(|()| fs::rename(&temp, &self.path));
        zeroize::Zeroize::zeroize(&mut bytes);
        if let Err(e) = result {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), "token entry written");
        Ok(())
    }

    fn get(&self) -> StoreResult<Option<String>> {
        let _guard = self.lock.lock();
        match self.read_entry()? {
            None => Ok(None),
            Some(entry) if entry.is_expired_at(Utc::now()) => {
                tracing::debug!(path = %self.path.display(), "evicting expired token entry");
                self.remove_file()?;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
        }
    }

    fn clear(&self) -> StoreResult<()> {
        let _guard = self.lock.lock();
        self.remove_file()
    }
}

/// Writes `bytes` to `path`, readable by the owner only where supported.
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
