use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Whole-file access to the single file backing a ledger.
pub trait LedgerFile {
    fn exists(&self) -> bool;
    fn read_all(&self) -> io::Result<Vec<u8>>;
    fn write_all(&self, data: &[u8]) -> io::Result<()>;
    /// Human-readable location for logs and errors.
    fn location(&self) -> String;
}

pub struct DiskFile {
    path: PathBuf,
}

impl DiskFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LedgerFile for DiskFile {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read_all(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }

    fn write_all(&self, data: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Readers never observe a half-written snapshot.
        let tmp = self.temp_path();
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Default)]
pub struct MemoryFile {
    data: Mutex<Option<Vec<u8>>>,
}

impl MemoryFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Mutex::new(Some(data.into())),
        }
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.data.lock().ok().and_then(|d| d.clone())
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> io::Error {
    io::Error::other(e.to_string())
}

impl LedgerFile for MemoryFile {
    fn exists(&self) -> bool {
        self.data.lock().map(|d| d.is_some()).unwrap_or(false)
    }

    fn read_all(&self) -> io::Result<Vec<u8>> {
        self.data
            .lock()
            .map_err(poisoned)?
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "ledger not created"))
    }

    fn write_all(&self, data: &[u8]) -> io::Result<()> {
        *self.data.lock().map_err(poisoned)? = Some(data.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
