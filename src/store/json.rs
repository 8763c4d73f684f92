use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::app::{Result, StoryError};
use crate::domain::{LedgerRecord, Story};
use crate::store::{Clock, DiskFile, Ledger, LedgerFile, MemoryFile, SystemClock};

/// Ledger persisted as one JSON array, rewritten whole on every mutation.
///
/// The mutex spans each read-decode-mutate-encode-write cycle, so
/// overlapping callers in one process never lose each other's updates.
pub struct JsonLedger<F: LedgerFile> {
    file: Mutex<F>,
    clock: Box<dyn Clock + Send + Sync>,
}

impl JsonLedger<DiskFile> {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::new(DiskFile::new(path), SystemClock)
    }
}

impl JsonLedger<MemoryFile> {
    pub fn in_memory() -> Self {
        Self::new(MemoryFile::new(), SystemClock)
    }
}

impl<F: LedgerFile> JsonLedger<F> {
    pub fn new<C: Clock + Send + Sync + 'static>(file: F, clock: C) -> Self {
        Self {
            file: Mutex::new(file),
            clock: Box::new(clock),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, F>> {
        self.file
            .lock()
            .map_err(|e| StoryError::Other(format!("Ledger lock poisoned: {}", e)))
    }

    fn read_records(file: &F) -> Result<Vec<LedgerRecord>> {
        if !file.exists() {
            debug!("Creating empty ledger at {}", file.location());
            file.write_all(b"[]")?;
            return Ok(Vec::new());
        }

        let data = file.read_all()?;
        let records: Vec<LedgerRecord> =
            serde_json::from_slice(&data).map_err(|e| StoryError::corrupt(file.location(), e))?;
        debug!("Loaded {} ledger records", records.len());
        Ok(records)
    }

    fn write_records(file: &F, records: &[LedgerRecord]) -> Result<()> {
        let data = serde_json::to_vec_pretty(records)?;
        file.write_all(&data)?;
        debug!("Wrote {} ledger records to {}", records.len(), file.location());
        Ok(())
    }

    /// Run `f` over the current snapshot and persist it when `f` reports a change.
    fn update<T>(&self, f: impl FnOnce(&mut Vec<LedgerRecord>) -> (T, bool)) -> Result<T> {
        let file = self.lock()?;
        let mut records = Self::read_records(&file)?;
        let (value, changed) = f(&mut records);
        if changed {
            Self::write_records(&file, &records)?;
        }
        Ok(value)
    }
}

impl<F: LedgerFile> Ledger for JsonLedger<F> {
    fn load_all(&self) -> Result<Vec<LedgerRecord>> {
        let file = self.lock()?;
        Self::read_records(&file)
    }

    fn get(&self, id: &str) -> Result<Option<LedgerRecord>> {
        Ok(self.load_all()?.into_iter().find(|r| r.id == id))
    }

    fn is_viewed(&self, id: &str) -> Result<bool> {
        Ok(self.load_all()?.iter().any(|r| r.id == id))
    }

    fn is_liked(&self, id: &str) -> Result<bool> {
        Ok(self.get(id)?.map(|r| r.is_liked).unwrap_or(false))
    }

    fn mark_viewed(&self, story: &Story) -> Result<bool> {
        let now = self.clock.now();
        self.update(|records| {
            if records.iter().any(|r| r.id == story.id) {
                return (false, false);
            }
            records.push(LedgerRecord::from_story(story, now, story.is_liked));
            (true, true)
        })
    }

    fn toggle_liked(&self, story: &Story) -> Result<bool> {
        let now = self.clock.now();
        self.update(|records| {
            let liked = match records.iter_mut().find(|r| r.id == story.id) {
                Some(record) => {
                    record.is_liked = !record.is_liked;
                    record.is_liked
                }
                None => {
                    // Liking an unseen story records it as viewed too.
                    records.push(LedgerRecord::from_story(story, now, true));
                    true
                }
            };
            (liked, true)
        })
    }

    fn clear_all(&self) -> Result<()> {
        let file = self.lock()?;
        Self::write_records(&file, &[])
    }
}
