pub mod file;
pub mod json;

use chrono::{DateTime, Utc};

use crate::app::Result;
use crate::domain::{LedgerRecord, Story};

pub use file::{DiskFile, LedgerFile, MemoryFile};
pub use json::JsonLedger;

/// File name of the ledger inside the application data directory.
pub const LEDGER_FILE_NAME: &str = "viewed_stories.json";

/// Durable record of which stories were viewed and liked.
pub trait Ledger {
    // Reads
    fn load_all(&self) -> Result<Vec<LedgerRecord>>;
    fn get(&self, id: &str) -> Result<Option<LedgerRecord>>;
    fn is_viewed(&self, id: &str) -> Result<bool>;
    fn is_liked(&self, id: &str) -> Result<bool>;

    // Mutations
    fn mark_viewed(&self, story: &Story) -> Result<bool>;
    fn toggle_liked(&self, story: &Story) -> Result<bool>;
    fn clear_all(&self) -> Result<()>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
