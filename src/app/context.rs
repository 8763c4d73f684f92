use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, StoryError};
use crate::cache::MemoryCache;
use crate::config::Config;
use crate::domain::Story;
use crate::feed::StoryFeed;
use crate::source::{BundledSource, PageSource, SourceLocation};
use crate::store::{JsonLedger, Ledger};
use crate::viewer::{ViewerSession, ViewerTiming};

pub struct AppContext {
    pub ledger: Arc<dyn Ledger + Send + Sync>,
    pub source: Arc<dyn PageSource + Send + Sync>,
    pub cache: Arc<MemoryCache>,
    pub config: Config,
}

impl AppContext {
    /// Wire up the context from `config`, with optional command-line overrides.
    pub fn new(config: Config, ledger_path: Option<PathBuf>, source: Option<&str>) -> Result<Self> {
        let ledger_path = match ledger_path {
            Some(p) => p,
            None => config
                .ledger_path()
                .map_err(|e| StoryError::Config(e.to_string()))?,
        };

        let cache = Arc::new(MemoryCache::new(config.cache.capacity));
        let location = SourceLocation::parse(source.unwrap_or(&config.source.location))?;
        let source = location.build(cache.clone())?;
        tracing::debug!("Ledger at {}, source {:?}", ledger_path.display(), location);

        Ok(Self {
            ledger: Arc::new(JsonLedger::open(ledger_path)),
            source,
            cache,
            config,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            ledger: Arc::new(JsonLedger::in_memory()),
            source: Arc::new(BundledSource),
            cache: Arc::new(MemoryCache::default()),
            config: Config::default(),
        }
    }

    pub fn feed(&self) -> StoryFeed {
        StoryFeed::with_page_delay(self.ledger.clone(), self.source.clone(), self.config.page_delay())
    }

    pub fn timing(&self) -> ViewerTiming {
        self.config.viewer_timing()
    }

    pub fn open_viewer(&self, story: Story) -> Result<ViewerSession> {
        ViewerSession::open(self.ledger.clone(), story, self.timing())
    }
}
