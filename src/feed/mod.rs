//! List screen state: the paginated story strip.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::Result;
use crate::domain::{Story, UserPageDto};
use crate::reconcile::{reconcile, reconcile_scoped};
use crate::source::PageSource;
use crate::store::Ledger;

pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(1500);

pub struct StoryFeed {
    ledger: Arc<dyn Ledger + Send + Sync>,
    source: Arc<dyn PageSource + Send + Sync>,
    page_delay: Duration,
    stories: Vec<Story>,
    current_page: usize,
    is_loading: bool,
    has_more_pages: bool,
    all_pages: Option<Vec<UserPageDto>>,
}

impl StoryFeed {
    pub fn new(
        ledger: Arc<dyn Ledger + Send + Sync>,
        source: Arc<dyn PageSource + Send + Sync>,
    ) -> Self {
        Self::with_page_delay(ledger, source, DEFAULT_PAGE_DELAY)
    }

    pub fn with_page_delay(
        ledger: Arc<dyn Ledger + Send + Sync>,
        source: Arc<dyn PageSource + Send + Sync>,
        page_delay: Duration,
    ) -> Self {
        Self {
            ledger,
            source,
            page_delay,
            stories: Vec::new(),
            current_page: 0,
            is_loading: false,
            has_more_pages: true,
            all_pages: None,
        }
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn story(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_more_pages(&self) -> bool {
        self.has_more_pages
    }

    /// Append the next page and reconcile the stories it brought in.
    ///
    /// Returns the number of stories appended; zero when a load is already
    /// running or no pages remain. The first call fetches the whole page
    /// set from the source, later calls wait the simulated page delay.
    pub async fn load_more(&mut self) -> Result<usize> {
        if self.is_loading || !self.has_more_pages {
            return Ok(0);
        }
        self.is_loading = true;
        let result = self.load_next_page().await;
        self.is_loading = false;
        result
    }

    async fn load_next_page(&mut self) -> Result<usize> {
        let queued = self
            .all_pages
            .as_ref()
            .map(|pages| pages.get(self.current_page).cloned());

        let page = match queued {
            None => {
                let doc = self.source.fetch_pages().await?;
                let first = doc.pages.first().cloned().unwrap_or_default();
                self.all_pages = Some(doc.pages);
                first
            }
            Some(None) => {
                self.has_more_pages = false;
                return Ok(0);
            }
            Some(Some(next)) => {
                tokio::time::sleep(self.page_delay).await;
                next
            }
        };

        let new_stories = page.to_stories();
        let ids: Vec<String> = new_stories.iter().map(|s| s.id.clone()).collect();
        self.stories.extend(new_stories);
        self.current_page += 1;
        let total_pages = self.all_pages.as_ref().map(Vec::len).unwrap_or(0);
        self.has_more_pages = self.current_page < total_pages;

        info!(
            "Loaded page {}/{} ({} stories)",
            self.current_page,
            total_pages,
            ids.len()
        );

        self.apply_ledger(Some(&ids));
        Ok(ids.len())
    }

    /// Keep loading until every page is in memory.
    pub async fn load_all(&mut self) -> Result<usize> {
        let mut total = 0;
        while self.has_more_pages {
            total += self.load_more().await?;
        }
        Ok(total)
    }

    /// Full reconciliation after the viewer closes.
    pub fn viewer_dismissed(&mut self) {
        self.apply_ledger(None);
    }

    fn apply_ledger(&mut self, scope: Option<&[String]>) {
        let records = match self.ledger.load_all() {
            Ok(records) => records,
            Err(e) => {
                warn!("Skipping reconciliation, ledger unavailable: {}", e);
                return;
            }
        };

        self.stories = match scope {
            Some(ids) => reconcile_scoped(&self.stories, &records, ids),
            None => reconcile(&self.stories, &records),
        };
    }
}
