pub mod file;
pub mod http;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;
use crate::cache::MemoryCache;
use crate::domain::UserPagesDto;

pub use file::{BundledSource, FileSource};
pub use http::HttpSource;

/// Supplier of the paginated user document behind the story strip.
#[async_trait]
pub trait PageSource {
    async fn fetch_pages(&self) -> Result<UserPagesDto>;
}

/// Where the user document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// The document compiled into the binary.
    Bundled,
    Path(PathBuf),
    Http(Url),
}

impl SourceLocation {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("bundled") {
            return Ok(Self::Bundled);
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Self::Http(Url::parse(s)?));
        }
        Ok(Self::Path(PathBuf::from(s)))
    }

    pub fn build(&self, cache: Arc<MemoryCache>) -> Result<Arc<dyn PageSource + Send + Sync>> {
        let source: Arc<dyn PageSource + Send + Sync> = match self {
            Self::Bundled => Arc::new(BundledSource),
            Self::Path(path) => Arc::new(FileSource::new(path)),
            Self::Http(url) => Arc::new(HttpSource::new(url.clone(), cache)?),
        };
        Ok(source)
    }
}
