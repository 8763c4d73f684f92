use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::Story;

/// A persisted proof that a story was viewed and/or liked.
///
/// Presence of a record means the story counts as viewed, whatever the
/// value of `is_liked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: String,
    pub username: String,
    #[serde(rename = "imageURL")]
    pub image_url: Url,
    #[serde(rename = "viewedAt")]
    pub viewed_at: DateTime<Utc>,
    // Older ledgers only tracked views.
    #[serde(rename = "isLiked", default)]
    pub is_liked: bool,
}

impl LedgerRecord {
    pub fn from_story(story: &Story, viewed_at: DateTime<Utc>, is_liked: bool) -> Self {
        Self {
            id: story.id.clone(),
            username: story.username.clone(),
            image_url: story.image_url.clone(),
            viewed_at,
            is_liked,
        }
    }
}
