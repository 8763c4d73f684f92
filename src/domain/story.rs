use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub username: String,
    pub image_url: Url,
    pub is_viewed: bool,
    pub is_liked: bool,
}

impl Story {
    pub fn new(id: impl Into<String>, username: impl Into<String>, image_url: Url) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            image_url,
            is_viewed: false,
            is_liked: false,
        }
    }

    /// Build a story from an unparsed image URL.
    pub fn parse(id: impl Into<String>, username: impl Into<String>, image_url: &str) -> Result<Self> {
        Ok(Self::new(id, username, Url::parse(image_url)?))
    }

    /// Copy of this story with new flags. Identity fields never change.
    pub fn with_state(&self, is_viewed: bool, is_liked: bool) -> Self {
        Self {
            is_viewed,
            is_liked,
            ..self.clone()
        }
    }

    pub fn with_liked(&self, is_liked: bool) -> Self {
        self.with_state(self.is_viewed, is_liked)
    }
}
