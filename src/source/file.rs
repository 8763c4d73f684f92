use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::app::{Result, StoryError};
use crate::domain::UserPagesDto;
use crate::source::PageSource;

const BUNDLED_USERS: &str = include_str!("../../data/users.json");

/// Serves the user document shipped inside the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

#[async_trait]
impl PageSource for BundledSource {
    async fn fetch_pages(&self) -> Result<UserPagesDto> {
        Ok(serde_json::from_str(BUNDLED_USERS)?)
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl PageSource for FileSource {
    async fn fetch_pages(&self) -> Result<UserPagesDto> {
        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoryError::Source(format!("File not found: {}", self.path.display()))
            } else {
                StoryError::Io(e)
            }
        })?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_document_has_three_pages() {
        let doc = tokio_test::block_on(BundledSource.fetch_pages()).unwrap();
        assert_eq!(doc.pages.len(), 3);
        assert!(doc.pages.iter().all(|p| p.users.len() == 10));
    }

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(
            &path,
            r#"{"pages":[{"users":[{"id":5,"name":"Eve","profile_picture_url":"https://i.pravatar.cc/300?u=5"}]}]}"#,
        )
        .unwrap();

        let doc = FileSource::new(&path).fetch_pages().await.unwrap();
        assert_eq!(doc.pages[0].users[0].name, "Eve");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("absent.json"))
            .fetch_pages()
            .await
            .unwrap_err();
        assert!(matches!(err, StoryError::Source(_)));
    }
}
