use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::Story;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub profile_picture_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPageDto {
    pub users: Vec<UserDto>,
}

impl UserPageDto {
    /// Convert the page into fresh, unflagged stories.
    ///
    /// Users whose picture URL does not parse are skipped.
    pub fn to_stories(&self) -> Vec<Story> {
        self.users
            .iter()
            .filter_map(|user| {
                let image_url = match Url::parse(&user.profile_picture_url) {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::debug!("Skipping user {}: bad picture URL: {}", user.id, e);
                        return None;
                    }
                };
                Some(Story::new(user.id.to_string(), user.name.clone(), image_url))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPagesDto {
    pub pages: Vec<UserPageDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pages_document() {
        let json = r#"{"pages":[{"users":[
            {"id":1,"name":"Neo","profile_picture_url":"https://i.pravatar.cc/300?u=1"},
            {"id":2,"name":"Trinity","profile_picture_url":"https://i.pravatar.cc/300?u=2"}
        ]},{"users":[]}]}"#;
        let doc: UserPagesDto = serde_json::from_str(json).unwrap();
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].users[1].name, "Trinity");
    }

    #[test]
    fn test_to_stories_uses_decimal_ids() {
        let page = UserPageDto {
            users: vec![UserDto {
                id: 42,
                name: "Morpheus".into(),
                profile_picture_url: "https://i.pravatar.cc/300?u=42".into(),
            }],
        };
        let stories = page.to_stories();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, "42");
        assert_eq!(stories[0].username, "Morpheus");
        assert!(!stories[0].is_viewed);
    }

    #[test]
    fn test_to_stories_skips_bad_urls() {
        let page = UserPageDto {
            users: vec![
                UserDto {
                    id: 1,
                    name: "Good".into(),
                    profile_picture_url: "https://i.pravatar.cc/300?u=1".into(),
                },
                UserDto {
                    id: 2,
                    name: "Bad".into(),
                    profile_picture_url: "::nope".into(),
                },
            ],
        };
        let ids: Vec<_> = page.to_stories().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["1"]);
    }
}
