/// Number of colour slots a post can pick from.
pub const POST_COLORS: u8 = 6;

/// Placeholder entry of the home screen's social feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPost {
    pub title: String,
    pub description: String,
    pub color: u8,
}

impl FeedPost {
    pub fn placeholder(index: usize) -> Self {
        let n = index + 1;
        Self {
            title: format!("Feed Item {}", n),
            description: format!("This is feed item number {} for demonstration purposes.", n),
            color: (index % POST_COLORS as usize) as u8,
        }
    }

    pub fn placeholders(count: usize) -> Vec<Self> {
        (0..count).map(Self::placeholder).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        let posts = FeedPost::placeholders(5);
        assert_eq!(posts.len(), 5);
        assert_eq!(posts[0].title, "Feed Item 1");
        assert_eq!(posts[4].title, "Feed Item 5");
        assert!(posts.iter().all(|p| p.color < POST_COLORS));
    }
}
