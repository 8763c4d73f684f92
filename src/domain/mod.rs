pub mod page;
pub mod post;
pub mod record;
pub mod story;

pub use page::{UserDto, UserPageDto, UserPagesDto};
pub use post::FeedPost;
pub use record::LedgerRecord;
pub use story::Story;
