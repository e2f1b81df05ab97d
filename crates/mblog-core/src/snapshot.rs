use crate::model::{Comment, FeedPost, Post};

/// Read-only view of the three collections. The storage layer produces it;
/// pure feed logic and validation rules consume it.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub bookmarks: Vec<FeedPost>,
}
