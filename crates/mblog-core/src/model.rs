use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, PostId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub pk: PostId,
    pub poster_name: String,
    #[serde(default)]
    pub poster_avatar: String,
    #[serde(default)]
    pub pic: String,
    pub content: String,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub likes_count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub post_id: PostId,
    pub commenter_name: String,
    pub comment: String,
    pub pk: CommentId,
}

/// A post the way the view layer renders it: the raw record plus the comment
/// counter and the declined noun suffix for it. Bookmarks persist this shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    pub comments_count: u64,
    pub ending: String,
}

impl FeedPost {
    pub fn pk(&self) -> PostId {
        self.post.pk
    }
}
