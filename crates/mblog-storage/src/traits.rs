use mblog_core::{Comment, FeedPost, Post, Snapshot};

pub trait Storage: Send + Sync {
    fn load_posts(&self) -> anyhow::Result<Vec<Post>>;
    fn load_comments(&self) -> anyhow::Result<Vec<Comment>>;
    fn load_bookmarks(&self) -> anyhow::Result<Vec<FeedPost>>;

    fn save_comments(&self, comments: &[Comment]) -> anyhow::Result<()>;
    fn save_bookmarks(&self, bookmarks: &[FeedPost]) -> anyhow::Result<()>;

    /// Pull all three collections at once for validation and joins.
    fn load_snapshot(&self) -> anyhow::Result<Snapshot> {
        Ok(Snapshot {
            posts: self.load_posts()?,
            comments: self.load_comments()?,
            bookmarks: self.load_bookmarks()?,
        })
    }
}
