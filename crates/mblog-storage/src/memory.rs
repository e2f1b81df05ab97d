use std::sync::Mutex;

use mblog_core::{Comment, FeedPost, Post};

use crate::traits::Storage;

/// In-memory storage for tests. Not durable, but good for unit/small scenario tests.
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    bookmarks: Vec<FeedPost>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed posts and comments, the collections the app never creates itself.
    pub fn with_data(posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                posts,
                comments,
                bookmarks: vec![],
            }),
        }
    }
}

impl Storage for MemoryStorage {
    fn load_posts(&self) -> anyhow::Result<Vec<Post>> {
        Ok(self.inner.lock().unwrap().posts.clone())
    }

    fn load_comments(&self) -> anyhow::Result<Vec<Comment>> {
        Ok(self.inner.lock().unwrap().comments.clone())
    }

    fn load_bookmarks(&self) -> anyhow::Result<Vec<FeedPost>> {
        Ok(self.inner.lock().unwrap().bookmarks.clone())
    }

    fn save_comments(&self, comments: &[Comment]) -> anyhow::Result<()> {
        self.inner.lock().unwrap().comments = comments.to_vec();
        Ok(())
    }

    fn save_bookmarks(&self, bookmarks: &[FeedPost]) -> anyhow::Result<()> {
        self.inner.lock().unwrap().bookmarks = bookmarks.to_vec();
        Ok(())
    }
}
