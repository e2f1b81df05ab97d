use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use mblog_core::{Comment, FeedPost, Post};
use mblog_storage::Storage;

pub const POSTS_FILE: &str = "posts.json";
pub const COMMENTS_FILE: &str = "comments.json";
pub const BOOKMARKS_FILE: &str = "bookmarks.json";

/// Flat-file store: one pretty-printed JSON array per collection under a
/// single data directory. Post and comment bodies are UTF-8 text and are
/// written unescaped.
pub struct JsonStorage {
    data_dir: PathBuf,
    posts_file: String,
    comments_file: String,
    bookmarks_file: String,
}

impl JsonStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self::with_file_names(data_dir, POSTS_FILE, COMMENTS_FILE, BOOKMARKS_FILE)
    }

    pub fn with_file_names(
        data_dir: PathBuf,
        posts_file: impl Into<String>,
        comments_file: impl Into<String>,
        bookmarks_file: impl Into<String>,
    ) -> Self {
        Self {
            data_dir,
            posts_file: posts_file.into(),
            comments_file: comments_file.into(),
            bookmarks_file: bookmarks_file.into(),
        }
    }

    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join(&self.posts_file)
    }

    pub fn comments_path(&self) -> PathBuf {
        self.data_dir.join(&self.comments_file)
    }

    pub fn bookmarks_path(&self) -> PathBuf {
        self.data_dir.join(&self.bookmarks_file)
    }

    /// Create the data directory and seed an empty array for any missing
    /// collection file. Existing files are left untouched.
    pub fn seed_missing(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("create data dir {}", self.data_dir.display()))?;
        for path in [self.posts_path(), self.comments_path(), self.bookmarks_path()] {
            if !path.exists() {
                write_array::<Post>(&path, &[])?;
            }
        }
        Ok(())
    }
}

fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let rdr = BufReader::new(f);
    let items: Vec<T> =
        serde_json::from_reader(rdr).with_context(|| format!("parse {}", path.display()))?;
    Ok(items)
}

fn read_array_or_default<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(vec![]);
    }
    read_array(path)
}

fn write_array<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let f = File::create(path).with_context(|| format!("write {}", path.display()))?;
    serde_json::to_writer_pretty(f, items)
        .with_context(|| format!("serialize {}", path.display()))?;
    Ok(())
}

impl Storage for JsonStorage {
    fn load_posts(&self) -> anyhow::Result<Vec<Post>> {
        read_array(&self.posts_path())
    }

    fn load_comments(&self) -> anyhow::Result<Vec<Comment>> {
        read_array(&self.comments_path())
    }

    fn load_bookmarks(&self) -> anyhow::Result<Vec<FeedPost>> {
        // the app owns this file; before the first bookmark it may not exist
        read_array_or_default(&self.bookmarks_path())
    }

    fn save_comments(&self, comments: &[Comment]) -> anyhow::Result<()> {
        write_array(&self.comments_path(), comments)
    }

    fn save_bookmarks(&self, bookmarks: &[FeedPost]) -> anyhow::Result<()> {
        write_array(&self.bookmarks_path(), bookmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mblog_core::{CommentId, PostId};
    use tempfile::tempdir;

    fn sample_post() -> Post {
        Post {
            pk: PostId::new(1),
            poster_name: "leo".to_string(),
            poster_avatar: "/img/leo.png".to_string(),
            pic: "/img/pic1.jpg".to_string(),
            content: "Утро в лесу #поход".to_string(),
            views_count: 100,
            likes_count: 5,
        }
    }

    #[test]
    fn roundtrips_comments() {
        let dir = tempdir().unwrap();
        let store = JsonStorage::new(dir.path().to_path_buf());
        let comments = vec![Comment {
            post_id: PostId::new(1),
            commenter_name: "anna".to_string(),
            comment: "Красота!".to_string(),
            pk: CommentId::new(1),
        }];
        store.save_comments(&comments).unwrap();
        assert_eq!(store.load_comments().unwrap(), comments);
    }

    #[test]
    fn missing_bookmarks_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = JsonStorage::new(dir.path().to_path_buf());
        assert!(store.load_bookmarks().unwrap().is_empty());
    }

    #[test]
    fn missing_posts_file_is_an_error_with_path() {
        let dir = tempdir().unwrap();
        let store = JsonStorage::new(dir.path().to_path_buf());
        let err = store.load_posts().unwrap_err();
        assert!(format!("{err:#}").contains("posts.json"));
    }

    #[test]
    fn writes_pretty_unescaped_utf8() {
        let dir = tempdir().unwrap();
        let store = JsonStorage::new(dir.path().to_path_buf());
        store
            .save_bookmarks(&[FeedPost {
                post: sample_post(),
                comments_count: 1,
                ending: "й".to_string(),
            }])
            .unwrap();
        let raw = std::fs::read_to_string(store.bookmarks_path()).unwrap();
        assert!(raw.contains('\n'));
        assert!(raw.contains("Утро в лесу"));
        assert!(!raw.contains("\\u"));
    }

    #[test]
    fn seed_missing_creates_empty_collections() {
        let dir = tempdir().unwrap();
        let store = JsonStorage::new(dir.path().join("data"));
        store.seed_missing().unwrap();
        assert!(store.load_posts().unwrap().is_empty());
        assert!(store.load_comments().unwrap().is_empty());
        assert!(store.load_bookmarks().unwrap().is_empty());

        // a second seed must not wipe data
        store.save_comments(&[]).unwrap();
        let posts = vec![sample_post()];
        write_array(&store.posts_path(), &posts).unwrap();
        store.seed_missing().unwrap();
        assert_eq!(store.load_posts().unwrap(), posts);
    }

    #[test]
    fn custom_file_names_are_respected() {
        let dir = tempdir().unwrap();
        let store = JsonStorage::with_file_names(
            dir.path().to_path_buf(),
            "p.json",
            "c.json",
            "b.json",
        );
        assert!(store.posts_path().ends_with("p.json"));
        store.save_bookmarks(&[]).unwrap();
        assert!(dir.path().join("b.json").exists());
    }
}
