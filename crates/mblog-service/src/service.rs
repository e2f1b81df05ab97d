use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use mblog_core::{
    attach_comment_counts, comment_ending, contains_post, filter_by_author, filter_by_keyword,
    filter_by_tag, linkify_hashtags, next_comment_pk, Comment, DataError, FeedPost, PostId,
};
use mblog_storage::Storage;
use mblog_storage_json::JsonStorage;
use mblog_validate::Finding;

use crate::config::Config;
use crate::doctor::doctor;

/// Imperative shell over the JSON store: every view-layer operation goes
/// through here. Mutations persist before returning.
pub struct Service {
    pub root: PathBuf,
    pub cfg: Config,
    pub storage: JsonStorage,
}

impl Service {
    pub fn open(root: PathBuf) -> Result<Self> {
        let cfg_path = Config::config_path(&root);
        let cfg = if cfg_path.exists() {
            Config::load_from(&cfg_path)?
        } else {
            let cfg = Config::default_for_root();
            cfg.save_to(&cfg_path)?;
            cfg
        };

        let storage = JsonStorage::with_file_names(
            cfg.data_dir(&root),
            cfg.posts_file(),
            cfg.comments_file(),
            cfg.bookmarks_file(),
        );

        Ok(Self { root, cfg, storage })
    }

    /// Write a default config if missing and seed empty collection files.
    pub fn init_root(root: &Path) -> Result<()> {
        let cfg_path = Config::config_path(root);
        if !cfg_path.exists() {
            Config::default_for_root().save_to(&cfg_path)?;
        }
        let service = Self::open(root.to_path_buf())?;
        service.storage.seed_missing()?;
        Ok(())
    }

    pub fn doctor(&self) -> Result<Vec<Finding>> {
        doctor(&self.storage)
    }

    /// All posts with comment counters attached.
    pub fn feed(&self) -> Result<Vec<FeedPost>> {
        let posts = self.storage.load_posts()?;
        let comments = self.storage.load_comments()?;
        Ok(attach_comment_counts(posts, &comments))
    }

    /// A single post with its content prepared for rendering: hashtags
    /// become links. `None` when the pk is unknown.
    pub fn post(&self, pk: PostId) -> Result<Option<FeedPost>> {
        let found = self.feed()?.into_iter().find(|p| p.pk() == pk);
        Ok(found.map(|mut p| {
            p.post.content = linkify_hashtags(&p.post.content);
            p
        }))
    }

    pub fn comments_for(&self, pk: PostId) -> Result<Vec<Comment>> {
        let comments = self.storage.load_comments()?;
        Ok(comments.into_iter().filter(|c| c.post_id == pk).collect())
    }

    pub fn search(&self, word: &str) -> Result<Vec<FeedPost>> {
        Ok(filter_by_keyword(&self.feed()?, word))
    }

    pub fn posts_by_tag(&self, tag: &str) -> Result<Vec<FeedPost>> {
        Ok(filter_by_tag(&self.feed()?, tag))
    }

    pub fn posts_by_author(&self, name: &str) -> Result<Vec<FeedPost>> {
        Ok(filter_by_author(&self.feed()?, name))
    }

    pub fn bookmarks(&self) -> Result<Vec<FeedPost>> {
        self.storage.load_bookmarks()
    }

    /// Copy the aggregated post into the bookmark list. Returns false when
    /// it was already bookmarked.
    pub fn add_bookmark(&self, pk: PostId) -> Result<bool> {
        let mut bookmarks = self.storage.load_bookmarks()?;
        if contains_post(pk, &bookmarks) {
            debug!(pk = pk.value(), "post already bookmarked");
            return Ok(false);
        }

        let post = self
            .feed()?
            .into_iter()
            .find(|p| p.pk() == pk)
            .ok_or(DataError::PostNotFound(pk))?;
        bookmarks.push(post);
        self.storage
            .save_bookmarks(&bookmarks)
            .context("persist bookmarks")?;
        info!(pk = pk.value(), "bookmarked post");
        Ok(true)
    }

    /// Drop the bookmark with this pk. Removing a post that was never
    /// bookmarked is a no-op reported as false.
    pub fn remove_bookmark(&self, pk: PostId) -> Result<bool> {
        let mut bookmarks = self.storage.load_bookmarks()?;
        let before = bookmarks.len();
        bookmarks.retain(|b| b.pk() != pk);
        let removed = bookmarks.len() < before;
        self.storage
            .save_bookmarks(&bookmarks)
            .context("persist bookmarks")?;
        if removed {
            info!(pk = pk.value(), "removed bookmark");
        }
        Ok(removed)
    }

    /// Append a comment to the post and bump the counter on any bookmarked
    /// copy of it. Both files are persisted.
    pub fn add_comment(&self, pk: PostId, name: &str, text: &str) -> Result<Comment> {
        if name.trim().is_empty() {
            return Err(DataError::EmptyCommenterName.into());
        }
        if text.trim().is_empty() {
            return Err(DataError::EmptyCommentText.into());
        }

        let posts = self.storage.load_posts()?;
        if !posts.iter().any(|p| p.pk == pk) {
            return Err(DataError::PostNotFound(pk).into());
        }

        let mut comments = self.storage.load_comments()?;
        let new_comment = Comment {
            post_id: pk,
            commenter_name: name.to_string(),
            comment: text.to_string(),
            pk: next_comment_pk(&comments),
        };
        comments.push(new_comment.clone());

        let mut bookmarks = self.storage.load_bookmarks()?;
        for b in bookmarks.iter_mut().filter(|b| b.pk() == pk) {
            b.comments_count += 1;
            b.ending = comment_ending(b.comments_count).to_string();
        }

        self.storage
            .save_comments(&comments)
            .context("persist comments")?;
        self.storage
            .save_bookmarks(&bookmarks)
            .context("persist bookmarks")?;
        info!(pk = pk.value(), comment_pk = new_comment.pk.value(), "added comment");
        Ok(new_comment)
    }
}
