use std::collections::HashMap;

use crate::ids::{CommentId, PostId};
use crate::model::{Comment, FeedPost, Post};

/// Suffix of the Russian noun "комментари…" in the declension matching `count`
/// (1 комментарий, 3 комментария, 11 комментариев).
pub fn comment_ending(count: u64) -> &'static str {
    if count == 1 || count % 10 == 1 && count % 100 != 11 {
        "й"
    } else if (2..=4).contains(&count)
        || (2..=4).contains(&(count % 10)) && !(10..=20).contains(&(count % 100))
    {
        "я"
    } else {
        "ев"
    }
}

/// Count comments per post in a single pass.
pub fn count_comments(comments: &[Comment]) -> HashMap<PostId, u64> {
    let mut counts: HashMap<PostId, u64> = HashMap::new();
    for c in comments {
        *counts.entry(c.post_id).or_insert(0) += 1;
    }
    counts
}

/// Join posts with their comment counters. Posts without comments get a
/// zero counter, so every feed entry carries a renderable count + suffix.
pub fn attach_comment_counts(posts: Vec<Post>, comments: &[Comment]) -> Vec<FeedPost> {
    let counts = count_comments(comments);
    posts
        .into_iter()
        .map(|post| {
            let comments_count = counts.get(&post.pk).copied().unwrap_or(0);
            FeedPost {
                comments_count,
                ending: comment_ending(comments_count).to_string(),
                post,
            }
        })
        .collect()
}

/// Keyword filter: case-insensitive substring of `content`.
pub fn filter_by_keyword(feed: &[FeedPost], word: &str) -> Vec<FeedPost> {
    let needle = word.to_lowercase();
    feed.iter()
        .filter(|p| p.post.content.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Tag filter: literal `#tag` substring of `content`, case-sensitive.
pub fn filter_by_tag(feed: &[FeedPost], tag: &str) -> Vec<FeedPost> {
    let needle = format!("#{tag}");
    feed.iter()
        .filter(|p| p.post.content.contains(&needle))
        .cloned()
        .collect()
}

/// Author filter: case-insensitive substring of `poster_name`.
pub fn filter_by_author(feed: &[FeedPost], name: &str) -> Vec<FeedPost> {
    let needle = name.to_lowercase();
    feed.iter()
        .filter(|p| p.post.poster_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Rewrite `#tag` tokens into anchors the tag page understands.
/// Tokenization is on single spaces so the original spacing survives rejoin.
pub fn linkify_hashtags(content: &str) -> String {
    content
        .split(' ')
        .map(|word| match word.strip_prefix('#') {
            Some(tag) => format!("<a href='/tag/{tag}'>{word}</a>"),
            None => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when a post with `pk` is already in `list`.
pub fn contains_post(pk: PostId, list: &[FeedPost]) -> bool {
    list.iter().any(|p| p.post.pk == pk)
}

/// Next free comment pk. Max-based, so a hand-edited file cannot collide.
pub fn next_comment_pk(comments: &[Comment]) -> CommentId {
    CommentId::new(comments.iter().map(|c| c.pk.value()).max().unwrap_or(0) + 1)
}
