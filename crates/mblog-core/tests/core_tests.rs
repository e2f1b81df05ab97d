use mblog_core::{Comment, CommentId, FeedPost, Post, PostId, Snapshot};

#[test]
fn test_post_creation() {
    let post = Post {
        pk: PostId::new(1),
        poster_name: "leo".to_string(),
        poster_avatar: "/img/leo.png".to_string(),
        pic: "/img/pic1.jpg".to_string(),
        content: "Утро в горах #отдых".to_string(),
        views_count: 100,
        likes_count: 25,
    };
    assert_eq!(post.pk, PostId::new(1));
    assert_eq!(post.poster_name, "leo");
}

#[test]
fn test_comment_creation() {
    let comment = Comment {
        post_id: PostId::new(1),
        commenter_name: "maria".to_string(),
        comment: "Отличное фото!".to_string(),
        pk: CommentId::new(3),
    };
    assert_eq!(comment.post_id, PostId::new(1));
    assert_eq!(comment.pk, CommentId::new(3));
}

#[test]
fn test_post_id_display_and_value() {
    let pk = PostId::new(42);
    assert_eq!(pk.to_string(), "42");
    assert_eq!(pk.value(), 42);
}

#[test]
fn test_snapshot_default_is_empty() {
    let snap = Snapshot::default();
    assert!(snap.posts.is_empty());
    assert!(snap.comments.is_empty());
    assert!(snap.bookmarks.is_empty());
}

#[test]
fn feed_post_serializes_flat() {
    let feed_post = FeedPost {
        post: Post {
            pk: PostId::new(2),
            poster_name: "johnny".to_string(),
            poster_avatar: String::new(),
            pic: String::new(),
            content: "пост".to_string(),
            views_count: 0,
            likes_count: 0,
        },
        comments_count: 1,
        ending: "й".to_string(),
    };
    let v = serde_json::to_value(&feed_post).unwrap();
    // bookmarks.json keeps post fields and the counter at the same level
    assert_eq!(v["pk"], 2);
    assert_eq!(v["comments_count"], 1);
    assert_eq!(v["ending"], "й");

    let back: FeedPost = serde_json::from_value(v).unwrap();
    assert_eq!(back, feed_post);
}

#[test]
fn post_counters_default_when_absent() {
    let raw = r#"{"pk": 5, "poster_name": "anna", "content": "текст"}"#;
    let post: Post = serde_json::from_str(raw).unwrap();
    assert_eq!(post.views_count, 0);
    assert_eq!(post.likes_count, 0);
    assert_eq!(post.poster_avatar, "");
}
