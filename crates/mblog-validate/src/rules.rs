use std::collections::{HashMap, HashSet};

use mblog_core::{comment_ending, count_comments, PostId, Snapshot};

use crate::types::{Finding, Severity, ValidationCategory};

pub trait Rule: Send + Sync {
    fn id(&self) -> &str;
    fn category(&self) -> ValidationCategory;
    fn eval(&self, snapshot: &Snapshot) -> Vec<Finding>;
}

fn finding(rule: &dyn Rule, severity: Severity, message: String) -> Finding {
    Finding {
        rule_id: rule.id().to_string(),
        category: rule.category(),
        severity,
        message,
    }
}

/// Blocks when two posts share a pk; every lookup and join keys on it.
pub struct DuplicatePostPkRule;

impl Rule for DuplicatePostPkRule {
    fn id(&self) -> &str {
        "duplicate_post_pk"
    }

    fn category(&self) -> ValidationCategory {
        ValidationCategory::Integrity
    }

    fn eval(&self, snapshot: &Snapshot) -> Vec<Finding> {
        duplicated(snapshot.posts.iter().map(|p| p.pk.value()))
            .into_iter()
            .map(|pk| finding(self, Severity::Fail, format!("post pk {pk} appears more than once")))
            .collect()
    }
}

/// Blocks when two comments share a pk.
pub struct DuplicateCommentPkRule;

impl Rule for DuplicateCommentPkRule {
    fn id(&self) -> &str {
        "duplicate_comment_pk"
    }

    fn category(&self) -> ValidationCategory {
        ValidationCategory::Integrity
    }

    fn eval(&self, snapshot: &Snapshot) -> Vec<Finding> {
        duplicated(snapshot.comments.iter().map(|c| c.pk.value()))
            .into_iter()
            .map(|pk| finding(self, Severity::Fail, format!("comment pk {pk} appears more than once")))
            .collect()
    }
}

/// Comment pointing at a post that is not in posts.json.
pub struct OrphanCommentRule;

impl Rule for OrphanCommentRule {
    fn id(&self) -> &str {
        "orphan_comment"
    }

    fn category(&self) -> ValidationCategory {
        ValidationCategory::Reference
    }

    fn eval(&self, snapshot: &Snapshot) -> Vec<Finding> {
        let known: HashSet<PostId> = snapshot.posts.iter().map(|p| p.pk).collect();
        snapshot
            .comments
            .iter()
            .filter(|c| !known.contains(&c.post_id))
            .map(|c| {
                finding(
                    self,
                    Severity::Warn,
                    format!("comment {} references unknown post {}", c.pk, c.post_id),
                )
            })
            .collect()
    }
}

/// Bookmarked copy of a post that no longer exists.
pub struct UnknownBookmarkRule;

impl Rule for UnknownBookmarkRule {
    fn id(&self) -> &str {
        "unknown_bookmark"
    }

    fn category(&self) -> ValidationCategory {
        ValidationCategory::Reference
    }

    fn eval(&self, snapshot: &Snapshot) -> Vec<Finding> {
        let known: HashSet<PostId> = snapshot.posts.iter().map(|p| p.pk).collect();
        snapshot
            .bookmarks
            .iter()
            .filter(|b| !known.contains(&b.pk()))
            .map(|b| finding(self, Severity::Warn, format!("bookmark for unknown post {}", b.pk())))
            .collect()
    }
}

/// Bookmarked counter or suffix that drifted from the actual comment list.
pub struct BookmarkCountDriftRule;

impl Rule for BookmarkCountDriftRule {
    fn id(&self) -> &str {
        "bookmark_count_drift"
    }

    fn category(&self) -> ValidationCategory {
        ValidationCategory::Consistency
    }

    fn eval(&self, snapshot: &Snapshot) -> Vec<Finding> {
        let counts: HashMap<PostId, u64> = count_comments(&snapshot.comments);
        let mut findings = vec![];
        for b in &snapshot.bookmarks {
            let actual = counts.get(&b.pk()).copied().unwrap_or(0);
            if b.comments_count != actual {
                findings.push(finding(
                    self,
                    Severity::Warn,
                    format!(
                        "bookmark {} counts {} comments, actual is {}",
                        b.pk(),
                        b.comments_count,
                        actual
                    ),
                ));
            } else if b.ending != comment_ending(b.comments_count) {
                findings.push(finding(
                    self,
                    Severity::Warn,
                    format!("bookmark {} carries a stale ending for count {}", b.pk(), b.comments_count),
                ));
            }
        }
        findings
    }
}

/// Post without an author name renders as an anonymous card.
pub struct BlankPosterNameRule;

impl Rule for BlankPosterNameRule {
    fn id(&self) -> &str {
        "blank_poster_name"
    }

    fn category(&self) -> ValidationCategory {
        ValidationCategory::Content
    }

    fn eval(&self, snapshot: &Snapshot) -> Vec<Finding> {
        snapshot
            .posts
            .iter()
            .filter(|p| p.poster_name.trim().is_empty())
            .map(|p| finding(self, Severity::Warn, format!("post {} has a blank poster_name", p.pk)))
            .collect()
    }
}

fn duplicated(ids: impl Iterator<Item = u64>) -> Vec<u64> {
    let mut seen = HashSet::new();
    let mut dups = vec![];
    for id in ids {
        if !seen.insert(id) && !dups.contains(&id) {
            dups.push(id);
        }
    }
    dups
}

pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DuplicatePostPkRule),
        Box::new(DuplicateCommentPkRule),
        Box::new(OrphanCommentRule),
        Box::new(UnknownBookmarkRule),
        Box::new(BookmarkCountDriftRule),
        Box::new(BlankPosterNameRule),
    ]
}

pub fn run_rules(snapshot: &Snapshot) -> Vec<Finding> {
    default_rules().iter().flat_map(|r| r.eval(snapshot)).collect()
}

pub fn has_failures(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Fail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mblog_core::{Comment, CommentId, FeedPost, Post, PostId};

    fn post(pk: u64, poster: &str) -> Post {
        Post {
            pk: PostId::new(pk),
            poster_name: poster.to_string(),
            poster_avatar: String::new(),
            pic: String::new(),
            content: "текст".to_string(),
            views_count: 0,
            likes_count: 0,
        }
    }

    fn comment(pk: u64, post_id: u64) -> Comment {
        Comment {
            post_id: PostId::new(post_id),
            commenter_name: "anna".to_string(),
            comment: "ок".to_string(),
            pk: CommentId::new(pk),
        }
    }

    fn bookmark(pk: u64, count: u64, ending: &str) -> FeedPost {
        FeedPost {
            post: post(pk, "leo"),
            comments_count: count,
            ending: ending.to_string(),
        }
    }

    #[test]
    fn clean_snapshot_yields_no_findings() {
        let snapshot = Snapshot {
            posts: vec![post(1, "leo")],
            comments: vec![comment(1, 1)],
            bookmarks: vec![bookmark(1, 1, "й")],
        };
        assert!(run_rules(&snapshot).is_empty());
    }

    #[test]
    fn duplicate_post_pk_fails() {
        let snapshot = Snapshot {
            posts: vec![post(1, "leo"), post(1, "maria")],
            ..Default::default()
        };
        let findings = DuplicatePostPkRule.eval(&snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Fail);
        assert!(has_failures(&findings));
    }

    #[test]
    fn duplicate_comment_pk_reported_once() {
        let snapshot = Snapshot {
            posts: vec![post(1, "leo")],
            comments: vec![comment(2, 1), comment(2, 1), comment(2, 1)],
            bookmarks: vec![],
        };
        let findings = DuplicateCommentPkRule.eval(&snapshot);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn orphan_comment_warns() {
        let snapshot = Snapshot {
            posts: vec![post(1, "leo")],
            comments: vec![comment(1, 99)],
            bookmarks: vec![],
        };
        let findings = OrphanCommentRule.eval(&snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warn);
    }

    #[test]
    fn unknown_bookmark_warns() {
        let snapshot = Snapshot {
            posts: vec![post(1, "leo")],
            comments: vec![],
            bookmarks: vec![bookmark(5, 0, "ев")],
        };
        assert_eq!(UnknownBookmarkRule.eval(&snapshot).len(), 1);
    }

    #[test]
    fn drifted_bookmark_count_warns() {
        let snapshot = Snapshot {
            posts: vec![post(1, "leo")],
            comments: vec![comment(1, 1), comment(2, 1)],
            bookmarks: vec![bookmark(1, 1, "й")],
        };
        let findings = BookmarkCountDriftRule.eval(&snapshot);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("actual is 2"));
    }

    #[test]
    fn stale_bookmark_ending_warns() {
        let snapshot = Snapshot {
            posts: vec![post(1, "leo")],
            comments: vec![comment(1, 1)],
            bookmarks: vec![bookmark(1, 1, "ев")],
        };
        let findings = BookmarkCountDriftRule.eval(&snapshot);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("stale ending"));
    }

    #[test]
    fn blank_poster_name_warns() {
        let snapshot = Snapshot {
            posts: vec![post(1, "  ")],
            ..Default::default()
        };
        assert_eq!(BlankPosterNameRule.eval(&snapshot).len(), 1);
    }
}
