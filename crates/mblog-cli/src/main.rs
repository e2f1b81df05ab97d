use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mblog_core::{FeedPost, PostId};
use mblog_service::Service;
use mblog_validate::Severity;

#[derive(Parser)]
#[command(name = "mblog", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize the app root (writes mblog.toml, seeds empty collections)
    Init,

    /// Validate the data files (duplicate pks, dangling references, drift)
    Doctor,

    /// List all posts with their comment counters
    Feed,

    /// Show one post with hashtags rendered as links
    Post {
        #[arg(long)]
        pk: u64,
    },

    /// List comments under a post
    Comments {
        #[arg(long)]
        pk: u64,
    },

    /// Find posts containing a keyword
    Search {
        #[arg(long)]
        word: String,
    },

    /// Find posts carrying a #tag
    Tag {
        #[arg(long)]
        tag: String,
    },

    /// Find posts by author name
    User {
        #[arg(long)]
        name: String,
    },

    /// List bookmarked posts
    Bookmarks,

    /// Bookmark a post
    BookmarkAdd {
        #[arg(long)]
        pk: u64,
    },

    /// Remove a post from bookmarks
    BookmarkRemove {
        #[arg(long)]
        pk: u64,
    },

    /// Add a comment to a post
    CommentAdd {
        #[arg(long)]
        pk: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        text: String,
    },
}

fn print_feed(feed: &[FeedPost]) {
    for p in feed {
        println!(
            "- [{}] {}: {} ({} комментари{})",
            p.pk(),
            p.post.poster_name,
            p.post.content,
            p.comments_count,
            p.ending
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    match cli.cmd {
        Command::Init => {
            Service::init_root(&root)?;
            println!("Initialized mblog in {}", root.display());
        }
        Command::Doctor => {
            let s = Service::open(root)?;
            let findings = s.doctor()?;
            for f in findings.iter().filter(|f| f.severity == Severity::Warn) {
                println!("warn [{}]: {}", f.rule_id, f.message);
            }
            println!("OK");
        }
        Command::Feed => {
            let s = Service::open(root)?;
            let feed = s.feed()?;
            println!("Posts: {}", feed.len());
            print_feed(&feed);
        }
        Command::Post { pk } => {
            let s = Service::open(root)?;
            match s.post(PostId::new(pk))? {
                Some(post) => println!("{}", serde_json::to_string_pretty(&post)?),
                None => println!("No post with pk {}", pk),
            }
        }
        Command::Comments { pk } => {
            let s = Service::open(root)?;
            let comments = s.comments_for(PostId::new(pk))?;
            println!("Comments: {}", comments.len());
            for c in comments {
                println!("- [{}] {}: {}", c.pk, c.commenter_name, c.comment);
            }
        }
        Command::Search { word } => {
            let s = Service::open(root)?;
            print_feed(&s.search(&word)?);
        }
        Command::Tag { tag } => {
            let s = Service::open(root)?;
            print_feed(&s.posts_by_tag(&tag)?);
        }
        Command::User { name } => {
            let s = Service::open(root)?;
            print_feed(&s.posts_by_author(&name)?);
        }
        Command::Bookmarks => {
            let s = Service::open(root)?;
            let bookmarks = s.bookmarks()?;
            println!("Bookmarks: {}", bookmarks.len());
            print_feed(&bookmarks);
        }
        Command::BookmarkAdd { pk } => {
            let s = Service::open(root)?;
            if s.add_bookmark(PostId::new(pk))? {
                println!("Bookmarked post {}", pk);
            } else {
                println!("Post {} is already bookmarked", pk);
            }
        }
        Command::BookmarkRemove { pk } => {
            let s = Service::open(root)?;
            if s.remove_bookmark(PostId::new(pk))? {
                println!("Removed bookmark for post {}", pk);
            } else {
                println!("Post {} was not bookmarked", pk);
            }
        }
        Command::CommentAdd { pk, name, text } => {
            let s = Service::open(root)?;
            let comment = s.add_comment(PostId::new(pk), &name, &text)?;
            println!("Added comment {} to post {}", comment.pk, pk);
        }
    }

    Ok(())
}
