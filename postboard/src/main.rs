//! postboard - fetch posts into a store and print its views

use anyhow::{Context, Result};
use clap::Parser;
use libpostboard::logging::LoggingConfig;
use libpostboard::{Config, Post, PostId, PostStore, PostboardError};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "postboard")]
#[command(version, about = "Fetch posts from a REST endpoint and print the valid ones")]
#[command(long_about = r#"Fetch posts from a REST endpoint and print the valid ones.

A post is valid when both its title and its body are non-empty. Invalid posts
are still fetched and stored; use --all to see them.

EXAMPLES:
    # Fetch the default number of posts (3) and print the valid ones
    postboard

    # Fetch ten, print everything including invalid posts
    postboard --limit 10 --all

    # Just the number of valid posts
    postboard --limit 10 --count

    # Add a local post in front of the fetched ones
    postboard --title "Hello" --body "First local post"

    # Scripting
    postboard --format json | jq '.[].title'
    postboard --format jsonl

CONFIGURATION:
    ~/.config/postboard/config.toml (or $POSTBOARD_CONFIG):

        [source]
        base_url = "https://jsonplaceholder.typicode.com"
        default_limit = 3

EXIT CODES:
    0 - Success
    1 - Network, response or configuration error
    3 - Invalid input
"#)]
struct Args {
    /// Number of posts to request
    #[arg(short, long, value_name = "N")]
    limit: Option<u32>,

    /// Title of a local post to prepend after fetching
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Body of the local post
    #[arg(long, value_name = "TEXT")]
    body: Option<String>,

    /// Id of the local post (generated if omitted); canonical integers are
    /// stored as numbers, anything else as text
    #[arg(long, value_name = "ID")]
    id: Option<String>,

    /// Print every stored post, not only valid ones
    #[arg(long)]
    all: bool,

    /// Print only the number of valid posts
    #[arg(long, conflicts_with = "all")]
    count: bool,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json", "jsonl"])]
    format: String,

    /// API root to fetch from, overrides the config file
    #[arg(long, value_name = "URL", env = "POSTBOARD_BASE_URL")]
    base_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct CountOutput {
    count: usize,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    LoggingConfig::from_env(args.verbose).init();
    tracing::debug!("postboard started with args: {:?}", args);

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<PostboardError>()
            .map(PostboardError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(args: Args) -> Result<()> {
    let local = local_post(&args)?;

    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };
    if let Some(base_url) = &args.base_url {
        config.source.base_url = base_url.clone();
    }

    let store = PostStore::from_config(&config)?;
    let limit = args.limit.unwrap_or(store.default_limit());

    store
        .refresh(limit)
        .await
        .with_context(|| format!("Failed to fetch posts from {}", config.source.base_url))?;

    if let Some(post) = local {
        store.create_local(post);
    }

    if args.count {
        print_count(store.count_valid_posts(), &args.format)?;
    } else {
        let posts = if args.all {
            store.posts()
        } else {
            store.valid_posts()
        };
        print_posts(&posts, &args.format)?;
    }

    Ok(())
}

/// Build the post requested by --title/--body/--id, if any
fn local_post(args: &Args) -> Result<Option<Post>> {
    let Some(title) = &args.title else {
        if args.body.is_some() || args.id.is_some() {
            return Err(PostboardError::InvalidInput(
                "--body and --id require --title".to_string(),
            )
            .into());
        }
        return Ok(None);
    };

    let body = args.body.clone().unwrap_or_default();

    let post = match &args.id {
        Some(raw) => Post::new(raw.parse::<PostId>()?, title.clone(), body),
        None => Post::local(title.clone(), body),
    };
    Ok(Some(post))
}

fn print_count(count: usize, format: &str) -> Result<()> {
    match format {
        "json" | "jsonl" => println!("{}", serde_json::to_string(&CountOutput { count })?),
        _ => println!("{}", count),
    }
    Ok(())
}

fn print_posts(posts: &[Post], format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(posts)?),
        "jsonl" => {
            for post in posts {
                println!("{}", serde_json::to_string(post)?);
            }
        }
        _ => {
            for post in posts {
                println!("{}", format_text(post));
            }
        }
    }
    Ok(())
}

fn format_text(post: &Post) -> String {
    let title = post.title.as_deref().unwrap_or("");
    let body = post.body.as_deref().unwrap_or("");
    let first_line = body.lines().next().unwrap_or("");

    format!("#{} {}\n    {}", post.id, title, preview(first_line, 60))
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["postboard"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_no_local_post_by_default() {
        assert!(local_post(&args(&[])).unwrap().is_none());
    }

    #[test]
    fn test_local_post_numeric_id() {
        let post = local_post(&args(&["--title", "New", "--body", "Hi", "--id", "99"]))
            .unwrap()
            .unwrap();
        assert_eq!(post, Post::new(99, "New", "Hi"));
    }

    #[test]
    fn test_local_post_text_id_kept_verbatim() {
        let post = local_post(&args(&["--title", "t", "--body", "b", "--id", "007"]))
            .unwrap()
            .unwrap();
        assert_eq!(post.id, PostId::Text("007".to_string()));
    }

    #[test]
    fn test_local_post_generated_id() {
        let post = local_post(&args(&["--title", "New"])).unwrap().unwrap();
        assert!(matches!(post.id, PostId::Text(_)));
        assert_eq!(post.body.as_deref(), Some(""));
        assert!(!post.is_valid());
    }

    #[test]
    fn test_body_without_title_is_invalid_input() {
        let err = local_post(&args(&["--body", "orphan"])).unwrap_err();
        let exit = err.downcast_ref::<PostboardError>().map(PostboardError::exit_code);
        assert_eq!(exit, Some(3));
    }

    #[test]
    fn test_count_conflicts_with_all() {
        assert!(Args::try_parse_from(["postboard", "--count", "--all"]).is_err());
    }

    #[test]
    fn test_format_text() {
        let post = Post::new(7, "Title", "line one\nline two");
        assert_eq!(format_text(&post), "#7 Title\n    line one");
    }

    #[test]
    fn test_preview_counts_chars() {
        assert_eq!(preview("héllo", 3), "hél...");
        assert_eq!(preview("short", 60), "short");
    }
}
