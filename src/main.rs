use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use memehub::config::EngineConfig;
use memehub::model::{FetchStatus, Theme};
use memehub::persist::FileStore;
use memehub::remote::RemoteFetcher;
use memehub::store::{Intent, ProfileUpdate, StateContainer, UploadRequest};
use memehub::views::{self, Category, SortKey};

#[derive(Parser)]
#[command(name = "memehub", about = "State engine for a meme-sharing app", version)]
struct Cli {
    /// Path to an alternate config file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh the browsable content list from the remote API.
    Fetch {
        /// Narrow the result by case-insensitive name match.
        #[arg(long)]
        query: Option<String>,
    },
    /// Like an item.
    Like { item_id: String },
    /// Comment on an item.
    Comment { item_id: String, text: String },
    /// Delete a comment by its 0-based index.
    Uncomment { item_id: String, index: usize },
    /// Upload a new item.
    Upload {
        #[arg(long)]
        name: String,
        /// Image URL for the new item.
        #[arg(long)]
        url: Option<String>,
        /// Local image file to inline as a data URL instead.
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        boxes: Option<u32>,
    },
    /// Show the profile, or update the given fields.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// Image file to inline as the new avatar.
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Browse the content list with filters.
    Show {
        #[arg(long, default_value = "trending")]
        category: String,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        sort: Option<String>,
        /// Seed for the Random category (reproducible shuffle).
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Leaderboard of items by likes.
    Leaderboard,
    /// Fetch template names for caption suggestions.
    Templates {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Set the theme: light, dark, or toggle.
    Theme { value: String },
    /// Bookmark an item.
    Save { item_id: String },
    /// Remove a bookmark.
    Unsave { item_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };

    let adapter = FileStore::new(config.storage.resolve_dir())?;
    let container = StateContainer::new(Box::new(adapter));

    match cli.command {
        Command::Fetch { query } => {
            let fetcher = RemoteFetcher::new(&config);
            container.fetch_content(&fetcher, query.as_deref()).await;
            let state = container.snapshot();
            match &state.fetch.content {
                FetchStatus::Failed(reason) => anyhow::bail!("Fetch failed: {reason}"),
                _ => println!("Fetched {} items", state.content.browsable().len()),
            }
        }

        Command::Like { item_id } => {
            container.dispatch(Intent::Like {
                item_id: item_id.clone(),
            })?;
            let state = container.snapshot();
            println!("{item_id} now has {} likes", state.ledger.likes(&item_id));
        }

        Command::Comment { item_id, text } => {
            container.dispatch(Intent::AddComment {
                item_id: item_id.clone(),
                text,
            })?;
            let state = container.snapshot();
            println!(
                "{item_id} now has {} comments",
                state.ledger.comments(&item_id).len()
            );
        }

        Command::Uncomment { item_id, index } => {
            container.dispatch(Intent::DeleteComment {
                item_id: item_id.clone(),
                index,
            })?;
            let state = container.snapshot();
            println!(
                "{item_id} now has {} comments",
                state.ledger.comments(&item_id).len()
            );
        }

        Command::Upload {
            name,
            url,
            file,
            boxes,
        } => {
            let url = match (url, file) {
                (Some(url), _) => url,
                (None, Some(path)) => inline_data_url(&path)?,
                (None, None) => anyhow::bail!("Pass --url or --file"),
            };
            container.dispatch(Intent::AddUpload(UploadRequest {
                name,
                url,
                box_count: boxes,
            }))?;
            let state = container.snapshot();
            let item = &state.content.uploaded()[0];
            println!("Uploaded '{}' as {}", item.name, item.id);
        }

        Command::Profile {
            name,
            username,
            bio,
            photo,
        } => {
            let profile_photo = match photo {
                Some(path) => Some(inline_data_url(&path)?),
                None => None,
            };
            let update = ProfileUpdate {
                name,
                username,
                bio,
                profile_photo,
            };
            if update == ProfileUpdate::default() {
                print_profile(&container);
            } else {
                container.dispatch(Intent::UpdateProfile(update))?;
                println!("Profile updated");
            }
        }

        Command::Show {
            category,
            search,
            sort,
            seed,
        } => {
            let category = Category::parse(&category)
                .ok_or_else(|| anyhow::anyhow!("Unknown category '{category}'"))?;
            let state = container.snapshot();

            let mut items = state.content.browsable().to_vec();
            if let Some(term) = &search {
                items = views::search(&items, term);
            }
            let mut items = views::by_category(&items, &state.ledger, category, seed);
            if let Some(key) = &sort {
                let key = SortKey::parse(key)
                    .ok_or_else(|| anyhow::anyhow!("Unknown sort key '{key}'"))?;
                items = views::sort_by(&items, &state.ledger, key);
            }

            if items.is_empty() {
                println!("No items. Run `memehub fetch` first?");
            }
            for item in &items {
                println!(
                    "{:>4} ♥  {}  ({})",
                    state.ledger.likes(&item.id),
                    item.name,
                    item.id
                );
            }
        }

        Command::Leaderboard => {
            let state = container.snapshot();
            let items = views::sort_by(state.content.browsable(), &state.ledger, SortKey::Likes);
            for (index, item) in items.iter().enumerate() {
                println!(
                    "{}  {} — {} likes",
                    views::rank(index),
                    item.name,
                    state.ledger.likes(&item.id)
                );
            }
        }

        Command::Templates { limit } => {
            let fetcher = RemoteFetcher::new(&config);
            container.fetch_templates(&fetcher, limit).await;
            let state = container.snapshot();
            match &state.fetch.templates {
                FetchStatus::Failed(reason) => anyhow::bail!("Fetch failed: {reason}"),
                _ => {
                    for name in &state.templates {
                        println!("{name}");
                    }
                }
            }
        }

        Command::Theme { value } => {
            let intent = match value.as_str() {
                "light" => Intent::SetTheme(Theme::Light),
                "dark" => Intent::SetTheme(Theme::Dark),
                "toggle" => Intent::ToggleTheme,
                other => anyhow::bail!("Unknown theme '{other}' (light, dark, toggle)"),
            };
            container.dispatch(intent)?;
            println!("Theme is now {:?}", container.snapshot().theme);
        }

        Command::Save { item_id } => {
            container.dispatch(Intent::SaveItem { item_id })?;
            println!("Saved");
        }

        Command::Unsave { item_id } => {
            container.dispatch(Intent::UnsaveItem { item_id })?;
            println!("Removed");
        }
    }

    Ok(())
}

fn print_profile(container: &StateContainer) {
    let state = container.snapshot();
    let profile = &state.profile;
    println!("{} (@{})", profile.name, profile.username);
    if !profile.bio.is_empty() {
        println!("{}", profile.bio);
    }
    println!(
        "posts: {}  liked: {}  comments: {}",
        state.content.total_posts(),
        state.liked.len(),
        state.ledger.total_comments()
    );
}

/// Inline a local image file as a data URL, the same shape the web UI
/// stores for avatars and uploads.
fn inline_data_url(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    let mime = match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    Ok(format!("data:{mime};base64,{}", BASE64.encode(bytes)))
}
