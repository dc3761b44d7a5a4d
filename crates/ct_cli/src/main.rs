use clap::{Parser, Subcommand};
use ct_core::Result;
use ct_remote::RemoteConfig;
use ct_sync::logging::init_logging;
use ct_sync::{NullRenderer, Page, PageContext, SyncSettings};
use ct_web::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};

mod render;

use render::TerminalRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }
            let num = current_number
                .parse::<u64>()
                .map_err(|_| format!("Expected a number before '{}'", c))?;
            let unit = match c {
                's' => 1,
                'm' => 60,
                'h' => 3600,
                'd' => 86400,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            total_seconds = num
                .checked_mul(unit)
                .and_then(|secs| total_seconds.checked_add(secs))
                .ok_or_else(|| "Duration is too large".to_string())?;
            current_number.clear();
            has_value = true;
        }

        // A trailing bare number counts as seconds
        if !current_number.is_empty() {
            let secs = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(secs)
                .ok_or_else(|| "Duration is too large".to_string())?;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Calm new-tab bookmarks and curated content", long_about = None)]
pub struct Cli {
    /// Storage backend: memory, file or sqlite (with the `sqlite` feature)
    #[arg(long, default_value = "file")]
    storage: String,
    /// Location of the storage file or database
    #[arg(long)]
    data_path: Option<PathBuf>,
    /// Remote base URL, used only until storage holds credentials
    #[arg(long, env = "CALMTAB_REMOTE_URL")]
    remote_url: Option<String>,
    /// Remote API key, used only until storage holds credentials
    #[arg(long, env = "CALMTAB_REMOTE_KEY", hide_env_values = true)]
    remote_key: Option<String>,
    /// Per-request timeout (e.g. 30s, 1m)
    #[arg(long, default_value = "30s")]
    timeout: HumanDuration,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage bookmarks
    Bookmarks {
        #[command(subcommand)]
        command: BookmarkCommands,
    },
    /// Show curated content, refreshing the cache when it is due
    Content {
        /// Keep running and reload at this interval (e.g. 15m, 1h)
        #[arg(long)]
        watch: Option<HumanDuration>,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8787")]
        addr: SocketAddr,
    },
}

#[derive(Subcommand, Debug)]
enum BookmarkCommands {
    List,
    Add {
        url: String,
        /// Defaults to the URL's host
        #[arg(long)]
        title: Option<String>,
    },
    Remove {
        index: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    let store = ct_storage::create_storage(&cli.storage, cli.data_path.as_deref()).await?;
    let remote = RemoteConfig::from_build().with_overrides(cli.remote_url, cli.remote_key);
    let settings = SyncSettings::default().with_request_timeout(cli.timeout.0);
    let context = PageContext::new(store, remote).with_settings(settings);

    match cli.command {
        Commands::Bookmarks { command } => {
            let renderer = Arc::new(TerminalRenderer::new());
            renderer.mute_bookmarks(!matches!(command, BookmarkCommands::List));
            let page = Page::open(context, renderer.clone()).await?;
            renderer.mute_bookmarks(false);

            match command {
                BookmarkCommands::List => {}
                BookmarkCommands::Add { url, title } => {
                    page.add_bookmark(&url, title.as_deref()).await?;
                }
                BookmarkCommands::Remove { index } => {
                    if page.remove_bookmark(index).await?.is_none() {
                        info!("No bookmark at index {}", index);
                    }
                }
            }
        }
        Commands::Content { watch } => {
            let page = Page::open(context, Arc::new(TerminalRenderer::new())).await?;
            match watch {
                Some(interval) => loop {
                    info!("🔄 Reloading content");
                    if let Err(e) = page.load().await {
                        eprintln!("Error during reload: {}", e);
                    }
                    info!("Waiting {}s before next reload", interval.0.as_secs());
                    tokio::time::sleep(interval.0).await;
                },
                None => {
                    page.load().await?;
                }
            }
        }
        Commands::Serve { addr } => {
            let page = Page::open(context, Arc::new(NullRenderer)).await?;
            ct_web::serve(AppState { page: Arc::new(page) }, addr).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(30));
        assert_eq!("1h15m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(4500));
        assert_eq!("90".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("1d 2h".parse::<HumanDuration>().unwrap().0, Duration::from_secs(93600));
        assert!("".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("m".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_rejects_overflow() {
        assert!("9999999999999999999d".parse::<HumanDuration>().is_err());
        assert!("18446744073709551615s 1s".parse::<HumanDuration>().is_err());
        assert!("18446744073709551615 1".parse::<HumanDuration>().is_err());
        assert_eq!(
            "18446744073709551615".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(u64::MAX)
        );
    }

    #[test]
    fn test_cli_parses_bookmark_add() {
        let cli = Cli::try_parse_from([
            "calmtab", "--storage", "memory", "bookmarks", "add", "example.com", "--title", "Ex",
        ])
        .unwrap();
        assert_eq!(cli.storage, "memory");
        match cli.command {
            Commands::Bookmarks { command: BookmarkCommands::Add { url, title } } => {
                assert_eq!(url, "example.com");
                assert_eq!(title.as_deref(), Some("Ex"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
