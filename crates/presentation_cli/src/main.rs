//! Shortlink CLI
//!
//! Command-line client for the Shortlink backend.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use api_client::{AnalyticsPeriod, ApiClient, ClientConfig, FileSessionStore, SessionEvent};
use clap::{Parser, Subcommand};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shortlink CLI
#[derive(Debug, Parser)]
#[command(name = "shortlink-cli")]
#[command(author, version, about = "Shortlink URL shortener CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Backend base URL (overrides shortlink.toml and SHORTLINK_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Session file (overrides shortlink.toml and SHORTLINK_SESSION_FILE)
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "SHORTLINK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show click statistics for a link
    Stats {
        /// Link id
        id: i64,
    },

    /// Download the QR code of a link
    ///
    /// Example: shortlink-cli qr 42 --output link-42.png
    Qr {
        /// Link id
        id: i64,

        /// Where to write the PNG
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Manage organizations
    Orgs {
        #[command(subcommand)]
        action: OrgAction,
    },

    /// Show analytics for the account or a single link
    Analytics {
        /// Restrict to one link
        #[arg(short, long)]
        link: Option<i64>,

        /// Time window: 24h, 7d, 30d or 1y
        #[arg(short, long, default_value = "7d")]
        period: AnalyticsPeriod,
    },
}

#[derive(Debug, Subcommand)]
enum LinkAction {
    /// List links
    List,

    /// Shorten a URL
    Create {
        /// Destination URL
        url: String,

        /// Custom short code
        #[arg(long)]
        code: Option<String>,

        /// Title
        #[arg(long)]
        title: Option<String>,

        /// Folder id
        #[arg(long)]
        folder: Option<i64>,
    },

    /// Delete a link
    Delete {
        /// Link id
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum OrgAction {
    /// List organizations
    List,

    /// List the members of an organization
    Members {
        /// Organization id
        id: i64,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Resolve configuration, letting command-line flags win
fn resolve_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    apply_overrides(cli, ClientConfig::load_unvalidated()?)
}

/// Apply flag overrides to the layered configuration, then validate the result
fn apply_overrides(cli: &Cli, mut config: ClientConfig) -> anyhow::Result<ClientConfig> {
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(session_file) = &cli.session_file {
        config.session_file.clone_from(session_file);
    }
    config.validate()?;
    Ok(config)
}

/// Drain session events; this is the one place that routes users to login
fn handle_session_events(events: &mut broadcast::Receiver<SessionEvent>) -> bool {
    let mut announced = false;
    loop {
        let login_url = match events.try_recv() {
            Ok(SessionEvent::Invalidated { login_url }) => login_url,
            // Dropped events were invalidations too
            Err(TryRecvError::Lagged(_)) => String::new(),
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        };
        if !announced {
            announced = true;
            eprintln!("{}", login_hint(&login_url));
        }
    }
    announced
}

fn login_hint(login_url: &str) -> String {
    if login_url.is_empty() {
        "Your session has ended. Run `shortlink-cli login` to sign in again.".to_string()
    } else {
        format!("Your session has ended ({login_url}). Run `shortlink-cli login` to sign in again.")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = resolve_config(&cli)?;
    let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let client = ApiClient::new(&config, store)?;
    let mut events = client.invalidator().subscribe();

    let result = commands::run(&client, cli.command).await;
    handle_session_events(&mut events);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_from_verbosity() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(7), "trace");
    }

    #[test]
    fn test_cli_parses_links_create() {
        let cli = Cli::try_parse_from([
            "shortlink-cli",
            "links",
            "create",
            "https://example.com",
            "--code",
            "ex",
        ])
        .unwrap();

        match cli.command {
            Commands::Links {
                action: LinkAction::Create { url, code, .. },
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(code.as_deref(), Some("ex"));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_analytics_period() {
        let cli =
            Cli::try_parse_from(["shortlink-cli", "analytics", "--link", "4", "-p", "30d"]).unwrap();
        match cli.command {
            Commands::Analytics { link, period } => {
                assert_eq!(link, Some(4));
                assert_eq!(period, AnalyticsPeriod::Month);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_period() {
        assert!(Cli::try_parse_from(["shortlink-cli", "analytics", "-p", "forever"]).is_err());
    }

    #[test]
    fn test_cli_global_overrides() {
        let cli = Cli::try_parse_from([
            "shortlink-cli",
            "-vv",
            "--base-url",
            "https://sho.rt/api",
            "--session-file",
            "/tmp/s.json",
            "whoami",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.base_url.as_deref(), Some("https://sho.rt/api"));
        assert_eq!(cli.session_file, Some(PathBuf::from("/tmp/s.json")));
        assert!(matches!(cli.command, Commands::Whoami));
    }

    #[test]
    fn test_session_events_are_drained() {
        let (tx, mut rx) = broadcast::channel(4);
        tx.send(SessionEvent::Invalidated {
            login_url: "/login".to_string(),
        })
        .unwrap();
        tx.send(SessionEvent::Invalidated {
            login_url: "/login".to_string(),
        })
        .unwrap();

        assert!(handle_session_events(&mut rx));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_no_session_events_means_no_hint() {
        let (_tx, mut rx) = broadcast::channel::<SessionEvent>(4);
        assert!(!handle_session_events(&mut rx));
    }

    #[test]
    fn test_lagged_session_events_still_announce() {
        let (tx, mut rx) = broadcast::channel(2);
        for _ in 0..5 {
            tx.send(SessionEvent::Invalidated {
                login_url: "/login".to_string(),
            })
            .unwrap();
        }

        assert!(handle_session_events(&mut rx));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_login_hint_mentions_login_url_when_known() {
        assert!(login_hint("/login").contains("(/login)"));
        assert!(!login_hint("").contains("()"));
    }

    #[test]
    fn test_base_url_flag_overrides_invalid_layered_value() {
        let cli = Cli::try_parse_from([
            "shortlink-cli",
            "--base-url",
            "https://sho.rt/api",
            "--session-file",
            "/tmp/s.json",
            "whoami",
        ])
        .unwrap();
        let layered = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };

        let config = apply_overrides(&cli, layered).unwrap();
        assert_eq!(config.base_url, "https://sho.rt/api");
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_invalid_layered_value_without_flag_is_rejected() {
        let cli = Cli::try_parse_from(["shortlink-cli", "whoami"]).unwrap();
        let layered = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(apply_overrides(&cli, layered).is_err());
    }
}
