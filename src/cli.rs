// Command line arguments.
// One-shot feed generation for a repository, or server mode.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{DEFAULT_CACHE_TIMEOUT_MINUTES, Settings};
use crate::error::{FeedError, Result};
use crate::feed::{FilterConfig, Modes, value_set};
use crate::github::{GITHUB_API_BASE, RepoKey};

#[derive(Parser, Debug)]
#[command(name = "issues-rss")]
#[command(about = "Turn a GitHub repository's issues and pull requests into an RSS feed")]
pub struct Cli {
    /// Repository to build a feed for, as org/repo
    #[arg(required_unless_present = "server", conflicts_with = "server")]
    pub repo: Option<String>,

    /// Comma separated list of modes [io,ic,po,pc]
    #[arg(short = 'm', long = "modes", value_delimiter = ',')]
    pub modes: Vec<String>,

    /// Labels an entry must all carry (comma separated)
    #[arg(short = 'l', long = "labels", value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Labels to exclude (comma separated)
    #[arg(long = "not-labels", visible_alias = "nl", value_delimiter = ',')]
    pub not_labels: Vec<String>,

    /// Only include entries by these authors (comma separated)
    #[arg(short = 'u', long = "users", value_delimiter = ',')]
    pub users: Vec<String>,

    /// Authors to exclude (comma separated)
    #[arg(long = "not-users", visible_alias = "nu", value_delimiter = ',')]
    pub not_users: Vec<String>,

    /// Serve feeds over HTTP at /org/repo instead of printing one
    #[arg(long)]
    pub server: bool,

    /// Port to listen on in server mode
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Minutes a cached issue list stays fresh (0 disables caching)
    #[arg(long = "cache-timeout", default_value_t = DEFAULT_CACHE_TIMEOUT_MINUTES)]
    pub cache_timeout: u64,

    /// Directory for cached issue lists (default: platform cache dir)
    #[arg(long, env = "ISSUES_RSS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_BASE)]
    pub api_base: String,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn repo_key(&self) -> Result<RepoKey> {
        self.repo
            .as_deref()
            .ok_or_else(|| FeedError::InvalidRepo(String::new()))?
            .parse()
    }

    pub fn modes(&self) -> Modes {
        Modes::from_codes(&self.modes)
    }

    pub fn filters(&self) -> FilterConfig {
        FilterConfig {
            labels: value_set(&self.labels),
            not_labels: value_set(&self.not_labels),
            users: value_set(&self.users),
            not_users: value_set(&self.not_users),
        }
    }

    pub fn settings(&self) -> Settings {
        let mut settings = Settings {
            api_base: self.api_base.clone(),
            ..Settings::default()
        };
        if let Some(dir) = &self.cache_dir {
            settings.cache_dir = dir.clone();
        }
        settings.with_cache_timeout_minutes(self.cache_timeout)
    }

    /// Default log level: server mode reports each request.
    pub fn log_level(&self) -> &'static str {
        match (self.verbose, self.server) {
            (0, false) => "warn",
            (0, true) | (1, _) => "info",
            (2, _) => "debug",
            _ => "trace",
        }
    }
}
