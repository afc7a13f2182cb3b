use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "gittime")]
#[command(about = "Show a GitHub user's contribution summary and recent activity")]
#[command(version)]
pub struct Cli {
    /// Config file (RON); defaults to ./gittime.ron when present
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub user whose activity is shown
    #[arg(short, long)]
    pub user: Option<String>,

    /// Use bundled demo data instead of the network
    #[arg(long, conflicts_with = "user")]
    pub trial: bool,

    /// Maximum number of activity pages to load
    #[arg(short, long, value_name = "N")]
    pub pages: Option<u32>,
}

impl Cli {
    /// Command-line flags win over the config file.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(user) = &self.user {
            config.user = Some(user.clone());
            config.trial = false;
        }
        if self.trial {
            config.trial = true;
        }
        if let Some(pages) = self.pages {
            config.max_pages = pages;
        }
    }
}
