pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "A live terminal headline viewer for RSS/Atom feeds", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/newsdesk/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Poll interval override (e.g., "30s", "3m", "1h")
    #[arg(short, long, global = true)]
    pub interval: Option<String>,

    /// Write logs to this file
    #[arg(short, long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Poll headless and print headlines as they arrive
    Watch,
    /// Poll every feed once and print the result
    Once {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Tui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_tui() {
        let cli = Cli::parse_from(["newsdesk"]);
        assert_eq!(cli.command(), Commands::Tui);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_once_json_with_global_flags() {
        let cli = Cli::parse_from(["newsdesk", "once", "--json", "--interval", "30s"]);
        assert_eq!(cli.command(), Commands::Once { json: true });
        assert_eq!(cli.interval.as_deref(), Some("30s"));
    }
}
