//! Configuration management for newsdesk.
//!
//! Configuration is read from `~/.config/newsdesk/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::pipeline::{DedupIndex, RenderBuffer, RenderOrder, DEFAULT_CAPACITY};
use crate::scheduler::interval::deserialize_duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub poll: PollConfig,
    pub render: RenderConfig,
    pub dedup: DedupConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    #[serde(deserialize_with = "deserialize_duration")]
    pub interval: Duration,
    /// Poll once immediately instead of waiting a full interval.
    pub update_on_start: bool,
    /// Per-request timeout; unset means requests may hang indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(180),
            update_on_start: true,
            request_timeout_secs: None,
        }
    }
}

impl PollConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub capacity: usize,
    pub order: RenderOrder,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            order: RenderOrder::Arrival,
        }
    }
}

impl RenderConfig {
    pub fn build_buffer(&self) -> RenderBuffer {
        RenderBuffer::new(self.capacity, self.order)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Cap on remembered identities; unset keeps every identity for the
    /// whole session.
    pub max_seen_ids: Option<usize>,
}

impl DedupConfig {
    pub fn build_index(&self) -> DedupIndex {
        match self.max_seen_ids {
            Some(limit) => DedupIndex::bounded(limit),
            None => DedupIndex::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/newsdesk/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsdesk").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!(path = %path.display(), "created default config");
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> &'static str {
        r##"# newsdesk configuration
#
# Intervals accept "30s", "3m", "1h", "1d" or a number of seconds.
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[poll]
interval = "3m"
update_on_start = true
# request_timeout_secs = 30

[render]
# Number of items kept on screen; the oldest is dropped beyond this
capacity = 100
# "arrival": newest fetched first
# "published": newest publication date first, undated items last
order = "arrival"

[dedup]
# Forget the oldest identities past this many (unset = remember all)
# max_seen_ids = 50000

[colors]
active_border = "Cyan"
inactive_border = "DarkGray"

selection_bg_active = "Cyan"
selection_fg_active = "Black"
selection_bg_inactive = "DarkGray"
selection_fg_inactive = "White"

headline = "White"
meta = "Yellow"
link = "Blue"

status_fg = "White"
status_bg = "DarkGray"
busy_fg = "LightGreen"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]

open_in_browser = ["o", "Enter"]
refresh = ["R"]
reset_seen = ["X"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.poll.interval, Duration::from_secs(180));
        assert!(config.poll.update_on_start);
        assert_eq!(config.poll.request_timeout(), None);
        assert_eq!(config.render.capacity, 100);
        assert_eq!(config.render.order, RenderOrder::Arrival);
        assert_eq!(config.dedup.max_seen_ids, None);
        assert_eq!(config.colors.active_border, ratatui::style::Color::Cyan);
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[poll]
interval = 90
request_timeout_secs = 15

[render]
order = "published"

[colors]
active_border = "#FF0000"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.poll.interval, Duration::from_secs(90));
        assert_eq!(config.poll.request_timeout(), Some(Duration::from_secs(15)));
        assert!(config.poll.update_on_start);
        assert_eq!(config.render.order, RenderOrder::Published);
        assert_eq!(config.render.capacity, 100);
        assert_eq!(
            config.colors.active_border,
            ratatui::style::Color::Rgb(255, 0, 0)
        );
        assert_eq!(
            config.colors.inactive_border,
            ratatui::style::Color::DarkGray
        );
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.poll.interval, Duration::from_secs(180));
        assert_eq!(config.render.build_buffer().capacity(), 100);
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let result: Result<Config, _> = toml::from_str("[poll]\ninterval = \"soon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_dedup_cap_builds_bounded_index() {
        let config: Config = toml::from_str("[dedup]\nmax_seen_ids = 1\n").unwrap();
        let mut index = config.dedup.build_index();
        index.admit("a");
        index.admit("b");
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[poll]\ninterval = \"1h\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.poll.interval, Duration::from_secs(3600));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_create_default_config_writes_commented_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::create_default_config(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# newsdesk configuration"));
        assert!(Config::load_from(&path).is_ok());
    }
}
