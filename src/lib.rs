//! # newsdesk
//!
//! A live headline viewer that polls a fixed set of RSS/Atom feeds and shows
//! the newest items first.
//!
//! ## Architecture
//!
//! ```text
//! PollScheduler → Fetcher → FeedParser → DedupIndex → RenderBuffer → RenderSink
//! ```
//!
//! Each poll cycle fetches every feed concurrently. As each response settles
//! it is parsed, its entries normalized, unseen identities admitted, and the
//! admitted items placed in a bounded newest-first buffer that a sink mirrors.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! newsdesk
//!
//! # Stream headlines to stdout every 30 seconds
//! newsdesk watch --interval 30s
//!
//! # One cycle, as JSON
//! newsdesk once --json
//! ```

/// Application context and error types.
///
/// [`AppContext`](app::AppContext) wires config, feed list and fetcher
/// together and builds schedulers.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `watch` - Stream headlines to stdout
/// - `once [--json]` - Run one poll cycle and print the list
pub mod cli;

/// Configuration loaded from `~/.config/newsdesk/config.toml`.
pub mod config;

/// Core domain models: [`FeedSource`](domain::FeedSource),
/// [`FeedItem`](domain::FeedItem) and [`Published`](domain::Published).
pub mod domain;

/// HTTP retrieval behind the [`Fetcher`](fetcher::Fetcher) trait, and the
/// [`InFlight`](fetcher::InFlight) set of concurrent requests.
pub mod fetcher;

/// Format-tolerant RSS/Atom parsing and entry normalization.
pub mod normalizer;

/// Per-feed ingestion: de-duplication and the bounded render buffer.
pub mod pipeline;

/// Render sinks mirroring the visible list.
pub mod render;

/// Poll cycles on a timer and on demand.
pub mod scheduler;

/// Terminal user interface.
///
/// Headlines pane over a preview pane. Keybindings: j/k navigate, Tab
/// switches panes, o opens in browser, R refreshes, q quits.
pub mod tui;
