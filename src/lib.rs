//! # Freshet
//!
//! A batch poller that turns new RSS/Atom feed entries into mail
//! notifications.
//!
//! ## Architecture
//!
//! Freshet follows a straight-line pipeline, run once per invocation:
//!
//! ```text
//! Fetcher → Normalizer → Runner (diff + cache) → Composer → SMTP
//! ```
//!
//! - [`fetcher`]: HTTP client for downloading feed documents
//! - [`normalizer`]: Converts RSS/Atom feeds to unified domain models
//! - [`runner`]: Diffs fetched entries against the seen-id cache
//! - [`mailer`]: Per-feed mail reports and SMTP delivery
//!
//! ## Quick Start
//!
//! ```bash
//! # Seed an empty cache
//! echo '{}' > cache.json
//!
//! # Preview what would be mailed
//! freshet config.yaml cache.json --dry-run
//!
//! # Poll, record, and send
//! freshet config.yaml cache.json
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cache`]: Persistent seen-id cache
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: YAML configuration (SMTP account and feed list)
//! - [`domain`]: Core domain models (FeedSource, FeedEntry)
//! - [`fetcher`]: HTTP fetching
//! - [`mailer`]: Mail composition and delivery
//! - [`normalizer`]: Feed parsing and normalization
//! - [`runner`]: The polling pass itself

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the I/O
/// collaborators: fetcher, mailer, normalizer.
pub mod app;

/// Persistent cache of already-seen entry ids.
///
/// A JSON object mapping feed name to the ids reported so far. The file
/// must exist before the first run; seed it with `{}`.
pub mod cache;

/// Command-line interface using clap.
///
/// `freshet <CONFIG> <CACHE> [-v] [--dry-run]`
pub mod cli;

/// YAML configuration.
///
/// One `smtp:` section for the mail account and a `feeds:` mapping of
/// feed name to title and feed URLs, validated at load time.
pub mod config;

/// Core domain models.
///
/// - [`FeedSource`](domain::FeedSource): a configured feed and its URLs
/// - [`FeedEntry`](domain::FeedEntry): one normalized feed entry
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Mail composition and SMTP delivery.
///
/// - [`compose`](mailer::compose): builds the per-feed report message
/// - [`Mailer`](mailer::Mailer): async delivery trait
/// - [`SmtpMailer`](mailer::SmtpMailer): lettre-based implementation
pub mod mailer;

/// Feed parsing and normalization.
///
/// Converts RSS and Atom documents into [`FeedEntry`](domain::FeedEntry)
/// structs, rejecting entries that lack a required field.
pub mod normalizer;

/// The polling pass: fetch every feed, diff against the cache, persist.
pub mod runner;
