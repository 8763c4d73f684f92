//! # storyreel
//!
//! A story strip with auto-advancing viewer and a local viewed/liked ledger.
//!
//! ## Architecture
//!
//! ```text
//! Source → Feed ⇄ Reconciler ⇄ Ledger ← Viewer
//! ```
//!
//! - [`source`]: Fetches the paginated user document
//! - [`feed`]: Paginated story list, reconciled after every page load
//! - [`reconcile`]: Pure merge of ledger flags into the story list
//! - [`store`]: JSON-file ledger of viewed/liked stories
//! - [`viewer`]: Viewer session with cancellable auto-advance timer
//!
//! ## Quick Start
//!
//! ```bash
//! # List stories, viewed ones without the ring
//! storyreel list
//!
//! # Watch story 3 and like it
//! storyreel view 3 --like
//!
//! # Inspect or wipe the ledger
//! storyreel ledger
//! storyreel clear
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together ledger,
/// story source and cache.
pub mod app;

/// Bounded in-memory cache with least-recently-used eviction.
pub mod cache;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/storyreel/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Story`](domain::Story): a displayable story with viewed/liked flags
/// - [`LedgerRecord`](domain::LedgerRecord): persisted view/like proof
/// - [`UserPagesDto`](domain::UserPagesDto): the source document
pub mod domain;

pub mod feed;

pub mod reconcile;

/// Story sources.
///
/// - [`PageSource`](source::PageSource): Async trait for fetching the user document
/// - [`HttpSource`](source::HttpSource): reqwest-based implementation
pub mod source;

/// Ledger persistence.
///
/// - [`Ledger`](store::Ledger): Trait defining ledger operations
/// - [`JsonLedger`](store::JsonLedger): Whole-file JSON implementation
pub mod store;

pub mod viewer;
