#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! File-backed settings for daemon connection profiles.
//!
//! Layout: `model.rs` (typed settings models), `validate.rs`
//! (validation helpers), `service.rs` (`ConfigService` with persistence
//! and change notifications).

pub mod error;
pub mod model;
pub mod service;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{AppSettings, PollIntervals, ServerProfile};
pub use service::{ConfigService, SettingsWatcher};
