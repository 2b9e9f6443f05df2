//! Session state core for a Transmission-compatible remote GUI.
//!
//! Data flows one way: a daemon snapshot enters through
//! [`session::ServerSession::apply_snapshot`], the filter engine derives
//! the visible subset, the selection reducer reconciles the selection
//! against it, and the status aggregator derives summary figures for the
//! presentation layer. Rendering, RPC transport, and persistence live in
//! other crates.

pub mod catalog;
pub mod filter;
pub mod gateway;
pub mod selection;
pub mod session;
pub mod stats;
pub mod targets;

pub use catalog::{TrackerRollup, all_labels, selected_labels, tracker_rollup};
pub use filter::{SearchQuery, StatusFilter, TorrentFilter, visible, visible_ids};
pub use gateway::{DaemonGateway, TorrentCommand};
pub use selection::{SelectionAction, SelectionSet, SelectionVerb};
pub use session::{PollTicket, ServerSession, SnapshotOutcome};
pub use stats::{RateLimit, StatusSummary, summarize};
pub use targets::ActionTarget;
