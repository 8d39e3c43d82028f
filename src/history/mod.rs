//! Selection history for promoting recently chosen options.
//!
//! - `store`: one bounded, most-recent-first JSON list per namespace
//! - `reorder`: merges a history list into an option sequence

mod reorder;
mod store;

pub use reorder::reorder;
pub use store::HistoryStore;
