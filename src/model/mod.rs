//! Data models
//!
//! Git-independent data structures: history entries, table columns and the
//! hosting vendor registry.

mod column;
mod history_entry;
mod vendor;

pub use column::Column;
pub use history_entry::HistoryEntry;
pub use vendor::{RepoUrls, UnknownVendor, Vendor, build_urls, resolve_vendor, supported_vendors};
