//! Safari Reading List ingestion
//!
//! Reads the reading list out of Safari's `Bookmarks.plist` for reporting:
//! snapshot the file, decode the property list, find reading-list containers
//! anywhere in the tree, and bucket the entries by age. Read-only; nothing
//! here prints or logs, failures come back as [`AccessError`].

pub mod breakdown;
pub mod entry;
pub mod error;
pub mod extract;
pub mod snapshot;
pub mod tree;

pub use breakdown::{compute_breakdown, TimeBreakdown};
pub use entry::ReadingListEntry;
pub use error::{AccessError, AccessErrorKind};
pub use extract::{extract_entries, find_containers, is_reading_list_container};
pub use snapshot::{Snapshot, SnapshotAcquirer, SnapshotCopier};
pub use tree::PlistNode;

/// Read the current user's Safari reading list.
pub fn read_reading_list() -> Result<Vec<ReadingListEntry>, AccessError> {
    SnapshotAcquirer::locate()?.read_reading_list()
}
