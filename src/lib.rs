//! Read Later: a personal reading list for today
//!
//! Save links from the command line, open or discard them later, and let a
//! launch agent clear the list every morning. The `status` command reports
//! on Safari's own Reading List by reading `Bookmarks.plist` directly.

pub mod browser;
pub mod config;
pub mod error;
pub mod launchd;
pub mod links;
pub mod logging;
pub mod safari;
pub mod store;
pub mod tooling;
