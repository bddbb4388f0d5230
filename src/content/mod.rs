//! Content store module
//!
//! The content store is a directory tree with one folder per subdomain.
//! Bootstrap seeds it on first run; listing renders directory pages.

pub mod bootstrap;
pub mod listing;

pub use bootstrap::{directory_exists, ensure_content_directories};
