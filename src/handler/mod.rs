//! Request handler module
//!
//! Routes each request from hostname to subdomain folder and from URL path
//! to a filesystem target, then serves the resolved content.

pub mod content;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
