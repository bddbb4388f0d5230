//! HTTP protocol layer module
//!
//! Base functionality shared by the request handlers, decoupled from the
//! content store: MIME detection and response builders.

pub mod mime;
pub mod response;

pub use response::{build_404_response, build_file_response, build_html_response};
