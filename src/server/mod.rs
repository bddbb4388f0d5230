//! Server plumbing module
//!
//! Listener construction and termination-signal handling.

pub mod listener;
pub mod signal;

pub use listener::create_listener;
pub use signal::shutdown_signal;
