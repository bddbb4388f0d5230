//! Cloudflared tunnel module
//!
//! Exposes the local listener to the public internet through an outbound
//! cloudflared tunnel. This module only installs the binary, supplies the
//! token, waits for the one-time connected event, and stops the child on
//! shutdown; reconnection and health checks belong to cloudflared itself.

pub mod client;
pub mod install;

pub use client::{Connection, Tunnel, TunnelError};
