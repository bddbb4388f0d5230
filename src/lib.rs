//! subhost - subdomain-routed static content host behind a cloudflared tunnel
//!
//! Serves static files over HTTP, picking a content folder from the request
//! hostname's subdomain label, and exposes the local listener to the public
//! internet through an outbound cloudflared tunnel instead of inbound port
//! forwarding.

pub mod config;
pub mod content;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod tunnel;
