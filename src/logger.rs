//! Logger module
//!
//! `[TAG]`-prefixed logging for server lifecycle, access logging, and
//! tunnel output forwarding. Info goes to stdout, errors and warnings
//! to stderr.

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;

pub fn log_info(message: &str) {
    println!("[INFO] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Forward a line of cloudflared output
pub fn log_tunnel(line: &str) {
    println!("[TUNNEL] {line}");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

/// Log one handled request in common-log style
pub fn log_access(method: &str, path: &str, status: u16) {
    println!(
        "[{}] \"{method} {path}\" {status}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z")
    );
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Local server listening on: http://{addr}");
    println!("Content root: {}", config.content.root);
    println!("Default subdomain: {}", config.content.default_subdomain);
    println!("======================================");
}
