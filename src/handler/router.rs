//! Request routing module
//!
//! Entry point for HTTP request processing: derives the subdomain label
//! from the Host header, resolves the URL path against that subdomain's
//! content folder, and dispatches to the content responder. All methods
//! are treated uniformly as content fetches.

use crate::config::Config;
use crate::handler::content;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Derive the subdomain label from a hostname.
///
/// Loopback names and hostnames with at most two dot-separated components
/// map to the default label; only `sub.domain.tld` and deeper forms yield
/// a custom label. A `host:port` value is stripped of its port first.
pub fn resolve_subdomain(hostname: &str, default_label: &str) -> String {
    let host = hostname.split(':').next().unwrap_or(hostname);

    if host == "localhost" || host == "127.0.0.1" {
        return default_label.to_string();
    }

    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() > 2 && !parts[0].is_empty() {
        parts[0].to_string()
    } else {
        default_label.to_string()
    }
}

/// Resolve a URL path to a target inside the subdomain folder.
///
/// Empty segments are dropped; an empty path resolves to the folder
/// itself. Parent-directory segments are refused so a request can never
/// escape its subdomain folder.
pub fn resolve_target(subdomain_dir: &Path, url_path: &str) -> Option<PathBuf> {
    let mut target = subdomain_dir.to_path_buf();
    for segment in url_path.split('/').filter(|s| !s.is_empty()) {
        if segment == ".." {
            return None;
        }
        target.push(segment);
    }
    Some(target)
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    let host_header = req
        .headers()
        .get(hyper::header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().host());

    let subdomain = match host_header {
        Some(host) => resolve_subdomain(host, &config.content.default_subdomain),
        None => config.content.default_subdomain.clone(),
    };

    let subdomain_dir = Path::new(&config.content.root).join(&subdomain);

    let response = match resolve_target(&subdomain_dir, &path) {
        Some(target) => content::serve(&subdomain, &subdomain_dir, &target, &path).await,
        None => {
            logger::log_warning(&format!("Refused parent-directory path: {path}"));
            crate::http::build_404_response(&format!("Not found: {path}"))
        }
    };

    if config.logging.access_log {
        logger::log_access(&method, &path, response.status().as_u16());
    }

    Ok(response)
}
