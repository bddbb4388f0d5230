//! Content responder module
//!
//! Serves a resolved filesystem target: file bytes, an index page, or a
//! generated directory listing. Every filesystem failure degrades to a
//! 404; the handler never raises.

use crate::content::{bootstrap, listing};
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

const INDEX_FILE: &str = "index.html";

/// Serve the resolved target inside a subdomain folder.
///
/// Responds 404 naming the subdomain when its folder is missing, otherwise
/// dispatches on what the target is: directory, regular file, or nothing.
pub async fn serve(
    subdomain: &str,
    subdomain_dir: &Path,
    target: &Path,
    request_path: &str,
) -> Response<Full<Bytes>> {
    if !bootstrap::directory_exists(subdomain_dir).await {
        return http::build_404_response(&format!("Subdomain '{subdomain}' not found"));
    }

    match fs::metadata(target).await {
        Ok(meta) if meta.is_dir() => serve_directory(target, request_path).await,
        Ok(meta) if meta.is_file() => serve_file(target, request_path).await,
        // Neither file nor directory (socket, broken symlink target, ...)
        Ok(_) => http::build_404_response("Not found"),
        Err(_) => http::build_404_response(&format!("Not found: {request_path}")),
    }
}

/// Serve a directory target: its index page when present, a listing
/// otherwise.
async fn serve_directory(dir: &Path, request_path: &str) -> Response<Full<Bytes>> {
    let index_path = dir.join(INDEX_FILE);
    match fs::metadata(&index_path).await {
        Ok(meta) if meta.is_file() => serve_file(&index_path, request_path).await,
        _ => list_directory(dir, request_path).await,
    }
}

async fn serve_file(path: &Path, request_path: &str) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
            http::build_file_response(content, content_type)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            http::build_404_response(&format!("Not found: {request_path}"))
        }
    }
}

async fn list_directory(dir: &Path, request_path: &str) -> Response<Full<Bytes>> {
    let mut entries = Vec::new();
    match fs::read_dir(dir).await {
        Ok(mut read_dir) => {
            while let Ok(Some(entry)) = read_dir.next_entry().await {
                entries.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Err(e) => {
            logger::log_error(&format!("Failed to list '{}': {e}", dir.display()));
            return http::build_404_response(&format!("Not found: {request_path}"));
        }
    }

    // Stable listing order
    entries.sort();

    http::build_html_response(listing::render_directory_listing(request_path, &entries))
}
