//! Content store bootstrap
//!
//! Seeds the content root on first run: a `.gitkeep` marker plus a default
//! subdomain folder with a placeholder page. A pre-existing content root is
//! left untouched.

use crate::logger;
use std::path::Path;
use tokio::fs;

/// Placeholder page written into the default subdomain folder on first run
pub const DEFAULT_INDEX_BODY: &str = "<h1>Welcome to the default subdomain!</h1>";

/// Check whether `path` exists and is a directory. Any stat error counts
/// as absent.
pub async fn directory_exists(path: &Path) -> bool {
    match fs::metadata(path).await {
        Ok(meta) => meta.is_dir(),
        Err(_) => false,
    }
}

/// Create the content root and default subdomain folder if the root is
/// missing.
///
/// Idempotent: when the root already exists nothing is written, even if the
/// default subdomain folder was removed since. Creation errors propagate to
/// the caller as fatal startup errors.
pub async fn ensure_content_directories(
    root: &Path,
    default_subdomain: &str,
) -> std::io::Result<()> {
    if directory_exists(root).await {
        return Ok(());
    }

    logger::log_info(&format!(
        "Creating content root directory: {}",
        root.display()
    ));
    fs::create_dir_all(root).await?;
    fs::write(root.join(".gitkeep"), "").await?;

    let default_dir = root.join(default_subdomain);
    fs::create_dir_all(&default_dir).await?;
    fs::write(default_dir.join("index.html"), DEFAULT_INDEX_BODY).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_seeds_fresh_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("content");

        ensure_content_directories(&root, "www").await.unwrap();

        assert!(root.join(".gitkeep").is_file());
        assert!(root.join("www").is_dir());
        let body = std::fs::read_to_string(root.join("www/index.html")).unwrap();
        assert_eq!(body, DEFAULT_INDEX_BODY);
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("content");

        ensure_content_directories(&root, "www").await.unwrap();
        std::fs::write(root.join("www/index.html"), "edited").unwrap();

        ensure_content_directories(&root, "www").await.unwrap();
        let body = std::fs::read_to_string(root.join("www/index.html")).unwrap();
        assert_eq!(body, "edited");
    }

    #[tokio::test]
    async fn test_bootstrap_skips_existing_root_with_missing_default() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("content");
        std::fs::create_dir_all(&root).unwrap();

        ensure_content_directories(&root, "www").await.unwrap();
        assert!(!root.join("www").exists());
    }

    #[tokio::test]
    async fn test_directory_exists() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(directory_exists(tmp.path()).await);
        assert!(!directory_exists(&tmp.path().join("missing")).await);

        let file = tmp.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(!directory_exists(&file).await);
    }
}
