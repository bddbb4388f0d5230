//! Cloudflared binary installation
//!
//! Checks for a local cloudflared binary and downloads the matching
//! release asset when it is absent. Installation failures are fatal
//! startup errors.

use crate::logger;
use std::path::PathBuf;

const RELEASE_BASE: &str = "https://github.com/cloudflare/cloudflared/releases/latest/download";

/// Local path where the managed cloudflared binary lives
pub fn bin_path() -> PathBuf {
    let name = if cfg!(windows) {
        "cloudflared.exe"
    } else {
        "cloudflared"
    };
    PathBuf::from(".cloudflared").join(name)
}

/// Release asset name for the host platform, if one ships as a plain
/// executable. Darwin releases are tarballs and are not auto-installed.
fn release_asset() -> Option<&'static str> {
    match (std::env::consts::OS, std::env::consts::ARCH) {
        ("linux", "x86_64") => Some("cloudflared-linux-amd64"),
        ("linux", "aarch64") => Some("cloudflared-linux-arm64"),
        ("linux", "x86") => Some("cloudflared-linux-386"),
        ("windows", "x86_64") => Some("cloudflared-windows-amd64.exe"),
        ("windows", "x86") => Some("cloudflared-windows-386.exe"),
        _ => None,
    }
}

/// Ensure cloudflared is locally installed, downloading it if absent.
///
/// Returns the path to the binary.
pub async fn ensure_installed() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let bin = bin_path();
    if bin.exists() {
        return Ok(bin);
    }

    let asset = release_asset().ok_or_else(|| {
        format!(
            "no prebuilt cloudflared for {}/{}; install it at {} manually",
            std::env::consts::OS,
            std::env::consts::ARCH,
            bin.display()
        )
    })?;

    logger::log_info("Installing cloudflared");
    let url = format!("{RELEASE_BASE}/{asset}");
    let bytes = reqwest::get(&url)
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    if let Some(parent) = bin.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&bin, &bytes).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = tokio::fs::metadata(&bin).await?.permissions();
        perms.set_mode(0o755);
        tokio::fs::set_permissions(&bin, perms).await?;
    }

    logger::log_info(&format!("Installed cloudflared at {}", bin.display()));
    Ok(bin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_path_is_under_dot_cloudflared() {
        assert!(bin_path().starts_with(".cloudflared"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_has_plain_binary_asset() {
        assert!(release_asset().is_some());
        assert!(release_asset().unwrap().starts_with("cloudflared-linux-"));
    }
}
