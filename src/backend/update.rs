//! Self-update for the manager: GitHub release check, streamed download and
//! in-place binary replacement

use std::io::Read;
use std::path::Path;

use semver::Version;
use serde_json::Value;
use tracing::{info, warn};

use super::error::{BackendError, BackendResult};
use crate::domain::{DownloadEvent, UpdateInfo};

/// Version of the running binary
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

const CHUNK_SIZE: usize = 64 * 1024;

/// Upper bound on the up-front buffer reservation; larger bodies grow as read
const MAX_PREALLOC: u64 = 64 << 20;

/// Buffer capacity for a body of `content_length` bytes. The header comes from
/// the server, so it only sizes the initial reservation.
fn initial_capacity(content_length: Option<u64>) -> usize {
    let hint = content_length.unwrap_or(0).min(MAX_PREALLOC);
    usize::try_from(hint).unwrap_or(0)
}

/// Checks GitHub releases and installs newer builds
#[derive(Debug, Clone)]
pub struct UpdateClient {
    repo: String,
    current_version: String,
}

impl UpdateClient {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            current_version: CURRENT_VERSION.to_string(),
        }
    }

    /// Ask GitHub for the latest release. `None` means up to date.
    pub fn check(&self) -> BackendResult<Option<UpdateInfo>> {
        let url = format!("https://api.github.com/repos/{}/releases/latest", self.repo);
        let release: Value = ureq::get(&url)
            .set("User-Agent", "openclaw-manager-update-checker")
            .set("Accept", "application/vnd.github.v3+json")
            .call()?
            .into_json()
            .map_err(|e| BackendError::Http(format!("Failed to read release info: {}", e)))?;

        let update = select_update(&self.current_version, &release, &self.repo)?;
        match &update {
            Some(info) => info!("[update] Version {} is available", info.version),
            None => info!("[update] {} is the latest version", self.current_version),
        }
        Ok(update)
    }

    /// Download the release asset, reporting progress through `on_event`
    pub fn download(
        &self,
        info: &UpdateInfo,
        on_event: &dyn Fn(DownloadEvent),
    ) -> BackendResult<Vec<u8>> {
        let response = ureq::get(&info.download_url)
            .set("User-Agent", "openclaw-manager-update-installer")
            .call()?;

        let content_length = response
            .header("Content-Length")
            .and_then(|v| v.trim().parse::<u64>().ok());
        on_event(DownloadEvent::Started { content_length });

        let mut reader = response.into_reader();
        let mut data = Vec::with_capacity(initial_capacity(content_length));
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = reader
                .read(&mut buf)
                .map_err(|e| BackendError::Http(format!("Failed to read download: {}", e)))?;
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            on_event(DownloadEvent::Progress {
                chunk_length: n as u64,
            });
        }
        on_event(DownloadEvent::Finished);

        info!("[update] Downloaded {} bytes for v{}", data.len(), info.version);
        Ok(data)
    }

    /// Replace the running executable with `binary`
    pub fn install(&self, binary: &[u8]) -> BackendResult<()> {
        let current_exe = std::env::current_exe().map_err(|e| {
            BackendError::Process(format!("Failed to get current executable path: {}", e))
        })?;
        replace_binary(&current_exe, binary)
    }
}

/// Decide whether `release` (GitHub release JSON) is newer than `current`
pub fn select_update(
    current: &str,
    release: &Value,
    repo: &str,
) -> BackendResult<Option<UpdateInfo>> {
    let tag = release
        .get("tag_name")
        .and_then(Value::as_str)
        .ok_or_else(|| BackendError::Invalid("No tag_name in release".to_string()))?;
    let latest_str = tag.strip_prefix('v').unwrap_or(tag);

    let current = Version::parse(current)
        .map_err(|e| BackendError::Invalid(format!("Invalid current version: {}", e)))?;
    let latest = Version::parse(latest_str)
        .map_err(|e| BackendError::Invalid(format!("Invalid latest version: {}", e)))?;

    if latest <= current {
        return Ok(None);
    }

    let asset = platform_asset_name();
    let download_url = release
        .get("assets")
        .and_then(Value::as_array)
        .and_then(|assets| {
            assets.iter().find(|a| {
                a.get("name").and_then(Value::as_str) == Some(asset)
            })
        })
        .and_then(|a| a.get("browser_download_url"))
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| {
            format!(
                "https://github.com/{}/releases/download/{}/{}",
                repo, tag, asset
            )
        });

    Ok(Some(UpdateInfo {
        version: latest_str.to_string(),
        body: release
            .get("body")
            .and_then(Value::as_str)
            .filter(|b| !b.trim().is_empty())
            .map(String::from),
        download_url,
        release_url: release
            .get("html_url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }))
}

/// Release asset name for the current platform
pub fn platform_asset_name() -> &'static str {
    #[cfg(all(target_os = "macos", target_arch = "aarch64"))]
    {
        return "openclaw-manager-macos-arm64";
    }

    #[cfg(all(target_os = "macos", target_arch = "x86_64"))]
    {
        return "openclaw-manager-macos-x64";
    }

    #[cfg(target_os = "linux")]
    {
        return "openclaw-manager-linux-x64";
    }

    #[cfg(target_os = "windows")]
    {
        return "openclaw-manager-windows-x64.exe";
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        "openclaw-manager"
    }
}

/// Swap `target` for `binary`, keeping a backup until the write succeeds
fn replace_binary(target: &Path, binary: &[u8]) -> BackendResult<()> {
    if binary.is_empty() {
        return Err(BackendError::Invalid("Downloaded update is empty".to_string()));
    }

    let backup_path = target.with_extension("backup");
    if backup_path.exists() {
        std::fs::remove_file(&backup_path).map_err(|e| BackendError::io(&backup_path, e))?;
    }
    std::fs::rename(target, &backup_path).map_err(|e| BackendError::io(target, e))?;

    if let Err(e) = std::fs::write(target, binary) {
        if let Err(restore) = std::fs::rename(&backup_path, target) {
            warn!("[update] Failed to restore backup: {}", restore);
        }
        return Err(BackendError::io(target, e));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(target)
            .map_err(|e| BackendError::io(target, e))?
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(target, perms).map_err(|e| BackendError::io(target, e))?;
    }

    // Windows keeps the running image locked; the backup is cleaned up on next start
    if let Err(e) = std::fs::remove_file(&backup_path) {
        warn!("[update] Could not remove {}: {}", backup_path.display(), e);
    }
    info!("[update] Replaced {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_initial_capacity_ignores_oversized_content_length() {
        assert_eq!(initial_capacity(None), 0);
        assert_eq!(initial_capacity(Some(4096)), 4096);
        assert_eq!(initial_capacity(Some(1 << 46)), (64 << 20) as usize);
        assert_eq!(initial_capacity(Some(u64::MAX)), (64 << 20) as usize);
    }

    #[test]
    fn test_select_update_newer_release() {
        let release = json!({
            "tag_name": "v1.4.0",
            "html_url": "https://github.com/o/r/releases/tag/v1.4.0",
            "body": "## Changes\n- faster",
            "assets": [
                {"name": platform_asset_name(), "browser_download_url": "https://dl/asset"}
            ]
        });
        let info = select_update("1.3.9", &release, "o/r").unwrap().unwrap();
        assert_eq!(info.version, "1.4.0");
        assert_eq!(info.download_url, "https://dl/asset");
        assert_eq!(info.body.as_deref(), Some("## Changes\n- faster"));
    }

    #[test]
    fn test_select_update_same_or_older() {
        let release = json!({"tag_name": "1.3.9"});
        assert_eq!(select_update("1.3.9", &release, "o/r").unwrap(), None);
        assert_eq!(select_update("2.0.0", &release, "o/r").unwrap(), None);
    }

    #[test]
    fn test_select_update_falls_back_to_tag_url() {
        let release = json!({"tag_name": "v9.0.0", "body": "  "});
        let info = select_update("1.0.0", &release, "o/r").unwrap().unwrap();
        assert_eq!(
            info.download_url,
            format!("https://github.com/o/r/releases/download/v9.0.0/{}", platform_asset_name())
        );
        assert_eq!(info.body, None);
    }

    #[test]
    fn test_select_update_rejects_bad_tag() {
        assert!(select_update("1.0.0", &json!({}), "o/r").is_err());
        assert!(select_update("1.0.0", &json!({"tag_name": "nightly"}), "o/r").is_err());
    }

    #[test]
    fn test_replace_binary() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("openclaw-manager");
        std::fs::write(&target, b"old").unwrap();

        replace_binary(&target, b"new build").unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"new build");
        assert!(!target.with_extension("backup").exists());
        assert!(replace_binary(&target, b"").is_err());
    }
}
