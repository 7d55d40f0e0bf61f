//! Registry file loading, with a one-time download when the local copy is missing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use super::ReferenceTable;
use crate::error::OuiCountError;

/// Canonical location of the IEEE MA-L registry text dump.
pub const DEFAULT_REGISTRY_URL: &str = "http://standards.ieee.org/develop/regauth/oui/oui.txt";

/// Load the reference table from `path`, downloading it from `url` first if
/// the file does not exist yet.
pub async fn load(path: &Path, url: &str, timeout: Duration) -> Result<ReferenceTable, OuiCountError> {
    if !tokio::fs::try_exists(path).await? {
        info!(path = %path.display(), url, "OUI registry not found locally, downloading");
        let bytes = download(url, path, timeout).await?;
        info!(bytes, path = %path.display(), "OUI registry saved");
    }

    let raw = tokio::fs::read(path).await?;
    let table = ReferenceTable::parse(&String::from_utf8_lossy(&raw))?;
    info!(entries = table.len(), path = %path.display(), "OUI registry loaded");
    Ok(table)
}

/// Fetch `url` and store the body at `dest`. Returns the number of bytes written.
///
/// The body is written to a `.part` sibling and renamed into place, so a
/// failed transfer never leaves a truncated registry behind.
pub async fn download(url: &str, dest: &Path, timeout: Duration) -> Result<u64, OuiCountError> {
    let fetch_err = |reason: String| OuiCountError::FetchFailure {
        url: url.to_string(),
        reason,
    };

    let http = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| fetch_err(e.to_string()))?;

    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_err(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(fetch_err(format!("HTTP {status}")));
    }

    let body = resp.bytes().await.map_err(|e| fetch_err(e.to_string()))?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let partial = partial_path(dest);
    if let Err(e) = persist(&partial, dest, &body).await {
        tokio::fs::remove_file(&partial).await.ok();
        return Err(e.into());
    }

    Ok(body.len() as u64)
}

async fn persist(partial: &Path, dest: &Path, body: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(partial, body).await?;
    tokio::fs::rename(partial, dest).await
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}
