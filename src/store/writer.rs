//! Atomic JSON snapshot writer: write to `<path>.tmp`, fsync, rename.
//!
//! A failed write leaves the prior snapshot file untouched — readers never
//! observe a partial write.

use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::error::DiscoveryError;
use crate::models::Snapshot;

/// Serialize `snapshot` as pretty JSON and atomically replace `path`.
pub fn write(snapshot: &Snapshot, path: impl AsRef<Path>) -> Result<(), DiscoveryError> {
    let path = path.as_ref();
    let tmp_path = tmp_path_for(path);

    let result = write_inner(snapshot, path, &tmp_path).map_err(DiscoveryError::Serialization);
    match &result {
        Ok(()) => info!(path = %path.display(), devices = snapshot.devices.len(), "snapshot written"),
        Err(e) => {
            error!(error = %e, "snapshot write failed; prior snapshot left in place");
            let _ = std::fs::remove_file(&tmp_path);
        }
    }
    result
}

fn write_inner(snapshot: &Snapshot, path: &Path, tmp_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")?;

    let mut file =
        File::create(tmp_path).with_context(|| format!("failed to create {}", tmp_path.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;
    file.sync_all().context("failed to fsync snapshot temp file")?;

    std::fs::rename(tmp_path, path)
        .with_context(|| format!("failed to rename {} to {}", tmp_path.display(), path.display()))?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
