//! JSON persistence of extracted reviews

use crate::error::Result;
use crate::record::ReviewRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `records` as a pretty-printed JSON array, creating the parent directory if needed.
///
/// Output goes to a sibling temporary file first and is renamed into place, so a failed
/// write leaves no partial file at `path`.
pub fn save_reviews(records: &[ReviewRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let body = to_pretty_json(records)?;
    let staging = staging_path(path);

    if let Err(e) = fs::write(&staging, &body).and_then(|_| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }

    log::info!("Saved {} reviews to {}", records.len(), path.display());
    Ok(())
}

/// Read records previously written by [`save_reviews`]
pub fn load_reviews(path: impl AsRef<Path>) -> Result<Vec<ReviewRecord>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

// Four-space indentation; serde_json leaves non-ASCII text unescaped
fn to_pretty_json(records: &[ReviewRecord]) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    Ok(body)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
