use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gittime_core::ContributionInfo;
use gittime_logging::{gittime_error, gittime_info, gittime_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

const SNAPSHOT_SUFFIX: &str = ".contributions.ron";

/// Last known contribution summary of one user, kept between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ContributionSnapshot {
    user: String,
    saved_utc: String,
    info: ContributionInfo,
}

pub(crate) fn snapshot_path(state_dir: &Path, user: &str) -> PathBuf {
    let stem: String = user
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    state_dir.join(format!("{stem}{SNAPSHOT_SUFFIX}"))
}

pub(crate) fn load_contributions(state_dir: &Path, user: &str) -> Option<ContributionInfo> {
    let path = snapshot_path(state_dir, user);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            gittime_warn!("Failed to read snapshot from {:?}: {}", path, err);
            return None;
        }
    };

    let snapshot: ContributionSnapshot = match ron::from_str(&content) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            gittime_warn!("Failed to parse snapshot from {:?}: {}", path, err);
            return None;
        }
    };
    if snapshot.user != user {
        gittime_warn!(
            "Snapshot {:?} belongs to {}, not {}",
            path,
            snapshot.user,
            user
        );
        return None;
    }

    gittime_info!(
        "Loaded contribution snapshot of {} saved at {}",
        user,
        snapshot.saved_utc
    );
    Some(snapshot.info)
}

pub(crate) fn save_contributions(
    state_dir: &Path,
    user: &str,
    info: &ContributionInfo,
    saved_utc: String,
) -> Option<PathBuf> {
    let snapshot = ContributionSnapshot {
        user: user.to_string(),
        saved_utc,
        info: info.clone(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&snapshot, pretty) {
        Ok(text) => text,
        Err(err) => {
            gittime_error!("Failed to serialize snapshot: {}", err);
            return None;
        }
    };

    let target = snapshot_path(state_dir, user);
    match write_atomic(state_dir, &target, &content) {
        Ok(()) => Some(target),
        Err(err) => {
            gittime_error!("Failed to write snapshot to {:?}: {}", target, err);
            None
        }
    }
}

/// Writes a temp file next to `target`, then renames it into place.
fn write_atomic(dir: &Path, target: &Path, content: &str) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
