// File: src/persistence.rs
use crate::core::dictionary::DictionaryIndex;
use crate::core::keypad::Keypad;
use crate::core::types::{Digit, FrequencyAdjustment};
use crate::error::{ImeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

const SNAPSHOT_VERSION: u32 = 2;

/// A built index together with the layout and frequency adjustments it was
/// built with.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    layout: BTreeMap<Digit, String>,
    adjustments: Vec<FrequencyAdjustment>,
    index: DictionaryIndex,
}

/// Writes `index` next to `path` and renames it into place, so a reader
/// never sees a half-written snapshot.
pub fn save_index(
    index: &DictionaryIndex,
    keypad: &Keypad,
    adjustments: &[FrequencyAdjustment],
    path: &Path,
) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        layout: keypad.groups().clone(),
        adjustments: adjustments.to_vec(),
        index: index.clone(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    info!(path = %path.display(), sequences = index.len(), "index snapshot saved");
    Ok(())
}

/// Loads a snapshot, rejecting one built for a different keypad layout or
/// with different frequency adjustments.
pub fn load_index(
    keypad: &Keypad,
    adjustments: &[FrequencyAdjustment],
    path: &Path,
) -> Result<DictionaryIndex> {
    let file = File::open(path)?;
    let snapshot: Snapshot = bincode::deserialize_from(BufReader::new(file))?;

    if snapshot.version != SNAPSHOT_VERSION {
        warn!(found = snapshot.version, "snapshot version mismatch");
        return Err(ImeError::SnapshotMismatch(format!(
            "version {} (expected {SNAPSHOT_VERSION})",
            snapshot.version
        )));
    }
    if &snapshot.layout != keypad.groups() {
        warn!(path = %path.display(), "snapshot was built with another layout");
        return Err(ImeError::SnapshotMismatch("keypad layout differs".to_string()));
    }
    if snapshot.adjustments != adjustments {
        warn!(path = %path.display(), "snapshot was built with other frequency adjustments");
        return Err(ImeError::SnapshotMismatch(
            "frequency adjustments differ".to_string(),
        ));
    }

    info!(path = %path.display(), sequences = snapshot.index.len(), "index snapshot loaded");
    Ok(snapshot.index)
}

/// True when `source` was modified after `snapshot` was written.
pub fn is_older_than(snapshot: &Path, source: &Path) -> Result<bool> {
    let snapshot_time = fs::metadata(snapshot)?.modified()?;
    let source_time = fs::metadata(source)?.modified()?;
    Ok(source_time > snapshot_time)
}
