//! Whole-object JSON dumps and CSV export.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::HarvestError;

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn ensure_parent(path: &Path) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| HarvestError::io(parent, e))?;
    }
    Ok(())
}

/// Serializes `value` as pretty JSON, replacing any existing file.
///
/// The document is written to a sibling temp file and renamed into place, so
/// the target is either the previous file or the complete new one.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), HarvestError> {
    ensure_parent(path)?;

    let json = serde_json::to_vec_pretty(value)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|e| HarvestError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| HarvestError::io(path, e))?;

    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, HarvestError> {
    let content = fs::read_to_string(path).map_err(|e| HarvestError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(mut w: W, row: &[String]) -> std::io::Result<()> {
    let mut first = true;
    for cell in row {
        if first {
            first = false;
        } else {
            w.write_all(b",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

/// Writes a header row followed by `rows`, overwriting `path`.
pub fn write_csv(path: &Path, header: &[&str], rows: &[Vec<String>]) -> Result<(), HarvestError> {
    ensure_parent(path)?;

    let file = File::create(path).map_err(|e| HarvestError::io(path, e))?;
    let mut w = BufWriter::new(file);

    let header: Vec<String> = header.iter().map(|h| (*h).to_string()).collect();
    write_row(&mut w, &header).map_err(|e| HarvestError::io(path, e))?;
    for row in rows {
        write_row(&mut w, row).map_err(|e| HarvestError::io(path, e))?;
    }
    w.flush().map_err(|e| HarvestError::io(path, e))?;

    Ok(())
}
