use std::fs;

use crate::error::{AppError, Result};
use crate::fs::path::MAX_NAME_LEN;
use crate::fs::volume::Volume;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
    /// Size in bytes; always 0 for directories.
    pub size: u64,
}

/// Children of one directory, in filesystem enumeration order.
///
/// Never sorted; stability across repeated listings is whatever the
/// underlying storage provides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    entries: Vec<DirectoryEntry>,
}

impl DirectoryListing {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DirectoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries.iter()
    }
}

impl FromIterator<DirectoryEntry> for DirectoryListing {
    fn from_iter<I: IntoIterator<Item = DirectoryEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Read one level of `dir`.
///
/// Size lookups that fail degrade to 0. An error midway through enumeration
/// keeps whatever was already collected.
pub fn list(volume: &Volume, dir: &str) -> Result<DirectoryListing> {
    let host = volume.resolve(dir)?;

    let meta = fs::symlink_metadata(&host).map_err(|e| AppError::from_io(dir, e))?;
    if !meta.is_dir() {
        return Err(AppError::NotADirectory(dir.to_string()));
    }

    let reader = fs::read_dir(&host).map_err(|e| AppError::from_io(dir, e))?;

    let mut entries = Vec::new();
    for entry in reader {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir, error = %e, kept = entries.len(), "listing cut short");
                break;
            }
        };

        // Virtual paths are UTF-8; such an entry could not be addressed.
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!(dir, name = ?raw, "skipping entry with non-UTF-8 name");
                continue;
            }
        };
        if name == "." || name == ".." {
            continue;
        }
        if name.len() > MAX_NAME_LEN {
            tracing::warn!(dir, len = name.len(), "skipping entry with overlong name");
            continue;
        }

        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let size = if is_dir {
            0
        } else {
            fs::metadata(entry.path()).map(|m| m.len()).unwrap_or(0)
        };

        entries.push(DirectoryEntry { name, is_dir, size });
    }

    tracing::debug!(dir, count = entries.len(), "listed directory");
    Ok(DirectoryListing { entries })
}
