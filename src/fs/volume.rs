use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::fs::path;

/// Device prefix accepted in front of virtual paths by default.
pub const DEFAULT_DEVICE_PREFIX: &str = "sdmc:";

/// The single mounted volume: virtual `/` maps onto `root` on the host.
#[derive(Debug, Clone)]
pub struct Volume {
    root: PathBuf,
    device_prefix: String,
}

impl Volume {
    /// Mount `root`, which must be an existing directory.
    pub fn mount(root: &Path, device_prefix: &str) -> Result<Self> {
        let root = root
            .canonicalize()
            .map_err(|e| AppError::from_io(&root.display().to_string(), e))?;
        if !root.is_dir() {
            return Err(AppError::NotADirectory(root.display().to_string()));
        }
        tracing::info!(root = %root.display(), device_prefix, "mounted volume");
        Ok(Self {
            root,
            device_prefix: device_prefix.to_string(),
        })
    }

    /// Host directory backing `/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical virtual form of `virtual_path`.
    ///
    /// `<prefix>/x` and `/x` name the same entry and both come out as `/x`.
    pub fn normalize(&self, virtual_path: &str) -> Result<String> {
        let unprefixed = if self.device_prefix.is_empty() {
            virtual_path
        } else {
            match virtual_path.strip_prefix(self.device_prefix.as_str()) {
                Some(rest) if rest.is_empty() || rest.starts_with(path::SEPARATOR) => rest,
                _ => virtual_path,
            }
        };
        path::normalize(unprefixed)
    }

    /// Host path for `virtual_path`. Never escapes the mount root.
    pub fn resolve(&self, virtual_path: &str) -> Result<PathBuf> {
        let normalized = self.normalize(virtual_path)?;
        let relative = normalized.trim_start_matches(path::SEPARATOR);
        if relative.is_empty() {
            Ok(self.root.clone())
        } else {
            Ok(self.root.join(relative))
        }
    }

    /// Whether `virtual_path` exists and is a directory (symlinks not followed).
    pub fn is_dir(&self, virtual_path: &str) -> Result<bool> {
        let host = self.resolve(virtual_path)?;
        match fs::symlink_metadata(&host) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) => Err(AppError::from_io(virtual_path, e)),
        }
    }
}
