//! Copy, move, delete, rename and paste on the mounted volume.
//!
//! Tree operations walk with an explicit stack and stop at the first failure.
//! Nothing is rolled back: whatever was copied or deleted before the failure
//! stays that way.

use std::fs;

use crate::error::{AppError, Result};
use crate::fs::clipboard::{ClipboardOp, ClipboardState};
use crate::fs::path;
use crate::fs::volume::Volume;

/// What a successful paste did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOutcome {
    pub op: ClipboardOp,
    /// Virtual path that was staged on the clipboard.
    pub source: String,
    /// Virtual path of the pasted item.
    pub dest: String,
}

fn exists(volume: &Volume, virtual_path: &str) -> Result<bool> {
    Ok(fs::symlink_metadata(volume.resolve(virtual_path)?).is_ok())
}

fn require_dir(volume: &Volume, dir: &str) -> Result<()> {
    if volume.is_dir(dir)? {
        Ok(())
    } else {
        Err(AppError::NotADirectory(dir.to_string()))
    }
}

/// Name of the item behind `src`; the root has none.
fn item_name(src: &str) -> Result<&str> {
    match path::filename(src) {
        "" => Err(AppError::failed(src, "the volume root cannot be used here")),
        name => Ok(name),
    }
}

/// Split a name into stem and extension the way `Path::file_stem` does.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// Resolve a name collision by appending `_copy`, `_copy2`, etc.
///
/// Returns a virtual path that does not exist yet.
pub fn resolve_collision(volume: &Volume, dest: &str) -> Result<String> {
    if !exists(volume, dest)? {
        return Ok(dest.to_string());
    }

    let parent = path::parent(dest)?;
    let (stem, ext) = split_extension(path::filename(dest));

    for i in 1..=1000 {
        let suffix = if i == 1 {
            "_copy".to_string()
        } else {
            format!("_copy{}", i)
        };
        let new_name = match ext {
            Some(e) => format!("{}{}.{}", stem, suffix, e),
            None => format!("{}{}", stem, suffix),
        };
        let candidate = path::join(&parent, &new_name)?;
        if !exists(volume, &candidate)? {
            return Ok(candidate);
        }
    }

    Err(AppError::failed(dest, "no free name left in destination"))
}

fn copy_file(volume: &Volume, src: &str, dest: &str) -> Result<()> {
    fs::copy(volume.resolve(src)?, volume.resolve(dest)?)
        .map_err(|e| AppError::failed(src, e))?;
    Ok(())
}

/// Mirror the tree at `src` onto the not-yet-existing `dest`, pre-order.
///
/// The walk runs on host paths so names that are not valid UTF-8 still
/// resolve; the virtual destination is tracked only for length checks and
/// error messages.
fn copy_tree(volume: &Volume, src: &str, dest: &str) -> Result<()> {
    let mut stack = vec![(volume.resolve(src)?, volume.resolve(dest)?, dest.to_string())];

    while let Some((from, to, label)) = stack.pop() {
        fs::create_dir(&to).map_err(|e| AppError::failed(&label, e))?;

        let reader = fs::read_dir(&from).map_err(|e| AppError::failed(&label, e))?;
        for entry in reader {
            let entry = entry.map_err(|e| AppError::failed(&label, e))?;
            let name = entry.file_name();
            let child_label = path::join(&label, &name.to_string_lossy())?;
            let child_to = to.join(&name);
            let is_dir = entry
                .file_type()
                .map_err(|e| AppError::failed(&child_label, e))?
                .is_dir();

            if is_dir {
                stack.push((entry.path(), child_to, child_label));
            } else {
                fs::copy(entry.path(), &child_to).map_err(|e| AppError::failed(&child_label, e))?;
            }
        }
    }
    Ok(())
}

/// Copy a file or directory from `src` into `dest_dir`.
///
/// Returns the virtual path of the copy (with collision resolution).
pub fn copy_item(volume: &Volume, src: &str, dest_dir: &str) -> Result<String> {
    let src = volume.normalize(src)?;
    let dest_dir = volume.normalize(dest_dir)?;

    let src_is_dir = volume.is_dir(&src)?;
    require_dir(volume, &dest_dir)?;
    let name = item_name(&src)?;

    if src_is_dir && path::is_within(&dest_dir, &src) {
        return Err(AppError::failed(&src, "cannot copy a directory into itself"));
    }

    let dest = resolve_collision(volume, &path::join(&dest_dir, name)?)?;
    if src_is_dir {
        copy_tree(volume, &src, &dest)?;
    } else {
        copy_file(volume, &src, &dest)?;
    }

    tracing::info!(src = %src, dest = %dest, "copied");
    Ok(dest)
}

/// Delete a file, or a directory with everything beneath it.
///
/// Directories are walked first, then files are removed, then directories
/// deepest-first.
pub fn delete_item(volume: &Volume, target: &str) -> Result<()> {
    let target = volume.normalize(target)?;
    item_name(&target)?;

    if !volume.is_dir(&target)? {
        fs::remove_file(volume.resolve(&target)?).map_err(|e| AppError::failed(&target, e))?;
        tracing::info!(path = %target, "deleted file");
        return Ok(());
    }

    // Host paths paired with their virtual label for messages.
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    let mut stack = vec![(volume.resolve(&target)?, target.clone())];

    while let Some((dir, label)) = stack.pop() {
        let reader = fs::read_dir(&dir).map_err(|e| AppError::failed(&label, e))?;
        for entry in reader {
            let entry = entry.map_err(|e| AppError::failed(&label, e))?;
            let child_label = format!("{}/{}", label, entry.file_name().to_string_lossy());
            let is_dir = entry
                .file_type()
                .map_err(|e| AppError::failed(&child_label, e))?
                .is_dir();
            if is_dir {
                stack.push((entry.path(), child_label));
            } else {
                files.push((entry.path(), child_label));
            }
        }
        dirs.push((dir, label));
    }

    for (file, label) in &files {
        fs::remove_file(file).map_err(|e| AppError::failed(label, e))?;
    }

    // Parents were pushed before their children.
    for (dir, label) in dirs.iter().rev() {
        fs::remove_dir(dir).map_err(|e| AppError::failed(label, e))?;
    }

    tracing::info!(path = %target, files = files.len(), dirs = dirs.len(), "deleted tree");
    Ok(())
}

/// Move by copying into `dest_dir` and then deleting `src`.
///
/// If the copy lands but the delete fails, the copy is kept and the failure
/// is reported; `src` and its duplicate then both exist.
fn move_by_copy(volume: &Volume, src: &str, dest_dir: &str) -> Result<String> {
    let copied = copy_item(volume, src, dest_dir)?;
    if let Err(e) = delete_item(volume, src) {
        tracing::warn!(src, copied = %copied, error = %e, "move left a duplicate behind");
        return Err(AppError::failed(
            src,
            format!("copied to {} but the source could not be removed: {}", copied, e),
        ));
    }
    Ok(copied)
}

/// Move a file or directory from `src` into `dest_dir`.
///
/// Tries a rename first and falls back to copy + delete when the rename
/// fails. Moving into the directory that already holds `src` does nothing.
pub fn move_item(volume: &Volume, src: &str, dest_dir: &str) -> Result<String> {
    let src = volume.normalize(src)?;
    let dest_dir = volume.normalize(dest_dir)?;

    let src_is_dir = volume.is_dir(&src)?;
    require_dir(volume, &dest_dir)?;
    let name = item_name(&src)?;

    if path::parent(&src).ok().as_deref() == Some(dest_dir.as_str()) {
        tracing::debug!(src = %src, "move into own parent is a no-op");
        return Ok(src);
    }
    if src_is_dir && path::is_within(&dest_dir, &src) {
        return Err(AppError::failed(&src, "cannot move a directory into itself"));
    }

    let dest = resolve_collision(volume, &path::join(&dest_dir, name)?)?;
    match fs::rename(volume.resolve(&src)?, volume.resolve(&dest)?) {
        Ok(()) => {
            tracing::info!(src = %src, dest = %dest, "moved");
            Ok(dest)
        }
        Err(e) => {
            tracing::debug!(src = %src, error = %e, "rename failed, copying instead");
            move_by_copy(volume, &src, &dest_dir)
        }
    }
}

/// Rename the entry at `target` to `new_name` within its parent.
///
/// Returns the new virtual path. Refuses to overwrite an existing entry.
pub fn rename_item(volume: &Volume, target: &str, new_name: &str) -> Result<String> {
    let target = volume.normalize(target)?;
    path::validate_name(new_name)?;
    let parent = path::parent(&target)?;
    let renamed = path::join(&parent, new_name)?;

    let is_dir = volume.is_dir(&target)?;
    if renamed == target {
        return Ok(renamed);
    }
    if exists(volume, &renamed)? {
        return Err(AppError::failed(&renamed, "already exists"));
    }

    fs::rename(volume.resolve(&target)?, volume.resolve(&renamed)?)
        .map_err(|e| AppError::failed(&target, e))?;

    tracing::info!(
        from = %target,
        to = %renamed,
        kind = if is_dir { "directory" } else { "file" },
        "renamed"
    );
    Ok(renamed)
}

/// Apply the staged clipboard item to `dest_dir`.
///
/// A Copy entry stays staged for further pastes; a Move entry is cleared
/// once the move succeeds.
pub fn paste_item(
    volume: &Volume,
    clipboard: &mut ClipboardState,
    dest_dir: &str,
) -> Result<PasteOutcome> {
    let (source, op) = clipboard
        .get()
        .map(|(p, op)| (p.to_string(), op))
        .ok_or(AppError::EmptyClipboard)?;
    require_dir(volume, dest_dir)?;

    let dest = match op {
        ClipboardOp::Copy => copy_item(volume, &source, dest_dir)?,
        ClipboardOp::Move => move_item(volume, &source, dest_dir)?,
    };

    if op == ClipboardOp::Move {
        clipboard.clear();
    }
    Ok(PasteOutcome { op, source, dest })
}
