//! Virtual path helpers.
//!
//! Paths handled here are `/`-separated text rooted at the mount (`/`). They
//! never touch the filesystem; [`crate::fs::volume::Volume`] maps them onto
//! host paths.

use crate::error::{AppError, Result};

/// Path separator for virtual paths.
pub const SEPARATOR: char = '/';

/// Maximum length in bytes of an assembled virtual path.
pub const MAX_PATH_LEN: usize = 512;

/// Maximum length in bytes of a single entry name.
pub const MAX_NAME_LEN: usize = 255;

fn check_len(path: String) -> Result<String> {
    if path.len() > MAX_PATH_LEN {
        return Err(AppError::Truncated {
            len: path.len(),
            max: MAX_PATH_LEN,
        });
    }
    Ok(path)
}

/// Strip trailing separators, keeping a lone root.
fn trim_trailing(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && path.starts_with(SEPARATOR) {
        "/"
    } else {
        trimmed
    }
}

/// Canonical form of a virtual path.
///
/// Guarantees a single leading separator, collapses repeated separators,
/// drops `.` components, resolves `..` lexically (never above the root) and
/// strips trailing separators except for the root itself.
pub fn normalize(path: &str) -> Result<String> {
    let mut components: Vec<&str> = Vec::new();
    for component in path.split(SEPARATOR) {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            other => components.push(other),
        }
    }

    let mut out = String::with_capacity(path.len() + 1);
    for component in &components {
        out.push(SEPARATOR);
        out.push_str(component);
    }
    if out.is_empty() {
        out.push(SEPARATOR);
    }
    check_len(out)
}

/// Parent directory of `path`.
///
/// Fails with [`AppError::AtRoot`] when there is no separator above the root.
pub fn parent(path: &str) -> Result<String> {
    let path = trim_trailing(path);
    match path.rfind(SEPARATOR) {
        None => Err(AppError::AtRoot),
        Some(0) if path.len() == 1 => Err(AppError::AtRoot),
        Some(0) => Ok(SEPARATOR.to_string()),
        Some(idx) => Ok(path[..idx].to_string()),
    }
}

/// The final component of `path`, or the whole input when it has no separator.
pub fn filename(path: &str) -> &str {
    let path = trim_trailing(path);
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Check that `name` can stand as a single path component.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(SEPARATOR) {
        return Err(AppError::InvalidName(name.to_string()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AppError::Truncated {
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Append `name` to `dir`.
pub fn join(dir: &str, name: &str) -> Result<String> {
    validate_name(name)?;
    let mut out = String::with_capacity(dir.len() + name.len() + 1);
    out.push_str(dir);
    if !dir.ends_with(SEPARATOR) {
        out.push(SEPARATOR);
    }
    out.push_str(name);
    check_len(out)
}

/// Whether `path` equals `ancestor` or lies somewhere beneath it.
///
/// Both arguments are expected in normalized form.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    if path == ancestor || ancestor == "/" {
        return true;
    }
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_separators() {
        assert_eq!(normalize("/switch/").unwrap(), "/switch");
        assert_eq!(normalize("/switch///").unwrap(), "/switch");
    }

    #[test]
    fn normalize_keeps_single_root() {
        assert_eq!(normalize("/").unwrap(), "/");
        assert_eq!(normalize("///").unwrap(), "/");
        assert_eq!(normalize("").unwrap(), "/");
    }

    #[test]
    fn normalize_collapses_and_roots() {
        assert_eq!(normalize("a//b").unwrap(), "/a/b");
        assert_eq!(normalize("//a/./b").unwrap(), "/a/b");
    }

    #[test]
    fn normalize_never_climbs_above_root() {
        assert_eq!(normalize("/a/../b").unwrap(), "/b");
        assert_eq!(normalize("/../../etc").unwrap(), "/etc");
    }

    #[test]
    fn normalize_rejects_overlong_path() {
        let long = format!("/{}", "a".repeat(MAX_PATH_LEN));
        assert!(matches!(
            normalize(&long),
            Err(AppError::Truncated { max: MAX_PATH_LEN, .. })
        ));
    }

    #[test]
    fn parent_of_nested_path() {
        assert_eq!(parent("/a/b").unwrap(), "/a");
        assert_eq!(parent("/a/b/").unwrap(), "/a");
    }

    #[test]
    fn parent_of_top_level_is_root() {
        assert_eq!(parent("/a").unwrap(), "/");
    }

    #[test]
    fn parent_of_root_fails() {
        assert!(matches!(parent("/"), Err(AppError::AtRoot)));
        assert!(matches!(parent("name"), Err(AppError::AtRoot)));
    }

    #[test]
    fn filename_extraction() {
        assert_eq!(filename("/a/b.txt"), "b.txt");
        assert_eq!(filename("/a/dir/"), "dir");
        assert_eq!(filename("plain"), "plain");
        assert_eq!(filename("/"), "");
    }

    #[test]
    fn join_at_root_has_no_double_separator() {
        assert_eq!(join("/", "switch").unwrap(), "/switch");
        assert_eq!(join("/switch", "app.nro").unwrap(), "/switch/app.nro");
    }

    #[test]
    fn join_rejects_bad_names() {
        for bad in ["", ".", "..", "a/b"] {
            assert!(matches!(join("/", bad), Err(AppError::InvalidName(_))));
        }
    }

    #[test]
    fn join_signals_truncation() {
        let dir = format!("/{}", "d".repeat(MAX_PATH_LEN - 5));
        assert!(matches!(
            join(&dir, "file.txt"),
            Err(AppError::Truncated { .. })
        ));
    }

    #[test]
    fn is_within_checks_component_boundaries() {
        assert!(is_within("/a/b", "/a"));
        assert!(is_within("/a", "/a"));
        assert!(is_within("/anything", "/"));
        assert!(!is_within("/ab", "/a"));
        assert!(!is_within("/a", "/a/b"));
    }
}
