//! Safety guard for destructive filesystem operations

use crate::error::HarnessError;
use std::path::{Path, PathBuf};

/// Validate a path before recursive deletion
///
/// Resolves the path and refuses filesystem roots and empty paths. Returns
/// the resolved path the caller should delete. The path must exist, since
/// resolution follows the real filesystem.
pub fn guard_delete_path(path: &Path) -> Result<PathBuf, HarnessError> {
    if path.as_os_str().is_empty() {
        return Err(HarnessError::UnsafeDeleteTarget(path.to_path_buf()));
    }

    let resolved = path.canonicalize()?;
    if resolved.parent().is_none() {
        return Err(HarnessError::UnsafeDeleteTarget(resolved));
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_empty_path() {
        let err = guard_delete_path(Path::new("")).unwrap_err();
        assert!(matches!(err, HarnessError::UnsafeDeleteTarget(_)));
    }

    #[test]
    fn refuses_root_path() {
        let err = guard_delete_path(Path::new("/")).unwrap_err();
        assert!(matches!(err, HarnessError::UnsafeDeleteTarget(_)));
    }

    #[test]
    fn refuses_path_resolving_to_root() {
        let err = guard_delete_path(Path::new("/tmp/..")).unwrap_err();
        assert!(matches!(err, HarnessError::UnsafeDeleteTarget(_)));
    }

    #[test]
    fn accepts_ordinary_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let resolved = guard_delete_path(dir.path()).unwrap();
        assert!(resolved.parent().is_some());
    }
}
