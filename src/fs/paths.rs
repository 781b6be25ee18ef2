//! Path resolution utilities for tanktrack
//!
//! Provides functions to locate the data root and construct paths
//! to the config and level files.

use std::path::{Path, PathBuf};

use crate::errors::{Result, TanktrackError};

/// Name of the data directory
pub const DATA_DIR_NAME: &str = ".tanktrack";

/// Find the directory containing `.tanktrack`.
///
/// Walks up the directory tree from the starting directory looking for
/// a directory that contains `.tanktrack`.
///
/// # Arguments
/// * `start_cwd` - The directory to start searching from
///
/// # Errors
/// * `DataDirNotFound` - If no ancestor contains `.tanktrack`
pub fn find_data_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| TanktrackError::DataDirNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(DATA_DIR_NAME).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(TanktrackError::DataDirNotFound(
                    "Could not find a .tanktrack directory; run `tanktrack init` first".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .tanktrack directory.
pub fn get_data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR_NAME)
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_data_dir(root).join("config.json")
}

/// Get the path to the directory holding one JSON file per level.
pub fn get_levels_dir(root: &Path) -> PathBuf {
    get_data_dir(root).join("levels")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(DATA_DIR_NAME)).unwrap();
        temp
    }

    #[test]
    fn test_find_data_root_from_root() {
        let temp = setup_root();
        let root = find_data_root(temp.path()).unwrap();
        assert_eq!(root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_data_root_from_subdir() {
        let temp = setup_root();
        let subdir = temp.path().join("site").join("plans");
        std::fs::create_dir_all(&subdir).unwrap();

        let root = find_data_root(&subdir).unwrap();
        assert_eq!(root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_data_root_ignores_plain_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(DATA_DIR_NAME), "").unwrap();

        // A file named .tanktrack is not a data dir; the search keeps walking up
        // and may or may not find one above the temp dir, but never this one.
        if let Ok(root) = find_data_root(temp.path()) {
            assert_ne!(root, temp.path().canonicalize().unwrap());
        }
    }

    #[test]
    fn test_find_data_root_missing_path() {
        let temp = TempDir::new().unwrap();
        let result = find_data_root(&temp.path().join("does-not-exist"));
        assert!(matches!(result, Err(TanktrackError::DataDirNotFound(_))));
    }

    #[test]
    fn test_paths() {
        let root = PathBuf::from("/site");
        assert_eq!(get_data_dir(&root), PathBuf::from("/site/.tanktrack"));
        assert_eq!(get_config_path(&root), PathBuf::from("/site/.tanktrack/config.json"));
        assert_eq!(get_levels_dir(&root), PathBuf::from("/site/.tanktrack/levels"));
    }

    #[test]
    fn test_resolve_cwd_with_override() {
        let path = PathBuf::from("/custom/path");
        assert_eq!(resolve_cwd(Some(&path)), path);
    }

    #[test]
    fn test_resolve_cwd_without_override() {
        assert!(!resolve_cwd(None).as_os_str().is_empty());
    }
}
