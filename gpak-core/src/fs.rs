//! Filesystem adapter: enumeration, relative paths, whole-file I/O.
//!
//! Archive entries carry their paths in generic form (`/`-separated,
//! regardless of host OS). This module produces those paths during
//! enumeration and sanitizes them again on extraction so a crafted archive
//! cannot write outside the destination root.

use crate::error::{GpakError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// A regular file discovered under a directory root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute (or root-joined) path used for reading the file.
    pub absolute_path: PathBuf,
    /// Root-relative path in generic `/` form, as stored in archives.
    pub relative_path: String,
}

/// Recursively enumerate the regular files under `root`.
///
/// Entries are returned in a deterministic (name-sorted) order; archive
/// layout follows this order. Directories themselves are not listed, only
/// the files they contain.
pub fn list_files(root: &Path) -> Result<Vec<FileEntry>> {
    if !root.is_dir() {
        return Err(GpakError::invalid_input(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| {
                GpakError::invalid_path(format!(
                    "{} is not under {}",
                    entry.path().display(),
                    root.display()
                ))
            })?
            .to_string_lossy()
            .replace('\\', "/");

        entries.push(FileEntry {
            absolute_path: entry.path().to_path_buf(),
            relative_path: relative,
        });
    }

    Ok(entries)
}

/// Read a whole regular file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Write a whole buffer to `path`, creating missing parent directories.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, data)?;
    Ok(())
}

/// Create the parent directory of `path` (and its ancestors) if missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Reduce an archive entry path to its safe normal components.
///
/// Parent (`..`), current (`.`), root, and prefix components are stripped,
/// so the result always stays under the directory it is joined to.
pub fn sanitize_relative_path(name: &str) -> String {
    let mut result = String::new();

    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => {
                if !result.is_empty() {
                    result.push('/');
                }
                result.push_str(&part.to_string_lossy().replace('\0', "_"));
            }
            Component::CurDir
            | Component::ParentDir
            | Component::RootDir
            | Component::Prefix(_) => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_files_recursive_relative_paths() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("root.txt"), b"root").unwrap();
        fs::write(temp.path().join("nested/alpha.bin"), b"alpha").unwrap();
        fs::write(temp.path().join("nested/beta.bin"), b"beta").unwrap();

        let entries = list_files(temp.path()).unwrap();
        let mut paths: Vec<&str> = entries.iter().map(|e| e.relative_path.as_str()).collect();
        paths.sort_unstable();

        assert_eq!(paths, vec!["nested/alpha.bin", "nested/beta.bin", "root.txt"]);
    }

    #[test]
    fn test_list_files_is_deterministic() {
        let temp = tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.txt"] {
            fs::write(temp.path().join(name), name).unwrap();
        }

        let first = list_files(temp.path()).unwrap();
        let second = list_files(temp.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_files_rejects_non_directory() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            list_files(&file),
            Err(GpakError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("deep/nested/out.bin");

        write_file(&target, b"payload").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"payload");
    }

    #[test]
    fn test_sanitize_relative_path() {
        assert_eq!(sanitize_relative_path("../etc/passwd"), "etc/passwd");
        assert_eq!(
            sanitize_relative_path("/absolute/path/file.txt"),
            "absolute/path/file.txt"
        );
        assert_eq!(
            sanitize_relative_path("./current/./path/file.txt"),
            "current/path/file.txt"
        );
        assert_eq!(sanitize_relative_path(".."), "");
    }
}
