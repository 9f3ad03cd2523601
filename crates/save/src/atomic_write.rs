//! Write-rename file replacement.
//!
//! Data goes to `{path}.tmp`, is flushed with `sync_all()`, then renamed over
//! the final path. A crash mid-write leaves the previous file intact.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically replace the contents of `path` with `data`.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = tmp_path_for(path);
    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = PathBuf::from(format!("/tmp/lanehop_atomic_write_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_atomic_write_creates_file_without_tmp() {
        let dir = test_dir("creates");
        let path = dir.join("score.bin");

        atomic_write(&path, b"hello").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert!(!tmp_path_for(&path).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let dir = test_dir("overwrites");
        let path = dir.join("score.bin");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = test_dir("parents");
        let path = dir.join("nested").join("deep").join("score.bin");

        atomic_write(&path, b"nested").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"nested");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_replaces_stale_tmp() {
        let dir = test_dir("stale_tmp");
        let path = dir.join("score.bin");
        fs::write(&path, b"original").unwrap();
        fs::write(tmp_path_for(&path), b"partial garbage").unwrap();

        atomic_write(&path, b"fresh").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"fresh");
        assert!(!tmp_path_for(&path).exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
