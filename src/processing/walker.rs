//! Recursive enumeration of the files under a root directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// List every regular file reachable under `root`, at any depth.
///
/// Entries of each directory are visited in file-name order. Symlinks are
/// not followed and other non-regular entries (sockets, fifos) are skipped.
/// A directory that cannot be listed, the root included, is skipped with a
/// warning and the walk goes on; a missing root yields no files.
pub fn enumerate_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(root, &mut files);
    debug!(root = %root.display(), files = files.len(), "Enumerated files");
    files
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir).and_then(|it| it.collect::<std::io::Result<Vec<_>>>()) {
        Ok(mut entries) => {
            entries.sort_by_key(|entry| entry.file_name());
            entries
        }
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };

    for entry in entries {
        let path = entry.path();
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => walk(&path, files),
            Ok(kind) if kind.is_file() => files.push(path),
            Ok(_) => warn!(path = %path.display(), "Skipping non-regular entry"),
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping entry without file type"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_enumerates_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("mars/mips/hardware")).unwrap();
        fs::write(root.join("Top.java"), "class Top {}").unwrap();
        fs::write(root.join("mars/MarsLaunch.java"), "").unwrap();
        fs::write(root.join("mars/mips/hardware/RegisterFile.java"), "x").unwrap();

        let found: BTreeSet<PathBuf> = enumerate_files(root).into_iter().collect();
        let expected: BTreeSet<PathBuf> = [
            root.join("Top.java"),
            root.join("mars/MarsLaunch.java"),
            root.join("mars/mips/hardware/RegisterFile.java"),
        ]
        .into_iter()
        .collect();

        assert_eq!(found, expected);
    }

    #[test]
    fn test_empty_directories_yield_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();

        assert!(enumerate_files(dir.path()).is_empty());
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();

        assert!(enumerate_files(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_root_that_is_a_file_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("NotADir.java");
        fs::write(&file, "x").unwrap();

        assert!(enumerate_files(&file).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("locked")).unwrap();
        fs::create_dir_all(root.join("z")).unwrap();
        fs::write(root.join("a/A.java"), "x").unwrap();
        fs::write(root.join("locked/Hidden.java"), "x").unwrap();
        fs::write(root.join("z/Z.java"), "x").unwrap();
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root
        let listable = fs::read_dir(root.join("locked")).is_ok();
        let found = enumerate_files(root);
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();

        if listable {
            return;
        }
        assert_eq!(found, vec![root.join("a/A.java"), root.join("z/Z.java")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        let outside = dir.path().join("outside");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("Elsewhere.java"), "x").unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        assert!(enumerate_files(&root).is_empty());
    }
}
