use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regular files (or links to them) called `name` anywhere under `root`.
/// Symlinked directories are not descended into.
pub fn find_named(root: &Path, name: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() == name && e.path().is_file())
        .map(|e| e.into_path())
        .collect()
}

/// Whether any file named in `names` exists under `root`.
pub fn contains_any(root: &Path, names: &[&str]) -> bool {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|n| names.contains(&n))
                && e.path().is_file()
        })
}

/// Copies `src` over `dest`, keeping permission bits.
///
/// A symlink at `dest` is removed first so the link target is never written through.
pub fn copy_over(src: &Path, dest: &Path) -> io::Result<u64> {
    if fs::symlink_metadata(dest).is_ok_and(|m| m.file_type().is_symlink()) {
        fs::remove_file(dest)?;
    }
    fs::copy(src, dest)
}

/// Copies `src` to `dest`, creating parent directories as needed.
pub fn copy_into(src: &Path, dest: &Path) -> io::Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    copy_over(src, dest)
}
