//! Backup-once replacement and restore of icon files.
//!
//! The presence of `<file>.semabe.bak` is the only record that `<file>` was
//! modified. A backup is written at most once, so it always holds the bytes
//! the file had before the first replacement.

use crate::error::{Error, Result};
use crate::fs_ops;
use crate::icons::backup_path;
use std::fs;
use std::io;
use std::path::Path;

/// Tally of a per-file batch. Failed files are logged and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }

    fn record(&mut self, ok: bool) {
        self.attempted += 1;
        if ok {
            self.succeeded += 1;
        }
    }
}

/// Copies `target` to its backup path unless a backup already exists.
/// Returns whether a new backup was written.
pub fn ensure_backup_once(target: &Path) -> io::Result<bool> {
    let backup = backup_path(target);
    if backup.exists() {
        return Ok(false);
    }
    fs::copy(target, &backup)?;
    Ok(true)
}

/// Overwrites every file under `target_dir` named like a file in `source_dir`.
///
/// Files inside `override_dir` are written without a backup.
pub fn replace_many(
    source_dir: &Path,
    target_dir: &Path,
    override_dir: &Path,
    names: &[&str],
) -> BatchReport {
    let mut report = BatchReport::default();

    for name in names {
        let src = source_dir.join(name);
        if !src.is_file() {
            continue;
        }
        for dest in fs_ops::find_named(target_dir, name) {
            let in_override = dest.parent() == Some(override_dir);
            if !in_override {
                if let Err(e) = ensure_backup_once(&dest) {
                    log::warn!("Skipping {}: backup failed: {}", dest.display(), e);
                    report.record(false);
                    continue;
                }
            }
            match fs_ops::copy_over(&src, &dest) {
                Ok(_) => {
                    log::debug!("Replaced {}", dest.display());
                    report.record(true);
                }
                Err(e) => {
                    log::warn!("Could not replace {}: {}", dest.display(), e);
                    report.record(false);
                }
            }
        }
    }

    report
}

/// Like [`replace_many`], failing when nothing was overwritten.
pub fn replace(
    source_dir: &Path,
    target_dir: &Path,
    override_dir: &Path,
    names: &[&str],
) -> Result<usize> {
    let report = replace_many(source_dir, target_dir, override_dir, names);
    if report.failed() > 0 {
        log::warn!("{} of {} files could not be replaced", report.failed(), report.attempted);
    }
    match report.succeeded {
        0 => Err(Error::NothingReplaced(target_dir.to_path_buf())),
        n => Ok(n),
    }
}

/// Puts backed-up originals back and deletes their backups.
///
/// Any entry at the backup path counts as a backup; one that cannot be read
/// (a dangling link, say) is a failed attempt and the file is left as is.
pub fn restore_from_backups(target_dir: &Path, names: &[&str]) -> BatchReport {
    let mut report = BatchReport::default();

    for name in names {
        for dest in fs_ops::find_named(target_dir, name) {
            let backup = backup_path(&dest);
            if fs::symlink_metadata(&backup).is_err() {
                continue;
            }
            let restored = fs_ops::copy_over(&backup, &dest).and_then(|_| fs::remove_file(&backup));
            if let Err(e) = &restored {
                log::warn!("Could not restore {}: {}", dest.display(), e);
            }
            report.record(restored.is_ok());
        }
    }

    report
}

/// Deletes files named in `names` from the synthesized override directory.
pub fn remove_overrides(override_dir: &Path, names: &[&str]) -> BatchReport {
    let mut report = BatchReport::default();

    for name in names {
        for dest in fs_ops::find_named(override_dir, name) {
            let removed = fs::remove_file(&dest);
            if let Err(e) = &removed {
                log::warn!("Could not remove {}: {}", dest.display(), e);
            }
            report.record(removed.is_ok());
        }
    }

    report
}

/// Restores from backups under `target_dir`; when none were restored, removes
/// overrides instead. Fails when neither touched a file.
pub fn restore(target_dir: &Path, override_dir: &Path, names: &[&str]) -> Result<usize> {
    let mut restored = 0;
    if target_dir.exists() {
        restored = restore_from_backups(target_dir, names).succeeded;
    }

    if restored == 0 && override_dir.exists() {
        let removed = remove_overrides(override_dir, names).succeeded;
        if removed > 0 {
            println!("Removed {} files from {}", removed, override_dir.display());
            restored = removed;
        }
    }

    match restored {
        0 => Err(Error::NothingRestored(target_dir.to_path_buf())),
        n => Ok(n),
    }
}
