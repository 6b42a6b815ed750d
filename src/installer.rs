use crate::archive;
use crate::config::{self, Config};
use crate::dialog::{Dialog, Question};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub const TITLE: &str = "Semabe theme selector installer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Installed,
    Cancelled,
}

/// Decides whether installation may proceed.
///
/// `assume_yes` or an affirmative `SEMABE_ASSUME_YES` accept immediately. Otherwise
/// the dialog is asked; if it has no way to ask, installation goes ahead unprompted.
pub fn confirm_install(assume_yes: bool, dialog: &dyn Dialog, config: &Config) -> bool {
    if assume_yes || env_assume_yes() {
        return true;
    }

    let question = Question {
        title: TITLE,
        text: format!(
            "The installer will extract the files to the following directories:\n\n{}\n{}",
            config.themes_dir.display(),
            config.extensions_dir.display()
        ),
        ok_label: "CONTINUE",
        cancel_label: "CANCEL",
    };
    dialog.confirm(&question).unwrap_or(true)
}

fn env_assume_yes() -> bool {
    std::env::var(config::ASSUME_YES_ENV)
        .map(|v| config::is_affirmative(&v))
        .unwrap_or(false)
}

/// Removes only `<themes>/semabe` and `<extensions>/semabe-theme-selector@sewbej`.
pub fn clean_existing(theme_base: &Path, ext_base: &Path) {
    for dir in [
        theme_base.join(config::THEME_NAME),
        ext_base.join(config::EXTENSION_ID),
    ] {
        match std::fs::remove_dir_all(&dir) {
            Ok(()) => log::debug!("Removed previous installation {}", dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove {}: {}", dir.display(), e),
        }
    }
}

/// The two archives expected in `archive_dir`.
pub fn archive_paths(archive_dir: &Path) -> (PathBuf, PathBuf) {
    (
        archive_dir.join(config::THEME_ARCHIVE),
        archive_dir.join(config::EXTENSION_ARCHIVE),
    )
}

/// Every archive from `paths` that does not exist, in order.
pub fn missing_archives(paths: &[&Path]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| !p.exists())
        .map(|p| p.to_path_buf())
        .collect()
}

pub fn install(
    assume_yes: bool,
    archive_dir: &Path,
    config: &Config,
    dialog: &dyn Dialog,
) -> Result<Outcome> {
    if !confirm_install(assume_yes, dialog, config) {
        println!("Cancelled.");
        dialog.info(TITLE, "Installation cancelled");
        return Ok(Outcome::Cancelled);
    }

    let (theme_archive, ext_archive) = archive_paths(archive_dir);
    let missing = missing_archives(&[&theme_archive, &ext_archive]);
    if !missing.is_empty() {
        return Err(Error::MissingArchives(missing));
    }

    let progress = dialog.progress(TITLE, "\n\ninstalling...");
    extract_all(config, &theme_archive, &ext_archive)?;
    drop(progress);

    println!("Installation finished!");
    dialog.info(
        TITLE,
        "Installation finished successfully.\n\nNow enable the SEMABE THEME SELECTOR extension in your system settings.",
    );
    Ok(Outcome::Installed)
}

fn extract_all(config: &Config, theme_archive: &Path, ext_archive: &Path) -> Result<()> {
    for dir in [&config.themes_dir, &config.extensions_dir] {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::io(format!("create {}", dir.display()), e))?;
    }

    clean_existing(&config.themes_dir, &config.extensions_dir);

    archive::extract(theme_archive, &config.themes_dir)?;
    archive::extract(ext_archive, &config.extensions_dir)?;
    Ok(())
}
