//! Picks the icon directory that receives replacements.
//!
//! Resolution runs an ordered list of tiers; the first tier producing a
//! directory wins:
//!
//! 1. a user-local copy of the theme that already holds one of the icons,
//! 2. icons staged into the user-local copy from the system theme (or its
//!    base theme for known variants),
//! 3. a synthesized override directory filled straight from the source icons.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs_ops;
use std::path::{Path, PathBuf};

/// Base themes whose variants (`Mint-Y-Aqua`, `Papirus-Dark`, ...) often ship no icons of their own.
pub const PARENT_THEMES: &[&str] = &["Mint-Y", "Mint-X", "Mint-L", "Yaru", "Papirus"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRoots {
    pub local_base: PathBuf,
    pub system_base: PathBuf,
    pub override_dir: PathBuf,
}

impl IconRoots {
    pub fn from_config(config: &Config) -> IconRoots {
        IconRoots {
            local_base: config.icons_dir.clone(),
            system_base: config.system_icons_dir.clone(),
            override_dir: config.override_dir(),
        }
    }

    pub fn local_dir(&self, theme: &str) -> PathBuf {
        self.local_base.join(theme)
    }

    pub fn system_dir(&self, theme: &str) -> PathBuf {
        self.system_base.join(theme)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staging {
    /// Existing user-local copy reused untouched.
    Local,
    /// Icons copied into the user-local copy from this system theme directory.
    System(PathBuf),
    /// Source icons copied into the override directory.
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDir {
    pub path: PathBuf,
    pub staging: Staging,
}

#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub theme: &'a str,
    pub needed: &'a [&'a str],
    pub source_dir: Option<&'a Path>,
}

type Tier = fn(&IconRoots, &Request<'_>) -> Option<StagedDir>;

const TIERS: &[Tier] = &[reuse_local, stage_from_system, synthesize_override];

/// Returns the directory that should receive replacements for `request.theme`.
///
/// Fails with [`Error::ThemeNotFound`] when the theme exists neither locally
/// nor system-wide, or when no tier could produce a directory.
pub fn ensure_local_copy(roots: &IconRoots, request: &Request<'_>) -> Result<StagedDir> {
    if !theme_exists(roots, request.theme) {
        return Err(Error::ThemeNotFound(request.theme.to_string()));
    }

    let staged = TIERS
        .iter()
        .find_map(|tier| tier(roots, request))
        .ok_or_else(|| Error::ThemeNotFound(request.theme.to_string()))?;
    log::info!("Using {} ({:?})", staged.path.display(), staged.staging);
    Ok(staged)
}

pub fn theme_exists(roots: &IconRoots, theme: &str) -> bool {
    roots.local_dir(theme).exists() || roots.system_dir(theme).exists()
}

/// Tier 1: a local copy that already holds at least one needed icon.
pub fn reuse_local(roots: &IconRoots, request: &Request<'_>) -> Option<StagedDir> {
    let local = roots.local_dir(request.theme);
    fs_ops::contains_any(&local, request.needed).then(|| StagedDir {
        path: local,
        staging: Staging::Local,
    })
}

/// Known base theme `theme` is a variant of, if any.
pub fn parent_theme(theme: &str) -> Option<&'static str> {
    PARENT_THEMES
        .iter()
        .copied()
        .find(|prefix| theme.starts_with(prefix) && theme != *prefix)
}

/// System directory to stage icons from: the theme itself when it holds a
/// needed icon, else its base theme when that one does.
pub fn system_source(roots: &IconRoots, request: &Request<'_>) -> Option<PathBuf> {
    let system = roots.system_dir(request.theme);
    if !system.exists() {
        return None;
    }
    if fs_ops::contains_any(&system, request.needed) {
        return Some(system);
    }
    let parent = roots.system_dir(parent_theme(request.theme)?);
    fs_ops::contains_any(&parent, request.needed).then_some(parent)
}

/// Tier 2: mirror needed system icons into the local copy, keeping relative paths.
pub fn stage_from_system(roots: &IconRoots, request: &Request<'_>) -> Option<StagedDir> {
    let system = system_source(roots, request)?;
    let local = roots.local_dir(request.theme);

    let mut copied = 0;
    for name in request.needed {
        for sys_file in fs_ops::find_named(&system, name) {
            let Ok(rel) = sys_file.strip_prefix(&system) else {
                continue;
            };
            match fs_ops::copy_into(&sys_file, &local.join(rel)) {
                Ok(_) => copied += 1,
                Err(e) => log::warn!("Could not stage {}: {}", sys_file.display(), e),
            }
        }
    }

    log::debug!("Staged {} icons from {}", copied, system.display());
    (copied > 0).then(|| StagedDir {
        path: local,
        staging: Staging::System(system),
    })
}

/// Tier 3: copy source icons flat into the override directory.
pub fn synthesize_override(roots: &IconRoots, request: &Request<'_>) -> Option<StagedDir> {
    let source = request.source_dir.filter(|d| d.is_dir())?;

    println!("No matching SVGs in variant or base theme. Using Adwaita.");
    let mut copied = 0;
    for name in request.needed {
        let src = source.join(name);
        if !src.is_file() {
            continue;
        }
        match fs_ops::copy_into(&src, &roots.override_dir.join(name)) {
            Ok(_) => copied += 1,
            Err(e) => log::warn!("Could not copy {}: {}", src.display(), e),
        }
    }

    (copied > 0).then(|| StagedDir {
        path: roots.override_dir.clone(),
        staging: Staging::Override,
    })
}
