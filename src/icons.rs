use crate::error::Error;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

pub const CONTROLS_FILES: &[&str] = &[
    "window-close-symbolic.svg",
    "window-maximize-symbolic.svg",
    "window-minimize-symbolic.svg",
    "window-restore-symbolic.svg",
];

pub const ARROW_FILES: &[&str] = &[
    "adw-expander-arrow-symbolic.svg",
    "hdy-expander-arrow-symbolic.svg",
    "pan-down-symbolic.svg",
    "pan-end-symbolic-rtl.svg",
    "pan-end-symbolic.svg",
    "pan-start-symbolic-rtl.svg",
    "pan-start-symbolic.svg",
    "pan-up-symbolic.svg",
];

/// Subset of [`ARROW_FILES`] shown in the preview.
pub const ARROW_PREVIEW_FILES: &[&str] = &[
    "pan-down-symbolic.svg",
    "pan-end-symbolic.svg",
    "pan-start-symbolic.svg",
    "pan-up-symbolic.svg",
];

pub const BACKUP_SUFFIX: &str = ".semabe.bak";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Controls,
    Arrows,
    Restore,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mode, Error> {
        match s {
            "controls" => Ok(Mode::Controls),
            "arrows" => Ok(Mode::Arrows),
            "restore" => Ok(Mode::Restore),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

impl Mode {
    /// Every icon this mode writes. Restore covers both sets.
    pub fn files(self) -> Vec<&'static str> {
        match self {
            Mode::Controls => CONTROLS_FILES.to_vec(),
            Mode::Arrows => ARROW_FILES.to_vec(),
            Mode::Restore => CONTROLS_FILES.iter().chain(ARROW_FILES).copied().collect(),
        }
    }

    pub fn preview_files(self) -> &'static [&'static str] {
        match self {
            Mode::Controls => CONTROLS_FILES,
            Mode::Arrows => ARROW_PREVIEW_FILES,
            Mode::Restore => &[],
        }
    }

    /// Directory under the theme's `symbolic icons` folder holding the styles.
    pub fn source_group(self) -> Option<&'static str> {
        match self {
            Mode::Controls => Some("close-minimize-maximize"),
            Mode::Arrows => Some("arrows"),
            Mode::Restore => None,
        }
    }

    pub fn source_dir(self, symbolic_root: &Path, style: &str) -> Option<PathBuf> {
        self.source_group()
            .map(|group| symbolic_root.join(group).join(style))
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Controls => "Replace window control symbolic icons",
            Mode::Arrows => "Replace arrow symbolic icons",
            Mode::Restore => "Restore original symbolic icons",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Mode::Controls => "Replacing window control icons in theme:",
            Mode::Arrows => "Replacing arrow icons in theme:",
            Mode::Restore => "Restoring all original symbolic icons in theme:",
        }
    }

    pub fn ok_label(self) -> &'static str {
        match self {
            Mode::Restore => "Restore",
            _ => "Replace",
        }
    }
}

/// Sidecar path holding the original bytes of `target`.
pub fn backup_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Rejects values that would not stay a single directory name once joined.
pub fn validate_name(kind: &'static str, value: &str) -> Result<(), Error> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::InvalidName {
            kind,
            value: value.to_string(),
        }),
    }
}
