use crate::error::{Error, Result};
use path_absolutize::*;
use std::io::BufRead;
use std::path::{Path, PathBuf};

pub const THEME_NAME: &str = "semabe";
pub const EXTENSION_ID: &str = "semabe-theme-selector@sewbej";
pub const THEME_ARCHIVE: &str = "semabe.tar.xz";
pub const EXTENSION_ARCHIVE: &str = "semabe-theme-selector@sewbej.tar.xz";
pub const ASSUME_YES_ENV: &str = "SEMABE_ASSUME_YES";
pub const CONFIG_FILE: &str = "semabe.cfg";

/// Filesystem roots both tools operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub themes_dir: PathBuf,
    pub extensions_dir: PathBuf,
    pub icons_dir: PathBuf,
    pub system_icons_dir: PathBuf,
    pub archive_dir: Option<PathBuf>,
}

impl Config {
    /// Default layout rooted at `home`.
    pub fn from_home(home: &Path) -> Config {
        Config {
            themes_dir: home.join(".themes"),
            extensions_dir: home.join(".local/share/cinnamon/extensions"),
            icons_dir: home.join(".local/share/icons"),
            system_icons_dir: PathBuf::from("/usr/share/icons"),
            archive_dir: None,
        }
    }

    /// Defaults for the current user, overlaid with `~/.config/semabe/semabe.cfg` if present.
    pub fn load() -> Result<Config> {
        let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
        let cfg = Config::from_home(&home);
        Ok(cfg.overlay_file(&config_path(&home)))
    }

    /// Applies `key: value` lines from `path`. A missing or unreadable file leaves `self` untouched.
    pub fn overlay_file(mut self, path: &Path) -> Config {
        if !path.exists() {
            return self;
        }
        let file = match std::fs::File::open(path) {
            Err(e) => {
                log::warn!(
                    "Failed to open config file ({}): {}. Using default config instead.",
                    path.display(),
                    e
                );
                return self;
            }
            Ok(f) => f,
        };

        for line in std::io::BufReader::new(file).lines().map_while(|l| l.ok()) {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                log::warn!("Ignoring malformed config line: {}", line);
                continue;
            };
            let value = absolutize(value.trim());
            match key.trim() {
                "themes_dir" => self.themes_dir = value,
                "extensions_dir" => self.extensions_dir = value,
                "icons_dir" => self.icons_dir = value,
                "system_icons_dir" => self.system_icons_dir = value,
                "archive_dir" => self.archive_dir = Some(value),
                other => log::warn!("Unknown config: {}", other),
            }
        }

        self
    }

    pub fn theme_target(&self) -> PathBuf {
        self.themes_dir.join(THEME_NAME)
    }

    pub fn extension_target(&self) -> PathBuf {
        self.extensions_dir.join(EXTENSION_ID)
    }

    /// Root holding the bundled symbolic icon variants, shipped inside the installed theme.
    pub fn symbolic_source_root(&self) -> PathBuf {
        self.theme_target().join("symbolic icons")
    }

    /// Synthesized directory used when no theme installation can host the icons.
    pub fn override_dir(&self) -> PathBuf {
        self.icons_dir.join("Adwaita/symbolic/ui")
    }
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(".config/semabe").join(CONFIG_FILE)
}

fn absolutize(value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    match path.absolutize() {
        Ok(p) => p.into_owned(),
        Err(_) => path,
    }
}

/// Truthy values accepted for [`ASSUME_YES_ENV`].
pub fn is_affirmative(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "y")
}
