use crate::backup;
use crate::config::Config;
use crate::dialog::{Dialog, Question};
use crate::error::{Error, Result};
use crate::icons::{validate_name, Mode};
use crate::resolve::{self, IconRoots, Request};
use std::path::{Path, PathBuf};

pub const TITLE: &str = "Semabe Theme Selector";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Number of files replaced, restored or removed.
    Completed(usize),
    Cancelled,
}

pub fn run(
    mode: Mode,
    style: &str,
    theme: &str,
    config: &Config,
    dialog: &dyn Dialog,
) -> Result<Outcome> {
    validate_name("theme", theme)?;
    let roots = IconRoots::from_config(config);

    match mode {
        Mode::Restore => restore(theme, &roots, dialog),
        Mode::Controls | Mode::Arrows => {
            validate_name("style", style)?;
            replace(mode, style, theme, config, &roots, dialog)
        }
    }
}

fn replace(
    mode: Mode,
    style: &str,
    theme: &str,
    config: &Config,
    roots: &IconRoots,
    dialog: &dyn Dialog,
) -> Result<Outcome> {
    let source_dir = mode
        .source_dir(&config.symbolic_source_root(), style)
        .ok_or_else(|| Error::UnknownMode(format!("{mode:?}")))?;
    if !source_dir.is_dir() {
        return Err(Error::SourceDirNotFound(source_dir));
    }

    let names = mode.files();
    let missing = missing_sources(&source_dir, &names);
    if !missing.is_empty() {
        println!("Some source SVG files are missing. Adwaita may be used.");
        for path in &missing {
            log::warn!("Missing source icon {}", path.display());
        }
    }

    let preview = present_sources(&source_dir, mode.preview_files());
    if !ask(mode, theme, &preview, dialog) {
        println!("Operation canceled by user.");
        return Ok(Outcome::Cancelled);
    }

    let staged = resolve::ensure_local_copy(
        roots,
        &Request {
            theme,
            needed: &names,
            source_dir: Some(&source_dir),
        },
    )?;

    let replaced = backup::replace(&source_dir, &staged.path, &roots.override_dir, &names)?;
    println!("Replaced {} files ({:?}, style='{}').", replaced, mode, style);
    Ok(Outcome::Completed(replaced))
}

fn restore(theme: &str, roots: &IconRoots, dialog: &dyn Dialog) -> Result<Outcome> {
    let target_dir = roots.local_dir(theme);
    if !ask(Mode::Restore, theme, &[], dialog) {
        println!("Operation canceled by user.");
        return Ok(Outcome::Cancelled);
    }

    let restored = backup::restore(&target_dir, &roots.override_dir, &Mode::Restore.files())?;
    println!("Restored {} files.", restored);
    Ok(Outcome::Completed(restored))
}

/// Source icons from `names` that are absent. They are only warned about.
pub fn missing_sources(source_dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|n| source_dir.join(n))
        .filter(|p| !p.is_file())
        .collect()
}

fn present_sources(source_dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|n| source_dir.join(n))
        .filter(|p| p.is_file())
        .collect()
}

/// No answer from the dialog counts as a refusal; nothing is modified unconfirmed.
fn ask(mode: Mode, theme: &str, preview: &[PathBuf], dialog: &dyn Dialog) -> bool {
    let mut text = format!("{}\n\n{}", mode.header(), theme);
    if mode != Mode::Restore {
        text.push_str("\n\nwith the following icons:");
        for icon in preview {
            if let Some(name) = icon.file_name() {
                text.push_str(&format!("\n  {}", name.to_string_lossy()));
            }
        }
    }

    dialog
        .confirm(&Question {
            title: mode.title(),
            text,
            ok_label: mode.ok_label(),
            cancel_label: "Cancel",
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::{backup_path, CONTROLS_FILES};
    use crate::test_utils::Scripted;
    use std::fs;

    struct Home {
        _tmp: tempfile::TempDir,
        config: Config,
    }

    fn home() -> Home {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::from_home(&tmp.path().join("home"));
        config.system_icons_dir = tmp.path().join("usr/share/icons");
        Home { _tmp: tmp, config }
    }

    fn controls_source(config: &Config, style: &str) -> PathBuf {
        let dir = config
            .symbolic_source_root()
            .join("close-minimize-maximize")
            .join(style);
        fs::create_dir_all(&dir).unwrap();
        for name in CONTROLS_FILES {
            fs::write(dir.join(name), format!("{style}:{name}")).unwrap();
        }
        dir
    }

    fn system_theme(config: &Config, theme: &str) -> PathBuf {
        let dir = config.system_icons_dir.join(theme).join("actions/16");
        fs::create_dir_all(&dir).unwrap();
        for name in CONTROLS_FILES {
            fs::write(dir.join(name), "system").unwrap();
        }
        dir
    }

    #[test]
    fn missing_source_dir_is_error() {
        let h = home();
        let dialog = Scripted::new(Some(true));
        let err = run(Mode::Controls, "round", "Mint-Y", &h.config, &dialog).unwrap_err();
        assert!(matches!(err, Error::SourceDirNotFound(_)));
        assert!(!dialog.was_asked());
    }

    #[test]
    fn cancel_is_success_without_changes() {
        let h = home();
        controls_source(&h.config, "round");
        system_theme(&h.config, "Mint-Y");
        let dialog = Scripted::new(Some(false));

        let outcome = run(Mode::Controls, "round", "Mint-Y", &h.config, &dialog).unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(!h.config.icons_dir.join("Mint-Y").exists());
    }

    #[test]
    fn no_dialog_answer_cancels() {
        let h = home();
        controls_source(&h.config, "round");
        let dialog = Scripted::new(None);
        assert_eq!(
            run(Mode::Controls, "round", "Mint-Y", &h.config, &dialog).unwrap(),
            Outcome::Cancelled
        );
    }

    #[test]
    fn replace_then_restore_through_system_theme() {
        let h = home();
        controls_source(&h.config, "round");
        system_theme(&h.config, "Mint-Y");
        let dialog = Scripted::new(Some(true));

        let outcome = run(Mode::Controls, "round", "Mint-Y", &h.config, &dialog).unwrap();
        assert_eq!(outcome, Outcome::Completed(4));

        let local = h.config.icons_dir.join("Mint-Y/actions/16");
        let close = local.join("window-close-symbolic.svg");
        assert_eq!(fs::read_to_string(&close).unwrap(), "round:window-close-symbolic.svg");
        assert_eq!(fs::read_to_string(backup_path(&close)).unwrap(), "system");
        assert!(dialog.questions.borrow()[0].contains("window-close-symbolic.svg"));

        let outcome = run(Mode::Restore, "-", "Mint-Y", &h.config, &dialog).unwrap();
        assert_eq!(outcome, Outcome::Completed(4));
        assert_eq!(fs::read_to_string(&close).unwrap(), "system");
        assert!(!backup_path(&close).exists());
    }

    #[test]
    fn second_style_keeps_first_backup() {
        let h = home();
        controls_source(&h.config, "round");
        controls_source(&h.config, "square");
        system_theme(&h.config, "Mint-Y");
        let dialog = Scripted::new(Some(true));

        run(Mode::Controls, "round", "Mint-Y", &h.config, &dialog).unwrap();
        run(Mode::Controls, "square", "Mint-Y", &h.config, &dialog).unwrap();

        let close = h.config.icons_dir.join("Mint-Y/actions/16/window-close-symbolic.svg");
        assert_eq!(fs::read_to_string(&close).unwrap(), "square:window-close-symbolic.svg");
        assert_eq!(fs::read_to_string(backup_path(&close)).unwrap(), "system");
    }

    #[test]
    fn unknown_theme_is_error() {
        let h = home();
        controls_source(&h.config, "round");
        let dialog = Scripted::new(Some(true));
        let err = run(Mode::Controls, "round", "Nowhere", &h.config, &dialog).unwrap_err();
        assert!(matches!(err, Error::ThemeNotFound(_)));
    }

    #[test]
    fn restore_with_nothing_is_error() {
        let h = home();
        fs::create_dir_all(h.config.icons_dir.join("Mint-Y")).unwrap();
        let dialog = Scripted::new(Some(true));
        let err = run(Mode::Restore, "", "Mint-Y", &h.config, &dialog).unwrap_err();
        assert!(matches!(err, Error::NothingRestored(_)));
    }

    #[test]
    fn traversal_names_rejected() {
        let h = home();
        let dialog = Scripted::new(Some(true));
        assert!(matches!(
            run(Mode::Controls, "../x", "Mint-Y", &h.config, &dialog),
            Err(Error::InvalidName { kind: "style", .. })
        ));
        assert!(matches!(
            run(Mode::Restore, "", "../..", &h.config, &dialog),
            Err(Error::InvalidName { kind: "theme", .. })
        ));
    }

    #[test]
    fn missing_sources_listed() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.svg"), "").unwrap();
        let missing = missing_sources(tmp.path(), &["a.svg", "b.svg"]);
        assert_eq!(missing, vec![tmp.path().join("b.svg")]);
    }
}
