//! Confirmation and notification UI.
//!
//! Dialogs are best effort: a missing UI program or a failed spawn never
//! changes the outcome of an operation, it only changes how the user is asked.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

/// A yes/no question.
#[derive(Debug, Clone)]
pub struct Question<'a> {
    pub title: &'a str,
    pub text: String,
    pub ok_label: &'a str,
    pub cancel_label: &'a str,
}

pub trait Dialog {
    /// `Some(answer)` when the user was asked, `None` when no UI is available.
    fn confirm(&self, question: &Question<'_>) -> Option<bool>;
    fn info(&self, title: &str, text: &str);
    fn error(&self, title: &str, text: &str);
    /// Non-blocking "working" indicator. Dropping the handle dismisses it.
    fn progress(&self, _title: &str, _text: &str) -> Progress {
        Progress::none()
    }
}

/// Handle to a fire-and-forget progress window.
pub struct Progress {
    child: Option<Child>,
}

impl Progress {
    pub fn none() -> Progress {
        Progress { child: None }
    }

    pub fn is_shown(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            // terminate without waiting for acknowledgement
            let _ = child.kill();
        }
    }
}

/// Locates `cmd` on `PATH`.
pub fn find_program(cmd: &str) -> Option<PathBuf> {
    use std::os::unix::fs::PermissionsExt;
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(cmd))
        .find(|candidate| {
            candidate.is_file()
                && std::fs::metadata(candidate)
                    .map(|meta| meta.permissions().mode() & 0o111 != 0)
                    .unwrap_or(false)
        })
}

pub struct Zenity {
    program: PathBuf,
}

impl Zenity {
    pub fn new(program: PathBuf) -> Zenity {
        Zenity { program }
    }

    pub fn detect() -> Option<Zenity> {
        find_program("zenity").map(Zenity::new)
    }

    /// zenity renders `--text` as Pango markup.
    fn text_arg(text: &str) -> String {
        format!("--text={}", markup_escape(text))
    }

    fn run(&self, args: &[String]) -> Option<bool> {
        match Command::new(&self.program).args(args).status() {
            Ok(status) => Some(status.success()),
            Err(e) => {
                log::warn!("Could not run {}: {}", self.program.display(), e);
                None
            }
        }
    }
}

impl Dialog for Zenity {
    fn confirm(&self, question: &Question<'_>) -> Option<bool> {
        self.run(&[
            "--question".into(),
            "--width=450".into(),
            format!("--title={}", question.title),
            Zenity::text_arg(&question.text),
            format!("--ok-label={}", question.ok_label),
            format!("--cancel-label={}", question.cancel_label),
        ])
    }

    fn info(&self, title: &str, text: &str) {
        self.run(&[
            "--info".into(),
            "--width=450".into(),
            "--no-wrap".into(),
            format!("--title={}", title),
            Zenity::text_arg(text),
        ]);
    }

    fn error(&self, title: &str, text: &str) {
        self.run(&[
            "--error".into(),
            "--width=450".into(),
            "--no-wrap".into(),
            format!("--title={}", title),
            Zenity::text_arg(text),
        ]);
    }

    fn progress(&self, title: &str, text: &str) -> Progress {
        let spawned = Command::new(&self.program)
            .args([
                "--info".to_string(),
                "--width=450".to_string(),
                "--no-wrap".to_string(),
                format!("--title={}", title),
                Zenity::text_arg(text),
            ])
            .stdin(Stdio::null())
            .spawn();
        match spawned {
            Ok(mut child) => {
                // give the window a moment to map
                std::thread::sleep(Duration::from_millis(100));
                if let Ok(Some(_)) = child.try_wait() {
                    return Progress::none();
                }
                Progress { child: Some(child) }
            }
            Err(e) => {
                log::info!("Could not show installing dialog: {}", e);
                Progress::none()
            }
        }
    }
}

/// Escapes the characters Pango markup treats specially.
pub fn markup_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// No UI at all: questions are unanswerable. Callers print their own
/// results, so notifications only reach the debug log.
pub struct Headless;

impl Dialog for Headless {
    fn confirm(&self, _question: &Question<'_>) -> Option<bool> {
        None
    }

    fn info(&self, _title: &str, text: &str) {
        log::debug!("{}", text);
    }

    fn error(&self, _title: &str, text: &str) {
        log::debug!("{}", text);
    }
}

/// Prompts on stdin/stdout.
pub struct Terminal;

impl Dialog for Terminal {
    fn confirm(&self, question: &Question<'_>) -> Option<bool> {
        println!("{}\n", question.title);
        println!("{}", question.text);
        print!("{}? [y/N]: ", question.ok_label.trim());
        std::io::stdout().flush().ok();

        let mut confirmation = String::new();
        if std::io::stdin().lock().read_line(&mut confirmation).is_err() {
            return None;
        }
        Some(answer_is_yes(&confirmation))
    }

    fn info(&self, _title: &str, text: &str) {
        println!("{}", text);
    }

    /// The binaries already print errors to the console.
    fn error(&self, _title: &str, text: &str) {
        log::debug!("{}", text);
    }
}

fn answer_is_yes(line: &str) -> bool {
    let answer = line.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{capture_logs, fake_program};

    #[test]
    fn answers() {
        assert!(answer_is_yes("Y\n"));
        assert!(answer_is_yes("  yes "));
        assert!(!answer_is_yes("\n"));
        assert!(!answer_is_yes("nope"));
    }

    #[test]
    fn headless_cannot_confirm() {
        let q = Question {
            title: "t",
            text: "x".into(),
            ok_label: "OK",
            cancel_label: "Cancel",
        };
        assert_eq!(Headless.confirm(&q), None);
        assert!(!Headless.progress("t", "x").is_shown());
    }

    #[test]
    fn missing_program_is_none() {
        assert!(find_program("definitely-not-a-real-program-semabe").is_none());
    }

    #[test]
    fn zenity_with_bad_binary_fails_open() {
        let z = Zenity::new(PathBuf::from("/nonexistent/zenity"));
        let q = Question {
            title: "t",
            text: "x".into(),
            ok_label: "OK",
            cancel_label: "Cancel",
        };
        assert_eq!(z.confirm(&q), None);
        assert!(!z.progress("t", "x").is_shown());
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(markup_escape("Mint & <Y>"), "Mint &amp; &lt;Y&gt;");
        assert_eq!(markup_escape("plain"), "plain");
    }

    #[test]
    fn zenity_receives_escaped_text() {
        let tmp = tempfile::tempdir().unwrap();
        let args = tmp.path().join("args");
        let program = fake_program(
            tmp.path(),
            "zenity",
            &format!("printf '%s\\n' \"$@\" > '{}'", args.display()),
        );
        let q = Question {
            title: "t",
            text: "Replacing icons in theme:\n\nA&B <dark>".into(),
            ok_label: "Replace",
            cancel_label: "Cancel",
        };

        assert_eq!(Zenity::new(program).confirm(&q), Some(true));

        let recorded = std::fs::read_to_string(&args).unwrap();
        assert!(recorded.contains("A&amp;B &lt;dark&gt;"), "{recorded}");
        assert!(!recorded.contains("<dark>"));
    }

    #[test]
    fn headless_error_stays_below_default_level() {
        let records = capture_logs();
        Headless.error("t", "headless-error-marker");
        Headless.info("t", "headless-info-marker");

        let seen = records.lock().unwrap_or_else(|p| p.into_inner());
        let marked: Vec<_> = seen
            .iter()
            .filter(|(_, msg)| msg.starts_with("headless-"))
            .collect();
        assert_eq!(marked.len(), 2);
        assert!(marked.iter().all(|(level, _)| *level > log::Level::Info));
    }

    #[test]
    fn terminal_error_only_logs() {
        let records = capture_logs();
        Terminal.error("t", "terminal-error-marker");

        let seen = records.lock().unwrap_or_else(|p| p.into_inner());
        assert!(seen
            .iter()
            .any(|(level, msg)| msg == "terminal-error-marker" && *level == log::Level::Debug));
    }
}
