//! Shared helpers for unit tests.

use crate::dialog::{Dialog, Question};
use std::cell::RefCell;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, Once, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Serializes tests that read or modify `SEMABE_ASSUME_YES`.
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Dialog that replays a fixed answer and records what it was shown.
pub struct Scripted {
    pub answer: Option<bool>,
    pub questions: RefCell<Vec<String>>,
    pub infos: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<String>>,
}

impl Scripted {
    pub fn new(answer: Option<bool>) -> Scripted {
        Scripted {
            answer,
            questions: RefCell::new(Vec::new()),
            infos: RefCell::new(Vec::new()),
            errors: RefCell::new(Vec::new()),
        }
    }

    pub fn was_asked(&self) -> bool {
        !self.questions.borrow().is_empty()
    }
}

impl Dialog for Scripted {
    fn confirm(&self, question: &Question<'_>) -> Option<bool> {
        self.questions.borrow_mut().push(question.text.clone());
        self.answer
    }

    fn info(&self, _title: &str, text: &str) {
        self.infos.borrow_mut().push(text.to_string());
    }

    fn error(&self, _title: &str, text: &str) {
        self.errors.borrow_mut().push(text.to_string());
    }
}

struct Capture(Mutex<Vec<(log::Level, String)>>);

static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

impl log::Log for Capture {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// Routes every log record, at every level, into a shared buffer.
/// Records from concurrent tests interleave; filter on a unique message.
pub fn capture_logs() -> &'static Mutex<Vec<(log::Level, String)>> {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if log::set_logger(&CAPTURE).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    &CAPTURE.0
}

/// Writes an executable `/bin/sh` script called `name` into `dir`.
pub fn fake_program(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
