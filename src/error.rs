use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing file(s):\n{}", join_paths(.0))]
    MissingArchives(Vec<PathBuf>),

    #[error("File not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    #[error("Cannot read archive {}: {source}", .path.display())]
    CorruptArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source directory not found:\n{}", .0.display())]
    SourceDirNotFound(PathBuf),

    #[error("Icon theme '{0}' not found locally or in system,\nor contains no required SVG files.")]
    ThemeNotFound(String),

    #[error("No matching files found in:\n{}", .0.display())]
    NothingReplaced(PathBuf),

    #[error("No backup files (.semabe.bak) found to restore in:\n{}", .0.display())]
    NothingRestored(PathBuf),

    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Invalid {kind} name: '{value}'")]
    InvalidName { kind: &'static str, value: String },

    #[error("HOME directory could not be determined")]
    NoHomeDir,

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit status for this failure. Cancellation never reaches here.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
