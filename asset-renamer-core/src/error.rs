use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a rename run.
///
/// Everything except `Io` is detected before the first rename is performed.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Collision: multiple sources map to the same destination:\n  {}", format_paths(.destinations))]
    Collision { destinations: Vec<PathBuf> },

    #[error("Refusing to overwrite existing file: {}", .0.display())]
    Overwrite(PathBuf),

    #[error(
        "Temporary file already exists: {} (left over from an interrupted run?)",
        .0.display()
    )]
    TemporaryExists(PathBuf),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl RenameError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// True for errors raised by plan validation, before anything was touched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Collision { .. } | Self::Overwrite(_) | Self::TemporaryExists(_)
        )
    }

    /// True for errors caused by a bad root argument.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::NotADirectory(_))
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n  ")
}

pub type RenameResult<T> = std::result::Result<T, RenameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message_lists_every_destination() {
        let err = RenameError::Collision {
            destinations: vec![PathBuf::from("a/X.MID"), PathBuf::from("a/Y.MID")],
        };
        let message = err.to_string();
        assert!(message.contains("a/X.MID"));
        assert!(message.contains("a/Y.MID"));
        assert!(err.is_rejection());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_path_not_found_is_invalid_input() {
        let err = RenameError::PathNotFound(PathBuf::from("missing"));
        assert_eq!(err.to_string(), "Path not found: missing");
        assert!(err.is_invalid_input());
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = RenameError::io(
            "Failed to rename a -> b",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to rename a -> b");
        assert!(std::error::Error::source(&err).is_some());
    }
}
