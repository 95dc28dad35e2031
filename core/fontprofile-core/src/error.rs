//! Error types for fontprofile-core (made by FontLab https://www.fontlab.com/)

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfileError>;

/// Everything that can stop a profile from being generated.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A required input is missing, unresolvable, or points at the wrong kind of path.
    #[error("{0}")]
    Configuration(String),

    /// Discovery finished without finding a single `.ttf` or `.otf` file.
    #[error("no .ttf or .otf fonts found to include in the profile (searched {})", .0.display())]
    NoFontsFound(PathBuf),

    /// Walking the tree, reading a font, or writing the profile failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProfileError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Stable process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 1,
            Self::NoFontsFound(_) => 2,
            Self::Io { .. } => 3,
        }
    }
}

impl From<walkdir::Error> for ProfileError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
        Self::Io { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            ProfileError::config("bad").exit_code(),
            ProfileError::NoFontsFound(PathBuf::from("fonts")).exit_code(),
            ProfileError::io("out", io::Error::from(io::ErrorKind::PermissionDenied)).exit_code(),
        ];

        assert_eq!(codes, [1, 2, 3]);
    }

    #[test]
    fn io_error_mentions_path() {
        let err = ProfileError::io("/fonts/A.ttf", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("/fonts/A.ttf: "));
    }
}
