//! Error types for text mesh loading and saving.

use std::path::PathBuf;

use crate::mesh::MeshError;

/// Errors that can occur while reading or writing a text mesh.
///
/// Malformed content is never an error; see
/// [`Diagnostic`](super::Diagnostic).
#[derive(Debug)]
pub enum TextMeshError {
    /// Reading from or writing to a stream failed.
    Io(std::io::Error),
    /// Opening, reading or replacing a file failed.
    File {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
    /// The mesh parts handed to the encoder are inconsistent.
    Mesh(MeshError),
}

impl TextMeshError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for TextMeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "text mesh IO error: {e}"),
            Self::File { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Mesh(e) => write!(f, "invalid mesh: {e}"),
        }
    }
}

impl std::error::Error for TextMeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::File { source, .. } => Some(source),
            Self::Mesh(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for TextMeshError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<MeshError> for TextMeshError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}
