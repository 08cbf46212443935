//! Error types for mesh construction.

use std::fmt;

use super::decl::{Attrib, MAX_ATTRIB_COUNT};

/// Errors that can occur while building a declaration or mesh record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// An attribute element count is outside `1..=4`.
    InvalidCount {
        /// The offending attribute.
        attrib: Attrib,
        /// The requested element count.
        count: u8,
    },
    /// The attribute is already part of the declaration.
    DuplicateAttrib(Attrib),
    /// Vertex data is not a whole number of vertex records.
    VertexDataSize {
        /// Length of the vertex data in bytes.
        len: usize,
        /// Declaration stride in bytes.
        stride: usize,
    },
    /// Index data is not a whole number of triangles.
    PartialTriangle {
        /// Number of indices supplied.
        len: usize,
    },
    /// Raw index bytes have an odd length.
    IndexDataSize(usize),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCount { attrib, count } => write!(
                f,
                "attribute {attrib} has {count} elements, expected 1 to {MAX_ATTRIB_COUNT}"
            ),
            Self::DuplicateAttrib(attrib) => write!(f, "attribute {attrib} declared twice"),
            Self::VertexDataSize { len, stride } => write!(
                f,
                "vertex data of {len} bytes is not a multiple of stride {stride}"
            ),
            Self::PartialTriangle { len } => {
                write!(f, "{len} indices do not form whole triangles")
            }
            Self::IndexDataSize(len) => {
                write!(f, "index data of {len} bytes is not a multiple of 2")
            }
        }
    }
}

impl std::error::Error for MeshError {}
