//! Non-fatal anomalies found while decoding a text mesh.

use std::fmt;

use crate::mesh::Attrib;

/// A tolerated anomaly and the 1-based line it was found on.
///
/// Line 0 is used for anomalies that concern the mesh as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

/// What was tolerated.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// A declaration names an attribute that does not exist.
    UnknownAttrib(String),
    /// A declaration element count is missing or outside `1..=4`.
    InvalidCount(String),
    /// A declaration names a type that does not exist.
    UnknownType(String),
    /// A declaration carries a flag other than `normalised` or `asInt`.
    UnknownFlag(String),
    /// A second declaration of an attribute; the first one is kept.
    DuplicateAttrib(Attrib),
    /// An `index=` declaration names a type other than `uint16`.
    UnsupportedIndexType(String),
    /// A data line for an attribute missing from the declaration.
    UndeclaredAttrib(Attrib),
    /// Values left over after the last whole vertex on a data line.
    PartialVertex { attrib: Attrib, leftover: usize },
    /// Indices left over after the last whole triangle on an index line.
    PartialTriangle { leftover: usize },
    /// A value that could not be parsed completely.
    MalformedNumber(String),
    /// An index value that does not fit into 16 bits.
    IndexOutOfRange(u64),
    /// An attribute filled a different number of vertices than the mesh has.
    VertexCountMismatch {
        attrib: Attrib,
        filled: usize,
        vertex_count: usize,
    },
    /// A triangle references a vertex past the end of the vertex buffer.
    IndexPastEnd { index: u16, vertex_count: usize },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAttrib(name) => write!(f, "unknown attribute '{name}'"),
            Self::InvalidCount(token) => write!(f, "invalid element count '{token}'"),
            Self::UnknownType(token) => write!(f, "unknown attribute type '{token}'"),
            Self::UnknownFlag(token) => write!(f, "unknown attribute flag '{token}'"),
            Self::DuplicateAttrib(attrib) => {
                write!(f, "attribute {attrib} declared again, keeping the first declaration")
            }
            Self::UnsupportedIndexType(token) => {
                write!(f, "index type '{token}' is not supported, indices are uint16")
            }
            Self::UndeclaredAttrib(attrib) => {
                write!(f, "data for undeclared attribute {attrib} ignored")
            }
            Self::PartialVertex { attrib, leftover } => {
                write!(f, "{leftover} trailing {attrib} value(s) do not form a vertex")
            }
            Self::PartialTriangle { leftover } => {
                write!(f, "{leftover} trailing index value(s) do not form a triangle")
            }
            Self::MalformedNumber(token) => write!(f, "malformed number '{token}'"),
            Self::IndexOutOfRange(value) => {
                write!(f, "index {value} does not fit into 16 bits, using 0")
            }
            Self::VertexCountMismatch {
                attrib,
                filled,
                vertex_count,
            } => write!(
                f,
                "attribute {attrib} has {filled} vertices, mesh has {vertex_count}"
            ),
            Self::IndexPastEnd {
                index,
                vertex_count,
            } => write!(f, "index {index} is past the last of {vertex_count} vertices"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "line {}: {}", self.line, self.kind)
        }
    }
}
