//! Internal text mesh decoding logic.
//!
//! The [`DecodeContext`] holds the classified lines of one input and the
//! diagnostics collected so far. Decoding happens in three steps over the
//! classified lines: build the declaration, fill vertex data per attribute,
//! then collect triangles.

use crate::mesh::{
    Attrib, AttribFormat, AttribType, AttribValues, INDICES_PER_TRIANGLE, MAX_ATTRIB_COUNT,
    VertexDecl,
};

use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::lines::{self, INDEX_TOKEN, Line, NumberedLine};
use super::numbers::{self, IndexValue};

/// Line number used for anomalies that concern the whole mesh.
const WHOLE_MESH: usize = 0;

/// Collects diagnostics and forwards them to the log.
#[derive(Debug, Default)]
struct Reporter {
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    fn report(&mut self, line: usize, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { line, kind };
        log::warn!("text mesh: {diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// One parsed element of a data line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Element {
    Int(u32),
    Float(f32),
}

/// Internal decoding context that holds the classified input.
pub(crate) struct DecodeContext<'a> {
    lines: Vec<NumberedLine<'a>>,
    reporter: Reporter,
}

impl<'a> DecodeContext<'a> {
    /// Classify every line of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: lines::classify_all(text),
            reporter: Reporter::default(),
        }
    }

    /// Build and close the vertex declaration from all declaration lines.
    ///
    /// The first declaration of an attribute wins.
    pub fn build_decl(&mut self) -> VertexDecl {
        let mut builder = VertexDecl::builder();

        for &NumberedLine { number, line } in &self.lines {
            let Line::Declaration { name, definition } = line else {
                continue;
            };

            if name == INDEX_TOKEN {
                check_index_decl(definition, number, &mut self.reporter);
                continue;
            }

            let Some(attrib) = Attrib::from_name(name) else {
                // Only names that look like attributes are worth reporting.
                if !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    self.reporter
                        .report(number, DiagnosticKind::UnknownAttrib(name.to_string()));
                }
                continue;
            };

            let Some(format) = parse_format(definition, number, &mut self.reporter) else {
                continue;
            };

            // Counts were checked by `parse_format`, so only a duplicate can fail.
            if builder.add(attrib, format).is_err() {
                self.reporter
                    .report(number, DiagnosticKind::DuplicateAttrib(attrib));
            }
        }

        builder.end()
    }

    /// Fill the vertex buffer from the attribute data lines.
    ///
    /// Each attribute fills vertex slots in file order, independently of the
    /// other attributes. Returns the vertex bytes and the vertex count.
    pub fn load_vertices(&mut self, decl: &VertexDecl) -> (Vec<u8>, usize) {
        let attributes = decl.attributes();
        let mut scratch: Vec<Vec<u8>> = vec![Vec::new(); attributes.len()];

        for &NumberedLine { number, line } in &self.lines {
            let Line::AttribData { attrib, values } = line else {
                continue;
            };
            let Some(slot) = attributes.iter().position(|desc| desc.attrib == attrib) else {
                self.reporter
                    .report(number, DiagnosticKind::UndeclaredAttrib(attrib));
                continue;
            };

            let format = attributes[slot].format;
            let elements = parse_elements(format.ty, values, number, &mut self.reporter);
            let mut groups = elements.chunks_exact(format.count as usize);
            for group in &mut groups {
                pack_group(&format, group).write_bytes(&mut scratch[slot]);
            }
            if !groups.remainder().is_empty() {
                self.reporter.report(
                    number,
                    DiagnosticKind::PartialVertex {
                        attrib,
                        leftover: groups.remainder().len(),
                    },
                );
            }
        }

        let filled: Vec<usize> = attributes
            .iter()
            .zip(&scratch)
            .map(|(desc, bytes)| bytes.len() / desc.format.size())
            .collect();

        let vertex_count = match attributes
            .iter()
            .position(|desc| desc.attrib == Attrib::Position)
        {
            Some(slot) => filled[slot],
            None => filled.iter().copied().max().unwrap_or(0),
        };

        let stride = decl.stride();
        let mut vertex_data = vec![0u8; vertex_count * stride];

        for ((desc, bytes), &count) in attributes.iter().zip(&scratch).zip(&filled) {
            if count != vertex_count {
                self.reporter.report(
                    WHOLE_MESH,
                    DiagnosticKind::VertexCountMismatch {
                        attrib: desc.attrib,
                        filled: count,
                        vertex_count,
                    },
                );
            }

            let size = desc.format.size();
            for (vertex, src) in bytes.chunks_exact(size).take(vertex_count).enumerate() {
                let start = vertex * stride + desc.offset;
                vertex_data[start..start + size].copy_from_slice(src);
            }
        }

        (vertex_data, vertex_count)
    }

    /// Collect triangles from the index data lines.
    ///
    /// Values are grouped in threes per line; a trailing partial group is
    /// dropped.
    pub fn load_indices(&mut self, vertex_count: usize) -> Vec<u16> {
        let mut indices = Vec::new();

        for &NumberedLine { number, line } in &self.lines {
            let Line::IndexData { values } = line else {
                continue;
            };

            let parsed: Vec<u16> = values
                .split_whitespace()
                .map(|token| match numbers::parse_index(token) {
                    IndexValue::Valid(index) => index,
                    IndexValue::Malformed(index) => {
                        self.reporter
                            .report(number, DiagnosticKind::MalformedNumber(token.to_string()));
                        index
                    }
                    IndexValue::OutOfRange(value) => {
                        self.reporter
                            .report(number, DiagnosticKind::IndexOutOfRange(value));
                        0
                    }
                })
                .collect();

            let mut triangles = parsed.chunks_exact(INDICES_PER_TRIANGLE);
            for triangle in &mut triangles {
                for &index in triangle {
                    if index as usize >= vertex_count {
                        self.reporter.report(
                            number,
                            DiagnosticKind::IndexPastEnd {
                                index,
                                vertex_count,
                            },
                        );
                    }
                }
                indices.extend_from_slice(triangle);
            }
            if !triangles.remainder().is_empty() {
                self.reporter.report(
                    number,
                    DiagnosticKind::PartialTriangle {
                        leftover: triangles.remainder().len(),
                    },
                );
            }
        }

        indices
    }

    /// Consume the context, returning the collected diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.reporter.diagnostics
    }
}

/// Parse `<count> <type> [flags...]` from the right side of a declaration.
fn parse_format(definition: &str, line: usize, reporter: &mut Reporter) -> Option<AttribFormat> {
    let mut tokens = definition.split_whitespace();

    let count_token = tokens.next().unwrap_or_default();
    let count = match count_token.as_bytes() {
        [digit @ b'1'..=b'9'] if digit - b'0' <= MAX_ATTRIB_COUNT => digit - b'0',
        _ => {
            reporter.report(line, DiagnosticKind::InvalidCount(count_token.to_string()));
            return None;
        }
    };

    let type_token = tokens.next().unwrap_or_default();
    let Some(ty) = AttribType::from_name(type_token) else {
        reporter.report(line, DiagnosticKind::UnknownType(type_token.to_string()));
        return None;
    };

    let mut format = AttribFormat::new(count, ty);
    for flag in tokens {
        match flag.to_ascii_lowercase().as_str() {
            "normalised" | "normalized" => format.normalized = true,
            "asint" => format.as_int = true,
            _ => reporter.report(line, DiagnosticKind::UnknownFlag(flag.to_string())),
        }
    }

    Some(format)
}

/// Indices are always `uint16`; anything else declared is reported and ignored.
fn check_index_decl(definition: &str, line: usize, reporter: &mut Reporter) {
    if let Some(token) = definition.split_whitespace().next() {
        if !token.eq_ignore_ascii_case("uint16") {
            reporter.report(
                line,
                DiagnosticKind::UnsupportedIndexType(token.to_string()),
            );
        }
    }
}

/// Parse the values of one data line: hex groups for integer-backed types,
/// decimal or raw bits for floats.
fn parse_elements(
    ty: AttribType,
    values: &str,
    line: usize,
    reporter: &mut Reporter,
) -> Vec<Element> {
    let mut elements = Vec::new();

    for token in values.split_whitespace() {
        match ty.hex_digits() {
            Some(digits) => {
                let mut malformed = false;
                for group in numbers::hex_groups(token, digits) {
                    let parsed = numbers::parse_hex_group(group);
                    malformed |= parsed.malformed;
                    elements.push(Element::Int(parsed.value));
                }
                if malformed {
                    reporter.report(line, DiagnosticKind::MalformedNumber(token.to_string()));
                }
            }
            None => {
                let parsed = numbers::parse_decimal(token);
                if parsed.malformed {
                    reporter.report(line, DiagnosticKind::MalformedNumber(token.to_string()));
                }
                elements.push(Element::Float(parsed.value));
            }
        }
    }

    elements
}

/// Pack one vertex worth of elements.
fn pack_group(format: &AttribFormat, group: &[Element]) -> AttribValues {
    let mut values = AttribValues::zeroed(format.ty);
    for element in group {
        match *element {
            Element::Int(value) => values.push_int(value),
            Element::Float(value) => values.push_float(value),
        };
    }
    values
}
