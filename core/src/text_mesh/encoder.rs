//! Internal text mesh encoding logic.
//!
//! Layout of the produced text:
//!
//! ```text
//! position=3 float
//! color0=4 uint8 normalised
//!
//! position 0 0 0 1 0 0 0 1 0
//! color0 FF0000FF 00FF00FF 0000FFFF
//! index=uint16
//! index 0 1 2
//! ```

use crate::mesh::{AttribDesc, AttribValues, INDICES_PER_TRIANGLE, MeshData, VertexDecl};

use super::lines::INDEX_TOKEN;
use super::numbers;
use super::options::EncodeOptions;

/// Internal encoding context that accumulates the output text.
pub(crate) struct EncodeContext<'a> {
    options: &'a EncodeOptions,
    out: String,
    /// Reused buffer holding the text of one vertex or triangle.
    group: String,
}

impl<'a> EncodeContext<'a> {
    pub fn new(options: &'a EncodeOptions) -> Self {
        Self {
            options,
            out: String::new(),
            group: String::new(),
        }
    }

    /// Write one declaration line per attribute followed by a blank line.
    pub fn write_decl(&mut self, decl: &VertexDecl) {
        for desc in decl.attributes() {
            let format = &desc.format;
            self.out.push_str(desc.attrib.name());
            self.out.push('=');
            self.out.push_str(&format.count.to_string());
            self.out.push(' ');
            self.out.push_str(format.ty.name());
            if format.normalized {
                self.out.push_str(" normalised");
            }
            if format.as_int {
                self.out.push_str(" asInt");
            }
            self.end_line();
        }
        self.end_line();
    }

    /// Write one data block per attribute, in declaration order.
    pub fn write_vertices(&mut self, mesh: &MeshData) {
        let stride = mesh.decl().stride();
        if stride == 0 {
            return;
        }

        for desc in mesh.decl().attributes() {
            let mut line = WrappedLine::new(desc.attrib.name());
            let size = desc.format.size();

            for record in mesh.vertex_data().chunks_exact(stride) {
                let bytes = &record[desc.offset..desc.offset + size];
                self.group.clear();
                format_group(&mut self.group, desc, &AttribValues::from_bytes(&desc.format, bytes));
                line.push(&mut self.out, &self.group, self.options);
            }

            line.finish(&mut self.out, self.options);
        }
    }

    /// Write the index declaration and the triangles, if there are any.
    pub fn write_indices(&mut self, indices: &[u16]) {
        if indices.is_empty() {
            return;
        }

        self.out.push_str(INDEX_TOKEN);
        self.out.push_str("=uint16");
        self.end_line();

        let mut line = WrappedLine::new(INDEX_TOKEN);
        for triangle in indices.chunks(INDICES_PER_TRIANGLE) {
            self.group.clear();
            for (i, index) in triangle.iter().enumerate() {
                if i > 0 {
                    self.group.push(' ');
                }
                self.group.push_str(&index.to_string());
            }
            line.push(&mut self.out, &self.group, self.options);
        }
        line.finish(&mut self.out, self.options);
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn end_line(&mut self) {
        self.out.push_str(self.options.line_ending.as_str());
    }
}

/// A data line that is re-prefixed with its attribute name after wrapping.
///
/// Groups (one vertex or one triangle) are never split across lines, so a
/// reader that groups values per line sees whole groups only.
struct WrappedLine<'p> {
    prefix: &'p str,
    open: bool,
    value_chars: usize,
}

impl<'p> WrappedLine<'p> {
    fn new(prefix: &'p str) -> Self {
        Self {
            prefix,
            open: false,
            value_chars: 0,
        }
    }

    fn push(&mut self, out: &mut String, group: &str, options: &EncodeOptions) {
        if !self.open {
            out.push_str(self.prefix);
            self.open = true;
            self.value_chars = 0;
        }
        out.push(' ');
        out.push_str(group);
        self.value_chars += group.len();

        if self.value_chars > options.wrap_width {
            out.push_str(options.line_ending.as_str());
            self.open = false;
        }
    }

    fn finish(self, out: &mut String, options: &EncodeOptions) {
        if self.open {
            out.push_str(options.line_ending.as_str());
        }
    }
}

/// Format one vertex worth of an attribute.
///
/// `uint8` elements are concatenated into one token, other types are space
/// separated.
fn format_group(out: &mut String, desc: &AttribDesc, values: &AttribValues) {
    let digits = desc.format.ty.hex_digits().unwrap_or_default();
    match values {
        AttribValues::Uint8 { values, count } => {
            for &value in &values[..*count] {
                numbers::write_hex(out, value as u32, digits);
            }
        }
        AttribValues::Uint16 { values, count } => {
            for (i, &value) in values[..*count].iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                numbers::write_hex(out, value as u32, digits);
            }
        }
        AttribValues::Float { values, count } => {
            for (i, &value) in values[..*count].iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                numbers::write_float(out, value);
            }
        }
    }
}
