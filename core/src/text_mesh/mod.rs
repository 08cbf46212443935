//! Human-readable text mesh format.
//!
//! A text mesh is a line-oriented description of a vertex declaration,
//! per-attribute vertex data and triangle indices, meant to be edited by
//! hand and kept under version control.
//!
//! # Format
//!
//! ```text
//! # lines that are not recognized are ignored
//! position=3 float
//! color0=4 uint8 normalised
//!
//! position 0 0 0  1 0 0
//! position 0 1 0
//! color0 FF0000FF 00FF00FF 0000FFFF
//! index=uint16
//! index 0 1 2
//! ```
//!
//! - A line containing `=` declares an attribute:
//!   `<name>=<count> <type> [normalised] [asInt]`. Types are `uint8`,
//!   `uint10`, `int16`, `half` and `float`; flags are case-insensitive and
//!   `normalized` is accepted too.
//! - `<name> <values...>` supplies vertex data. Each complete group of
//!   `count` values fills the next vertex of that attribute. Integer-backed
//!   types are hex (2 digits per `uint8` element, 4 for the 16-bit types,
//!   groups may be concatenated), floats are decimal or `0x` followed by
//!   the raw IEEE 754 bits.
//! - `index <values...>` supplies decimal triangle indices, three per
//!   triangle.
//!
//! # Tolerance
//!
//! Decoding never fails on content. Unknown lines are skipped and anomalies
//! (bad numbers, partial groups, undeclared attributes...) are recovered
//! from and reported as [`Diagnostic`]s.
//!
//! # Example
//!
//! ```
//! use gfx_core::mesh::Attrib;
//! use gfx_core::text_mesh::{decode, encode, EncodeOptions};
//!
//! let mesh = decode("position=3 float\r\nposition 1 2 3\r\n");
//! assert_eq!(mesh.vertex_count(), 1);
//! assert_eq!(mesh.decl().stride(), 12);
//!
//! let text = encode(&mesh, &EncodeOptions::default());
//! assert_eq!(decode(&text), mesh);
//! ```

mod decoder;
mod diagnostic;
mod encoder;
mod error;
mod lines;
mod numbers;
mod options;
#[cfg(test)]
mod tests;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::TextMeshError;
pub use options::{DEFAULT_WRAP_WIDTH, EncodeOptions, LineEnding};

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::mesh::{MeshData, VertexDecl};

use decoder::DecodeContext;
use encoder::EncodeContext;

/// Decode a text mesh, discarding diagnostics.
pub fn decode(text: &str) -> MeshData {
    decode_with_diagnostics(text).0
}

/// Decode a text mesh and return the anomalies that were tolerated.
pub fn decode_with_diagnostics(text: &str) -> (MeshData, Vec<Diagnostic>) {
    let mut ctx = DecodeContext::new(text);

    let decl = ctx.build_decl();
    let (vertex_data, vertex_count) = ctx.load_vertices(&decl);
    let indices = ctx.load_indices(vertex_count);
    let diagnostics = ctx.into_diagnostics();

    log::debug!(
        "decoded text mesh: {} vertices, stride {}, {} triangles, {} diagnostics",
        vertex_count,
        decl.stride(),
        indices.len() / 3,
        diagnostics.len()
    );

    (MeshData::from_decoded(decl, vertex_data, indices), diagnostics)
}

/// Read and decode a text mesh from a stream.
///
/// Bytes that are not valid UTF-8 are replaced, so lines containing them
/// are ignored rather than failing the read.
pub fn read_text_mesh(mut reader: impl Read) -> Result<MeshData, TextMeshError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(decode(&String::from_utf8_lossy(&bytes)))
}

/// Load a text mesh file.
pub fn load_text_mesh(path: impl AsRef<Path>) -> Result<MeshData, TextMeshError> {
    load_text_mesh_with_diagnostics(path).map(|(mesh, _)| mesh)
}

/// Load a text mesh file and return the anomalies that were tolerated.
pub fn load_text_mesh_with_diagnostics(
    path: impl AsRef<Path>,
) -> Result<(MeshData, Vec<Diagnostic>), TextMeshError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| TextMeshError::file(path, e))?;
    log::debug!("loading text mesh {}", path.display());
    Ok(decode_with_diagnostics(&String::from_utf8_lossy(&bytes)))
}

/// Encode a mesh record as text.
pub fn encode(mesh: &MeshData, options: &EncodeOptions) -> String {
    let mut ctx = EncodeContext::new(options);
    ctx.write_decl(mesh.decl());
    ctx.write_vertices(mesh);
    ctx.write_indices(mesh.indices());
    ctx.finish()
}

/// Encode a declaration with raw vertex bytes and indices.
///
/// The parts are validated the same way [`MeshData::new`] validates them.
pub fn encode_parts(
    decl: &VertexDecl,
    vertex_data: &[u8],
    indices: &[u16],
    options: &EncodeOptions,
) -> Result<String, TextMeshError> {
    let mesh = MeshData::new(decl.clone(), vertex_data.to_vec(), indices.to_vec())?;
    Ok(encode(&mesh, options))
}

/// Encode a mesh record into a stream.
pub fn write_text_mesh(
    mesh: &MeshData,
    mut writer: impl Write,
    options: &EncodeOptions,
) -> Result<(), TextMeshError> {
    writer.write_all(encode(mesh, options).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Save a mesh record to a text mesh file.
///
/// The text is written to a temporary file next to `path` and then moved
/// over it, so a failed save leaves any existing file untouched.
pub fn save_text_mesh(
    mesh: &MeshData,
    path: impl AsRef<Path>,
    options: &EncodeOptions,
) -> Result<(), TextMeshError> {
    let path = path.as_ref();
    let text = encode(mesh, options);
    let temp = temp_path(path);

    if let Err(e) = std::fs::write(&temp, text.as_bytes()) {
        let _ = std::fs::remove_file(&temp);
        return Err(TextMeshError::file(&temp, e));
    }
    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(TextMeshError::file(path, e));
    }

    log::debug!(
        "saved text mesh {} ({} vertices, {} triangles)",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
