//! CPU-side mesh record.
//!
//! A [`MeshData`] owns a closed [`VertexDecl`], an interleaved vertex buffer
//! and a triangle-list index buffer of 16-bit indices.

use super::decl::{Attrib, VertexDecl};
use super::error::MeshError;
use super::values::AttribValues;

/// Number of indices per triangle.
pub const INDICES_PER_TRIANGLE: usize = 3;

/// A mesh record: declaration, vertex bytes and triangle indices.
///
/// The record is always consistent: the vertex buffer is a whole number of
/// vertex records and the index buffer a whole number of triangles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeshData {
    decl: VertexDecl,
    vertex_data: Vec<u8>,
    indices: Vec<u16>,
}

impl MeshData {
    /// Create a mesh record, validating buffer sizes against the declaration.
    pub fn new(
        decl: VertexDecl,
        vertex_data: Vec<u8>,
        indices: Vec<u16>,
    ) -> Result<Self, MeshError> {
        let stride = decl.stride();
        let whole_vertices = if stride == 0 {
            vertex_data.is_empty()
        } else {
            vertex_data.len() % stride == 0
        };
        if !whole_vertices {
            return Err(MeshError::VertexDataSize {
                len: vertex_data.len(),
                stride,
            });
        }
        if indices.len() % INDICES_PER_TRIANGLE != 0 {
            return Err(MeshError::PartialTriangle { len: indices.len() });
        }

        Ok(Self {
            decl,
            vertex_data,
            indices,
        })
    }

    /// Create a mesh record from buffers the decoder sized itself.
    pub(crate) fn from_decoded(decl: VertexDecl, vertex_data: Vec<u8>, indices: Vec<u16>) -> Self {
        debug_assert!(decl.stride() == 0 || vertex_data.len() % decl.stride() == 0);
        debug_assert!(indices.len() % INDICES_PER_TRIANGLE == 0);
        Self {
            decl,
            vertex_data,
            indices,
        }
    }

    /// Create a mesh record from raw little-endian index bytes.
    pub fn from_raw(
        decl: VertexDecl,
        vertex_data: Vec<u8>,
        index_data: &[u8],
    ) -> Result<Self, MeshError> {
        if index_data.len() % 2 != 0 {
            return Err(MeshError::IndexDataSize(index_data.len()));
        }
        let indices = index_data
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::new(decl, vertex_data, indices)
    }

    /// Get the vertex declaration.
    pub fn decl(&self) -> &VertexDecl {
        &self.decl
    }

    /// Get the interleaved vertex bytes.
    pub fn vertex_data(&self) -> &[u8] {
        &self.vertex_data
    }

    /// Get the triangle indices.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Get the indices as raw bytes (native endianness).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        match self.decl.stride() {
            0 => 0,
            stride => self.vertex_data.len() / stride,
        }
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / INDICES_PER_TRIANGLE
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices
            .chunks_exact(INDICES_PER_TRIANGLE)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Read one attribute of one vertex.
    ///
    /// Returns `None` if the attribute is not declared or the vertex is out
    /// of range.
    pub fn attribute(&self, attrib: Attrib, vertex: usize) -> Option<AttribValues> {
        let desc = self.decl.get(attrib)?;
        if vertex >= self.vertex_count() {
            return None;
        }
        let start = vertex * self.decl.stride() + desc.offset;
        let bytes = self.vertex_data.get(start..start + desc.format.size())?;
        Some(AttribValues::from_bytes(&desc.format, bytes))
    }

    /// Decompose the record into its parts.
    pub fn into_parts(self) -> (VertexDecl, Vec<u8>, Vec<u16>) {
        (self.decl, self.vertex_data, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{AttribFormat, AttribType};

    fn position_color_decl() -> VertexDecl {
        VertexDecl::builder()
            .with(Attrib::Position, AttribFormat::new(2, AttribType::Float))
            .with(Attrib::Color0, AttribFormat::new(4, AttribType::Uint8).normalized())
            .end()
    }

    fn vertex(x: f32, y: f32, rgba: [u8; 4]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&x.to_le_bytes());
        bytes.extend_from_slice(&y.to_le_bytes());
        bytes.extend_from_slice(&rgba);
        bytes
    }

    #[test]
    fn test_mesh_data_basic() {
        let decl = position_color_decl();
        let mut data = vertex(0.0, 0.0, [255, 0, 0, 255]);
        data.extend(vertex(1.0, 0.0, [0, 255, 0, 255]));
        data.extend(vertex(0.0, 1.0, [0, 0, 255, 255]));

        let mesh = MeshData::new(decl, data, vec![0, 1, 2]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.index_bytes().len(), 6);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);

        let color = mesh.attribute(Attrib::Color0, 1).unwrap();
        assert_eq!(color.as_u8(), Some(&[0u8, 255, 0, 255][..]));
        let position = mesh.attribute(Attrib::Position, 2).unwrap();
        assert_eq!(position.as_f32(), Some(&[0.0f32, 1.0][..]));

        assert!(mesh.attribute(Attrib::Normal, 0).is_none());
        assert!(mesh.attribute(Attrib::Position, 3).is_none());
    }

    #[test]
    fn test_mesh_data_rejects_partial_vertex() {
        let err = MeshData::new(position_color_decl(), vec![0u8; 13], Vec::new()).unwrap_err();
        assert_eq!(err, MeshError::VertexDataSize { len: 13, stride: 12 });
    }

    #[test]
    fn test_mesh_data_rejects_partial_triangle() {
        let err = MeshData::new(position_color_decl(), vec![0u8; 24], vec![0, 1]).unwrap_err();
        assert_eq!(err, MeshError::PartialTriangle { len: 2 });
    }

    #[test]
    fn test_empty_decl_requires_empty_vertex_data() {
        assert!(MeshData::new(VertexDecl::default(), Vec::new(), Vec::new()).is_ok());
        assert!(MeshData::new(VertexDecl::default(), vec![1], Vec::new()).is_err());
    }

    #[test]
    fn test_from_raw_index_bytes() {
        let bytes: Vec<u8> = [3u16, 4, 5].iter().flat_map(|i| i.to_le_bytes()).collect();
        let mesh = MeshData::from_raw(position_color_decl(), Vec::new(), &bytes).unwrap();
        assert_eq!(mesh.indices(), &[3, 4, 5]);

        let err = MeshData::from_raw(position_color_decl(), Vec::new(), &[0, 0, 0]).unwrap_err();
        assert_eq!(err, MeshError::IndexDataSize(3));
    }
}
