//! Vertex declarations.
//!
//! This module provides:
//! - [`Attrib`] - The fixed set of vertex attribute slots
//! - [`AttribType`] - Scalar element types and their sizes
//! - [`AttribFormat`] - Element count, type and interpretation flags
//! - [`VertexDecl`] - A closed declaration with stride and per-attribute offsets
//! - [`VertexDeclBuilder`] - Two-phase construction (declare, then close)

use std::fmt;

use super::error::MeshError;

/// Maximum number of elements a single attribute can carry.
pub const MAX_ATTRIB_COUNT: u8 = 4;

/// A named per-vertex data channel.
///
/// The declaration order of the variants is the canonical attribute order:
/// closed declarations lay attributes out in this order and the text mesh
/// writer emits them in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attrib {
    Position,
    Normal,
    Tangent,
    Bitangent,
    Color0,
    Color1,
    /// Skinning joint indices.
    Indices,
    /// Skinning weights.
    Weight,
    TexCoord0,
    TexCoord1,
    TexCoord2,
    TexCoord3,
    TexCoord4,
    TexCoord5,
    TexCoord6,
    TexCoord7,
}

impl Attrib {
    /// Number of attribute slots.
    pub const COUNT: usize = 16;

    /// All attributes in canonical order.
    pub const ALL: [Attrib; Self::COUNT] = [
        Self::Position,
        Self::Normal,
        Self::Tangent,
        Self::Bitangent,
        Self::Color0,
        Self::Color1,
        Self::Indices,
        Self::Weight,
        Self::TexCoord0,
        Self::TexCoord1,
        Self::TexCoord2,
        Self::TexCoord3,
        Self::TexCoord4,
        Self::TexCoord5,
        Self::TexCoord6,
        Self::TexCoord7,
    ];

    /// Canonical text name of the attribute.
    pub fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Normal => "normal",
            Self::Tangent => "tangent",
            Self::Bitangent => "bitangent",
            Self::Color0 => "color0",
            Self::Color1 => "color1",
            Self::Indices => "indices",
            Self::Weight => "weight",
            Self::TexCoord0 => "texcoord0",
            Self::TexCoord1 => "texcoord1",
            Self::TexCoord2 => "texcoord2",
            Self::TexCoord3 => "texcoord3",
            Self::TexCoord4 => "texcoord4",
            Self::TexCoord5 => "texcoord5",
            Self::TexCoord6 => "texcoord6",
            Self::TexCoord7 => "texcoord7",
        }
    }

    /// Look up an attribute by its canonical name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attrib| attrib.name() == name)
    }

    /// Position of the attribute in canonical order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Attrib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar element type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttribType {
    /// 8-bit unsigned integer.
    Uint8,
    /// 10-bit unsigned integer, stored in a 16-bit element.
    Uint10,
    /// 16-bit signed integer.
    Int16,
    /// IEEE 754 half-precision float.
    Half,
    /// IEEE 754 single-precision float.
    Float,
}

impl AttribType {
    /// All scalar types.
    pub const ALL: [AttribType; 5] = [
        Self::Uint8,
        Self::Uint10,
        Self::Int16,
        Self::Half,
        Self::Float,
    ];

    /// Canonical text name of the type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Uint10 => "uint10",
            Self::Int16 => "int16",
            Self::Half => "half",
            Self::Float => "float",
        }
    }

    /// Look up a type by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }

    /// Size in bytes of one element of this type.
    pub fn size(self) -> usize {
        match self {
            Self::Uint8 => 1,
            Self::Uint10 | Self::Int16 | Self::Half => 2,
            Self::Float => 4,
        }
    }

    /// Number of hex digits used for one element in text form.
    ///
    /// `None` for floats, which are written in decimal.
    pub fn hex_digits(self) -> Option<usize> {
        match self {
            Self::Float => None,
            other => Some(other.size() * 2),
        }
    }
}

impl fmt::Display for AttribType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encoding of one attribute: element count, type and interpretation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttribFormat {
    /// Number of elements (1 to [`MAX_ATTRIB_COUNT`]).
    pub count: u8,
    /// Scalar element type.
    pub ty: AttribType,
    /// Integer values are normalized to `[0, 1]` / `[-1, 1]` when read by a shader.
    pub normalized: bool,
    /// Integer values are passed to the shader as integers.
    pub as_int: bool,
}

impl AttribFormat {
    /// Create a format with both flags cleared.
    pub fn new(count: u8, ty: AttribType) -> Self {
        Self {
            count,
            ty,
            normalized: false,
            as_int: false,
        }
    }

    /// Set the normalized flag.
    pub fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }

    /// Set the as-integer flag.
    pub fn as_int(mut self) -> Self {
        self.as_int = true;
        self
    }

    /// Size in bytes of one vertex worth of this attribute.
    pub fn size(&self) -> usize {
        self.count as usize * self.ty.size()
    }
}

/// One attribute of a closed declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttribDesc {
    /// Attribute slot.
    pub attrib: Attrib,
    /// Element encoding.
    pub format: AttribFormat,
    /// Byte offset within a vertex record.
    pub offset: usize,
}

/// A closed vertex declaration.
///
/// Attributes are stored in canonical [`Attrib`] order, each at the byte
/// offset that follows the previous one; there is no padding.
///
/// # Example
///
/// ```
/// use gfx_core::mesh::{Attrib, AttribFormat, AttribType, VertexDecl};
///
/// let decl = VertexDecl::builder()
///     .with(Attrib::TexCoord0, AttribFormat::new(2, AttribType::Float))
///     .with(Attrib::Position, AttribFormat::new(3, AttribType::Float))
///     .end();
///
/// assert_eq!(decl.stride(), 20);
/// assert_eq!(decl.offset(Attrib::Position), Some(0));
/// assert_eq!(decl.offset(Attrib::TexCoord0), Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexDecl {
    attributes: Vec<AttribDesc>,
    stride: usize,
}

impl VertexDecl {
    /// Start building a declaration.
    pub fn builder() -> VertexDeclBuilder {
        VertexDeclBuilder::new()
    }

    /// Whether the declaration contains the attribute.
    pub fn has(&self, attrib: Attrib) -> bool {
        self.get(attrib).is_some()
    }

    /// Get the description of an attribute.
    pub fn get(&self, attrib: Attrib) -> Option<&AttribDesc> {
        self.attributes.iter().find(|desc| desc.attrib == attrib)
    }

    /// Byte offset of an attribute within a vertex record.
    pub fn offset(&self, attrib: Attrib) -> Option<usize> {
        self.get(attrib).map(|desc| desc.offset)
    }

    /// Size in bytes of one vertex record.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Declared attributes in canonical order.
    pub fn attributes(&self) -> &[AttribDesc] {
        &self.attributes
    }

    /// Number of declared attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether no attribute is declared.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Open declaration that attributes can be added to.
///
/// Attributes can be added in any order. [`end`](Self::end) closes the
/// declaration and fixes offsets and stride.
#[derive(Debug, Clone, Default)]
pub struct VertexDeclBuilder {
    pending: Vec<(Attrib, AttribFormat)>,
}

impl VertexDeclBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute.
    ///
    /// Fails if the element count is out of range or the attribute was
    /// already added; the first declaration of an attribute is kept.
    pub fn add(&mut self, attrib: Attrib, format: AttribFormat) -> Result<&mut Self, MeshError> {
        if format.count == 0 || format.count > MAX_ATTRIB_COUNT {
            return Err(MeshError::InvalidCount {
                attrib,
                count: format.count,
            });
        }
        if self.contains(attrib) {
            return Err(MeshError::DuplicateAttrib(attrib));
        }
        self.pending.push((attrib, format));
        Ok(self)
    }

    /// Add an attribute, builder style.
    ///
    /// # Panics
    ///
    /// Panics if [`add`](Self::add) would fail.
    pub fn with(mut self, attrib: Attrib, format: AttribFormat) -> Self {
        if let Err(err) = self.add(attrib, format) {
            panic!("invalid vertex declaration: {err}");
        }
        self
    }

    /// Whether the attribute has been added.
    pub fn contains(&self, attrib: Attrib) -> bool {
        self.pending.iter().any(|(a, _)| *a == attrib)
    }

    /// Close the declaration.
    pub fn end(mut self) -> VertexDecl {
        self.pending.sort_by_key(|(attrib, _)| *attrib);

        let mut offset = 0;
        let attributes = self
            .pending
            .into_iter()
            .map(|(attrib, format)| {
                let desc = AttribDesc {
                    attrib,
                    format,
                    offset,
                };
                offset += format.size();
                desc
            })
            .collect();

        VertexDecl {
            attributes,
            stride: offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrib_names_roundtrip() {
        for attrib in Attrib::ALL {
            assert_eq!(Attrib::from_name(attrib.name()), Some(attrib));
        }
        assert_eq!(Attrib::from_name("index"), None);
        assert_eq!(Attrib::from_name("Position"), None);
    }

    #[test]
    fn test_attrib_index_matches_canonical_order() {
        for (i, attrib) in Attrib::ALL.iter().enumerate() {
            assert_eq!(attrib.index(), i);
        }
    }

    #[test]
    fn test_type_names_case_insensitive() {
        assert_eq!(AttribType::from_name("float"), Some(AttribType::Float));
        assert_eq!(AttribType::from_name("UINT8"), Some(AttribType::Uint8));
        assert_eq!(AttribType::from_name("double"), None);
    }

    #[test]
    fn test_type_sizes() {
        assert_eq!(AttribType::Uint8.size(), 1);
        assert_eq!(AttribType::Uint10.size(), 2);
        assert_eq!(AttribType::Int16.size(), 2);
        assert_eq!(AttribType::Half.size(), 2);
        assert_eq!(AttribType::Float.size(), 4);
        assert_eq!(AttribType::Uint8.hex_digits(), Some(2));
        assert_eq!(AttribType::Half.hex_digits(), Some(4));
        assert_eq!(AttribType::Float.hex_digits(), None);
    }

    #[test]
    fn test_stride_and_offsets_follow_canonical_order() {
        let decl = VertexDecl::builder()
            .with(Attrib::Color0, AttribFormat::new(4, AttribType::Uint8).normalized())
            .with(Attrib::TexCoord0, AttribFormat::new(2, AttribType::Half))
            .with(Attrib::Position, AttribFormat::new(3, AttribType::Float))
            .with(Attrib::Normal, AttribFormat::new(3, AttribType::Int16))
            .end();

        // 12 + 6 + 4 + 4
        assert_eq!(decl.stride(), 26);
        assert_eq!(decl.offset(Attrib::Position), Some(0));
        assert_eq!(decl.offset(Attrib::Normal), Some(12));
        assert_eq!(decl.offset(Attrib::Color0), Some(18));
        assert_eq!(decl.offset(Attrib::TexCoord0), Some(22));
        assert_eq!(decl.offset(Attrib::Tangent), None);

        let order: Vec<_> = decl.attributes().iter().map(|d| d.attrib).collect();
        assert_eq!(
            order,
            vec![Attrib::Position, Attrib::Normal, Attrib::Color0, Attrib::TexCoord0]
        );
    }

    #[test]
    fn test_duplicate_attrib_first_wins() {
        let mut builder = VertexDecl::builder();
        builder
            .add(Attrib::Position, AttribFormat::new(3, AttribType::Float))
            .unwrap();
        let err = builder
            .add(Attrib::Position, AttribFormat::new(2, AttribType::Half))
            .unwrap_err();
        assert_eq!(err, MeshError::DuplicateAttrib(Attrib::Position));

        let decl = builder.end();
        assert_eq!(decl.len(), 1);
        assert_eq!(
            decl.get(Attrib::Position).map(|d| d.format),
            Some(AttribFormat::new(3, AttribType::Float))
        );
    }

    #[test]
    fn test_count_out_of_range_rejected() {
        let mut builder = VertexDecl::builder();
        assert!(builder
            .add(Attrib::Normal, AttribFormat::new(0, AttribType::Float))
            .is_err());
        assert!(builder
            .add(Attrib::Normal, AttribFormat::new(5, AttribType::Float))
            .is_err());
        assert!(builder.end().is_empty());
    }

    #[test]
    fn test_empty_decl() {
        let decl = VertexDecl::builder().end();
        assert!(decl.is_empty());
        assert_eq!(decl.stride(), 0);
    }

    #[test]
    #[should_panic(expected = "invalid vertex declaration")]
    fn test_with_panics_on_duplicate() {
        let _ = VertexDecl::builder()
            .with(Attrib::Position, AttribFormat::new(3, AttribType::Float))
            .with(Attrib::Position, AttribFormat::new(3, AttribType::Float));
    }
}
