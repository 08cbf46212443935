//! CPU-side mesh types.
//!
//! This module provides GPU-agnostic mesh data structures:
//!
//! - [`VertexDecl`] - Closed vertex declaration (attributes, offsets, stride)
//! - [`MeshData`] - Mesh record (declaration, vertex bytes, triangle indices)
//! - [`AttribValues`] - Typed view of one attribute of one vertex

mod data;
mod decl;
mod error;
mod values;

pub use data::{INDICES_PER_TRIANGLE, MeshData};
pub use decl::{
    Attrib, AttribDesc, AttribFormat, AttribType, MAX_ATTRIB_COUNT, VertexDecl, VertexDeclBuilder,
};
pub use error::MeshError;
pub use values::AttribValues;
