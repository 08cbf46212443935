use crate::mesh::MeshData;

mod roundtrip_test;

/// Mesh exported by the Cinema 4D script: LF line endings, a comment line,
/// positions only.
const C4D_EXPORT: &str = include_str!("c4d_export.txt");

/// Quad with every scalar type family and both declaration flag spellings.
const QUAD: &str = include_str!("quad.txt");

/// Read a float attribute of every vertex.
fn float_values(mesh: &MeshData, attrib: crate::mesh::Attrib) -> Vec<f32> {
    (0..mesh.vertex_count())
        .flat_map(|v| {
            mesh.attribute(attrib, v)
                .and_then(|values| values.as_f32().map(<[f32]>::to_vec))
                .unwrap_or_default()
        })
        .collect()
}

/// Create a unique scratch directory for file based tests.
fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "gfx_text_mesh_test_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
