//! Roundtrip tests: encode → decode and decode → encode → decode.

use crate::mesh::{Attrib, AttribFormat, AttribType, MeshData, MeshError, VertexDecl};
use crate::text_mesh::{
    EncodeOptions, LineEnding, TextMeshError, decode, decode_with_diagnostics, encode,
    encode_parts, load_text_mesh, save_text_mesh, write_text_mesh,
};

use super::{C4D_EXPORT, QUAD, temp_dir};

/// A mesh using every scalar type, awkward floats and enough vertices to
/// wrap every data line.
fn sample_mesh() -> MeshData {
    let decl = VertexDecl::builder()
        .with(Attrib::Position, AttribFormat::new(3, AttribType::Float))
        .with(Attrib::Normal, AttribFormat::new(3, AttribType::Int16).normalized())
        .with(Attrib::Color0, AttribFormat::new(4, AttribType::Uint8).normalized())
        .with(Attrib::Indices, AttribFormat::new(4, AttribType::Uint8).as_int())
        .with(Attrib::Weight, AttribFormat::new(1, AttribType::Uint10))
        .with(Attrib::TexCoord3, AttribFormat::new(2, AttribType::Half))
        .end();

    let floats = [
        0.0f32,
        -0.0,
        1.5,
        0.1,
        -123.456,
        1e-7,
        3.4e38,
        f32::MIN_POSITIVE,
        f32::EPSILON,
        std::f32::consts::PI,
        f32::NEG_INFINITY,
        65504.0,
        f32::NAN,
        -f32::NAN,
        f32::from_bits(0x7FC0_0001),
    ];

    let mut data = Vec::new();
    for v in 0..40usize {
        for k in 0..3 {
            data.extend(floats[(v + k) % floats.len()].to_le_bytes());
        }
        for k in 0..3u16 {
            data.extend((v as u16 * 1031 + k * 7919).to_le_bytes());
        }
        data.extend([v as u8, 0xFF, (v * 3) as u8, 0x00]);
        data.extend([(v % 4) as u8, 1, 2, 3]);
        data.extend(((v as u16 * 37) & 0x3FF).to_le_bytes());
        data.extend((0x3C00u16 + v as u16).to_le_bytes());
        data.extend((0xBC00u16 - v as u16).to_le_bytes());
    }

    let indices = (0..38u16).flat_map(|i| [i, i + 1, i + 2]).collect();
    MeshData::new(decl, data, indices).unwrap()
}

#[test]
fn test_encode_decode_reproduces_buffers_exactly() {
    let mesh = sample_mesh();
    let text = encode(&mesh, &EncodeOptions::default());

    let (decoded, diagnostics) = decode_with_diagnostics(&text);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(decoded.decl(), mesh.decl());
    assert_eq!(decoded.vertex_data(), mesh.vertex_data());
    assert_eq!(decoded.indices(), mesh.indices());
}

#[test]
fn test_nan_bits_survive_roundtrip() {
    let decl = VertexDecl::builder()
        .with(Attrib::Position, AttribFormat::new(2, AttribType::Float))
        .end();
    let vertex_data: Vec<u8> = [0xFFC0_0000u32, 0x7FC0_0001]
        .iter()
        .flat_map(|bits| bits.to_le_bytes())
        .collect();
    let mesh = MeshData::new(decl, vertex_data, Vec::new()).unwrap();

    let text = encode(&mesh, &EncodeOptions::default());
    assert!(text.contains("position 0xFFC00000 0x7FC00001"), "{text}");

    let (decoded, diagnostics) = decode_with_diagnostics(&text);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(decoded.vertex_data(), mesh.vertex_data());
}

#[test]
fn test_layout_options_do_not_change_the_mesh() {
    let mesh = sample_mesh();
    for wrap_width in [0, 1, 16, 64, 10_000] {
        for line_ending in [LineEnding::CrLf, LineEnding::Lf] {
            let options = EncodeOptions::default()
                .with_wrap_width(wrap_width)
                .with_line_ending(line_ending);
            assert_eq!(
                decode(&encode(&mesh, &options)),
                mesh,
                "wrap {wrap_width}, {line_ending:?}"
            );
        }
    }
}

#[test]
fn test_default_layout_wraps_long_blocks() {
    let text = encode(&sample_mesh(), &EncodeOptions::default());
    let position_lines = text
        .split("\r\n")
        .filter(|line| line.starts_with("position "))
        .count();
    assert!(position_lines > 1);
    assert!(text.contains("\r\nindex=uint16\r\nindex "));
}

#[test]
fn test_decode_encode_decode_is_stable() {
    for source in [QUAD, C4D_EXPORT] {
        let first = decode(source);
        let second = decode(&encode(&first, &EncodeOptions::default()));
        assert_eq!(first, second);
    }
}

#[test]
fn test_scalar_fidelity() {
    let text = "color0=1 uint8\r\ntexcoord0=1 float\r\ncolor0 FF\r\ntexcoord0 1.5\r\n";
    let mesh = decode(text);
    let again = decode(&encode(&mesh, &EncodeOptions::default()));

    assert_eq!(
        again.attribute(Attrib::Color0, 0).unwrap().as_u8(),
        Some(&[0xFFu8][..])
    );
    assert_eq!(
        again.attribute(Attrib::TexCoord0, 0).unwrap().as_f32(),
        Some(&[1.5f32][..])
    );
}

#[test]
fn test_write_to_stream() {
    let mesh = decode(QUAD);
    let mut out = Vec::new();
    write_text_mesh(&mesh, &mut out, &EncodeOptions::default()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), encode(&mesh, &EncodeOptions::default()));
}

#[test]
fn test_save_and_load_file() {
    let dir = temp_dir("save_load");
    let path = dir.join("quad.mesh");
    let mesh = decode(QUAD);

    save_text_mesh(&mesh, &path, &EncodeOptions::default()).unwrap();
    assert_eq!(load_text_mesh(&path).unwrap(), mesh);
    assert!(!dir.join("quad.mesh.tmp").exists());

    // overwriting replaces the previous content
    let other = decode(C4D_EXPORT);
    save_text_mesh(&other, &path, &EncodeOptions::default()).unwrap();
    assert_eq!(load_text_mesh(&path).unwrap(), other);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_failed_save_leaves_no_output() {
    let dir = temp_dir("failed_save");
    let path = dir.join("missing_dir").join("quad.mesh");

    let err = save_text_mesh(&decode(QUAD), &path, &EncodeOptions::default()).unwrap_err();
    assert!(matches!(err, TextMeshError::File { .. }));
    assert!(!path.exists());
    assert!(!dir.join("missing_dir").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_encode_parts_validates() {
    let decl = VertexDecl::builder()
        .with(Attrib::Position, AttribFormat::new(2, AttribType::Float))
        .end();
    let options = EncodeOptions::default();

    let vertex_data: Vec<u8> = [0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0]
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    let text = encode_parts(&decl, &vertex_data, &[0, 1, 2], &options).unwrap();
    assert_eq!(decode(&text).triangle_count(), 1);

    let err = encode_parts(&decl, &vertex_data[..10], &[], &options).unwrap_err();
    assert!(matches!(
        err,
        TextMeshError::Mesh(MeshError::VertexDataSize { len: 10, stride: 8 })
    ));

    let err = encode_parts(&decl, &vertex_data, &[0, 1], &options).unwrap_err();
    assert!(matches!(
        err,
        TextMeshError::Mesh(MeshError::PartialTriangle { len: 2 })
    ));
}
