//! Tool operations.
//!
//! Each command writes its report to the given writer so it can be run
//! against a buffer in tests.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use gfx_core::mesh::{Attrib, AttribDesc, MeshData};
use gfx_core::text_mesh::{self, Diagnostic, EncodeOptions};

/// Read and decode a file, keeping the diagnostics.
fn load(path: &Path) -> Result<(MeshData, Vec<Diagnostic>)> {
    text_mesh::load_text_mesh_with_diagnostics(path)
        .with_context(|| format!("failed to read {}", path.display()))
}

fn describe(desc: &AttribDesc) -> String {
    let mut text = format!(
        "{:<10} {} x {:<6} offset {:>3}",
        desc.attrib.name(),
        desc.format.count,
        desc.format.ty.name(),
        desc.offset
    );
    if desc.format.normalized {
        text.push_str(" normalised");
    }
    if desc.format.as_int {
        text.push_str(" asInt");
    }
    text
}

/// `meshtool info`
pub fn info(path: &Path, out: &mut impl Write) -> Result<()> {
    let (mesh, diagnostics) = load(path)?;
    let decl = mesh.decl();

    writeln!(out, "file:        {}", path.display())?;
    writeln!(out, "stride:      {} bytes", decl.stride())?;
    writeln!(out, "vertices:    {}", mesh.vertex_count())?;
    writeln!(out, "triangles:   {}", mesh.triangle_count())?;
    writeln!(out, "diagnostics: {}", diagnostics.len())?;
    writeln!(out, "attributes:  {}", decl.len())?;
    for desc in decl.attributes() {
        writeln!(out, "  {}", describe(desc))?;
    }
    Ok(())
}

/// `meshtool check`
///
/// With `strict`, any diagnostic makes the command fail.
pub fn check(path: &Path, strict: bool, out: &mut impl Write) -> Result<()> {
    let (_, diagnostics) = load(path)?;

    for diagnostic in &diagnostics {
        writeln!(out, "{}: {}", path.display(), diagnostic)?;
    }
    if diagnostics.is_empty() {
        writeln!(out, "{}: ok", path.display())?;
    } else if strict {
        bail!("{}: {} anomalies found", path.display(), diagnostics.len());
    }
    Ok(())
}

/// `meshtool fmt`
///
/// Writes to `output` when given, otherwise to `out`.
pub fn fmt(
    path: &Path,
    output: Option<&Path>,
    options: &EncodeOptions,
    out: &mut impl Write,
) -> Result<()> {
    let (mesh, diagnostics) = load(path)?;
    if !diagnostics.is_empty() {
        log::warn!(
            "{}: {} anomalies were dropped while formatting",
            path.display(),
            diagnostics.len()
        );
    }

    match output {
        Some(output) => {
            text_mesh::save_text_mesh(&mesh, output, options)
                .with_context(|| format!("failed to save {}", output.display()))?;
            log::info!("wrote {}", output.display());
        }
        None => text_mesh::write_text_mesh(&mesh, out, options)?,
    }
    Ok(())
}

/// `meshtool dump`
pub fn dump(path: &Path, attrib: Option<&str>, out: &mut impl Write) -> Result<()> {
    let (mesh, _) = load(path)?;
    let decl = mesh.decl();

    let selected: Vec<&AttribDesc> = match attrib {
        Some(name) => {
            let attrib = Attrib::from_name(name)
                .with_context(|| format!("unknown attribute '{name}'"))?;
            match decl.get(attrib) {
                Some(desc) => vec![desc],
                None => bail!("attribute '{attrib}' is not declared in {}", path.display()),
            }
        }
        None => decl.attributes().iter().collect(),
    };

    for vertex in 0..mesh.vertex_count() {
        write!(out, "{vertex}:")?;
        for desc in &selected {
            let Some(values) = mesh.attribute(desc.attrib, vertex) else {
                continue;
            };
            let floats: Vec<String> = values
                .to_f32(&desc.format)
                .iter()
                .map(|v| v.to_string())
                .collect();
            write!(out, " {}=({})", desc.attrib.name(), floats.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
