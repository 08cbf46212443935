//! # gfx core
//!
//! CPU-side mesh records and the human-readable text mesh format.
//!
//! - [`mesh`] - Vertex declarations and mesh records
//! - [`text_mesh`] - Text mesh decoder and encoder

pub mod mesh;
pub mod text_mesh;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version. Call once after the logger is installed.
pub fn init() {
    log::info!("gfx core v{} initialized", VERSION);
}
