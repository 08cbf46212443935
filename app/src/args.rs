//! Command line arguments.
//!
//! Uses clap for CLI parsing with:
//! - Help text (`--help`)
//! - Validation and clear error messages
//! - One subcommand per tool operation

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gfx_core::text_mesh::{DEFAULT_WRAP_WIDTH, EncodeOptions, LineEnding};

/// Text mesh tool arguments.
#[derive(Parser, Debug)]
#[command(
    name = "meshtool",
    about = "Inspect, validate and format text mesh files",
    long_about = "Inspect, validate and format text mesh files.\n\n\
        A text mesh holds a vertex declaration, per-attribute vertex data\n\
        and triangle indices in a line-oriented format.\n\
        \n\
        EXAMPLES:\n\
          # Show the declaration and counts\n\
          meshtool info cube.mesh\n\
        \n\
          # Fail on any tolerated anomaly\n\
          meshtool check cube.mesh --strict\n\
        \n\
          # Rewrite in canonical form with LF line endings\n\
          meshtool fmt cube.mesh -o cube.fmt.mesh --lf\n\
        \n\
          # Print the texture coordinates of every vertex\n\
          meshtool dump cube.mesh --attrib texcoord0",
    version
)]
pub struct Args {
    /// Log decoder details (sets the log level to debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Tool operation.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the vertex declaration, stride, vertex and triangle counts.
    Info {
        /// Text mesh file.
        file: PathBuf,
    },

    /// Decode a file and report every tolerated anomaly.
    Check {
        /// Text mesh file.
        file: PathBuf,

        /// Exit with an error if any anomaly was found.
        #[arg(long)]
        strict: bool,
    },

    /// Re-encode a file in canonical form.
    Fmt {
        /// Text mesh file.
        file: PathBuf,

        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Characters of values per line before wrapping.
        #[arg(long, default_value_t = DEFAULT_WRAP_WIDTH)]
        wrap: usize,

        /// Write LF line endings instead of CRLF.
        #[arg(long)]
        lf: bool,
    },

    /// Print per-vertex attribute values as floats.
    Dump {
        /// Text mesh file.
        file: PathBuf,

        /// Only print this attribute (e.g. `position`, `texcoord0`).
        #[arg(long)]
        attrib: Option<String>,
    },
}

impl Args {
    /// Log filter implied by the flags.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Encoder options for `fmt`.
pub fn encode_options(wrap: usize, lf: bool) -> EncodeOptions {
    let line_ending = if lf { LineEnding::Lf } else { LineEnding::CrLf };
    EncodeOptions::default()
        .with_wrap_width(wrap)
        .with_line_ending(line_ending)
}
