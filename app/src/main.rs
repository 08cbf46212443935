//! # meshtool
//!
//! Inspect, validate and format text mesh files.
//!
//! - `info` - Declaration, stride and counts
//! - `check` - Tolerated anomalies, optionally as a failure
//! - `fmt` - Canonical re-encoding
//! - `dump` - Per-vertex values

mod args;
mod commands;

use std::io::Write;

use anyhow::Result;
use clap::Parser;

use args::{Args, Command};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();
    gfx_core::init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Command::Info { file } => commands::info(file, &mut out)?,
        Command::Check { file, strict } => commands::check(file, *strict, &mut out)?,
        Command::Fmt {
            file,
            output,
            wrap,
            lf,
        } => {
            let options = args::encode_options(*wrap, *lf);
            commands::fmt(file, output.as_deref(), &options, &mut out)?
        }
        Command::Dump { file, attrib } => commands::dump(file, attrib.as_deref(), &mut out)?,
    }

    out.flush()?;
    Ok(())
}
