//! Export the GraphQL schema as SDL.
//!
//! Usage: cargo run --bin export-schema [output_path]
//!
//! Prints to stdout when no path is given.

use anyhow::{Context, Result};
use quill_api::graphql::schema_builder;

fn main() -> Result<()> {
    let sdl = schema_builder().finish().sdl();

    match std::env::args().nth(1) {
        Some(out_path) => {
            std::fs::write(&out_path, &sdl)
                .with_context(|| format!("failed to write schema to {out_path}"))?;
            eprintln!("Schema exported to {out_path} ({} bytes)", sdl.len());
        }
        None => print!("{sdl}"),
    }

    Ok(())
}
