//! CLI command for rewriting a single GLB file

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{DISK, LOOKING_GLASS, PICTURE, format_size, print_done, print_step};
use crate::options::InlineOptions;
use crate::pipeline::inline_glb_file;

/// Rewrite `source` into `destination`
pub fn execute(
    source: &Path,
    destination: &Path,
    options: &InlineOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(1, 3, LOOKING_GLASS, &format!("Reading {}", source.display()));
    }
    let report = inline_glb_file(source, destination, options)
        .with_context(|| format!("failed to rewrite {}", source.display()))?;

    if !quiet {
        print_step(
            2,
            3,
            PICTURE,
            &format!("Inlined {} image(s)", report.relocated.len()),
        );
        for image in &report.relocated {
            println!(
                "      image {} <- bufferView {} ({}, {})",
                image.image,
                image.buffer_view,
                image.mime_type,
                format_size(image.byte_length as u64)
            );
        }
        print_step(
            3,
            3,
            DISK,
            &format!(
                "Wrote {} ({} -> {})",
                destination.display(),
                format_size(report.input_size as u64),
                format_size(report.output_size as u64)
            ),
        );
        print_done(started.elapsed());
    }

    Ok(())
}
