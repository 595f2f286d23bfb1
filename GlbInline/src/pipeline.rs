//! GLB to self-contained GLB pipeline
//!
//! parse -> relocate -> serialize. Every stage either succeeds or aborts the
//! whole rewrite; callers never see a partially rewritten buffer.

use std::path::Path;

use crate::error::{Error, Result};
use crate::glb::{parse_glb_with, write_glb};
use crate::options::InlineOptions;
use crate::relocate::{RelocatedImage, relocate_images};

/// Summary of one rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineReport {
    /// Size of the input container in bytes
    pub input_size: usize,
    /// Size of the rewritten container in bytes
    pub output_size: usize,
    /// Images moved into data URIs
    pub relocated: Vec<RelocatedImage>,
}

/// Rewrite a GLB buffer so no image depends on the BIN chunk.
///
/// # Errors
/// Returns the first error raised by parsing, relocation, or serialization.
pub fn transform(input: &[u8]) -> Result<Vec<u8>> {
    transform_with(input, &InlineOptions::default()).map(|(output, _)| output)
}

/// Rewrite a GLB buffer with explicit options, returning a report alongside
/// the new buffer.
pub fn transform_with(input: &[u8], options: &InlineOptions) -> Result<(Vec<u8>, InlineReport)> {
    options.validate()?;

    let container = parse_glb_with(input, options)?;
    let relocation = relocate_images(&container, options)?;
    let output = write_glb(
        container.header.version,
        &relocation.document,
        container.binary_region_bytes(),
    )?;

    tracing::info!(
        "Inlined {} image(s), {} bytes: {} -> {} bytes",
        relocation.relocated.len(),
        relocation.inlined_bytes(),
        input.len(),
        output.len()
    );

    let report = InlineReport {
        input_size: input.len(),
        output_size: output.len(),
        relocated: relocation.relocated,
    };
    Ok((output, report))
}

/// Rewrite a GLB file on disk.
///
/// The output file is only written once the rewrite succeeded. Parent
/// directories of `dest` are created as needed.
///
/// # Errors
/// Returns [`Error::OutputExists`] if `dest` exists and `options.overwrite`
/// is not set, [`Error::Io`] on read/write failures, or any rewrite error.
pub fn inline_glb_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    dest: Q,
    options: &InlineOptions,
) -> Result<InlineReport> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    tracing::info!("Inlining images: {:?} -> {:?}", source, dest);

    if dest.exists() && !options.overwrite {
        return Err(Error::OutputExists(dest.to_path_buf()));
    }

    let input = std::fs::read(source)?;
    let (output, report) = transform_with(&input, options)?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest, &output)?;

    Ok(report)
}
