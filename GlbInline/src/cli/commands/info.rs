//! CLI command for describing a GLB file

use std::path::Path;

use crate::cli::progress::format_size;
use crate::inspect::{ImageSource, summarize};

/// Print container and image information
pub fn execute(source: &Path) -> anyhow::Result<()> {
    let data = std::fs::read(source)?;
    let summary = summarize(&data)?;

    println!("GLB Information: {}", source.display());
    println!();
    println!("Version: {}", summary.version);
    println!(
        "Total length: {} ({} bytes)",
        format_size(u64::from(summary.total_length)),
        summary.total_length
    );
    println!("JSON chunk: {} bytes", summary.json_chunk_length);
    match summary.binary_chunk_type {
        Some(chunk_type) => println!(
            "{chunk_type} chunk: {} bytes (with header)",
            summary.binary_region_length
        ),
        None if summary.binary_region_length > 0 => println!(
            "Unknown trailing chunk: {} bytes",
            summary.binary_region_length
        ),
        None => println!("BIN chunk: none"),
    }
    println!("Buffer views: {}", summary.buffer_view_count);
    println!();

    println!(
        "Images: {} ({} backed by buffer views)",
        summary.images.len(),
        summary.pending_images()
    );
    for (index, image) in summary.images.iter().enumerate() {
        let description = match image {
            ImageSource::BufferView {
                view,
                mime_type,
                byte_length,
            } => format!(
                "bufferView {view}, {}, {}",
                mime_type.as_deref().unwrap_or("no mimeType"),
                byte_length.map_or_else(|| "unknown size".to_string(), format_size)
            ),
            ImageSource::DataUri {
                mime_type,
                byte_length,
            } => format!(
                "data URI, {mime_type}, {}",
                byte_length.map_or_else(
                    || "undecodable".to_string(),
                    |len| format_size(len as u64)
                )
            ),
            ImageSource::External { uri } => format!("external: {uri}"),
            ImageSource::Missing => "no source".to_string(),
        };
        println!("  [{index:>3}] {description}");
    }

    Ok(())
}
