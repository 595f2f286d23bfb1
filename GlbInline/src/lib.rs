//! # GlbInline
//!
//! Rewrites GLB (binary glTF) containers so that every image carries its
//! bytes inline as a base64 `data:` URI instead of pointing into the BIN chunk
//! through a buffer view. The result loads in environments that forbid
//! `blob:` URLs (for example under a strict Content Security Policy), while
//! the BIN chunk and everything else in the document stay as they were.
//!
//! ## Quick Start
//!
//! ```no_run
//! let input = std::fs::read("model.glb")?;
//! let output = glbinline::transform(&input)?;
//! std::fs::write("model.inline.glb", output)?;
//! # Ok::<(), glbinline::Error>(())
//! ```
//!
//! ### Step by step
//!
//! ```no_run
//! use glbinline::prelude::*;
//!
//! let input = std::fs::read("model.glb")?;
//! let options = InlineOptions::default();
//!
//! let container = parse_glb_with(&input, &options)?;
//! let relocation = relocate_images(&container, &options)?;
//! let output = write_glb(
//!     container.header.version,
//!     &relocation.document,
//!     container.binary_region_bytes(),
//! )?;
//! # Ok::<(), glbinline::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `glbinline` command-line binary

pub mod batch;
pub mod error;
pub mod glb;
pub mod inspect;
pub mod options;
pub mod pipeline;
pub mod relocate;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};
pub use options::InlineOptions;
pub use pipeline::{inline_glb_file, transform, transform_with};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::options::InlineOptions;

    pub use crate::glb::{
        BinaryChunk, ChunkType, GlbContainer, GlbHeader, CHUNK_HEADER_SIZE, parse_glb,
        parse_glb_with, write_glb,
    };
    pub use crate::relocate::{
        RelocatedImage, Relocation, decode_data_uri, encode_data_uri, relocate_document,
        relocate_images,
    };
    pub use crate::pipeline::{InlineReport, inline_glb_file, transform, transform_with};
    pub use crate::inspect::{GlbSummary, ImageSource, summarize};
    pub use crate::batch::{BatchInlineResult, BatchProgress, batch_inline, find_glb_files};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
