//! GLB (binary glTF) container format
//!
//! A GLB file is a 12-byte header followed by length-prefixed, type-tagged
//! chunks. The first chunk is always JSON; an optional BIN chunk follows.
//!
//! ```text
//! offset 0   magic "glTF" | version | total length
//! offset 12  JSON chunk length | "JSON"
//! offset 20  JSON text, space padded to 4 bytes
//!            BIN chunk length | "BIN\0" | payload
//! ```

use std::fmt;
use std::ops::Range;

use serde_json::Value;

pub(crate) mod reader;
mod writer;

pub use reader::{parse_glb, parse_glb_with};
pub use writer::write_glb;

/// "glTF" magic signature (little-endian)
pub const GLB_MAGIC: u32 = 0x46546C67;

/// Container version written by glTF 2.0 exporters
pub const GLB_VERSION: u32 = 2;

/// Size of the file header (magic + version + total length)
pub const GLB_HEADER_SIZE: usize = 12;

/// Size of every chunk header (length + type).
///
/// Chunk payloads start this many bytes after the chunk itself. Buffer view
/// offsets are relative to the BIN payload, never to the BIN chunk start.
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Offset of the JSON chunk payload
pub const JSON_CHUNK_DATA_OFFSET: usize = GLB_HEADER_SIZE + CHUNK_HEADER_SIZE;

/// Byte used to pad the JSON chunk to a 4-byte boundary
pub const JSON_PADDING_BYTE: u8 = b' ';

/// Chunk alignment required by the container format
pub const CHUNK_ALIGNMENT: usize = 4;

/// Chunk type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ChunkType {
    /// Structured glTF JSON ("JSON")
    Json = 0x4E4F534A,
    /// Binary buffer 0 ("BIN\0")
    Bin = 0x004E4942,
}

impl ChunkType {
    /// Look up a chunk type from its raw code.
    #[must_use]
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            0x4E4F534A => Some(ChunkType::Json),
            0x004E4942 => Some(ChunkType::Bin),
            _ => None,
        }
    }

    /// The raw little-endian code.
    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkType::Json => f.write_str("JSON"),
            ChunkType::Bin => f.write_str("BIN"),
        }
    }
}

/// The 12-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlbHeader {
    pub magic: u32,
    /// Passed through unmodified on rewrite
    pub version: u32,
    /// Total length as declared on disk
    pub total_length: u32,
}

/// The binary chunk region following the JSON chunk.
///
/// The region is kept opaque: the rewriter copies `region` verbatim and only
/// reads image bytes out of `payload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryChunk {
    /// Whole region including the chunk's own 8-byte header
    pub region: Range<usize>,
    /// Bytes addressable by buffer views
    pub payload: Range<usize>,
    /// Chunk length field, if the header was read
    pub declared_length: Option<u32>,
}

impl BinaryChunk {
    /// Start of the payload, i.e. where `byteOffset` 0 of buffer 0 lives.
    #[must_use]
    pub fn payload_start(&self) -> usize {
        self.region.start + CHUNK_HEADER_SIZE
    }
}

/// Parsed view of a GLB buffer.
///
/// Borrows the input bytes for the duration of one rewrite.
#[derive(Debug, Clone)]
pub struct GlbContainer<'a> {
    pub header: GlbHeader,
    /// Range of the JSON payload (padding included)
    pub json_range: Range<usize>,
    /// Decoded JSON text (padding trimmed)
    pub json_text: &'a str,
    /// Parsed glTF document
    pub document: Value,
    pub binary_chunk: Option<BinaryChunk>,
    data: &'a [u8],
}

impl<'a> GlbContainer<'a> {
    /// The complete input buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Raw bytes of the binary chunk region, header included.
    #[must_use]
    pub fn binary_region_bytes(&self) -> &'a [u8] {
        match &self.binary_chunk {
            Some(chunk) => &self.data[chunk.region.clone()],
            None => &[],
        }
    }

    /// Length of the JSON chunk payload as declared on disk.
    #[must_use]
    pub fn json_chunk_length(&self) -> usize {
        self.json_range.len()
    }
}

/// Padding needed to bring `len` up to the chunk alignment.
#[must_use]
pub fn padding_for(len: usize) -> usize {
    (CHUNK_ALIGNMENT - len % CHUNK_ALIGNMENT) % CHUNK_ALIGNMENT
}
