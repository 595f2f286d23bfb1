//! GLB container parsing

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use serde_json::Value;

use super::{
    BinaryChunk, CHUNK_HEADER_SIZE, ChunkType, GLB_HEADER_SIZE, GLB_MAGIC, GlbContainer,
    GlbHeader, JSON_CHUNK_DATA_OFFSET,
};
use crate::error::{Error, Result};
use crate::options::InlineOptions;

/// Parse a GLB buffer with default options.
///
/// # Errors
///
/// Returns [`Error::InvalidGlbMagic`] if the buffer is not a GLB container.
/// Returns [`Error::UnexpectedChunkType`] if the first chunk is not JSON, or
/// the BIN chunk header is wrong.
/// Returns [`Error::TruncatedInput`] if a declared length runs past the buffer.
/// Returns [`Error::MalformedJson`] if the JSON chunk is not a JSON object.
pub fn parse_glb(data: &[u8]) -> Result<GlbContainer<'_>> {
    parse_glb_with(data, &InlineOptions::default())
}

/// Parse a GLB buffer.
///
/// With `options.strict_binary_chunk` the BIN chunk header is read and checked
/// against the container; otherwise it is skipped as the reference loaders do.
pub fn parse_glb_with<'a>(data: &'a [u8], options: &InlineOptions) -> Result<GlbContainer<'a>> {
    ensure_available(data.len(), 0, 4, "GLB magic")?;

    let mut cursor = Cursor::new(data);
    let magic = cursor.read_u32::<LittleEndian>()?;
    if magic != GLB_MAGIC {
        return Err(Error::InvalidGlbMagic {
            found: magic.to_le_bytes(),
        });
    }

    ensure_available(data.len(), 0, GLB_HEADER_SIZE, "GLB header")?;
    let version = cursor.read_u32::<LittleEndian>()?;
    let total_length = cursor.read_u32::<LittleEndian>()?;
    let header = GlbHeader {
        magic,
        version,
        total_length,
    };

    let total = total_length as usize;
    ensure_available(data.len(), 0, total, "container")?;
    if total < data.len() {
        return Err(Error::TotalLengthMismatch {
            declared: total_length,
            actual: data.len(),
        });
    }

    // JSON chunk
    ensure_available(total, GLB_HEADER_SIZE, CHUNK_HEADER_SIZE, "JSON chunk header")?;
    let json_length = cursor.read_u32::<LittleEndian>()? as usize;
    let json_type = cursor.read_u32::<LittleEndian>()?;
    if json_type != ChunkType::Json.code() {
        return Err(Error::UnexpectedChunkType {
            offset: GLB_HEADER_SIZE,
            expected: ChunkType::Json,
            found: json_type,
        });
    }

    ensure_available(total, JSON_CHUNK_DATA_OFFSET, json_length, "JSON chunk")?;
    let json_range = JSON_CHUNK_DATA_OFFSET..JSON_CHUNK_DATA_OFFSET + json_length;
    let json_text = decode_json_text(&data[json_range.clone()])?;
    let document: Value =
        serde_json::from_str(json_text).map_err(|e| Error::malformed(e.to_string()))?;
    if !document.is_object() {
        return Err(Error::malformed("JSON chunk is not an object"));
    }

    // Binary chunk region
    let binary_start = json_range.end;
    let binary_chunk = if binary_start < total {
        Some(read_binary_chunk(data, binary_start, total, options.strict_binary_chunk)?)
    } else {
        None
    };

    tracing::debug!(
        "Parsed GLB v{}: {} bytes, JSON chunk {} bytes, BIN region {} bytes",
        version,
        total,
        json_length,
        binary_chunk.as_ref().map_or(0, |c| c.region.len())
    );

    Ok(GlbContainer {
        header,
        json_range,
        json_text,
        document,
        binary_chunk,
        data,
    })
}

fn read_binary_chunk(data: &[u8], start: usize, total: usize, strict: bool) -> Result<BinaryChunk> {
    let region = start..total;
    let payload_start = start + CHUNK_HEADER_SIZE;

    if !strict {
        tracing::warn!("BIN chunk header at offset {} not validated", start);
        return Ok(BinaryChunk {
            region,
            payload: payload_start..total.max(payload_start),
            declared_length: None,
        });
    }

    ensure_available(total, start, CHUNK_HEADER_SIZE, "BIN chunk header")?;
    let mut cursor = Cursor::new(&data[start..payload_start]);
    let length = cursor.read_u32::<LittleEndian>()?;
    let chunk_type = cursor.read_u32::<LittleEndian>()?;
    if chunk_type != ChunkType::Bin.code() {
        return Err(Error::UnexpectedChunkType {
            offset: start,
            expected: ChunkType::Bin,
            found: chunk_type,
        });
    }
    ensure_available(total, payload_start, length as usize, "BIN chunk")?;

    Ok(BinaryChunk {
        region,
        payload: payload_start..payload_start + length as usize,
        declared_length: Some(length),
    })
}

/// Decode the JSON payload, dropping trailing padding.
///
/// Writers pad with spaces; some older ones pad with NUL, which a JSON parser
/// rejects.
fn decode_json_text(bytes: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::malformed(format!("JSON chunk is not UTF-8: {e}")))?;
    Ok(text.trim_end_matches([' ', '\0']))
}

/// Check that `length` bytes starting at `offset` fit inside `limit`.
pub(crate) fn ensure_available(
    limit: usize,
    offset: usize,
    length: usize,
    what: &'static str,
) -> Result<()> {
    match offset.checked_add(length) {
        Some(end) if end <= limit => Ok(()),
        _ => Err(Error::TruncatedInput {
            what,
            offset,
            length,
            available: limit.saturating_sub(offset),
        }),
    }
}
