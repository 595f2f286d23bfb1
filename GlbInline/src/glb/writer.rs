//! GLB container writing

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use serde_json::Value;

use super::{ChunkType, GLB_MAGIC, JSON_CHUNK_DATA_OFFSET, JSON_PADDING_BYTE, padding_for};
use crate::error::{Error, Result};

/// Repack a glTF document and an existing BIN chunk region into a GLB buffer.
///
/// The document is written as compact JSON padded with spaces to a 4-byte
/// boundary. `binary_region` is appended verbatim, including its own chunk
/// header; pass an empty slice when the container has no BIN chunk.
///
/// The total length field always equals the returned buffer's length.
///
/// # Errors
/// Returns [`Error::ContainerTooLarge`] if the result does not fit the 32-bit
/// length fields.
pub fn write_glb(version: u32, document: &Value, binary_region: &[u8]) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(document).map_err(|e| Error::malformed(e.to_string()))?;

    let json_padding = padding_for(json.len());
    let json_chunk_len = json.len() + json_padding;
    let total_len = JSON_CHUNK_DATA_OFFSET + json_chunk_len + binary_region.len();

    let json_chunk_len_u32 = u32::try_from(json_chunk_len)
        .map_err(|_| Error::ContainerTooLarge { length: json_chunk_len })?;
    let total_len_u32 =
        u32::try_from(total_len).map_err(|_| Error::ContainerTooLarge { length: total_len })?;

    let mut output = Vec::with_capacity(total_len);

    // GLB header
    output.write_u32::<LittleEndian>(GLB_MAGIC)?;
    output.write_u32::<LittleEndian>(version)?;
    output.write_u32::<LittleEndian>(total_len_u32)?;

    // JSON chunk
    output.write_u32::<LittleEndian>(json_chunk_len_u32)?;
    output.write_u32::<LittleEndian>(ChunkType::Json.code())?;
    output.write_all(&json)?;
    output.resize(output.len() + json_padding, JSON_PADDING_BYTE);

    // Binary chunk, untouched
    output.write_all(binary_region)?;

    debug_assert_eq!(output.len(), total_len);
    tracing::debug!(
        "Wrote GLB: {} bytes, JSON chunk {} bytes (+{} padding)",
        total_len,
        json_chunk_len,
        json_padding
    );

    Ok(output)
}
