//! Shared fixtures: GLB buffers assembled in code.

#![allow(dead_code)]

use glbinline::glb::{GLB_MAGIC, GLB_VERSION};

/// Build a GLB buffer from JSON text and an optional BIN payload.
///
/// The JSON is space padded and the payload zero padded to 4 bytes, the way
/// exporters write them.
pub fn build_glb(json: &str, bin: Option<&[u8]>) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let mut bin = bin.map(<[u8]>::to_vec);
    if let Some(bin) = bin.as_mut() {
        while bin.len() % 4 != 0 {
            bin.push(0);
        }
    }

    let bin_chunk_len = bin.as_ref().map_or(0, |b| 8 + b.len());
    let total = 12 + 8 + json.len() + bin_chunk_len;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    if let Some(bin) = bin {
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&bin);
    }
    out
}

pub fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}

/// Parse the JSON chunk of a GLB buffer.
pub fn json_chunk(data: &[u8]) -> serde_json::Value {
    let len = read_u32(data, 12) as usize;
    serde_json::from_slice(&data[20..20 + len]).unwrap()
}

/// The concrete single-image fixture: one PNG-typed view over 4 bytes.
pub const PNG_SIGNATURE_JSON: &str = r#"{"images":[{"mimeType":"image/png","bufferView":0}],"bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":4}]}"#;
pub const PNG_SIGNATURE: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];
