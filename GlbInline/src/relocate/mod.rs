//! Image relocation
//!
//! Rewrites every image that points into the BIN chunk through a buffer view
//! so it carries its bytes inline as a base64 `data:` URI instead. The buffer
//! view entries and the BIN chunk itself are left alone; only `images` changes.
//!
//! Relocation works on a copy of the document. On error the caller's document
//! is untouched and no partial result is returned.

mod data_uri;

pub use data_uri::{DataUri, decode_data_uri, encode_data_uri, is_data_uri, is_valid_mime_type};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::glb::reader::ensure_available;
use crate::glb::{BinaryChunk, GlbContainer};
use crate::options::InlineOptions;

/// One image moved from a buffer view into a data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocatedImage {
    /// Index into `images`
    pub image: usize,
    /// The buffer view the bytes came from
    pub buffer_view: usize,
    pub mime_type: String,
    pub byte_length: usize,
}

/// Result of relocating a document
#[derive(Debug, Clone)]
pub struct Relocation {
    /// The rewritten document
    pub document: Value,
    /// Images that were rewritten, in document order
    pub relocated: Vec<RelocatedImage>,
}

impl Relocation {
    /// Whether any image was rewritten
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.relocated.is_empty()
    }

    /// Total bytes moved into data URIs (before base64 expansion)
    #[must_use]
    pub fn inlined_bytes(&self) -> usize {
        self.relocated.iter().map(|r| r.byte_length).sum()
    }
}

/// The subset of a glTF buffer view the relocator reads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    buffer: Option<u64>,
    #[serde(default)]
    byte_offset: u64,
    byte_length: Option<u64>,
}

/// Relocate the images of a parsed container.
pub fn relocate_images(container: &GlbContainer<'_>, options: &InlineOptions) -> Result<Relocation> {
    relocate_document(
        &container.document,
        container.data(),
        container.binary_chunk.as_ref(),
        options,
    )
}

/// Relocate the images of `document`, reading image bytes from `data`.
///
/// `data` is the complete GLB buffer the document was parsed from and
/// `binary_chunk` the BIN chunk located in it, if any.
///
/// Images that already carry a string `uri` keep it, so running this on its
/// own output changes nothing. A stale `bufferView` next to such a `uri` is
/// dropped.
///
/// # Errors
///
/// Returns [`Error::UnsupportedBuffer`] if an image's buffer view is missing,
/// targets a buffer other than 0, has no `byteLength`, or there is no BIN
/// chunk to read from.
/// Returns [`Error::TruncatedInput`] if a buffer view reaches past the BIN
/// payload.
/// Returns [`Error::MalformedJson`] if `images` or `bufferViews` have the
/// wrong shape, an image `uri` is neither a string nor null, or an image
/// `mimeType` cannot be written into a data URI.
pub fn relocate_document(
    document: &Value,
    data: &[u8],
    binary_chunk: Option<&BinaryChunk>,
    options: &InlineOptions,
) -> Result<Relocation> {
    let mut output = document.clone();
    let mut relocated = Vec::new();

    let images = match output.get_mut("images") {
        None => None,
        Some(Value::Array(images)) => Some(images),
        Some(_) => return Err(Error::malformed("`images` is not an array")),
    };

    if let Some(images) = images {
        let buffer_views = buffer_views(document)?;

        for (index, image) in images.iter_mut().enumerate() {
            let Value::Object(entry) = image else {
                return Err(Error::malformed(format!("image {index} is not an object")));
            };
            if let Some(result) =
                relocate_entry(index, entry, buffer_views, data, binary_chunk, options)?
            {
                relocated.push(result);
            }
        }
    }

    Ok(Relocation {
        document: output,
        relocated,
    })
}

fn buffer_views(document: &Value) -> Result<&[Value]> {
    match document.get("bufferViews") {
        None => Ok(&[]),
        Some(Value::Array(views)) => Ok(views.as_slice()),
        Some(_) => Err(Error::malformed("`bufferViews` is not an array")),
    }
}

fn relocate_entry(
    index: usize,
    entry: &mut Map<String, Value>,
    buffer_views: &[Value],
    data: &[u8],
    binary_chunk: Option<&BinaryChunk>,
    options: &InlineOptions,
) -> Result<Option<RelocatedImage>> {
    match entry.get("uri") {
        None | Some(Value::Null) => {}
        Some(Value::String(_)) => {
            if entry.contains_key("bufferView") {
                tracing::warn!("Image {} has both uri and bufferView, keeping uri", index);
                entry.shift_remove("bufferView");
                entry.shift_remove("mimeType");
            }
            return Ok(None);
        }
        Some(other) => {
            return Err(Error::malformed(format!("image {index} uri {other} is not a string")));
        }
    }
    let Some(view_ref) = entry.get("bufferView") else {
        return Ok(None);
    };

    let view_index = view_ref
        .as_u64()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| Error::unsupported(index, format!("bufferView {view_ref} is not an index")))?;
    let view_value = buffer_views.get(view_index).ok_or_else(|| {
        Error::unsupported(index, format!("buffer view {view_index} does not exist"))
    })?;
    let view = BufferView::deserialize(view_value)
        .map_err(|e| Error::malformed(format!("buffer view {view_index}: {e}")))?;

    let bytes = read_view_bytes(index, view_index, &view, data, binary_chunk)?;

    let mime_type = match entry.get("mimeType") {
        None | Some(Value::Null) => options.default_mime_type.clone(),
        Some(Value::String(mime)) if is_valid_mime_type(mime) => mime.clone(),
        Some(other) => {
            return Err(Error::malformed(format!(
                "image {index} mimeType {other} is not a valid MIME type"
            )));
        }
    };

    entry.shift_remove("bufferView");
    entry.shift_remove("mimeType");
    entry.insert("uri".to_string(), Value::String(encode_data_uri(&mime_type, bytes)));

    tracing::debug!(
        "Image {} inlined from buffer view {} ({}, {} bytes)",
        index,
        view_index,
        mime_type,
        bytes.len()
    );

    Ok(Some(RelocatedImage {
        image: index,
        buffer_view: view_index,
        mime_type,
        byte_length: bytes.len(),
    }))
}

/// Slice the bytes a buffer view covers out of the BIN payload.
fn read_view_bytes<'a>(
    image: usize,
    view_index: usize,
    view: &BufferView,
    data: &'a [u8],
    binary_chunk: Option<&BinaryChunk>,
) -> Result<&'a [u8]> {
    match view.buffer {
        Some(0) => {}
        Some(buffer) => {
            return Err(Error::unsupported(
                image,
                format!("buffer view {view_index} targets buffer {buffer}, only buffer 0 is embedded"),
            ));
        }
        None => {
            return Err(Error::unsupported(
                image,
                format!("buffer view {view_index} has no buffer index"),
            ));
        }
    }
    let byte_length = view.byte_length.ok_or_else(|| {
        Error::unsupported(image, format!("buffer view {view_index} has no byteLength"))
    })?;
    let chunk = binary_chunk
        .ok_or_else(|| Error::unsupported(image, "container has no BIN chunk"))?;

    let too_large = || Error::TruncatedInput {
        what: "image buffer view",
        offset: chunk.payload_start(),
        length: usize::MAX,
        available: chunk.payload.len(),
    };
    let offset = usize::try_from(view.byte_offset).map_err(|_| too_large())?;
    let length = usize::try_from(byte_length).map_err(|_| too_large())?;
    let start = chunk.payload_start().checked_add(offset).ok_or_else(too_large)?;

    ensure_available(chunk.payload.end.min(data.len()), start, length, "image buffer view")?;
    Ok(&data[start..start + length])
}
