//! Container inspection
//!
//! Describes a GLB buffer without rewriting it: header fields, chunk sizes,
//! and where each image gets its bytes from.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::glb::{ChunkType, parse_glb_with};
use crate::options::InlineOptions;
use crate::relocate::{decode_data_uri, is_data_uri};

/// Where an image entry's bytes live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Stored in the BIN chunk, referenced through a buffer view
    BufferView {
        view: usize,
        mime_type: Option<String>,
        /// `byteLength` of the view, if it resolves
        byte_length: Option<u64>,
    },
    /// Inline `data:` URI
    DataUri {
        mime_type: String,
        /// Decoded payload size, `None` if the payload does not decode
        byte_length: Option<usize>,
    },
    /// Reference to an external resource
    External { uri: String },
    /// Neither `uri` nor `bufferView`
    Missing,
}

impl ImageSource {
    /// Whether the image still depends on the BIN chunk
    #[must_use]
    pub fn needs_relocation(&self) -> bool {
        matches!(self, ImageSource::BufferView { .. })
    }
}

/// Overview of a GLB container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlbSummary {
    pub version: u32,
    pub total_length: u32,
    pub json_chunk_length: usize,
    /// Size of the BIN region including its chunk header, 0 if absent
    pub binary_region_length: usize,
    /// Chunk type of the BIN region, `None` if absent or unknown
    pub binary_chunk_type: Option<ChunkType>,
    pub buffer_view_count: usize,
    pub images: Vec<ImageSource>,
}

impl GlbSummary {
    /// Number of images still backed by buffer views
    #[must_use]
    pub fn pending_images(&self) -> usize {
        self.images.iter().filter(|i| i.needs_relocation()).count()
    }
}

/// Summarize a GLB buffer.
///
/// Parsing uses lenient BIN chunk handling so that containers with odd BIN
/// headers can still be described.
pub fn summarize(data: &[u8]) -> Result<GlbSummary> {
    let options = InlineOptions::default().lenient_binary_chunk();
    let container = parse_glb_with(data, &options)?;
    let document = &container.document;

    let buffer_views = match document.get("bufferViews") {
        None => &[][..],
        Some(Value::Array(views)) => views.as_slice(),
        Some(_) => return Err(Error::malformed("`bufferViews` is not an array")),
    };
    let images = match document.get("images") {
        None => Vec::new(),
        Some(Value::Array(images)) => images
            .iter()
            .map(|image| classify_image(image, buffer_views))
            .collect(),
        Some(_) => return Err(Error::malformed("`images` is not an array")),
    };

    let region = container.binary_region_bytes();
    let binary_chunk_type = region
        .get(4..8)
        .and_then(|code| code.try_into().ok())
        .map(u32::from_le_bytes)
        .and_then(ChunkType::from_u32);

    Ok(GlbSummary {
        version: container.header.version,
        total_length: container.header.total_length,
        json_chunk_length: container.json_chunk_length(),
        binary_region_length: region.len(),
        binary_chunk_type,
        buffer_view_count: buffer_views.len(),
        images,
    })
}

fn classify_image(image: &Value, buffer_views: &[Value]) -> ImageSource {
    if let Some(uri) = image.get("uri").and_then(Value::as_str) {
        if is_data_uri(uri) {
            let decoded = decode_data_uri(uri);
            let mime_type = decoded
                .as_ref()
                .map_or_else(|| declared_mime_type(uri), |d| d.mime_type.clone());
            return ImageSource::DataUri {
                mime_type,
                byte_length: decoded.map(|d| d.data.len()),
            };
        }
        return ImageSource::External {
            uri: uri.to_string(),
        };
    }

    match image
        .get("bufferView")
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
    {
        Some(view) => ImageSource::BufferView {
            view,
            mime_type: image.get("mimeType").and_then(Value::as_str).map(String::from),
            byte_length: buffer_views
                .get(view)
                .and_then(|v| v.get("byteLength"))
                .and_then(Value::as_u64),
        },
        None => ImageSource::Missing,
    }
}

/// Media type named in a data URI header, even if the payload is broken
fn declared_mime_type(uri: &str) -> String {
    uri.get("data:".len()..)
        .and_then(|rest| rest.split([';', ',']).next())
        .unwrap_or_default()
        .to_string()
}
