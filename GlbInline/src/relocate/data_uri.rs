//! `data:` URI encoding
//!
//! Only the `data:<mime>;base64,<payload>` form is produced. Decoding also
//! accepts unencoded payloads so existing URIs can be inspected.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

const DATA_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// A decoded data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type, empty if the URI omitted it
    pub mime_type: String,
    /// Decoded payload
    pub data: Vec<u8>,
}

/// Build a base64 data URI for `bytes`.
#[must_use]
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let payload = BASE64.encode(bytes);
    let mut uri = String::with_capacity(DATA_SCHEME.len() + mime_type.len() + 8 + payload.len());
    uri.push_str(DATA_SCHEME);
    uri.push_str(mime_type);
    uri.push_str(BASE64_MARKER);
    uri.push(',');
    uri.push_str(&payload);
    uri
}

/// Whether `mime_type` can be written into a data URI header as-is.
#[must_use]
pub fn is_valid_mime_type(mime_type: &str) -> bool {
    !mime_type.is_empty()
        && mime_type.contains('/')
        && !mime_type.contains([';', ','])
        && !mime_type.contains(char::is_whitespace)
}

/// Whether `uri` uses the `data:` scheme.
#[must_use]
pub fn is_data_uri(uri: &str) -> bool {
    uri.get(..DATA_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(DATA_SCHEME))
}

/// Decode a data URI.
///
/// Returns `None` if `uri` is not a data URI or its base64 payload is invalid.
#[must_use]
pub fn decode_data_uri(uri: &str) -> Option<DataUri> {
    if !is_data_uri(uri) {
        return None;
    }
    let (meta, payload) = uri[DATA_SCHEME.len()..].split_once(',')?;

    let (media, is_base64) = match meta.strip_suffix(BASE64_MARKER) {
        Some(media) => (media, true),
        None => (meta, false),
    };
    // Drop parameters such as ";charset=utf-8"
    let mime_type = media.split(';').next().unwrap_or_default().to_string();

    let data = if is_base64 {
        BASE64.decode(payload).ok()?
    } else {
        payload.as_bytes().to_vec()
    };

    Some(DataUri { mime_type, data })
}
