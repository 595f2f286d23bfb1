mod common;

use common::{PNG_SIGNATURE, PNG_SIGNATURE_JSON, build_glb, json_chunk, read_u32};
use glbinline::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn assert_well_formed(output: &[u8]) {
    assert_eq!(&output[0..4], b"glTF");
    assert_eq!(read_u32(output, 8) as usize, output.len());
    assert_eq!(read_u32(output, 12) % 4, 0);
    assert_eq!(&output[16..20], b"JSON");
}

#[test]
fn test_png_signature_scenario() {
    let input = build_glb(PNG_SIGNATURE_JSON, Some(&PNG_SIGNATURE));
    let output = transform(&input).unwrap();

    assert_well_formed(&output);
    let doc = json_chunk(&output);
    assert_eq!(doc["images"][0], json!({"uri": "data:image/png;base64,iVBORw=="}));
    assert!(doc["images"][0].get("bufferView").is_none());
    assert_eq!(
        doc["bufferViews"],
        json!([{"buffer": 0, "byteOffset": 0, "byteLength": 4}])
    );
}

#[test]
fn test_binary_chunk_preserved_byte_for_byte() {
    let input = build_glb(PNG_SIGNATURE_JSON, Some(&PNG_SIGNATURE));
    let input_region = parse_glb(&input).unwrap().binary_region_bytes().to_vec();

    let output = transform(&input).unwrap();
    let container = parse_glb(&output).unwrap();

    assert_eq!(container.binary_region_bytes(), input_region.as_slice());
    assert!(output.ends_with(&input_region));
}

#[test]
fn test_byte_exact_payloads() {
    let payload: Vec<u8> = (0u8..=63).collect();
    let json = r#"{
        "asset": {"version": "2.0"},
        "images": [
            {"bufferView": 1, "mimeType": "image/jpeg"},
            {"bufferView": 0},
            {"uri": "external.png"}
        ],
        "bufferViews": [
            {"buffer": 0, "byteOffset": 0, "byteLength": 10},
            {"buffer": 0, "byteOffset": 17, "byteLength": 40}
        ]
    }"#;
    let input = build_glb(json, Some(&payload));
    let bin_start = 20 + read_u32(&input, 12) as usize;

    let (output, report) = transform_with(&input, &InlineOptions::default()).unwrap();
    assert_well_formed(&output);
    assert_eq!(report.relocated.len(), 2);
    assert_eq!(report.output_size, output.len());

    let doc = json_chunk(&output);
    let first = decode_data_uri(doc["images"][0]["uri"].as_str().unwrap()).unwrap();
    assert_eq!(first.mime_type, "image/jpeg");
    assert_eq!(first.data, input[bin_start + CHUNK_HEADER_SIZE + 17..][..40].to_vec());

    let second = decode_data_uri(doc["images"][1]["uri"].as_str().unwrap()).unwrap();
    assert_eq!(second.mime_type, "image/png");
    assert_eq!(second.data, input[bin_start + CHUNK_HEADER_SIZE..][..10].to_vec());

    assert_eq!(doc["images"][2], json!({"uri": "external.png"}));
    assert_eq!(doc["asset"], json!({"version": "2.0"}));
}

#[test]
fn test_transform_is_idempotent() {
    let input = build_glb(PNG_SIGNATURE_JSON, Some(&PNG_SIGNATURE));
    let once = transform(&input).unwrap();
    let twice = transform(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_no_images_passes_through() {
    let json = r#"{"asset":{"version":"2.0","generator":"test"},"scene":0,"scenes":[{"nodes":[]}]}"#;
    let input = build_glb(json, None);

    let output = transform(&input).unwrap();
    assert_well_formed(&output);
    assert_eq!(json_chunk(&output), json_chunk(&input));

    let input = build_glb(r#"{"images":[],"extras":{"a":[1,2.5,"x"]}}"#, Some(&[1, 2, 3, 4]));
    let output = transform(&input).unwrap();
    assert_eq!(json_chunk(&output), json_chunk(&input));
}

#[test]
fn test_version_passed_through() {
    let mut input = build_glb(PNG_SIGNATURE_JSON, Some(&PNG_SIGNATURE));
    input[4..8].copy_from_slice(&9u32.to_le_bytes());
    let output = transform(&input).unwrap();
    assert_eq!(read_u32(&output, 4), 9);
}

#[test]
fn test_zero_magic_is_format_error() {
    let mut input = build_glb(PNG_SIGNATURE_JSON, Some(&PNG_SIGNATURE));
    input[0..4].copy_from_slice(&0u32.to_le_bytes());
    let err = transform(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_non_zero_buffer_is_unsupported() {
    let json = r#"{"images":[{"mimeType":"image/png","bufferView":0}],"bufferViews":[{"buffer":1,"byteOffset":0,"byteLength":4}]}"#;
    let input = build_glb(json, Some(&PNG_SIGNATURE));
    let err = transform(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedBuffer);
}

#[test]
fn test_json_length_past_end_is_truncated() {
    let mut input = build_glb(PNG_SIGNATURE_JSON, Some(&PNG_SIGNATURE));
    let too_long = input.len() as u32;
    input[12..16].copy_from_slice(&too_long.to_le_bytes());
    let err = transform(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
}

#[test]
fn test_missing_bin_chunk_is_unsupported() {
    let input = build_glb(PNG_SIGNATURE_JSON, None);
    let err = transform(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedBuffer);
}

#[test]
fn test_wrong_json_chunk_type() {
    let mut input = build_glb(PNG_SIGNATURE_JSON, Some(&PNG_SIGNATURE));
    input[16..20].copy_from_slice(b"JSOX");
    let err = transform(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ChunkType);
}

#[test]
fn test_lenient_mode_skips_bin_header_checks() {
    let mut input = build_glb(PNG_SIGNATURE_JSON, Some(&PNG_SIGNATURE));
    let bin_start = 20 + read_u32(&input, 12) as usize;
    input[bin_start + 4..bin_start + 8].copy_from_slice(b"XXXX");

    let err = transform(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ChunkType);

    let options = InlineOptions::default().lenient_binary_chunk();
    let (output, _) = transform_with(&input, &options).unwrap();
    let doc = json_chunk(&output);
    assert_eq!(doc["images"][0]["uri"], "data:image/png;base64,iVBORw==");
    // Unvalidated region is still copied verbatim
    assert!(output.ends_with(&input[bin_start..]));
}

#[test]
fn test_odd_json_lengths_always_aligned() {
    for name_len in 0..8 {
        let json = format!(
            r#"{{"asset":{{"version":"2.0","generator":"{}"}},"images":[{{"bufferView":0}}],"bufferViews":[{{"buffer":0,"byteLength":4}}]}}"#,
            "g".repeat(name_len)
        );
        let input = build_glb(&json, Some(&PNG_SIGNATURE));
        let output = transform(&input).unwrap();
        assert_well_formed(&output);
    }
}

#[test]
fn test_summary_before_and_after() {
    let input = build_glb(PNG_SIGNATURE_JSON, Some(&PNG_SIGNATURE));
    let before = summarize(&input).unwrap();
    assert_eq!(before.pending_images(), 1);
    assert_eq!(before.binary_chunk_type, Some(ChunkType::Bin));
    assert_eq!(before.binary_region_length, 12);

    let after = summarize(&transform(&input).unwrap()).unwrap();
    assert_eq!(after.pending_images(), 0);
    assert_eq!(
        after.images,
        vec![ImageSource::DataUri {
            mime_type: "image/png".to_string(),
            byte_length: Some(4),
        }]
    );
    assert_eq!(after.binary_region_length, before.binary_region_length);
}

#[test]
fn test_null_uri_image_is_inlined() {
    let json = r#"{"images":[{"uri":null,"bufferView":0}],"bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":4}]}"#;
    let input = build_glb(json, Some(&PNG_SIGNATURE));

    let output = transform(&input).unwrap();
    assert_well_formed(&output);
    assert_eq!(
        json_chunk(&output)["images"][0],
        json!({"uri": "data:image/png;base64,iVBORw=="})
    );
    assert_eq!(summarize(&output).unwrap().pending_images(), 0);
}

#[test]
fn test_stale_buffer_view_dropped_from_uri_image() {
    let json = r#"{"images":[{"uri":"x.png","bufferView":0,"mimeType":"image/png"}],"bufferViews":[{"buffer":0,"byteLength":4}]}"#;
    let input = build_glb(json, Some(&PNG_SIGNATURE));

    let (output, report) = transform_with(&input, &InlineOptions::default()).unwrap();
    assert!(report.relocated.is_empty());
    assert_eq!(json_chunk(&output)["images"][0], json!({"uri": "x.png"}));
}

#[test]
fn test_mime_type_that_breaks_data_uri_rejected() {
    let json = r#"{"images":[{"bufferView":0,"mimeType":"image/png,AAAA"}],"bufferViews":[{"buffer":0,"byteLength":4}]}"#;
    let input = build_glb(json, Some(&PNG_SIGNATURE));
    let err = transform(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedJson);
}
