//! Integration tests for takeoff JSON output.

use takeoff::render::{to_json, write_json, JsonFormat};
use takeoff::{extract_pages, Takeoff};

#[test]
fn test_output_document_shape() {
    let takeoff = extract_pages(&[
        "HUH-13 4'-0\"\nHUH-13",
        "ABBREVIATIONS\nHUH Heating Unit Heater",
    ]);
    let json: serde_json::Value =
        serde_json::from_str(&to_json(&takeoff, JsonFormat::Compact).unwrap()).unwrap();

    let top: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(top, vec!["abbreviations", "items"]);
    assert_eq!(json["abbreviations"]["HUH"], "Heating Unit Heater");

    let item = &json["items"][0];
    assert_eq!(item["page"], 1);
    assert_eq!(item["callout"], "HUH-13");
    assert_eq!(item["spec_ref"], "HUH-13");
    assert_eq!(item["dimension"], "4'-0\"");
    assert_eq!(item["quantity"], 2);
    assert!(item["quantity"].is_u64());
    assert!(item["mounting"].is_null());
}

#[test]
fn test_write_json_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample_output.json");
    let takeoff = extract_pages(&["2\"ø HUH"]);

    write_json(&takeoff, &path, JsonFormat::Pretty).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"callout\": \"2\\\"ø HUH\""));

    let read: Takeoff = serde_json::from_str(&text).unwrap();
    assert_eq!(read, takeoff);
}

#[test]
fn test_write_json_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out.json");
    let result = write_json(&Takeoff::default(), &path, JsonFormat::Pretty);
    assert!(matches!(result, Err(takeoff::Error::Io(_))));
}
