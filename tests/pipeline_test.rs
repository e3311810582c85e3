//! Integration tests for the takeoff pipeline.

use std::sync::Arc;

use takeoff::abbrev::{locate_block, refine, LocatorOptions};
use takeoff::model::{AbbreviationMap, ItemRecord};
use takeoff::normalize::NormalizeError;
use takeoff::scan::CalloutScanner;
use takeoff::{extract_pages, CollectedDiagnostics, Diagnostic, Pipeline, TakeoffOptions};

fn drawing_set() -> Vec<&'static str> {
    vec![
        "MECHANICAL PLAN - LEVEL 1\n\
         HUH-13 @ 10'-6\" AFF\n\
         HUH-13\n\
         2\"ø HUH TO 3/4\"ø CWS\n\
         OM-2",
        "MECHANICAL PLAN - LEVEL 2\n\
         HUH-13\n\
         1/2\"ø CHWR 3'-4 1/2\"",
        "GENERAL NOTES\n\
         1. COORDINATE ALL WORK.\n\
         \n\
         ABBREVIATIONS\n\
         CHWR Chilled Water Return\n\
         CWS Cold Water Supply HUH Heating Unit Heater\n\
         OM Outside Makeup Air\n\
         \n\
         SHEET M-001",
    ]
}

fn failing_normalizer(
    _: &AbbreviationMap,
    _: &[&str],
) -> Result<AbbreviationMap, NormalizeError> {
    Err(NormalizeError::EmptyResponse)
}

#[test]
fn test_end_to_end_two_pages() {
    let takeoff = extract_pages(&["2\"ø HUH", "ABBREVIATIONS\nHUH Heating Unit Heater"]);

    assert_eq!(takeoff.abbreviations.len(), 1);
    assert_eq!(takeoff.abbreviations["HUH"], "Heating Unit Heater");
    assert_eq!(takeoff.items.len(), 1);

    let json = serde_json::to_value(&takeoff.items[0]).unwrap();
    assert_eq!(json["page"], 1);
    assert_eq!(json["callout"], "2\"ø HUH");
    assert_eq!(json["code"], "HUH");
    assert_eq!(json["description"], "Heating Unit Heater");
    assert_eq!(json["quantity"], 1);
    assert!(json["spec_ref"].is_null());
    assert!(json["dimension"].is_null());
    assert!(json["mounting"].is_null());
}

#[test]
fn test_identical_spec_refs_aggregate() {
    let takeoff = extract_pages(&["HUH-13\nHUH-13"]);
    assert_eq!(takeoff.items.len(), 1);
    assert_eq!(takeoff.items[0].quantity, 2);
    assert_eq!(takeoff.items[0].spec_ref.as_deref(), Some("HUH-13"));
}

#[test]
fn test_drawing_set() {
    let takeoff = extract_pages(&drawing_set());

    let abbreviations: Vec<(&str, &str)> = takeoff
        .abbreviations
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        abbreviations,
        vec![
            ("CHWR", "Chilled Water Return"),
            ("CWS", "Cold Water Supply"),
            ("HUH", "Heating Unit Heater"),
            ("OM", "Outside Makeup Air"),
        ]
    );

    let summary: Vec<(u32, &str, u32)> = takeoff
        .items
        .iter()
        .map(|i| (i.page, i.callout.as_str(), i.quantity))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "HUH-13", 2),
            (1, "2\"ø HUH", 1),
            (1, "3/4\"ø CWS", 1),
            (1, "OM-2", 1),
            (2, "HUH-13", 1),
            (2, "1/2\"ø CHWR", 1),
        ]
    );

    // The first HUH-13 on page 1 carries the line's dimension.
    assert_eq!(takeoff.items[0].dimension.as_deref(), Some("10'-6\""));
    assert_eq!(takeoff.items[5].dimension.as_deref(), Some("3'-4 1/2\""));
    assert_eq!(
        takeoff.items[5].description.as_deref(),
        Some("Chilled Water Return")
    );
}

#[test]
fn test_count_conservation() {
    let pages = drawing_set();
    let scan = CalloutScanner::default().scan(&pages);
    let takeoff = extract_pages(&pages);

    let total: u32 = takeoff.items.iter().map(|i| i.quantity).sum();
    assert_eq!(total as usize, scan.records.len());
    for item in &takeoff.items {
        let count = scan
            .records
            .iter()
            .filter(|r: &&ItemRecord| r.key() == (item.page, item.callout.as_str()))
            .count();
        assert_eq!(item.quantity as usize, count);
    }
}

#[test]
fn test_normalizer_failure_falls_back_to_refined_map() {
    let pages = drawing_set();
    let sink = Arc::new(CollectedDiagnostics::new());
    let pipeline = Pipeline::default()
        .with_normalizer(failing_normalizer)
        .with_diagnostics(sink.clone());

    let (takeoff, stats) = pipeline.run_with_stats(&pages).unwrap();
    let baseline = Pipeline::default().run_pages(&pages);

    assert!(!stats.normalized);
    assert_eq!(takeoff, baseline);
    assert_eq!(takeoff.items.len(), 6);

    let diagnostics = sink.drain();
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0],
        Diagnostic::NormalizationFailed(NormalizeError::EmptyResponse)
    ));
}

#[test]
fn test_refiner_matches_pipeline_stages() {
    let pages = drawing_set();
    let scan = CalloutScanner::default().scan(&pages);
    let block = locate_block(&pages, &scan.codes, &LocatorOptions::default());

    assert_eq!(block.page, Some(3));
    assert_eq!(
        block.text,
        "CHWR Chilled Water Return CWS Cold Water Supply HUH Heating Unit Heater OM Outside Makeup Air"
    );
    let refined = refine(&block.raw, &block.text);
    assert_eq!(refined, refine(&block.raw, &block.text));
    assert_eq!(refined, extract_pages(&pages).abbreviations);
}

#[test]
fn test_unknown_code_has_empty_description() {
    let takeoff = extract_pages(&["2\"ø XYZ", "ABBREVIATIONS\nHUH Heating Unit Heater"]);
    assert_eq!(takeoff.items[0].code.as_deref(), Some("XYZ"));
    // XYZ is not in the block, so it falls back to the whole block text.
    assert_eq!(takeoff.abbreviations["XYZ"], "HUH Heating Unit Heater");

    let takeoff = extract_pages(&["2\"ø XYZ"]);
    assert_eq!(takeoff.items[0].description.as_deref(), Some(""));
}

#[test]
fn test_diameter_only_code_rule() {
    let options = TakeoffOptions::new().with_code_rules([takeoff::pattern::CodeRule::Diameter]);
    let takeoff = Pipeline::new(options).run_pages(&["HUH-13\n2\"ø OM"]);

    assert!(takeoff.items[0].code.is_none());
    assert!(takeoff.items[0].description.is_none());
    assert_eq!(takeoff.abbreviations.len(), 1);
    assert!(takeoff.abbreviations.contains_key("OM"));
}
