//! Benchmarks for takeoff extraction.
//!
//! Run with: cargo bench
//!
//! Synthetic drawing text: every page carries a mix of callouts and
//! dimensions, and the last page carries the abbreviations table.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use takeoff::abbrev::refine;
use takeoff::model::AbbreviationMap;
use takeoff::Pipeline;

const CODES: &[(&str, &str)] = &[
    ("CHWR", "Chilled Water Return"),
    ("CHWS", "Chilled Water Supply"),
    ("CWS", "Cold Water Supply"),
    ("FCU", "Fan Coil Unit"),
    ("HUH", "Heating Unit Heater"),
    ("VAV", "Variable Air Volume"),
];

fn create_pages(page_count: usize) -> Vec<String> {
    let mut pages: Vec<String> = (0..page_count)
        .map(|p| {
            (0..60)
                .map(|line| {
                    let (code, _) = CODES[(p + line) % CODES.len()];
                    format!("{}-{} @ {}'-{}\" AFF  3/4\"ø {}", code, line % 20, line, p % 12, code)
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();

    let table: Vec<String> = CODES.iter().map(|(c, d)| format!("{} {}", c, d)).collect();
    pages.push(format!("ABBREVIATIONS\n{}\n", table.join("\n")));
    pages
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = Pipeline::default();

    let small = create_pages(5);
    c.bench_function("pipeline_5_pages", |b| {
        b.iter(|| pipeline.run_pages(black_box(&small)))
    });

    let large = create_pages(100);
    c.bench_function("pipeline_100_pages", |b| {
        b.iter(|| pipeline.run_pages(black_box(&large)))
    });
}

fn bench_refine(c: &mut Criterion) {
    let text: String = CODES
        .iter()
        .map(|(c, d)| format!("{} {}", c, d))
        .collect::<Vec<_>>()
        .join(" ");
    let raw: AbbreviationMap = CODES
        .iter()
        .map(|(c, _)| (c.to_string(), text.clone()))
        .collect();

    c.bench_function("refine_6_codes", |b| {
        b.iter(|| refine(black_box(&raw), black_box(&text)))
    });
}

criterion_group!(benches, bench_pipeline, bench_refine);
criterion_main!(benches);
