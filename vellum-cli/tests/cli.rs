//! End-to-end tests for the vellum command line.
//!
//! Each test writes its inputs to a temporary directory, runs the same entry
//! point as the binary and inspects the written output.

use std::fs;

use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;
use vellum_cli::{load_style, run, Args};
use vellum::TableBorderSelector;

const TABLE: &str = "\
| Name | Qty |
|:-----|----:|
| pear | 3 |
| fig | << |
";

fn args(dir: &TempDir, extra: &[&str]) -> Args {
    let input = dir.path().join("in.md");
    fs::write(&input, TABLE).unwrap();
    let mut argv = vec!["vellum".to_string(), input.display().to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::parse_from(argv)
}

#[test]
fn bounds_output_describes_every_table() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("bounds.json");
    let out_arg = out.display().to_string();
    run(&args(&dir, &["--format", "bounds", "--output", &out_arg])).unwrap();

    let dump: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let tables = dump.as_array().unwrap();
    assert_eq!(tables.len(), 1);
    let table = &tables[0];
    assert_eq!(table["rows"].as_array().unwrap().len(), 3);
    assert_eq!(table["columns"].as_array().unwrap().len(), 2);

    // "fig" spans both columns, so its placeholder is not a cell.
    let labels: Vec<&str> = table["cells"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["A1", "A2", "A3", "B1", "B2"]);
}

#[test]
fn svg_output_is_a_document() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("table.svg");
    let out_arg = out.display().to_string();
    run(&args(&dir, &["--output", &out_arg])).unwrap();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(">pear</text>"));
    assert!(svg.contains("clip-path"));
}

#[test]
fn style_file_is_overridden_by_flags() {
    let dir = TempDir::new().unwrap();
    let style = dir.path().join("style.json");
    fs::write(&style, r#"{ "borders": "inside_borders", "border_width": 3 }"#).unwrap();
    let style_arg = style.display().to_string();

    let from_file = load_style(&args(&dir, &["--style", &style_arg])).unwrap();
    assert_eq!(from_file.border.visible_borders, TableBorderSelector::InsideBorders);
    assert_eq!(from_file.border.width, 3.0);

    let overridden =
        load_style(&args(&dir, &["--style", &style_arg, "--borders", "outside", "--border-width", "2"]))
            .unwrap();
    assert_eq!(overridden.border.visible_borders, TableBorderSelector::OutsideBorders);
    assert_eq!(overridden.border.width, 2.0);
}

#[test]
fn invalid_style_is_reported() {
    let dir = TempDir::new().unwrap();
    let style = dir.path().join("style.json");
    fs::write(&style, r#"{ "border_color": "not-a-color" }"#).unwrap();
    let style_arg = style.display().to_string();

    let err = load_style(&args(&dir, &["--style", &style_arg])).unwrap_err();
    assert!(format!("{err:#}").contains("invalid color"), "{err:#}");
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.md").display().to_string();
    let err = run(&Args::parse_from(["vellum", missing.as_str()])).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read"));
}
