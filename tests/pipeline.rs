use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use fm_moneyball::cache::CleanCache;
use fm_moneyball::export::{
    SHORTLIST_COLUMNS, write_canonical_csv, write_shortlist_csv, write_shortlist_xlsx,
};
use fm_moneyball::loader::{TableFormat, load_table, parse_table};
use fm_moneyball::{ShortlistRequest, WeightSpec, build_shortlist, clean};

fn repo_file(parts: &[&str]) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    for part in parts {
        path.push(part);
    }
    path
}

fn csv_fixture() -> PathBuf {
    repo_file(&["tests", "fixtures", "scouting_export.csv"])
}

fn weights() -> WeightSpec {
    WeightSpec::load(&repo_file(&["data", "weights.json"])).expect("bundled weights should load")
}

#[test]
fn cache_reuses_cleaned_tables_for_identical_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let copy = dir.path().join("renamed.csv");
    fs::copy(csv_fixture(), &copy).expect("fixture copy");

    let mut cache = CleanCache::new();
    let first = cache.load(&csv_fixture()).expect("fixture should clean");
    let second = cache.load(&copy).expect("copy should clean");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!((cache.hits(), cache.misses()), (1, 1));

    let html = cache
        .load(&repo_file(&["tests", "fixtures", "scouting_export.html"]))
        .expect("html fixture should clean");
    assert_eq!(html.len(), 3);
    assert_eq!(cache.len(), 2);
}

#[test]
fn load_table_detects_format_from_the_file() {
    let csv = load_table(&csv_fixture()).expect("csv fixture should load");
    assert_eq!(csv.headers()[0], "Name");
    let html = load_table(&repo_file(&["tests", "fixtures", "scouting_export.html"]))
        .expect("html fixture should load");
    assert_eq!(html.headers()[2], "Best Pos");
}

#[test]
fn canonical_csv_cleans_back_to_the_same_table() {
    let table = clean(&load_table(&csv_fixture()).expect("fixture should load"))
        .expect("fixture should clean");

    let mut out = Vec::new();
    write_canonical_csv(&mut out, &table).expect("canonical csv should write");
    let text = String::from_utf8(out).expect("csv output is utf-8");
    assert!(text.starts_with("name,position,best_pos,age,nation,"));

    let reread = clean(&parse_table(&text, TableFormat::Csv).expect("output should parse"))
        .expect("output should clean");
    assert_eq!(format!("{table:?}"), format!("{reread:?}"));
}

#[test]
fn shortlist_exports_to_csv_and_xlsx() {
    let table = clean(&load_table(&csv_fixture()).expect("fixture should load"))
        .expect("fixture should clean");
    let request = ShortlistRequest::new("ST (C)").budget(50.0);
    let shortlist = build_shortlist(&table, &weights(), &request).expect("shortlist should build");

    let dir = tempfile::tempdir().expect("temp dir");
    let csv_path = dir.path().join("shortlist.csv");
    write_shortlist_csv(fs::File::create(&csv_path).expect("create csv"), &shortlist)
        .expect("csv export should write");
    let written = fs::read_to_string(&csv_path).expect("csv export readable");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], SHORTLIST_COLUMNS.join(","));
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("Ed Double,50.00,26,NIR,"));

    let xlsx_path = dir.path().join("shortlist.xlsx");
    write_shortlist_xlsx(&xlsx_path, &shortlist).expect("xlsx export should write");
    let bytes = fs::read(&xlsx_path).expect("xlsx export readable");
    assert!(bytes.starts_with(b"PK"));
}
