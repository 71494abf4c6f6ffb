#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use wagemap_wasm::{assess, classify, get_thresholds, is_loaded, list_occupations, load_tables, rank, resolve_area};

const WAGES: &str = include_str!("../../wagemap-core/tests/data/wages.json");
const GEOGRAPHY: &str = include_str!("../../wagemap-core/tests/data/geography.json");
const COUNTIES: &str = include_str!("../../wagemap-core/tests/data/counties.json");
const OCCUPATIONS: &str = include_str!("../../wagemap-core/tests/data/occupations.json");

fn load() {
    wagemap_wasm::start();
    load_tables(WAGES, GEOGRAPHY, COUNTIES, OCCUPATIONS).unwrap();
}

#[wasm_bindgen_test]
fn loads_and_resolves() {
    load();
    assert!(is_loaded());
    assert_eq!(resolve_area("St. Francis County", "AR").as_deref(), Some("5000001"));
    assert_eq!(resolve_area("Nowhere County", "ZZ"), None);
}

#[wasm_bindgen_test]
fn classifies_with_fetched_thresholds() {
    load();
    let t = get_thresholds("41860", "15-1252").unwrap();
    assert!(!t.is_undefined());
    assert_eq!(classify(150_000.0, t).unwrap(), 2);
    assert!(assess("41860", "99-9999", 150_000.0).unwrap().is_undefined());
}

#[wasm_bindgen_test]
fn rank_rejects_duplicates() {
    load();
    let codes = serde_wasm_bindgen::to_value(&["41860", "41860"]).unwrap();
    assert!(rank(codes, 100_000.0, "15-1252").is_err());

    let occupations: JsValue = list_occupations().unwrap();
    assert!(js_sys::Array::is_array(&occupations));
}

#[wasm_bindgen_test]
fn malformed_tables_are_rejected() {
    wagemap_wasm::start();
    assert!(load_tables("{}", "[1,2]", "{}", "[]").is_err());
}
