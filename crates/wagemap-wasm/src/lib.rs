//! wagemap-wasm - WebAssembly bindings for wagemap-core
//!
//! Exposes the wage-level query interface to the browser map. JavaScript
//! fetches the four JSON tables itself and hands them over once through
//! [`load_tables`]; every query after that is synchronous.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { load_tables, resolve_area, assess } from 'wagemap-wasm';
//!
//! async function main() {
//!   await init();
//!   const [w, g, c, o] = await Promise.all(
//!     ['wages', 'geography', 'counties', 'occupations']
//!       .map(t => fetch(`/data/${t}.json`).then(r => r.text())));
//!   load_tables(w, g, c, o);
//!
//!   const area = resolve_area('Santa Clara County', 'CA');
//!   console.log(assess(area, '15-1252', 165000));
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Salaries cross the boundary as JS numbers and are truncated to whole
//!   dollars. Negative values count as zero.
//! - Queries made before `load_tables` succeeds return `undefined` or an
//!   empty array.
//! - `load_tables` may be called again to swap in a new dataset.
use std::result::Result;
use std::sync::{Arc, PoisonError, RwLock};
use wasm_bindgen::prelude::*;

use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wagemap_core::loader::fetch_tables;
use wagemap_core::prelude::*;
use wagemap_core::DatasetStats;

static DB: RwLock<Option<Arc<WageDb>>> = RwLock::new(None);

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"wagemap-wasm ready".into());
}

fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn db() -> Option<Arc<WageDb>> {
    DB.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    Ok(to_value(value)?)
}

fn whole_dollars(salary: f64) -> u64 {
    if salary.is_finite() && salary > 0.0 {
        salary as u64
    } else {
        0
    }
}

/* --------------------------------------------------------------------------
   Loading
-------------------------------------------------------------------------- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadSummary {
    #[serde(flatten)]
    stats: DatasetStats,
    alias_collisions: usize,
}

/// Parse the four JSON tables and make them the active dataset.
///
/// Returns the dataset statistics. On failure the previous dataset (if any)
/// stays active.
#[wasm_bindgen]
pub fn load_tables(wages: &str, geography: &str, counties: &str, occupations: &str) -> Result<JsValue, JsError> {
    let source = MemorySource::new()
        .with_table(Table::Wages, wages)
        .with_table(Table::Geography, geography)
        .with_table(Table::Counties, counties)
        .with_table(Table::Occupations, occupations);
    // Memory fetches are immediately ready.
    let raw = futures::executor::block_on(fetch_tables(&source))?;
    let db = WageDb::from_tables(raw)?;

    let summary = LoadSummary {
        stats: db.stats(),
        alias_collisions: db.resolver().collisions().len(),
    };
    log(&format!(
        "Loaded {} wage areas, {} counties, {} occupations",
        summary.stats.areas, summary.stats.counties, summary.stats.occupations
    ));

    *DB.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(db));
    to_js(&summary)
}

#[wasm_bindgen]
pub fn is_loaded() -> bool {
    DB.read().unwrap_or_else(PoisonError::into_inner).is_some()
}

/* --------------------------------------------------------------------------
   Queries
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn resolve_area(county: &str, state: &str) -> Option<String> {
    db()?.resolve_area(county, state).map(str::to_string)
}

/// `{ l1, l2, l3, l4 }` or `undefined`.
#[wasm_bindgen]
pub fn get_thresholds(area_code: &str, occupation_code: &str) -> Result<JsValue, JsError> {
    let thresholds = db().and_then(|db| db.get_thresholds(area_code, occupation_code));
    to_js(&thresholds)
}

#[wasm_bindgen]
pub fn area_info(area_code: &str) -> Result<JsValue, JsError> {
    match db() {
        Some(db) => to_js(&db.area_info(area_code)),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Level 0-4 for a salary against thresholds from [`get_thresholds`].
#[wasm_bindgen]
pub fn classify(salary: f64, thresholds: JsValue) -> Result<u8, JsError> {
    let t: WageThresholds = serde_wasm_bindgen::from_value(thresholds)?;
    Ok(wagemap_core::classify(whole_dollars(salary), &t).as_u8())
}

#[wasm_bindgen]
pub fn gap_to_next(salary: f64, thresholds: JsValue, level: u8) -> Result<f64, JsError> {
    let t: WageThresholds = serde_wasm_bindgen::from_value(thresholds)?;
    let level = WageLevel::from_u8(level).ok_or_else(|| JsError::new("level must be 0-4"))?;
    Ok(wagemap_core::gap_to_next(whole_dollars(salary), &t, level) as f64)
}

/// `{ level, gapToNext, thresholds }` or `undefined` when there is no data.
#[wasm_bindgen]
pub fn assess(area_code: &str, occupation_code: &str, salary: f64) -> Result<JsValue, JsError> {
    let assessment = db().and_then(|db| db.assess(area_code, occupation_code, whole_dollars(salary)));
    to_js(&assessment)
}

/// Rank area codes for one salary, best level first. Throws on a duplicate
/// code or more than five codes.
#[wasm_bindgen]
pub fn rank(area_codes: JsValue, salary: f64, occupation_code: &str) -> Result<JsValue, JsError> {
    let codes: Vec<String> = serde_wasm_bindgen::from_value(area_codes)?;
    let mut set = ComparisonSet::new();
    for code in codes {
        set.add(code)?;
    }
    let Some(db) = db() else {
        return to_js(&Vec::<ComparisonEntry>::new());
    };
    to_js(&set.rank(db.dataset(), whole_dollars(salary), occupation_code))
}

#[wasm_bindgen]
pub fn search_counties(query: &str, limit: usize) -> Result<JsValue, JsError> {
    let hits = db().map(|db| db.search_counties(query, limit)).unwrap_or_default();
    to_js(&hits)
}

#[wasm_bindgen]
pub fn list_occupations() -> Result<JsValue, JsError> {
    match db() {
        Some(db) => to_js(&db.list_occupations()),
        None => to_js(&Vec::<Occupation>::new()),
    }
}

/// Dataset counts, or `undefined` before a load.
#[wasm_bindgen]
pub fn get_stats() -> Result<JsValue, JsError> {
    to_js(&db().map(|db| db.stats()))
}
