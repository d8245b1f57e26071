//! WASM bindings for overlap-engine.
//!
//! Exposes free-window intersection, the coverage sweep, ranking, and guest id
//! generation to the browser client via `wasm-bindgen`. All complex values
//! cross the boundary as JSON strings; see [`overlap_engine::json`] for the
//! shapes.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p overlap-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/overlap-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/overlap_engine_wasm.wasm
//! ```

use overlap_engine::json;
use overlap_engine::{CoverageOptions, Identity, RecommendOptions};
use wasm_bindgen::prelude::*;

fn to_js(err: overlap_engine::OverlapError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Compute windows shared by every eligible participant.
///
/// # Arguments
/// - `availabilities_json` -- array of `{user_id, guest_id, available_slots: [{start, end}]}`
/// - `rsvps_json` -- optional array of `{user_id, guest_id, status}`; when given,
///   only `going` / `maybe` participants contribute
/// - `options_json` -- optional `{merge_tolerance_secs, invalid_intervals: "skip" | "reject"}`
///
/// Returns a JSON array of `{start, end, participants, participant_count}`.
#[wasm_bindgen(js_name = "computeFreeWindows")]
pub fn compute_free_windows(
    availabilities_json: &str,
    rsvps_json: Option<String>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = json::intersect_options_from_json(options_json.as_deref()).map_err(to_js)?;
    json::free_windows_json(availabilities_json, rsvps_json.as_deref(), &options).map_err(to_js)
}

/// Report every segment of the timeline with the exact set of free participants.
///
/// `min_participants` defaults to 1.
#[wasm_bindgen(js_name = "computeCoverageWindows")]
pub fn compute_coverage_windows(
    availabilities_json: &str,
    rsvps_json: Option<String>,
    min_participants: Option<u32>,
) -> Result<String, JsValue> {
    let options = CoverageOptions {
        min_participants: min_participants.map_or(1, |n| n as usize),
        ..CoverageOptions::default()
    };
    json::coverage_windows_json(availabilities_json, rsvps_json.as_deref(), &options)
        .map_err(to_js)
}

/// Rank a JSON array of windows (output of either function above) for proposal.
#[wasm_bindgen(js_name = "recommendWindows")]
pub fn recommend_windows(
    windows_json: &str,
    min_duration_minutes: Option<u32>,
    limit: Option<u32>,
) -> Result<String, JsValue> {
    let options = RecommendOptions {
        min_duration_minutes: min_duration_minutes.map_or(0, i64::from),
        limit: limit.map(|n| n as usize),
    };
    json::recommend_json(windows_json, &options).map_err(to_js)
}

/// Generate a fresh anonymous guest id for the client to persist locally.
#[wasm_bindgen(js_name = "newGuestId")]
pub fn new_guest_id() -> String {
    Identity::new_guest().id().to_string()
}
