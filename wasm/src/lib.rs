use contact_layout::layout::{SimulationReport, compute_regions, motion_for, place_radially, simulate};
use contact_layout::{Entity, LayoutConfig, Obstacle, parse_config};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Options use the same camelCase document as the CLI config file, e.g.
/// `{"radiusMultiplier": 0.7, "radial": {"ballGap": 4}, "motion": {"maxDelay": 0}}`.
fn build_layout_config(options: Option<String>) -> Result<LayoutConfig, String> {
    match options {
        Some(raw) => parse_config(&raw)
            .map(|config| config.layout)
            .map_err(|e| e.to_string()),
        None => Ok(LayoutConfig::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct SimulationResult {
    entities: Vec<Entity>,
    report: SimulationReport,
}

fn regions_json(width: f64, height: f64, options: Option<String>) -> Result<String, String> {
    let config = build_layout_config(options)?;
    to_json(&compute_regions(width, height, config.regions.radius_multiplier))
}

fn simulate_json(
    entities_json: &str,
    width: f64,
    height: f64,
    options: Option<String>,
) -> Result<String, String> {
    let config = build_layout_config(options)?;
    let mut entities: Vec<Entity> =
        serde_json::from_str(entities_json).map_err(|e| e.to_string())?;
    let regions = compute_regions(width, height, config.regions.radius_multiplier);
    let report = simulate(&mut entities, &regions, &config.simulation).map_err(|e| e.to_string())?;
    to_json(&SimulationResult { entities, report })
}

fn radial_json(
    entities_json: &str,
    width: f64,
    height: f64,
    obstacle_json: Option<String>,
    options: Option<String>,
) -> Result<String, String> {
    let config = build_layout_config(options)?;
    let entities: Vec<Entity> = serde_json::from_str(entities_json).map_err(|e| e.to_string())?;
    let obstacle = obstacle_json
        .map(|raw| serde_json::from_str::<Obstacle>(&raw))
        .transpose()
        .map_err(|e| e.to_string())?;
    to_json(&place_radially(width, height, &entities, obstacle, &config.radial))
}

fn motion_json_inner(id: &str, x: f64, y: f64, options: Option<String>) -> Result<String, String> {
    let config = build_layout_config(options)?;
    to_json(&motion_for(id, x, y, &config.motion))
}

#[wasm_bindgen]
pub fn compute_regions_json(
    width: f64,
    height: f64,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    regions_json(width, height, options_json).map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn simulate_entities_json(
    entities_json: &str,
    width: f64,
    height: f64,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    simulate_json(entities_json, width, height, options_json)
        .map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn place_radially_json(
    entities_json: &str,
    width: f64,
    height: f64,
    obstacle_json: Option<String>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    radial_json(entities_json, width, height, obstacle_json, options_json)
        .map_err(|error| JsValue::from_str(&error))
}

#[wasm_bindgen]
pub fn motion_json(id: &str, x: f64, y: f64, options_json: Option<String>) -> Result<String, JsValue> {
    motion_json_inner(id, x, y, options_json).map_err(|error| JsValue::from_str(&error))
}
