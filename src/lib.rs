// snowpile-engine - Deterministic snow accumulation for the site footer
//
// Given a launch date and a handful of tunables, every visitor computes the
// exact same pile: the config fields derive a seed string, the seed drives a
// mulberry32 stream, and the stream deposits unit flakes onto a 1-D
// heightfield with local slope relaxation. The page's WebGL/canvas renderer
// consumes the finished field read-only; nothing in here touches the clock,
// the DOM, or any other source of nondeterminism.

use wasm_bindgen::prelude::*;

pub mod field;
pub mod rng;
pub mod schedule;
pub mod sim;

pub use field::{checksum, max_height, max_slope, smooth};
pub use rng::{SeededRng, hash_seed};
pub use schedule::{DEFAULT_START_MS, MS_PER_DAY, Quality, days_since_utc};
pub use sim::{SimConfig, SimResult, WindDirection, compute_heightfield};

/// One computed pile. Construction runs the whole simulation; the result is
/// immutable afterwards and can be read out as many times as needed.
#[wasm_bindgen]
pub struct SnowPile {
    field: Vec<f32>,
    drops_simulated: u32,
}

#[wasm_bindgen]
impl SnowPile {
    /// Run the simulation once. `wind_direction` takes "left" or "right";
    /// any other value (or `undefined`) means no configured direction, which
    /// seeds with the absent-direction sentinel and drifts right. The salt
    /// defaults to the empty string.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width_cells: u32,
        days_since_start: u32,
        drops_per_day: f64,
        max_drops: u32,
        melt_rate_per_day: f64,
        wind_strength: f64,
        wind_direction: Option<String>,
        seed_salt: Option<String>,
    ) -> SnowPile {
        let cfg = SimConfig {
            width_cells,
            days_since_start,
            drops_per_day,
            max_drops,
            melt_rate_per_day,
            wind_strength,
            wind_direction: wind_direction.as_deref().and_then(WindDirection::parse),
            seed_salt: seed_salt.unwrap_or_default(),
        };
        let result = compute_heightfield(&cfg);
        SnowPile {
            field: result.heightfield,
            drops_simulated: result.drops_simulated,
        }
    }

    /// Copy of the heightfield as a typed array.
    pub fn heightfield(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.field.as_slice())
    }

    /// Smoothed copy for renderers that want a soft crest.
    pub fn smoothed(&self, radius: usize) -> js_sys::Float32Array {
        js_sys::Float32Array::from(field::smooth(&self.field, radius).as_slice())
    }

    // Zero-copy accessors so WebGL callers can upload straight out of wasm
    // memory without the typed-array copy.
    pub fn heightfield_ptr(&self) -> *const f32 {
        self.field.as_ptr()
    }

    pub fn cells(&self) -> usize {
        self.field.len()
    }

    pub fn drops_simulated(&self) -> u32 {
        self.drops_simulated
    }

    /// Bit-exact checksum of the field; equal configs must give equal
    /// checksums on every client.
    pub fn checksum(&self) -> u32 {
        field::checksum(&self.field)
    }
}

/// Epoch-millisecond wrapper for JS callers (`Date.now()` hands out doubles).
#[wasm_bindgen]
pub fn days_since(start_ms: f64, now_ms: f64) -> u32 {
    schedule::days_since_utc(start_ms as i64, now_ms as i64)
}

/// Resolution for a quality token ("low"/"medium"/"high", anything else
/// reads as medium) at the given device pixel ratio.
#[wasm_bindgen]
pub fn width_cells_for(quality: &str, device_ratio: f64) -> u32 {
    Quality::parse(quality)
        .unwrap_or(Quality::Medium)
        .width_cells(device_ratio)
}
