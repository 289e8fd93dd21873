//! Deterministic color assignment for chart series and choropleth buckets.
//!
//! Design:
//! - Series: a stable base hue hashed from the series id, so a series keeps
//!   its color across redraws, toggles, and date-range changes.
//! - Collisions: hues landing too close to an already assigned one rotate
//!   away by the golden angle until clear (bounded attempts).
//! - Choropleth: a single-hue sequential ramp, light to dark, one stop per
//!   palette bucket, plus a neutral no-data fill.

use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Minimum hue separation between two assigned series colors, in degrees.
const MIN_HUE_GAP_DEG: f64 = 18.0;

/// Rotation step used to resolve hue collisions.
const GOLDEN_ANGLE_DEG: f64 = 137.508;

/// Hue of the sequential choropleth ramp.
const RAMP_HUE_DEG: f64 = 215.0;

/// Fill for regions with no observation.
pub const NO_DATA_COLOR: Rgb8 = Rgb8 {
    r: 224,
    g: 224,
    b: 224,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Hsl {
    pub h_deg: f64, // 0..360
    pub s: f64,     // 0..1
    pub l: f64,     // 0..1
}

/// Assigned display color for one series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeriesColor {
    pub series_id: String,
    pub hsl: Hsl,
    pub rgb: Rgb8,
    pub hex: String,
}

/// Assign one color per series id, in input order.
///
/// Identical inputs always produce identical outputs. Hues are pushed
/// apart up to [`MIN_HUE_GAP_DEG`]; with more than `360 / gap` series the
/// rotation gives up after a bounded number of attempts and accepts the
/// nearest free-ish hue.
pub fn assign_series_colors<S: AsRef<str>>(series_ids: &[S]) -> Vec<SeriesColor> {
    let mut taken: Vec<f64> = Vec::with_capacity(series_ids.len());
    series_ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            let mut hue = stable_hue_deg(id);
            let mut attempts = 0;
            while attempts < 24
                && taken
                    .iter()
                    .any(|t| hue_distance_deg(*t, hue) < MIN_HUE_GAP_DEG)
            {
                hue = (hue + GOLDEN_ANGLE_DEG) % 360.0;
                attempts += 1;
            }
            taken.push(hue);

            let hsl = Hsl {
                h_deg: hue,
                s: 0.60,
                l: 0.55,
            };
            let rgb = hsl_to_rgb8(hsl);
            SeriesColor {
                series_id: id.to_string(),
                hex: rgb.hex(),
                hsl,
                rgb,
            }
        })
        .collect()
}

/// Sequential ramp for choropleth buckets, index 0 lightest.
pub fn choropleth_ramp(stops: usize) -> Vec<Rgb8> {
    (0..stops)
        .map(|i| {
            let t = if stops <= 1 {
                0.0
            } else {
                i as f64 / (stops - 1) as f64
            };
            hsl_to_rgb8(Hsl {
                h_deg: RAMP_HUE_DEG,
                s: 0.62,
                l: 0.88 - t * 0.58,
            })
        })
        .collect()
}

// ------------------------ Mapping logic ------------------------

fn stable_hue_deg(key: &str) -> f64 {
    // Hash to 0..359 for a hue angle. DefaultHasher is stable across
    // processes for the same input, which keeps colors reproducible.
    (stable_hash64(key) % 360) as f64
}

/// Shortest angular distance between two hues, in degrees.
fn hue_distance_deg(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

// ------------------------ Utilities ------------------------

fn stable_hash64<T: Hash>(t: T) -> u64 {
    let mut hasher = DefaultHasher::new();
    t.hash(&mut hasher);
    hasher.finish()
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

// HSL -> RGB conversion (linear; sufficient for chart colors)
fn hsl_to_rgb8(hsl: Hsl) -> Rgb8 {
    let h = (hsl.h_deg % 360.0) / 360.0;
    let s = clamp01(hsl.s);
    let l = clamp01(hsl.l);

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgb8 { r: v, g: v, b: v };
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgb8 {
        r: (r * 255.0).round() as u8,
        g: (g * 255.0).round() as u8,
        b: (b * 255.0).round() as u8,
    }
}
