//! Legend construction: bucket boundary labels, locale-aware number
//! formatting, and the capped-values note for outlier-trimmed scales.

use crate::choropleth::ValueStats;
use num_format::{Locale, ToFormattedString};
use serde::Serialize;

/// Legend content for one color scale (global or one category).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    /// One `low – high` label per palette bucket, lightest stop first.
    pub labels: Vec<String>,
    /// Magnitude word the labels are scaled by ("thousands", "millions",
    /// …), empty when values are printed as-is.
    pub scale_word: &'static str,
    /// Present when values beyond the outlier threshold were clamped for
    /// the color ramp; the true maximum still appears in the stats.
    pub capped_note: Option<String>,
    /// Label for the sentinel no-data swatch.
    pub no_data_label: &'static str,
}

/// Build the legend for one scale from its stats and bucket thresholds.
pub fn legend_for(stats: &ValueStats, thresholds: &[f64], locale_tag: &str) -> Legend {
    let (locale, dec_sep) = map_locale(locale_tag);
    if stats.count == 0 {
        return Legend {
            labels: Vec::new(),
            scale_word: "",
            capped_note: None,
            no_data_label: "no data",
        };
    }

    let max_abs = stats.capped_max.abs().max(stats.min.abs());
    let (scale, scale_word) = scale_for_magnitude(max_abs);

    let mut bounds = Vec::with_capacity(thresholds.len() + 2);
    bounds.push(stats.min);
    bounds.extend_from_slice(thresholds);
    bounds.push(stats.capped_max);

    let labels = bounds
        .windows(2)
        .map(|w| {
            format!(
                "{} – {}",
                format_value(w[0] / scale, locale, dec_sep),
                format_value(w[1] / scale, locale, dec_sep)
            )
        })
        .collect();

    let capped_note = if stats.has_capped_values() {
        Some(format!(
            "values above {} capped for color scale",
            format_value(stats.outlier_threshold, locale, dec_sep)
        ))
    } else {
        None
    };

    Legend {
        labels,
        scale_word,
        capped_note,
        no_data_label: "no data",
    }
}

/// Pick a display scale and its human label from the overall magnitude.
/// Returns (scale, label), e.g. `(1e6, "millions")`.
pub fn scale_for_magnitude(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e12 {
        (1.0e12, "trillions")
    } else if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e4 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Format one value for legend text: grouped integers for large
/// magnitudes, a short precision ladder below that.
pub fn format_value(v: f64, locale: &Locale, dec_sep: char) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        return (v.round() as i64).to_formatted_string(locale);
    }
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    let s = format!("{:.*}", prec, v);
    if dec_sep != '.' {
        s.replace('.', &dec_sep.to_string())
    } else {
        s
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its
/// decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `de`, `fr`, `es`, `it`, `pt`,
/// `nl`, plus regional variants. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}
