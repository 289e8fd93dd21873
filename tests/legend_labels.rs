use econviz::legend::{format_value, legend_for, map_locale, scale_for_magnitude};
use econviz::models::RegionObservation;
use econviz::{ColorScaleOptions, ValueStats, build_color_scale};

fn scale_from(values: &[f64]) -> econviz::ColorScale {
    let observations: Vec<RegionObservation> = values
        .iter()
        .enumerate()
        .map(|(i, v)| RegionObservation::new(format!("r{i}"), Some(*v)))
        .collect();
    build_color_scale(&observations, ColorScaleOptions::default()).unwrap()
}

#[test]
fn one_label_per_bucket() {
    let scale = scale_from(&[2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0]);
    let legend = legend_for(scale.stats(), scale.thresholds(), "en");
    assert_eq!(legend.labels.len(), 6);
    assert_eq!(legend.scale_word, "");
    assert_eq!(legend.capped_note, None);
    assert_eq!(legend.no_data_label, "no data");
}

#[test]
fn capped_scales_carry_a_note() {
    let scale = scale_from(&[10.0, 11.0, 12.0, 13.0, 1000.0]);
    let legend = legend_for(scale.stats(), scale.thresholds(), "en");
    let note = legend.capped_note.expect("outlier population needs a note");
    assert!(note.contains("capped"));
    assert!(note.contains("14.3"));
}

#[test]
fn german_locale_groups_with_dots() {
    let values: Vec<f64> = (1..=9).map(|i| (i * 1000) as f64).collect();
    let scale = scale_from(&values);
    let legend = legend_for(scale.stats(), scale.thresholds(), "de");
    assert!(legend.labels[0].starts_with("1.000"));
}

#[test]
fn large_magnitudes_get_a_scale_word() {
    let values: Vec<f64> = (1..=8).map(|i| i as f64 * 4.0e6).collect();
    let scale = scale_from(&values);
    let legend = legend_for(scale.stats(), scale.thresholds(), "en");
    assert_eq!(legend.scale_word, "millions");
    // Bounds are printed in the scaled unit.
    assert!(legend.labels[0].starts_with("4.00"));
}

#[test]
fn empty_population_yields_an_empty_legend() {
    let legend = legend_for(&ValueStats::empty(3), &[], "en");
    assert!(legend.labels.is_empty());
    assert_eq!(legend.capped_note, None);
}

#[test]
fn scale_words_follow_magnitude() {
    assert_eq!(scale_for_magnitude(500.0), (1.0, ""));
    assert_eq!(scale_for_magnitude(50_000.0), (1.0e3, "thousands"));
    assert_eq!(scale_for_magnitude(5.0e7), (1.0e6, "millions"));
    assert_eq!(scale_for_magnitude(5.0e9), (1.0e9, "billions"));
    assert_eq!(scale_for_magnitude(5.0e12), (1.0e12, "trillions"));
}

#[test]
#[allow(bindings_with_variant_name)]
fn value_formatting_follows_the_locale() {
    let (en, en_sep) = map_locale("en");
    assert_eq!(format_value(1_234_567.0, en, en_sep), "1,234,567");
    assert_eq!(format_value(3.14159, en, en_sep), "3.14");
    assert_eq!(format_value(42.5, en, en_sep), "42.5");
    assert_eq!(format_value(123.4, en, en_sep), "123");

    let (de, de_sep) = map_locale("de");
    assert_eq!(format_value(1_234_567.0, de, de_sep), "1.234.567");
    assert_eq!(format_value(3.14159, de, de_sep), "3,14");
}
