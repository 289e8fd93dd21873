use econviz::models::{Axis, SeriesPoint, SeriesSummary};
use econviz::stats::max_magnitudes;
use econviz::{Error, assign_axes};

fn s(id: &str, magnitude: f64) -> SeriesSummary {
    SeriesSummary::new(id, magnitude)
}

#[test]
fn single_series_stays_left() {
    let got = assign_axes(&[s("gdp", 1.0e9)]).unwrap();
    assert!(!got.is_split());
    assert_eq!(got.axis_of("gdp"), Some(Axis::Left));
}

#[test]
fn close_magnitudes_stay_on_one_axis() {
    // Ratio 25/10 = 2.5, under the 3.0 split threshold.
    let got = assign_axes(&[s("a", 10.0), s("b", 25.0)]).unwrap();
    assert!(!got.is_split());
    assert_eq!(got.axis_of("a"), Some(Axis::Left));
    assert_eq!(got.axis_of("b"), Some(Axis::Left));
}

#[test]
fn every_series_gets_exactly_one_axis() {
    let input = vec![
        s("a", 3.0),
        s("b", 700.0),
        s("c", 12.0),
        s("d", 650.0),
        s("e", 4.5),
        s("f", 9000.0),
    ];
    let got = assign_axes(&input).unwrap();
    assert_eq!(got.len(), input.len());
    for series in &input {
        assert!(got.axis_of(&series.series_id).is_some());
    }
}

#[test]
fn separable_clusters_land_on_opposite_axes() {
    let got = assign_axes(&[
        s("a", 1.0),
        s("b", 1.0),
        s("c", 1.0),
        s("d", 1000.0),
        s("e", 1000.0),
    ])
    .unwrap();
    assert!(got.is_split());
    let small = got.axis_of("a").unwrap();
    assert_eq!(got.axis_of("b"), Some(small));
    assert_eq!(got.axis_of("c"), Some(small));
    let large = got.axis_of("d").unwrap();
    assert_eq!(got.axis_of("e"), Some(large));
    assert_ne!(small, large);
}

#[test]
fn two_series_with_wide_ratio_split() {
    // Magnitudes summarize series peaking at [5, 6, 7] and [5000, 6000].
    let got = assign_axes(&[s("a", 7.0), s("b", 6000.0)]).unwrap();
    assert!(got.is_split());
    assert_ne!(got.axis_of("a"), got.axis_of("b"));
}

#[test]
fn ratio_of_exactly_three_splits() {
    // Only a ratio strictly below 3.0 collapses onto a single axis.
    let got = assign_axes(&[s("lo", 1.0), s("hi", 3.0)]).unwrap();
    assert!(got.is_split());
    assert_eq!(got.axis_of("hi"), Some(Axis::Left));
    assert_eq!(got.axis_of("lo"), Some(Axis::Right));
}

#[test]
fn tie_breaks_prefer_the_smaller_left_group() {
    // Splitting after 9 scores 1 + 3; splitting after 3 scores 3 + 1.
    // On the tie the earlier split index wins: 9 sits alone on the left.
    let got = assign_axes(&[s("big", 9.0), s("mid", 3.0), s("small", 1.0)]).unwrap();
    assert!(got.is_split());
    assert_eq!(got.axis_of("big"), Some(Axis::Left));
    assert_eq!(got.axis_of("mid"), Some(Axis::Right));
    assert_eq!(got.axis_of("small"), Some(Axis::Right));
}

#[test]
fn all_zero_magnitudes_stay_left() {
    let got = assign_axes(&[s("a", 0.0), s("b", 0.0), s("c", 0.0)]).unwrap();
    assert!(!got.is_split());
    for id in ["a", "b", "c"] {
        assert_eq!(got.axis_of(id), Some(Axis::Left));
    }
}

#[test]
fn zero_magnitude_series_never_shares_with_positive_ones() {
    let got = assign_axes(&[s("big", 1000.0), s("small", 1.0), s("flat", 0.0)]).unwrap();
    assert!(got.is_split());
    assert_eq!(got.axis_of("flat"), Some(Axis::Right));
    assert_eq!(got.axis_of("big"), Some(Axis::Left));
    assert_eq!(got.axis_of("small"), Some(Axis::Left));
}

#[test]
fn duplicate_series_ids_rejected() {
    let err = assign_axes(&[s("a", 1.0), s("a", 2.0)]).unwrap_err();
    assert!(matches!(err, Error::DuplicateSeries(id) if id == "a"));
}

#[test]
fn negative_magnitude_rejected() {
    let err = assign_axes(&[s("a", -1.0)]).unwrap_err();
    assert!(matches!(err, Error::NegativeMagnitude { .. }));
}

#[test]
fn nan_magnitude_rejected() {
    let err = assign_axes(&[s("a", f64::NAN)]).unwrap_err();
    assert!(matches!(err, Error::NonFiniteValue { .. }));
}

#[test]
fn empty_input_rejected() {
    assert!(matches!(assign_axes(&[]).unwrap_err(), Error::EmptySeries));
}

#[test]
fn magnitudes_derived_from_observations_feed_the_optimizer() {
    let mut points = Vec::new();
    for (year, v) in [(2019, 5.0), (2020, -6.0), (2021, 7.0)] {
        points.push(SeriesPoint {
            series_id: "rates".into(),
            year,
            value: Some(v),
        });
    }
    for (year, v) in [(2019, 5000.0), (2020, 6000.0)] {
        points.push(SeriesPoint {
            series_id: "output".into(),
            year,
            value: Some(v),
        });
    }
    // A series of only nulls never reaches the optimizer.
    points.push(SeriesPoint {
        series_id: "ghost".into(),
        year: 2020,
        value: None,
    });

    let summaries = max_magnitudes(&points);
    assert_eq!(summaries.len(), 2);

    let got = assign_axes(&summaries).unwrap();
    assert!(got.is_split());
    assert_ne!(got.axis_of("rates"), got.axis_of("output"));
    assert_eq!(got.axis_of("ghost"), None);
}
