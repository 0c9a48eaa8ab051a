use super::*;
use crate::plant::{HistoryEntry, Plant, PlantType};
use chrono::{Duration, TimeZone, Utc};

fn history(points: &[(f64, f64)]) -> Vec<HistoryEntry> {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
    points
        .iter()
        .enumerate()
        .map(|(i, &(moisture, light))| HistoryEntry {
            timestamp: start + Duration::minutes(i as i64 * 30),
            moisture,
            light,
            status: String::new(),
        })
        .collect()
}

/// `older` entries followed by `recent` entries, light held constant
fn moisture_series(older: &[f64], recent: &[f64]) -> Vec<HistoryEntry> {
    let points: Vec<(f64, f64)> = older
        .iter()
        .chain(recent.iter())
        .map(|&m| (m, 12_000.0))
        .collect();
    history(&points)
}

// ── classify ────────────────────────────────────────────────────────────────

#[test]
fn test_classify_missing_readings_is_no_data() {
    let t = Some(PlantType::Tropical);
    assert_eq!(classify(t, None, Some(15_000.0)), CareStatus::NoData);
    assert_eq!(classify(t, Some(70.0), None), CareStatus::NoData);
    assert_eq!(classify(t, None, None), CareStatus::NoData);
}

#[test]
fn test_classify_non_finite_reading_is_no_data() {
    let t = Some(PlantType::Herb);
    assert_eq!(classify(t, Some(f64::NAN), Some(15_000.0)), CareStatus::NoData);
    assert_eq!(classify(t, Some(60.0), Some(f64::INFINITY)), CareStatus::NoData);
}

#[test]
fn test_classify_unknown_type() {
    assert_eq!(
        classify(None, Some(70.0), Some(15_000.0)),
        CareStatus::UnknownPlantType
    );
    // Missing data is reported before the unknown type
    assert_eq!(classify(None, None, Some(15_000.0)), CareStatus::NoData);
}

#[test]
fn test_classify_moisture_low_beats_light_low() {
    // Both below range for TROPICAL: moisture wins
    assert_eq!(
        classify(Some(PlantType::Tropical), Some(50.0), Some(5_000.0)),
        CareStatus::NeedsWater
    );
}

#[test]
fn test_classify_priority_order() {
    let t = Some(PlantType::Tropical); // moisture 60-80, light 10000-20000
    assert_eq!(classify(t, Some(85.0), Some(5_000.0)), CareStatus::Overwatered);
    assert_eq!(classify(t, Some(85.0), Some(25_000.0)), CareStatus::Overwatered);
    assert_eq!(classify(t, Some(70.0), Some(5_000.0)), CareStatus::NeedsMoreLight);
    assert_eq!(classify(t, Some(70.0), Some(25_000.0)), CareStatus::TooMuchLight);
    assert_eq!(classify(t, Some(70.0), Some(15_000.0)), CareStatus::FeelingGreat);
}

#[test]
fn test_classify_bounds_are_inclusive() {
    let s = Some(PlantType::Succulent); // moisture 20-40, light 15000-25000
    assert_ne!(classify(s, Some(20.0), Some(20_000.0)), CareStatus::NeedsWater);
    assert_eq!(classify(s, Some(20.0), Some(20_000.0)), CareStatus::FeelingGreat);
    assert_eq!(classify(s, Some(40.0), Some(20_000.0)), CareStatus::FeelingGreat);
    assert_eq!(classify(s, Some(30.0), Some(15_000.0)), CareStatus::FeelingGreat);
    assert_eq!(classify(s, Some(30.0), Some(25_000.0)), CareStatus::FeelingGreat);

    assert_eq!(classify(s, Some(19.99), Some(20_000.0)), CareStatus::NeedsWater);
    assert_eq!(classify(s, Some(40.01), Some(20_000.0)), CareStatus::Overwatered);
    assert_eq!(classify(s, Some(30.0), Some(14_999.0)), CareStatus::NeedsMoreLight);
    assert_eq!(classify(s, Some(30.0), Some(25_001.0)), CareStatus::TooMuchLight);
}

#[test]
fn test_classify_total_over_sample_grid() {
    let allowed = [
        CareStatus::NeedsWater,
        CareStatus::Overwatered,
        CareStatus::NeedsMoreLight,
        CareStatus::TooMuchLight,
        CareStatus::FeelingGreat,
    ];
    for plant_type in PlantType::ALL {
        for moisture in (0..=100).step_by(5) {
            for light in (0..=40_000).step_by(2_500) {
                let status = classify(Some(plant_type), Some(moisture as f64), Some(light as f64));
                assert!(allowed.contains(&status));
                // Same input, same verdict
                assert_eq!(
                    status,
                    classify(Some(plant_type), Some(moisture as f64), Some(light as f64))
                );
            }
        }
    }
}

#[test]
fn test_care_status_labels() {
    assert_eq!(CareStatus::NoData.label(), "No Data");
    assert_eq!(CareStatus::UnknownPlantType.label(), "Unknown Plant Type");
    assert_eq!(CareStatus::NeedsWater.label(), "Needs Water");
    assert_eq!(CareStatus::Overwatered.label(), "Overwatered");
    assert_eq!(CareStatus::NeedsMoreLight.label(), "Needs More Light");
    assert_eq!(CareStatus::TooMuchLight.label(), "Too Much Light");
    assert_eq!(CareStatus::FeelingGreat.label(), "Feeling Great");
    assert_eq!(CareStatus::NoData.color(), CareStatus::UnknownPlantType.color());
    assert!(CareStatus::NoData.is_sentinel());
    assert!(!CareStatus::FeelingGreat.is_sentinel());
}

// ── describe_current_conditions ─────────────────────────────────────────────

#[test]
fn test_conditions_report_both_dimensions() {
    let t = Some(PlantType::Tropical);
    assert_eq!(
        describe_current_conditions(t, Some(50.0), Some(5_000.0)),
        "thirsty and needs more light"
    );
    assert_eq!(
        describe_current_conditions(t, Some(90.0), Some(25_000.0)),
        "overwatered and getting too much light"
    );
    assert_eq!(
        describe_current_conditions(t, Some(70.0), Some(15_000.0)),
        "well-hydrated and happy with lighting"
    );
}

#[test]
fn test_conditions_differ_from_single_verdict() {
    // The badge only reports the first problem; the phrase reports both
    let t = Some(PlantType::Fern);
    assert_eq!(classify(t, Some(50.0), Some(20_000.0)), CareStatus::NeedsWater);
    assert_eq!(
        describe_current_conditions(t, Some(50.0), Some(20_000.0)),
        "thirsty and getting too much light"
    );
}

#[test]
fn test_conditions_bounds_inclusive_and_missing_as_zero() {
    let s = Some(PlantType::Succulent);
    assert_eq!(
        describe_current_conditions(s, Some(20.0), Some(25_000.0)),
        "well-hydrated and happy with lighting"
    );
    assert_eq!(
        describe_current_conditions(s, None, None),
        "thirsty and needs more light"
    );
}

#[test]
fn test_conditions_unknown_type() {
    assert_eq!(
        describe_current_conditions(None, Some(50.0), Some(5_000.0)),
        UNKNOWN_CONDITIONS
    );
}

// ── analyze_trend ───────────────────────────────────────────────────────────

#[test]
fn test_trend_empty_or_single_entry() {
    assert_eq!(analyze_trend(&[]), "");
    assert_eq!(analyze_trend(&history(&[(10.0, 100.0)])), "");
}

#[test]
fn test_trend_requires_two_entries_in_each_window() {
    // 6 entries: recent has 5, older only 1
    let six = moisture_series(&[10.0], &[90.0, 90.0, 90.0, 90.0, 90.0]);
    assert_eq!(analyze_trend(&six), "");

    // 5 entries: older is empty
    let five = moisture_series(&[], &[10.0, 20.0, 30.0, 40.0, 90.0]);
    assert_eq!(analyze_trend(&five), "");

    // 7 entries: older has 2, enough
    let seven = moisture_series(&[10.0, 10.0], &[90.0, 90.0, 90.0, 90.0, 90.0]);
    assert_eq!(analyze_trend(&seven), "moisture has been increasing");
}

#[test]
fn test_trend_moisture_increasing() {
    let h = moisture_series(
        &[60.0, 60.0, 60.0, 60.0, 60.0],
        &[70.0, 70.0, 70.0, 70.0, 70.0],
    );
    assert_eq!(analyze_trend(&h), "moisture has been increasing");
}

#[test]
fn test_trend_moisture_threshold_is_strict() {
    let h = moisture_series(
        &[60.0, 60.0, 60.0, 60.0, 60.0],
        &[65.0, 65.0, 65.0, 65.0, 65.0],
    );
    assert_eq!(analyze_trend(&h), "");

    let h = moisture_series(
        &[65.0, 65.0, 65.0, 65.0, 65.0],
        &[60.0, 60.0, 60.0, 60.0, 60.0],
    );
    assert_eq!(analyze_trend(&h), "");
}

#[test]
fn test_trend_moisture_decreasing() {
    let h = moisture_series(&[80.0, 80.0, 80.0], &[60.0, 62.0, 58.0, 61.0, 59.0]);
    assert_eq!(analyze_trend(&h), "moisture has been decreasing");
}

#[test]
fn test_trend_light_declining() {
    let older: Vec<(f64, f64)> = vec![(50.0, 11_500.0); 5];
    let recent: Vec<(f64, f64)> = vec![(50.0, 9_000.0); 5];
    let h = history(&[older, recent].concat());
    assert_eq!(analyze_trend(&h), "light levels have been declining");
}

#[test]
fn test_trend_light_threshold_is_strict() {
    let older: Vec<(f64, f64)> = vec![(50.0, 10_000.0); 5];
    let recent: Vec<(f64, f64)> = vec![(50.0, 11_000.0); 5];
    let h = history(&[older, recent].concat());
    assert_eq!(analyze_trend(&h), "");
}

#[test]
fn test_trend_both_dimensions_joined() {
    let older: Vec<(f64, f64)> = vec![(40.0, 8_000.0); 5];
    let recent: Vec<(f64, f64)> = vec![(55.0, 12_000.0); 5];
    let h = history(&[older, recent].concat());
    assert_eq!(
        analyze_trend(&h),
        "moisture has been increasing, light levels have been improving"
    );

    let summary = summarize_trend(&h, &TrendConfig::default());
    assert_eq!(summary.moisture, Some(MoistureTrend::Increasing));
    assert_eq!(summary.light, Some(LightTrend::Improving));
}

#[test]
fn test_trend_ignores_entries_before_older_window() {
    // Ancient entries at the front must not influence the older window mean
    let mut points: Vec<(f64, f64)> = vec![(0.0, 0.0); 20];
    points.extend(vec![(60.0, 10_000.0); 5]);
    points.extend(vec![(60.0, 10_000.0); 5]);
    assert_eq!(analyze_trend(&history(&points)), "");
}

#[test]
fn test_trend_is_deterministic() {
    let h = moisture_series(&[30.0, 35.0, 32.0, 31.0, 30.0], &[50.0, 52.0, 55.0, 51.0, 49.0]);
    assert_eq!(analyze_trend(&h), analyze_trend(&h));
}

#[test]
fn test_trend_custom_config() {
    let config = TrendConfig {
        window: 3,
        min_window_entries: 3,
        moisture_threshold: 1.0,
        light_threshold: 100.0,
    };
    let h = moisture_series(&[50.0, 50.0, 50.0], &[52.0, 52.0, 52.0]);
    assert_eq!(analyze_trend_with(&h, &config), "moisture has been increasing");

    // Same data under defaults: older window only has 1 entry
    assert_eq!(analyze_trend(&h), "");
}

#[test]
fn test_trend_zero_window_reports_nothing() {
    let config = TrendConfig {
        window: 0,
        ..TrendConfig::default()
    };
    let h = moisture_series(&[10.0; 5], &[90.0; 5]);
    assert!(summarize_trend(&h, &config).is_empty());
}

// ── gauges and evaluate ─────────────────────────────────────────────────────

#[test]
fn test_light_gauge_max() {
    assert_eq!(
        light_gauge_max(Some(PlantType::Tropical), 10_000.0, 30_000.0),
        30_000.0
    );
    assert_eq!(
        light_gauge_max(Some(PlantType::Succulent), 10_000.0, 30_000.0),
        35_000.0
    );
    assert_eq!(light_gauge_max(None, 10_000.0, 30_000.0), 30_000.0);
}

#[test]
fn test_evaluate_bundles_all_outputs() {
    let mut plant = Plant::new("Monty", Some(PlantType::Tropical));
    plant.moisture = Some(55.0);
    plant.light = Some(15_000.0);
    plant.history = moisture_series(&[75.0; 5], &[55.0; 5]);

    let evaluation = evaluate(&plant, &TrendConfig::default());
    assert_eq!(evaluation.status, CareStatus::NeedsWater);
    assert_eq!(evaluation.conditions, "thirsty and happy with lighting");
    assert_eq!(evaluation.trend, "moisture has been decreasing");
}

#[test]
fn test_evaluate_fresh_plant_without_readings() {
    let plant = Plant::new("Seedling", None);
    let evaluation = evaluate(&plant, &TrendConfig::default());
    assert_eq!(evaluation.status, CareStatus::NoData);
    assert_eq!(evaluation.trend, "");
}
