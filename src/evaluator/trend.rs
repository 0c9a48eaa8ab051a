use crate::plant::HistoryEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend window sizes and reporting thresholds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Entries per window; "recent" is the last `window`, "older" the `window` before it
    #[serde(default = "default_window")]
    pub window: usize,

    /// Minimum entries each window must hold before any trend is reported
    #[serde(default = "default_min_window_entries")]
    pub min_window_entries: usize,

    /// Percentage points the moisture means must differ by (strictly)
    #[serde(default = "default_moisture_threshold")]
    pub moisture_threshold: f64,

    /// Lux the light means must differ by (strictly)
    #[serde(default = "default_light_threshold")]
    pub light_threshold: f64,
}

fn default_window() -> usize {
    5
}

fn default_min_window_entries() -> usize {
    2
}

fn default_moisture_threshold() -> f64 {
    5.0
}

fn default_light_threshold() -> f64 {
    1000.0
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            min_window_entries: default_min_window_entries(),
            moisture_threshold: default_moisture_threshold(),
            light_threshold: default_light_threshold(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoistureTrend {
    Increasing,
    Decreasing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightTrend {
    Improving,
    Declining,
}

/// Directional change between the older and the recent window.
///
/// Displays as zero, one or two phrases joined with ", ".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrendSummary {
    pub moisture: Option<MoistureTrend>,
    pub light: Option<LightTrend>,
}

impl TrendSummary {
    pub fn is_empty(&self) -> bool {
        self.moisture.is_none() && self.light.is_none()
    }
}

impl fmt::Display for TrendSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moisture = self.moisture.map(|m| match m {
            MoistureTrend::Increasing => "moisture has been increasing",
            MoistureTrend::Decreasing => "moisture has been decreasing",
        });
        let light = self.light.map(|l| match l {
            LightTrend::Improving => "light levels have been improving",
            LightTrend::Declining => "light levels have been declining",
        });

        let phrases: Vec<&str> = moisture.into_iter().chain(light).collect();
        f.write_str(&phrases.join(", "))
    }
}

/// Trend phrase using the default windows and thresholds
pub fn analyze_trend(history: &[HistoryEntry]) -> String {
    analyze_trend_with(history, &TrendConfig::default())
}

/// Trend phrase; empty when data is insufficient or nothing crossed a threshold
pub fn analyze_trend_with(history: &[HistoryEntry], config: &TrendConfig) -> String {
    summarize_trend(history, config).to_string()
}

/// Compare mean moisture and light of the recent window against the window
/// immediately preceding it. `history` must be ordered oldest first.
pub fn summarize_trend(history: &[HistoryEntry], config: &TrendConfig) -> TrendSummary {
    let len = history.len();
    let min_entries = config.min_window_entries.max(1);
    if len < 2 {
        return TrendSummary::default();
    }

    let recent_start = len.saturating_sub(config.window);
    let older_start = recent_start.saturating_sub(config.window);
    let recent = &history[recent_start..];
    let older = &history[older_start..recent_start];

    if recent.len() < min_entries || older.len() < min_entries {
        return TrendSummary::default();
    }

    let moisture_diff = mean(recent, |h| h.moisture) - mean(older, |h| h.moisture);
    let light_diff = mean(recent, |h| h.light) - mean(older, |h| h.light);

    let moisture = (moisture_diff.abs() > config.moisture_threshold).then(|| {
        if moisture_diff > 0.0 {
            MoistureTrend::Increasing
        } else {
            MoistureTrend::Decreasing
        }
    });
    let light = (light_diff.abs() > config.light_threshold).then(|| {
        if light_diff > 0.0 {
            LightTrend::Improving
        } else {
            LightTrend::Declining
        }
    });

    TrendSummary { moisture, light }
}

/// Callers guarantee a non-empty slice.
fn mean(entries: &[HistoryEntry], field: impl Fn(&HistoryEntry) -> f64) -> f64 {
    entries.iter().map(field).sum::<f64>() / entries.len() as f64
}
