//! Forecast slot search — best windows to run a device.
//!
//! A forecast is a chronologically ordered series of `{timestamp, value}`
//! points supplied wholesale by an external source. Given a required run
//! duration in minutes, the search slides a window over the series and
//! ranks candidate windows by their average value: highest average for
//! power series, lowest for cost series.
//!
//! Windows are measured in array positions, not elapsed wall-clock time —
//! when forecast points are not exactly one minute apart the result is an
//! approximation of the requested duration.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// How many candidate windows each search returns at most.
pub const MAX_SLOTS: usize = 10;

/// One point of a forecast series. The value is watts for power series and
/// cost-per-kWh for cost series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: Timestamp,
    pub value: f64,
}

/// A contiguous candidate window scored by its average value.
///
/// `projected` extrapolates the average over the duration: kWh for power
/// slots, currency for cost slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub start: Timestamp,
    pub end: Timestamp,
    pub average: f64,
    pub projected: f64,
}

/// Best windows by solar yield: top [`MAX_SLOTS`], descending average power.
///
/// `projected` is the energy harvested over the window in kWh. Returns an
/// empty vector for an empty series or a zero duration.
#[must_use]
pub fn best_power_slots(series: &[ForecastPoint], duration_minutes: u32) -> Vec<Slot> {
    let hours = f64::from(duration_minutes) / 60.0;
    let mut slots = candidate_windows(series, duration_minutes, |avg| avg * hours / 1000.0);
    slots.sort_by(|a, b| b.average.total_cmp(&a.average));
    slots.truncate(MAX_SLOTS);
    slots
}

/// Cheapest windows by cost: top [`MAX_SLOTS`], ascending average cost.
///
/// `projected` is the estimated cost of drawing one kilowatt over the
/// window. Returns an empty vector for an empty series or a zero duration.
#[must_use]
pub fn best_cost_slots(series: &[ForecastPoint], duration_minutes: u32) -> Vec<Slot> {
    let hours = f64::from(duration_minutes) / 60.0;
    let mut slots = candidate_windows(series, duration_minutes, |avg| avg * hours);
    slots.sort_by(|a, b| a.average.total_cmp(&b.average));
    slots.truncate(MAX_SLOTS);
    slots
}

/// One candidate per start index; the last point never starts a window.
/// Windows are clamped to the end of the series, so late candidates may
/// cover fewer points than the requested duration.
fn candidate_windows(
    series: &[ForecastPoint],
    duration_minutes: u32,
    project: impl Fn(f64) -> f64,
) -> Vec<Slot> {
    if series.is_empty() || duration_minutes == 0 {
        return Vec::new();
    }

    let duration = duration_minutes as usize;
    let mut slots = Vec::with_capacity(series.len().saturating_sub(1));

    for start in 0..series.len().saturating_sub(1) {
        let window = &series[start..series.len().min(start + duration)];
        let sum: f64 = window.iter().map(|point| point.value).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = sum / window.len() as f64;

        slots.push(Slot {
            start: series[start].timestamp,
            end: window[window.len() - 1].timestamp,
            average,
            projected: project(average),
        });
    }

    slots
}
