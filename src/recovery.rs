//! Daily composite recovery score
//!
//! A day's recovery score is the plain mean of whichever normalized
//! subscores it can supply out of sleep, stress, energy, resting HR and HRV.
//! Steps, active calories and the trained-today flag never contribute; they
//! only count towards whether a day "has data" for consistency purposes.
//!
//! Zero handling differs per metric. Sleep hours, resting HR and HRV must be
//! strictly positive to count, while a stress level of 0 is a valid reading.

use statrs::statistics::Statistics;

use crate::models::{DailyMetrics, RecoveryScore};
use crate::normalize::{
    normalize_energy, normalize_hrv, normalize_resting_hr, normalize_sleep, normalize_stress,
};
use crate::window::ChronologicalWindow;

/// Composite recovery subscore, or `None` when no eligible metric is present
pub fn compute_recovery_score(day: &DailyMetrics) -> Option<f64> {
    let mut subscores = Vec::with_capacity(5);

    if let Some(hours) = positive(day.sleep_hours) {
        subscores.push(normalize_sleep(hours));
    }
    if let Some(stress) = day.stress_level {
        subscores.push(normalize_stress(f64::from(stress)));
    }
    if let Some(energy) = day.energy_focus {
        subscores.push(normalize_energy(f64::from(energy)));
    }
    if let Some(hr) = positive(day.resting_hr) {
        subscores.push(normalize_resting_hr(hr));
    }
    if let Some(hrv) = positive(day.hrv_ms) {
        subscores.push(normalize_hrv(hrv));
    }

    if subscores.is_empty() {
        None
    } else {
        Some(subscores.iter().mean())
    }
}

/// True when the day carries any logged value at all
pub fn has_any_data(day: &DailyMetrics) -> bool {
    positive(day.sleep_hours).is_some()
        || day.stress_level.is_some()
        || day.energy_focus.is_some()
        || day.trained_today.is_some()
        || day.steps.map_or(false, |s| s > 0)
        || positive(day.active_calories).is_some()
        || positive(day.resting_hr).is_some()
        || positive(day.hrv_ms).is_some()
}

/// Recovery score for every day of the window, oldest first
pub fn recovery_scores(window: &ChronologicalWindow) -> Vec<RecoveryScore> {
    window
        .days()
        .iter()
        .map(|day| RecoveryScore {
            date: day.date,
            score: compute_recovery_score(day),
        })
        .collect()
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}
