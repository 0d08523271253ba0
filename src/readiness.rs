//! Single-day training readiness
//!
//! Readiness starts at 100 and loses points for each warning sign on the
//! most recent day of the window:
//!
//! | Condition                                         | Penalty |
//! |---------------------------------------------------|---------|
//! | Slept under 5 h (300 min)                         | -35     |
//! | Slept 5-6 h (300-359 min)                         | -20     |
//! | Resting HR more than 5 bpm above window baseline  | -15     |
//! | HRV below 85% of window baseline                  | -15     |
//! | Fewer than 4000 steps                             | -5      |
//! | Workout finished in the last 24 h                 | -10     |
//!
//! Baselines are the mean of every non-zero value in the window, today
//! included. Sleep is read from the wearable minutes only. A metric that is
//! absent today costs nothing, and a reading of exactly 0 counts as absent.

use statrs::statistics::Statistics;
use tracing::debug;

use crate::models::{DailyMetrics, ReadinessResult, Recommendation};
use crate::window::RecentFirstWindow;

pub const SHORT_SLEEP_MINUTES: u32 = 300;
pub const SHORT_SLEEP_PENALTY: i32 = 35;
pub const REDUCED_SLEEP_MINUTES: u32 = 360;
pub const REDUCED_SLEEP_PENALTY: i32 = 20;

/// Allowed rise of resting HR over baseline, bpm
pub const RESTING_HR_MARGIN: f64 = 5.0;
pub const RESTING_HR_PENALTY: i32 = 15;

/// Fraction of baseline HRV below which today is penalized
pub const HRV_FLOOR_RATIO: f64 = 0.85;
pub const HRV_PENALTY: i32 = 15;

pub const LOW_STEPS: u32 = 4000;
pub const LOW_STEPS_PENALTY: i32 = 5;

pub const RECENT_WORKOUT_PENALTY: i32 = 10;

/// Readiness calculator
pub struct ReadinessEstimator;

impl ReadinessEstimator {
    /// Estimate readiness for the first (most recent) day of the window
    pub fn estimate(window: &RecentFirstWindow, has_recent_workout: bool) -> ReadinessResult {
        let Some(today) = window.today() else {
            debug!("Empty window, readiness unavailable");
            return ReadinessResult::insufficient_data();
        };

        let mut score: i32 = 100;

        if let Some(minutes) = today.sleep_minutes.filter(|m| *m > 0) {
            if minutes < SHORT_SLEEP_MINUTES {
                score -= SHORT_SLEEP_PENALTY;
                debug!(minutes, penalty = SHORT_SLEEP_PENALTY, "Short sleep");
            } else if minutes < REDUCED_SLEEP_MINUTES {
                score -= REDUCED_SLEEP_PENALTY;
                debug!(minutes, penalty = REDUCED_SLEEP_PENALTY, "Reduced sleep");
            }
        }

        let resting_hr_baseline = Self::baseline(window, |day| day.resting_hr);
        if let (Some(hr), Some(baseline)) = (positive(today.resting_hr), resting_hr_baseline) {
            if hr > baseline + RESTING_HR_MARGIN {
                score -= RESTING_HR_PENALTY;
                debug!(hr, baseline, penalty = RESTING_HR_PENALTY, "Elevated resting HR");
            }
        }

        let hrv_baseline = Self::baseline(window, |day| day.hrv_ms);
        if let (Some(hrv), Some(baseline)) = (positive(today.hrv_ms), hrv_baseline) {
            if hrv < baseline * HRV_FLOOR_RATIO {
                score -= HRV_PENALTY;
                debug!(hrv, baseline, penalty = HRV_PENALTY, "Suppressed HRV");
            }
        }

        if let Some(steps) = today.steps.filter(|s| *s > 0) {
            if steps < LOW_STEPS {
                score -= LOW_STEPS_PENALTY;
                debug!(steps, penalty = LOW_STEPS_PENALTY, "Low step count");
            }
        }

        if has_recent_workout {
            score -= RECENT_WORKOUT_PENALTY;
            debug!(penalty = RECENT_WORKOUT_PENALTY, "Workout in last 24h");
        }

        let score = score.clamp(0, 100) as u8;

        ReadinessResult {
            score,
            recommendation: Recommendation::from_score(score),
        }
    }

    /// Mean of a metric over every day with a non-zero reading
    fn baseline<F>(window: &RecentFirstWindow, metric: F) -> Option<f64>
    where
        F: Fn(&DailyMetrics) -> Option<f64>,
    {
        let values: Vec<f64> = window
            .days()
            .iter()
            .filter_map(|day| positive(metric(day)))
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(values.iter().mean())
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// Seven blank days, newest first, ending 2024-07-07
    fn blank_days() -> Vec<DailyMetrics> {
        let end = NaiveDate::from_ymd_opt(2024, 7, 7).unwrap();
        (0..7)
            .map(|offset| DailyMetrics::empty(end - chrono::Days::new(offset)))
            .collect()
    }

    fn window(days: Vec<DailyMetrics>) -> RecentFirstWindow {
        RecentFirstWindow::new(days).unwrap()
    }

    #[test]
    fn test_empty_window() {
        let result = ReadinessEstimator::estimate(&RecentFirstWindow::empty(), true);
        assert_eq!(result, ReadinessResult::insufficient_data());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_no_warning_signs() {
        let mut days = blank_days();
        days[0].sleep_minutes = Some(480);
        days[0].steps = Some(9000);
        let result = ReadinessEstimator::estimate(&window(days), false);

        assert_eq!(result.score, 100);
        assert_eq!(result.recommendation, Recommendation::Normal);
    }

    #[test]
    fn test_sleep_penalties() {
        let mut days = blank_days();
        days[0].sleep_minutes = Some(299);
        assert_eq!(ReadinessEstimator::estimate(&window(days.clone()), false).score, 65);

        days[0].sleep_minutes = Some(300);
        assert_eq!(ReadinessEstimator::estimate(&window(days.clone()), false).score, 80);

        days[0].sleep_minutes = Some(359);
        assert_eq!(ReadinessEstimator::estimate(&window(days.clone()), false).score, 80);

        days[0].sleep_minutes = Some(360);
        assert_eq!(ReadinessEstimator::estimate(&window(days), false).score, 100);
    }

    #[test]
    fn test_sleep_hours_alone_are_ignored() {
        let mut days = blank_days();
        days[0].sleep_hours = Some(3.0);
        assert_eq!(ReadinessEstimator::estimate(&window(days), false).score, 100);
    }

    #[test]
    fn test_resting_hr_against_baseline() {
        let mut days = blank_days();
        // baseline (80 + 6 * 68) / 7 = 69.71
        days[0].resting_hr = Some(80.0);
        for day in days.iter_mut().skip(1) {
            day.resting_hr = Some(68.0);
        }
        let result = ReadinessEstimator::estimate(&window(days.clone()), false);
        assert_eq!(result.score, 85);
        assert_eq!(result.recommendation, Recommendation::Normal);

        // 73 is within 5 bpm of baseline 68.71
        days[0].resting_hr = Some(73.0);
        assert_eq!(ReadinessEstimator::estimate(&window(days), false).score, 100);
    }

    #[test]
    fn test_hrv_against_baseline() {
        let mut days = blank_days();
        days[0].hrv_ms = Some(40.0);
        for day in days.iter_mut().skip(1) {
            day.hrv_ms = Some(60.0);
        }
        // baseline 57.14, floor 48.57
        assert_eq!(ReadinessEstimator::estimate(&window(days.clone()), false).score, 85);

        days[0].hrv_ms = Some(55.0);
        assert_eq!(ReadinessEstimator::estimate(&window(days), false).score, 100);
    }

    #[test]
    fn test_today_only_baseline_never_penalizes() {
        let mut days = blank_days();
        days[0].resting_hr = Some(95.0);
        days[0].hrv_ms = Some(15.0);
        assert_eq!(ReadinessEstimator::estimate(&window(days), false).score, 100);
    }

    #[test]
    fn test_low_steps_and_recent_workout() {
        let mut days = blank_days();
        days[0].steps = Some(3999);
        let result = ReadinessEstimator::estimate(&window(days.clone()), true);
        assert_eq!(result.score, 85);

        days[0].steps = Some(0);
        assert_eq!(ReadinessEstimator::estimate(&window(days), false).score, 100);
    }

    #[test]
    fn test_zero_wearable_readings_count_as_missing() {
        let mut days = blank_days();
        for day in days.iter_mut().skip(1) {
            day.hrv_ms = Some(60.0);
        }
        days[0].hrv_ms = Some(0.0);
        days[0].sleep_minutes = Some(0);

        let result = ReadinessEstimator::estimate(&window(days), false);
        assert_eq!(result.score, 100);
        assert_eq!(result.recommendation, Recommendation::Normal);
    }

    #[test]
    fn test_zero_history_day_left_out_of_baseline() {
        let mut days = blank_days();
        days[0].resting_hr = Some(62.0);
        days[3].resting_hr = Some(0.0);
        for day in days.iter_mut().skip(1).filter(|day| day.resting_hr.is_none()) {
            day.resting_hr = Some(60.0);
        }
        // baseline (62 + 5 * 60) / 6 = 60.33, not 52.6 with the zero included
        assert_eq!(ReadinessEstimator::estimate(&window(days), false).score, 100);
    }

    #[test]
    fn test_metrics_missing_today_cost_nothing() {
        let mut days = blank_days();
        days.truncate(4);
        for day in days.iter_mut().skip(1) {
            day.resting_hr = Some(48.0);
            day.hrv_ms = Some(90.0);
            day.sleep_minutes = Some(200);
            day.steps = Some(1000);
        }

        let result = ReadinessEstimator::estimate(&window(days), false);
        assert_eq!(result.score, 100);
        assert_eq!(result.recommendation, Recommendation::Normal);
    }

    #[test]
    fn test_combined_penalties() {
        let mut days = blank_days();
        days[0].sleep_minutes = Some(250);
        days[0].resting_hr = Some(80.0);
        for day in days.iter_mut().skip(1) {
            day.resting_hr = Some(70.0 - 10.0 / 6.0);
        }
        days[0].steps = Some(2000);

        let result = ReadinessEstimator::estimate(&window(days), true);
        assert_eq!(result.score, 35);
        assert_eq!(result.recommendation, Recommendation::MobilityWalk);
    }

    #[test]
    fn test_worst_case_floor() {
        let mut days = blank_days();
        days[0].sleep_minutes = Some(120);
        days[0].resting_hr = Some(100.0);
        days[0].hrv_ms = Some(10.0);
        days[0].steps = Some(500);
        for day in days.iter_mut().skip(1) {
            day.resting_hr = Some(50.0);
            day.hrv_ms = Some(80.0);
        }

        let result = ReadinessEstimator::estimate(&window(days), true);
        assert_eq!(result.score, 20);
        assert_eq!(result.recommendation, Recommendation::MobilityWalk);
    }

    proptest! {
        #[test]
        fn test_score_within_bounds(
            sleep in proptest::option::of(0u32..=1440),
            steps in proptest::option::of(0u32..30_000),
            hr in proptest::collection::vec(proptest::option::of(30.0f64..120.0), 1..8),
            workout in any::<bool>(),
        ) {
            let mut days = blank_days();
            days.truncate(hr.len());
            for (day, value) in days.iter_mut().zip(hr.iter()) {
                day.resting_hr = *value;
            }
            days[0].sleep_minutes = sleep;
            days[0].steps = steps;

            let window = window(days);
            let first = ReadinessEstimator::estimate(&window, workout);
            let second = ReadinessEstimator::estimate(&window, workout);

            prop_assert!(first.score <= 100);
            prop_assert_eq!(first.recommendation, Recommendation::from_score(first.score));
            prop_assert_eq!(first, second);
        }
    }
}
