//! Rolling 7-day consistency, trend and capacity indicators
//!
//! # Algorithm
//!
//! 1. Count the days with any logged data. Fewer than three means there is
//!    not enough to say anything and every indicator is withheld.
//! 2. Consistency is that count as a rounded percentage of the window.
//! 3. Recovery scores are taken per day, keeping their position, and the
//!    days with a score are read most-recent-first. The first three form the
//!    "recent" block and the next three the "previous" block.
//! 4. With fewer than two recent scores no trend is reported.
//! 5. Otherwise the recent block's population variance decides first: above
//!    400 the trend is oscillating whatever the direction. Failing that the
//!    difference between the block means classifies it as rising, falling
//!    or stable, using a dead band of 3 points.
//! 6. Capacity bands the recent mean.

use statrs::statistics::Statistics;
use tracing::debug;

use crate::models::{CapacityLabel, Indicators, TrendArrow, TrendLabel, WINDOW_DAYS};
use crate::recovery::{compute_recovery_score, has_any_data};
use crate::window::ChronologicalWindow;

/// Days with data required before any indicator is reported
pub const MIN_DAYS_WITH_DATA: usize = 3;

/// Scores per comparison block
pub const TREND_BLOCK_SIZE: usize = 3;

/// Recent-block variance above which the trend is called oscillating
pub const OSCILLATION_VARIANCE: f64 = 400.0;

/// Minimum mean difference (points) for a rising or falling trend
pub const TREND_DELTA: f64 = 3.0;

/// Outcome of comparing the recent block of scores to the previous one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendClassification {
    pub label: TrendLabel,
    pub arrow: TrendArrow,
    pub recent_avg: f64,
    pub delta: f64,
    pub variance: f64,
}

/// Indicator set calculator
pub struct IndicatorAggregator;

impl IndicatorAggregator {
    /// Compute the indicator set for a 7-day, oldest-first window
    pub fn aggregate(window: &ChronologicalWindow) -> Indicators {
        let days = window.days();
        let days_with_data = days.iter().filter(|day| has_any_data(day)).count();

        if days_with_data < MIN_DAYS_WITH_DATA {
            debug!(
                days_with_data,
                end_date = %window.end_date(),
                "Not enough logged days for indicators"
            );
            return Indicators::insufficient();
        }

        let consistency_percent =
            ((days_with_data as f64 / WINDOW_DAYS as f64) * 100.0).round() as u8;

        // (position, score) for scored days, newest first
        let mut scored: Vec<(usize, f64)> = days
            .iter()
            .enumerate()
            .filter_map(|(index, day)| compute_recovery_score(day).map(|score| (index, score)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let recent: Vec<f64> = scored
            .iter()
            .take(TREND_BLOCK_SIZE)
            .map(|(_, score)| *score)
            .collect();
        let previous: Vec<f64> = scored
            .iter()
            .skip(TREND_BLOCK_SIZE)
            .take(TREND_BLOCK_SIZE)
            .map(|(_, score)| *score)
            .collect();

        let Some(trend) = Self::classify_trend(&recent, &previous) else {
            debug!(
                scored_days = scored.len(),
                "Too few recovery scores for a trend"
            );
            return Indicators {
                consistency_percent: Some(consistency_percent),
                recovery_trend_label: None,
                recovery_trend_arrow: TrendArrow::Flat,
                capacity_label: None,
                has_enough_data: true,
            };
        };

        debug!(
            label = %trend.label,
            recent_avg = trend.recent_avg,
            delta = trend.delta,
            variance = trend.variance,
            "Recovery trend classified"
        );

        Indicators {
            consistency_percent: Some(consistency_percent),
            recovery_trend_label: Some(trend.label),
            recovery_trend_arrow: trend.arrow,
            capacity_label: Some(CapacityLabel::from_average(trend.recent_avg)),
            has_enough_data: true,
        }
    }

    /// Classify the trend between two blocks of scores, newest first
    ///
    /// Returns `None` when `recent` holds fewer than two scores. An empty
    /// `previous` block compares the recent block against itself, which reads
    /// as stable unless the variance override applies.
    pub fn classify_trend(recent: &[f64], previous: &[f64]) -> Option<TrendClassification> {
        if recent.len() < 2 {
            return None;
        }

        let recent_avg = recent.iter().mean();
        let previous_avg = if previous.is_empty() {
            recent_avg
        } else {
            previous.iter().mean()
        };
        let delta = recent_avg - previous_avg;
        let variance = recent.iter().population_variance();

        let (label, arrow) = if variance > OSCILLATION_VARIANCE {
            (TrendLabel::Oscillating, TrendArrow::Oscillating)
        } else if delta > TREND_DELTA {
            (TrendLabel::Rising, TrendArrow::Up)
        } else if delta < -TREND_DELTA {
            (TrendLabel::Falling, TrendArrow::Down)
        } else {
            (TrendLabel::Stable, TrendArrow::Up)
        };

        Some(TrendClassification {
            label,
            arrow,
            recent_avg,
            delta,
            variance,
        })
    }
}
