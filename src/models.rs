use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Number of calendar days the indicator set is computed over
pub const WINDOW_DAYS: usize = 7;

/// Canonical per-day metrics after manual and wearable rows are merged
///
/// Every field is independently optional. For `sleep_hours`, `steps`,
/// `active_calories`, `resting_hr` and `hrv_ms` a literal zero is treated the
/// same as an absent value by the scoring code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    /// Calendar day this record describes
    pub date: NaiveDate,

    /// Hours slept (manual entry, or wearable minutes / 60)
    pub sleep_hours: Option<f64>,

    /// Minutes slept as reported by the wearable
    pub sleep_minutes: Option<u32>,

    /// Self-reported stress, 0-100 (higher is worse)
    pub stress_level: Option<u8>,

    /// Self-reported energy and focus, 1-5
    pub energy_focus: Option<u8>,

    /// Whether the user reported training on this day
    pub trained_today: Option<bool>,

    /// Step count
    pub steps: Option<u32>,

    /// Active calories burned
    pub active_calories: Option<f64>,

    /// Resting heart rate in bpm
    pub resting_hr: Option<f64>,

    /// Heart rate variability in milliseconds
    pub hrv_ms: Option<f64>,
}

impl DailyMetrics {
    /// Record for a date with no data at all
    pub fn empty(date: NaiveDate) -> Self {
        DailyMetrics {
            date,
            sleep_hours: None,
            sleep_minutes: None,
            stress_level: None,
            energy_focus: None,
            trained_today: None,
            steps: None,
            active_calories: None,
            resting_hr: None,
            hrv_ms: None,
        }
    }

    /// Reject values the source representation cannot hold
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_sleep_hours(self.sleep_hours)?;
        check_sleep_minutes(self.sleep_minutes)?;
        check_stress(self.stress_level)?;
        check_energy(self.energy_focus)?;
        check_non_negative("active_calories", self.active_calories)?;
        check_non_negative("resting_hr", self.resting_hr)?;
        check_non_negative("hrv_ms", self.hrv_ms)?;
        Ok(())
    }
}

/// Self-reported daily log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualLog {
    pub date: NaiveDate,
    pub sleep_hours: Option<f64>,
    pub stress_level: Option<u8>,
    pub energy_focus: Option<u8>,
    pub trained_today: Option<bool>,
}

impl ManualLog {
    /// Manual row with no fields filled in
    pub fn new(date: NaiveDate) -> Self {
        ManualLog {
            date,
            sleep_hours: None,
            stress_level: None,
            energy_focus: None,
            trained_today: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_sleep_hours(self.sleep_hours)?;
        check_stress(self.stress_level)?;
        check_energy(self.energy_focus)?;
        Ok(())
    }
}

/// Wearable-sourced daily log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomaticLog {
    pub date: NaiveDate,
    pub sleep_minutes: Option<u32>,
    pub steps: Option<u32>,
    pub active_calories: Option<f64>,
    pub resting_hr: Option<f64>,
    pub hrv_ms: Option<f64>,
}

impl AutomaticLog {
    /// Wearable row with no fields filled in
    pub fn new(date: NaiveDate) -> Self {
        AutomaticLog {
            date,
            sleep_minutes: None,
            steps: None,
            active_calories: None,
            resting_hr: None,
            hrv_ms: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_sleep_minutes(self.sleep_minutes)?;
        check_non_negative("active_calories", self.active_calories)?;
        check_non_negative("resting_hr", self.resting_hr)?;
        check_non_negative("hrv_ms", self.hrv_ms)?;
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::NotFinite { field }),
        Some(v) if v < 0.0 => Err(ValidationError::OutOfRange {
            field,
            value: v,
            expected: ">= 0",
        }),
        _ => Ok(()),
    }
}

fn check_sleep_hours(value: Option<f64>) -> Result<(), ValidationError> {
    check_non_negative("sleep_hours", value)?;
    match value {
        Some(v) if v > 24.0 => Err(ValidationError::OutOfRange {
            field: "sleep_hours",
            value: v,
            expected: "0-24",
        }),
        _ => Ok(()),
    }
}

fn check_sleep_minutes(value: Option<u32>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v > 1440 => Err(ValidationError::OutOfRange {
            field: "sleep_minutes",
            value: v as f64,
            expected: "0-1440",
        }),
        _ => Ok(()),
    }
}

fn check_stress(value: Option<u8>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v > 100 => Err(ValidationError::OutOfRange {
            field: "stress_level",
            value: v as f64,
            expected: "0-100",
        }),
        _ => Ok(()),
    }
}

fn check_energy(value: Option<u8>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !(1..=5).contains(&v) => Err(ValidationError::OutOfRange {
            field: "energy_focus",
            value: v as f64,
            expected: "1-5",
        }),
        _ => Ok(()),
    }
}

/// Composite recovery subscore for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryScore {
    pub date: NaiveDate,
    /// Mean of the available normalized subscores, `None` without data
    pub score: Option<f64>,
}

/// Direction of the recent recovery trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Rising,
    Falling,
    Stable,
    /// Recent scores swing too widely to call a direction
    Oscillating,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendLabel::Rising => write!(f, "Rising"),
            TrendLabel::Falling => write!(f, "Falling"),
            TrendLabel::Stable => write!(f, "Stable"),
            TrendLabel::Oscillating => write!(f, "Oscillating"),
        }
    }
}

/// Presentation-neutral arrow for the trend indicator
///
/// A `Stable` trend is paired with `Up`, not `Flat`. That pairing is kept
/// as-is until product confirms the intended icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendArrow {
    Up,
    Down,
    Flat,
    Oscillating,
}

/// Training capacity band derived from recent recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityLabel {
    Low,
    Moderate,
    High,
}

impl CapacityLabel {
    /// Band a recent recovery average
    ///
    /// - High: 75 and above
    /// - Moderate: 45 to 75
    /// - Low: below 45
    pub fn from_average(recent_avg: f64) -> Self {
        if recent_avg >= 75.0 {
            CapacityLabel::High
        } else if recent_avg >= 45.0 {
            CapacityLabel::Moderate
        } else {
            CapacityLabel::Low
        }
    }
}

impl fmt::Display for CapacityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityLabel::Low => write!(f, "Low"),
            CapacityLabel::Moderate => write!(f, "Moderate"),
            CapacityLabel::High => write!(f, "High"),
        }
    }
}

/// Rolling 7-day consistency, trend and capacity indicators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Share of days with any logged data, 0-100
    pub consistency_percent: Option<u8>,
    pub recovery_trend_label: Option<TrendLabel>,
    pub recovery_trend_arrow: TrendArrow,
    pub capacity_label: Option<CapacityLabel>,
    pub has_enough_data: bool,
}

impl Indicators {
    /// Output when fewer than the minimum number of days carry data
    pub fn insufficient() -> Self {
        Indicators {
            consistency_percent: None,
            recovery_trend_label: None,
            recovery_trend_arrow: TrendArrow::Flat,
            capacity_label: None,
            has_enough_data: false,
        }
    }
}

/// Training recommendation band for the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Normal,
    #[serde(rename = "reduce_volume_20")]
    ReduceVolume20,
    LightTechnique,
    MobilityWalk,
    InsufficientData,
}

impl Recommendation {
    /// Band a readiness score
    ///
    /// - Normal: 80 and above
    /// - ReduceVolume20: 60-79
    /// - LightTechnique: 40-59
    /// - MobilityWalk: below 40
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Recommendation::Normal
        } else if score >= 60 {
            Recommendation::ReduceVolume20
        } else if score >= 40 {
            Recommendation::LightTechnique
        } else {
            Recommendation::MobilityWalk
        }
    }

    /// Get recommendation description
    pub fn description(&self) -> &'static str {
        match self {
            Recommendation::Normal => "Train as planned",
            Recommendation::ReduceVolume20 => "Keep the session but cut volume by about 20%",
            Recommendation::LightTechnique => "Light technique work only",
            Recommendation::MobilityWalk => "Skip training; mobility work or an easy walk",
            Recommendation::InsufficientData => "Not enough recent data to estimate readiness",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Normal => write!(f, "Normal"),
            Recommendation::ReduceVolume20 => write!(f, "Reduce volume 20%"),
            Recommendation::LightTechnique => write!(f, "Light technique"),
            Recommendation::MobilityWalk => write!(f, "Mobility / walk"),
            Recommendation::InsufficientData => write!(f, "Insufficient data"),
        }
    }
}

/// Single-day training readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResult {
    /// 0-100
    pub score: u8,
    pub recommendation: Recommendation,
}

impl ReadinessResult {
    pub fn insufficient_data() -> Self {
        ReadinessResult {
            score: 0,
            recommendation: Recommendation::InsufficientData,
        }
    }
}
