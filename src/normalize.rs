//! Per-metric normalization onto a well-being subscore
//!
//! Each function is total: every input, including NaN, maps to a defined
//! subscore. Tier boundaries belong to the better tier, so a boundary value
//! like 55 bpm or 70 ms scores in the higher band.
//!
//! | Metric      | 100      | 80      | 60      | 40      | 20    |
//! |-------------|----------|---------|---------|---------|-------|
//! | Sleep (h)   | 7-9      | > 9     | 6-7     | 5-6     | < 5   |
//! | Resting HR  | <= 55    | <= 65   | <= 75   | <= 85   | > 85  |
//! | HRV (ms)    | >= 70    | >= 50   | >= 35   | >= 20   | < 20  |
//!
//! Stress and energy are linear: `100 - stress` clamped to 0-100, and
//! `(level - 1) * 20 + 20` clamped to 20-100.

/// Sleep duration in hours
pub fn normalize_sleep(hours: f64) -> f64 {
    if (7.0..=9.0).contains(&hours) {
        100.0
    } else if hours > 9.0 {
        80.0
    } else if hours >= 6.0 {
        60.0
    } else if hours >= 5.0 {
        40.0
    } else {
        20.0
    }
}

/// Self-reported stress, 0-100 where higher is worse
pub fn normalize_stress(stress: f64) -> f64 {
    // max/min rather than clamp so NaN falls to the floor
    (100.0 - stress).max(0.0).min(100.0)
}

/// Self-reported energy/focus level, 1-5
pub fn normalize_energy(level: f64) -> f64 {
    ((level - 1.0) * 20.0 + 20.0).max(20.0).min(100.0)
}

/// Resting heart rate in bpm; lower is better
pub fn normalize_resting_hr(hr: f64) -> f64 {
    if hr <= 55.0 {
        100.0
    } else if hr <= 65.0 {
        80.0
    } else if hr <= 75.0 {
        60.0
    } else if hr <= 85.0 {
        40.0
    } else {
        20.0
    }
}

/// Heart rate variability in ms; higher is better
pub fn normalize_hrv(hrv: f64) -> f64 {
    if hrv >= 70.0 {
        100.0
    } else if hrv >= 50.0 {
        80.0
    } else if hrv >= 35.0 {
        60.0
    } else if hrv >= 20.0 {
        40.0
    } else {
        20.0
    }
}
