//! Merge manual and wearable daily logs into one record per date
//!
//! Manual rows are applied first and wearable rows second, so wherever both
//! sources describe the same thing the wearable wins. In practice the only
//! overlap is sleep: a wearable sleep reading replaces the manual hours,
//! otherwise the manual value is kept. Dates with no rows in either source
//! stay in the output as empty records so downstream positional logic always
//! sees the full window.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::models::{AutomaticLog, DailyMetrics, ManualLog, WINDOW_DAYS};
use crate::window::ChronologicalWindow;

/// Default trailing window, in calendar days
pub const DEFAULT_WINDOW_DAYS: u32 = WINDOW_DAYS as u32;

/// Daily log reconciler for a fixed trailing window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyLogReconciler {
    days: u32,
}

impl Default for DailyLogReconciler {
    fn default() -> Self {
        DailyLogReconciler {
            days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl DailyLogReconciler {
    /// Reconciler over the default 7-day window
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciler over a custom window length
    pub fn with_days(days: u32) -> Result<Self, ValidationError> {
        if days == 0 {
            return Err(ValidationError::WindowLength {
                expected: 1,
                actual: 0,
            });
        }
        Ok(DailyLogReconciler { days })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Reconcile both sources over the window ending at `end_date`
    ///
    /// Returns one record per date, oldest first. Rows dated outside the
    /// window are ignored; rows inside it are validated and must not share a
    /// date with another row of the same kind.
    pub fn reconcile(
        &self,
        manual: &[ManualLog],
        automatic: &[AutomaticLog],
        end_date: NaiveDate,
    ) -> Result<Vec<DailyMetrics>, ValidationError> {
        let start_date = self.start_date(end_date);

        let mut merged: BTreeMap<NaiveDate, DailyMetrics> = start_date
            .iter_days()
            .take_while(|date| *date <= end_date)
            .map(|date| (date, DailyMetrics::empty(date)))
            .collect();

        let manual_rows = Self::rows_in_window(manual, |row| row.date, &merged, "manual")?;
        let automatic_rows = Self::rows_in_window(automatic, |row| row.date, &merged, "automatic")?;

        // Lower priority pass
        for row in manual_rows {
            row.validate().map_err(|e| {
                warn!(date = %row.date, error = %e, "Rejected manual log row");
                e
            })?;
            if let Some(day) = merged.get_mut(&row.date) {
                day.sleep_hours = row.sleep_hours;
                day.stress_level = row.stress_level;
                day.energy_focus = row.energy_focus;
                day.trained_today = row.trained_today;
            }
        }

        // Higher priority pass
        for row in automatic_rows {
            row.validate().map_err(|e| {
                warn!(date = %row.date, error = %e, "Rejected automatic log row");
                e
            })?;
            if let Some(day) = merged.get_mut(&row.date) {
                Self::apply_automatic(day, row);
            }
        }

        debug!(
            start = %start_date,
            end = %end_date,
            manual_rows = manual.len(),
            automatic_rows = automatic.len(),
            "Reconciled daily logs"
        );

        Ok(merged.into_values().collect())
    }

    /// Reconcile into the fixed 7-day window used by the indicator set
    pub fn reconcile_window(
        &self,
        manual: &[ManualLog],
        automatic: &[AutomaticLog],
        end_date: NaiveDate,
    ) -> Result<ChronologicalWindow, ValidationError> {
        let days = self.reconcile(manual, automatic, end_date)?;
        ChronologicalWindow::new(days)
    }

    fn apply_automatic(day: &mut DailyMetrics, row: &AutomaticLog) {
        if let Some(minutes) = row.sleep_minutes {
            day.sleep_minutes = Some(minutes);
            // zero minutes is "no reading" and keeps the manual hours
            if minutes > 0 {
                day.sleep_hours = Some(f64::from(minutes) / 60.0);
            }
        }
        if row.steps.is_some() {
            day.steps = row.steps;
        }
        if row.active_calories.is_some() {
            day.active_calories = row.active_calories;
        }
        if row.resting_hr.is_some() {
            day.resting_hr = row.resting_hr;
        }
        if row.hrv_ms.is_some() {
            day.hrv_ms = row.hrv_ms;
        }
    }

    /// First date of the window; stops early at the calendar's lower bound
    fn start_date(&self, end_date: NaiveDate) -> NaiveDate {
        let mut date = end_date;
        for _ in 1..self.days {
            match date.pred_opt() {
                Some(previous) => date = previous,
                None => break,
            }
        }
        date
    }

    fn rows_in_window<'a, T, F>(
        rows: &'a [T],
        date_of: F,
        window: &BTreeMap<NaiveDate, DailyMetrics>,
        record_kind: &'static str,
    ) -> Result<Vec<&'a T>, ValidationError>
    where
        F: Fn(&T) -> NaiveDate,
    {
        let mut seen = HashSet::new();
        let mut in_window = Vec::new();

        for row in rows {
            let date = date_of(row);
            if !window.contains_key(&date) {
                debug!(%date, record_kind, "Skipping row outside window");
                continue;
            }
            if !seen.insert(date) {
                warn!(%date, record_kind, "Duplicate log row");
                return Err(ValidationError::DuplicateDate { record_kind, date });
            }
            in_window.push(row);
        }

        Ok(in_window)
    }
}
