//! Ordered daily windows
//!
//! The indicator set reads days oldest-first while readiness reads them
//! most-recent-first. The two orderings are separate types so one can't be
//! passed where the other is expected; the only way across is
//! [`ChronologicalWindow::to_recent_first`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ValidationError;
use crate::models::{DailyMetrics, WINDOW_DAYS};

/// Exactly seven days ordered oldest-first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChronologicalWindow {
    days: Vec<DailyMetrics>,
}

impl ChronologicalWindow {
    /// Build a window from oldest-first days
    ///
    /// Fails on any length other than [`WINDOW_DAYS`], on dates that are not
    /// strictly ascending, or on a day carrying out-of-domain values.
    pub fn new(days: Vec<DailyMetrics>) -> Result<Self, ValidationError> {
        if days.len() != WINDOW_DAYS {
            return Err(ValidationError::WindowLength {
                expected: WINDOW_DAYS,
                actual: days.len(),
            });
        }

        if let Some(position) = days
            .windows(2)
            .position(|pair| pair[1].date <= pair[0].date)
        {
            return Err(ValidationError::WindowOrder {
                position: position + 1,
            });
        }

        for day in &days {
            day.validate()?;
        }

        Ok(ChronologicalWindow { days })
    }

    pub fn days(&self) -> &[DailyMetrics] {
        &self.days
    }

    /// Most recent date in the window
    pub fn end_date(&self) -> NaiveDate {
        self.days[self.days.len() - 1].date
    }

    /// Same days, most recent first
    pub fn to_recent_first(&self) -> RecentFirstWindow {
        RecentFirstWindow {
            days: self.days.iter().rev().cloned().collect(),
        }
    }

    pub fn into_days(self) -> Vec<DailyMetrics> {
        self.days
    }
}

impl TryFrom<Vec<DailyMetrics>> for ChronologicalWindow {
    type Error = ValidationError;

    fn try_from(days: Vec<DailyMetrics>) -> Result<Self, Self::Error> {
        ChronologicalWindow::new(days)
    }
}

/// Any number of days ordered most-recent-first; may be empty
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentFirstWindow {
    days: Vec<DailyMetrics>,
}

impl RecentFirstWindow {
    /// Build a window from most-recent-first days
    pub fn new(days: Vec<DailyMetrics>) -> Result<Self, ValidationError> {
        if let Some(position) = days
            .windows(2)
            .position(|pair| pair[1].date >= pair[0].date)
        {
            return Err(ValidationError::WindowOrder {
                position: position + 1,
            });
        }

        for day in &days {
            day.validate()?;
        }

        Ok(RecentFirstWindow { days })
    }

    pub fn empty() -> Self {
        RecentFirstWindow { days: Vec::new() }
    }

    /// The day readiness is estimated for
    pub fn today(&self) -> Option<&DailyMetrics> {
        self.days.first()
    }

    pub fn days(&self) -> &[DailyMetrics] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl From<&ChronologicalWindow> for RecentFirstWindow {
    fn from(window: &ChronologicalWindow) -> Self {
        window.to_recent_first()
    }
}
