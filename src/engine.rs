//! End-to-end scoring for one user or a batch of users
//!
//! The engine reconciles a user's rows into the 7-day window and then runs
//! the indicator set and the readiness estimate side by side. Neither
//! computation mutates the window, so they are handed to `rayon::join`
//! without any coordination. Batches fan out per user on the rayon pool;
//! a malformed user yields an error entry instead of failing the batch.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{RecoveryRsError, Result, ValidationError};
use crate::indicators::IndicatorAggregator;
use crate::models::{AutomaticLog, Indicators, ManualLog, ReadinessResult, RecoveryScore};
use crate::readiness::ReadinessEstimator;
use crate::reconcile::DailyLogReconciler;
use crate::recovery::recovery_scores;
use crate::window::ChronologicalWindow;

/// Engine execution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Score batches on the rayon pool instead of sequentially
    pub parallel_batch: bool,

    /// Worker threads for batch scoring (None uses rayon's default)
    pub batch_threads: Option<usize>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            parallel_batch: true,
            batch_threads: None,
        }
    }
}

/// Already-fetched rows for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLogs {
    pub user_id: String,
    pub manual: Vec<ManualLog>,
    pub automatic: Vec<AutomaticLog>,
    /// Any workout ended within the trailing 24 hours
    pub has_recent_workout: bool,
}

/// Full scoring output for one user and date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub user_id: String,
    pub as_of: NaiveDate,
    pub window: ChronologicalWindow,
    pub recovery_scores: Vec<RecoveryScore>,
    pub indicators: Indicators,
    pub readiness: ReadinessResult,
}

/// One entry of a batch run
#[derive(Debug)]
pub struct BatchOutcome {
    pub user_id: String,
    pub result: std::result::Result<Assessment, ValidationError>,
}

/// Scoring pipeline
pub struct ScoringEngine {
    reconciler: DailyLogReconciler,
    settings: EngineSettings,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    /// Create engine with default settings
    pub fn new() -> Self {
        ScoringEngine {
            reconciler: DailyLogReconciler::new(),
            settings: EngineSettings::default(),
        }
    }

    /// Create engine with custom settings
    pub fn with_settings(settings: EngineSettings) -> Self {
        ScoringEngine {
            reconciler: DailyLogReconciler::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Indicator set and readiness for an already reconciled window
    pub fn evaluate(
        &self,
        window: &ChronologicalWindow,
        has_recent_workout: bool,
    ) -> (Indicators, ReadinessResult) {
        rayon::join(
            || IndicatorAggregator::aggregate(window),
            || ReadinessEstimator::estimate(&window.to_recent_first(), has_recent_workout),
        )
    }

    /// Score one user's rows for the window ending at `as_of`
    pub fn assess(
        &self,
        logs: &UserLogs,
        as_of: NaiveDate,
    ) -> std::result::Result<Assessment, ValidationError> {
        let window = self
            .reconciler
            .reconcile_window(&logs.manual, &logs.automatic, as_of)?;
        let (indicators, readiness) = self.evaluate(&window, logs.has_recent_workout);

        Ok(Assessment {
            user_id: logs.user_id.clone(),
            as_of,
            recovery_scores: recovery_scores(&window),
            window,
            indicators,
            readiness,
        })
    }

    /// Score many users for the same date
    ///
    /// Outcomes come back in input order. Only a failure to build the worker
    /// pool is returned as an error.
    pub fn assess_batch(&self, users: &[UserLogs], as_of: NaiveDate) -> Result<Vec<BatchOutcome>> {
        let score = |logs: &UserLogs| {
            let result = self.assess(logs, as_of);
            if let Err(e) = &result {
                warn!(user_id = %logs.user_id, error = %e, "Skipping user with invalid logs");
            }
            BatchOutcome {
                user_id: logs.user_id.clone(),
                result,
            }
        };

        let outcomes: Vec<BatchOutcome> = if !self.settings.parallel_batch {
            users.iter().map(score).collect()
        } else if let Some(threads) = self.settings.batch_threads {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    RecoveryRsError::Internal(format!("Failed to create thread pool: {}", e))
                })?;
            pool.install(|| users.par_iter().map(score).collect())
        } else {
            users.par_iter().map(score).collect()
        };

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            users = users.len(),
            failed,
            %as_of,
            "Batch assessment completed"
        );

        Ok(outcomes)
    }
}
