// Library interface for RecoveryRS modules
// Scoring is pure and synchronous; config, logging, import and export are the
// glue used by the CLI.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod import;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod readiness;
pub mod reconcile;
pub mod recovery;
pub mod window;

// Re-export commonly used types for convenience
pub use models::*;
pub use engine::{Assessment, BatchOutcome, EngineSettings, ScoringEngine, UserLogs};
pub use indicators::IndicatorAggregator;
pub use readiness::ReadinessEstimator;
pub use reconcile::DailyLogReconciler;
pub use recovery::{compute_recovery_score, has_any_data};
pub use window::{ChronologicalWindow, RecentFirstWindow};
pub use error::{RecoveryRsError, Result, ValidationError};
pub use logging::{LogConfig, LogFormat, LogLevel};
