use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use recoveryrs::config::{AppConfig, OutputFormat};
use recoveryrs::export::AssessmentReport;
use recoveryrs::import::{load_automatic_logs, load_manual_logs};
use recoveryrs::logging::{init_logging, LogLevel};
use recoveryrs::{RecoveryRsError, ScoringEngine, UserLogs};

/// RecoveryRS - Recovery & Readiness Scoring CLI
///
/// Merges self-reported and wearable daily logs and scores weekly recovery
/// consistency, trend and capacity plus today's training readiness.
#[derive(Parser)]
#[command(name = "recoveryrs")]
#[command(author = "RecoveryRS Contributors")]
#[command(version)]
#[command(about = "Recovery and readiness scoring CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the 7 days ending on a date
    Assess {
        /// Self-reported log file (CSV or JSON)
        #[arg(short, long)]
        manual: PathBuf,

        /// Wearable log file (CSV or JSON)
        #[arg(short, long)]
        automatic: PathBuf,

        /// Last day of the window (YYYY-MM-DD, default today)
        #[arg(short, long)]
        end: Option<String>,

        /// User identifier shown in the report
        #[arg(short, long, default_value = "local")]
        user: String,

        /// A workout finished within the last 24 hours
        #[arg(short = 'w', long)]
        recent_workout: bool,

        /// Output format (text, json)
        #[arg(short = 'f', long)]
        format: Option<String>,
    },

    /// Show or initialize configuration
    Config {
        /// Print the active configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default config file to the default location
        #[arg(short, long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    if cli.verbose > 0 {
        config.logging.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&config.logging)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Assess {
            manual,
            automatic,
            end,
            user,
            recent_workout,
            format,
        } => {
            let as_of = match end {
                Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .with_context(|| format!("Invalid end date: {}", date))?,
                None => chrono::Local::now().date_naive(),
            };
            let format = match format {
                Some(f) => f.parse::<OutputFormat>().map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let logs = UserLogs {
                user_id: user,
                manual: load_manual_logs(&manual).map_err(friendly)?,
                automatic: load_automatic_logs(&automatic).map_err(friendly)?,
                has_recent_workout: recent_workout,
            };

            let engine = ScoringEngine::with_settings(config.engine.clone());
            let assessment = engine
                .assess(&logs, as_of)
                .map_err(|e| friendly(e.into()))?;
            let report = AssessmentReport::new(&assessment);

            match format {
                OutputFormat::Json => println!("{}", report.render_json()?),
                OutputFormat::Text => {
                    println!("{}", "Recovery & readiness assessment".green().bold());
                    println!("{}", report.render_text()?);
                }
            }
        }

        Commands::Config { show, init } => {
            if init {
                let path = AppConfig::default_config_path();
                let mut defaults = AppConfig::default();
                defaults.save_default()?;
                println!("{} {}", "✓ Wrote default config to".green(), path.display());
            }
            if show || !init {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

/// Log a library error at its severity and surface its user-facing wording
fn friendly(err: RecoveryRsError) -> anyhow::Error {
    err.log();
    anyhow::anyhow!(err.user_message())
}
