//! Rendering assessments for people and machines
//!
//! This is the only place that knows about glyphs and wording; the engine's
//! output types stay presentation-free.

use serde::Serialize;
use std::fmt::Write;
use tabled::{settings::Style, Table, Tabled};

use crate::engine::Assessment;
use crate::models::TrendArrow;

/// Terminal glyph for a trend arrow
pub fn arrow_glyph(arrow: TrendArrow) -> &'static str {
    match arrow {
        TrendArrow::Up => "↑",
        TrendArrow::Down => "↓",
        TrendArrow::Flat => "→",
        TrendArrow::Oscillating => "~",
    }
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Sleep (h)")]
    sleep: String,
    #[tabled(rename = "Stress")]
    stress: String,
    #[tabled(rename = "Energy")]
    energy: String,
    #[tabled(rename = "Resting HR")]
    resting_hr: String,
    #[tabled(rename = "HRV (ms)")]
    hrv: String,
    #[tabled(rename = "Steps")]
    steps: String,
    #[tabled(rename = "Recovery")]
    recovery: String,
}

fn cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn decimal_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

/// Presentation wrapper around an [`Assessment`]
#[derive(Debug, Serialize)]
pub struct AssessmentReport<'a> {
    #[serde(flatten)]
    assessment: &'a Assessment,
    readiness_description: &'static str,
}

impl<'a> AssessmentReport<'a> {
    pub fn new(assessment: &'a Assessment) -> Self {
        AssessmentReport {
            assessment,
            readiness_description: assessment.readiness.recommendation.description(),
        }
    }

    /// Pretty-printed JSON
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable report with a per-day table
    pub fn render_text(&self) -> Result<String, std::fmt::Error> {
        let assessment = self.assessment;
        let rows: Vec<DayRow> = assessment
            .window
            .days()
            .iter()
            .zip(&assessment.recovery_scores)
            .map(|(day, recovery)| DayRow {
                date: day.date.format("%Y-%m-%d").to_string(),
                sleep: decimal_cell(day.sleep_hours),
                stress: cell(day.stress_level),
                energy: cell(day.energy_focus),
                resting_hr: decimal_cell(day.resting_hr),
                hrv: decimal_cell(day.hrv_ms),
                steps: cell(day.steps),
                recovery: decimal_cell(recovery.score),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::modern());

        let indicators = &assessment.indicators;
        let mut out = String::new();

        writeln!(out, "User: {}", assessment.user_id)?;
        writeln!(out, "As of: {}", assessment.as_of.format("%Y-%m-%d"))?;
        writeln!(out)?;
        writeln!(out, "{}", table)?;
        writeln!(out)?;

        writeln!(out, "RECOVERY INDICATORS")?;
        if indicators.has_enough_data {
            writeln!(out, "Consistency: {}%", cell(indicators.consistency_percent))?;
            writeln!(
                out,
                "Trend: {} {}",
                arrow_glyph(indicators.recovery_trend_arrow),
                cell(indicators.recovery_trend_label)
            )?;
            writeln!(out, "Capacity: {}", cell(indicators.capacity_label))?;
        } else {
            writeln!(out, "Not enough logged days in the last week")?;
        }
        writeln!(out)?;

        writeln!(out, "READINESS")?;
        writeln!(out, "Score: {}/100", assessment.readiness.score)?;
        writeln!(
            out,
            "Recommendation: {} ({})",
            assessment.readiness.recommendation, self.readiness_description
        )?;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ScoringEngine, UserLogs};
    use crate::models::{AutomaticLog, ManualLog};
    use chrono::NaiveDate;

    fn assessment(days_logged: u64) -> Assessment {
        let as_of = NaiveDate::from_ymd_opt(2024, 11, 20).unwrap();
        let manual = (0..days_logged)
            .map(|offset| ManualLog {
                stress_level: Some(25),
                energy_focus: Some(4),
                ..ManualLog::new(as_of - chrono::Days::new(offset))
            })
            .collect();
        let mut wearable = AutomaticLog::new(as_of);
        wearable.sleep_minutes = Some(330);

        ScoringEngine::new()
            .assess(
                &UserLogs {
                    user_id: "athlete-7".to_string(),
                    manual,
                    automatic: vec![wearable],
                    has_recent_workout: false,
                },
                as_of,
            )
            .unwrap()
    }

    #[test]
    fn test_arrow_glyphs() {
        assert_eq!(arrow_glyph(TrendArrow::Up), "↑");
        assert_eq!(arrow_glyph(TrendArrow::Flat), "→");
    }

    #[test]
    fn test_text_report_sections() {
        let assessment = assessment(7);
        let text = AssessmentReport::new(&assessment).render_text().unwrap();

        assert!(text.contains("athlete-7"));
        assert!(text.contains("2024-11-20"));
        assert!(text.contains("Consistency: 100%"));
        assert!(text.contains("Score: 80/100"));
        assert!(text.contains("Recommendation: Normal"));
    }

    #[test]
    fn test_text_report_without_enough_data() {
        let assessment = assessment(1);
        let text = AssessmentReport::new(&assessment).render_text().unwrap();
        assert!(text.contains("Not enough logged days"));
    }

    #[test]
    fn test_json_report_fields() {
        let assessment = assessment(7);
        let json = AssessmentReport::new(&assessment).render_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["user_id"], "athlete-7");
        assert_eq!(value["indicators"]["consistency_percent"], 100);
        assert_eq!(value["indicators"]["recovery_trend_arrow"], "down");
        assert_eq!(value["recovery_scores"].as_array().unwrap().len(), 7);
        assert_eq!(value["readiness"]["recommendation"], "normal");
        assert_eq!(value["readiness_description"], "Train as planned");
        assert_eq!(value["window"]["days"].as_array().unwrap().len(), 7);
    }
}
