pub mod commands;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use study_planner_core::Settings;

/// Study planner: builds and adjusts study calendars from JSON files.
#[derive(Debug, Parser)]
#[command(name = "study-planner", version)]
pub struct Cli {
    /// JSON settings file; missing fields use defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a calendar from a syllabus
    Plan {
        #[arg(long)]
        syllabus: PathBuf,
        #[arg(long)]
        exam_date: NaiveDate,
        /// First day of the plan (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long, default_value_t = 60)]
        minutes_per_day: u32,
    },
    /// Rank topics and fill today's time budget
    Today {
        /// JSON list of mastery records
        #[arg(long)]
        masteries: PathBuf,
        /// JSON list of {"id", "name"} topics; unseen topics start fresh
        #[arg(long)]
        topics: Option<PathBuf>,
        #[arg(long, value_parser = parse_instant)]
        exam_date: DateTime<Utc>,
        #[arg(long, default_value_t = 60)]
        minutes: i64,
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },
    /// Apply a quiz score to a mastery record
    Review {
        #[arg(long)]
        mastery: PathBuf,
        #[arg(long)]
        score: f64,
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },
    /// Carry missed work forward and remediate weak topics
    Adjust {
        #[arg(long)]
        plan: PathBuf,
        /// JSON list of quiz results
        #[arg(long)]
        results: Option<PathBuf>,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

/// Accepts RFC 3339 timestamps or plain dates (midnight UTC).
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
        .ok_or_else(|| format!("expected RFC 3339 timestamp or YYYY-MM-DD date, got {:?}", value))
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    let output = commands::execute(cli.command, &settings)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_settings(path: Option<&std::path::Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => {
            tracing::info!("Loading settings from {}", path.display());
            commands::read_json(path).context("failed to load settings")
        }
        None => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_instant_accepts_dates() {
        let at = parse_instant("2025-05-20").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2025, 5, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_accepts_rfc3339() {
        let at = parse_instant("2025-05-20T10:30:00+02:00").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2025, 5, 20, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(parse_instant("next tuesday").is_err());
    }

    #[test]
    fn test_cli_parses_plan_command() {
        let cli = Cli::try_parse_from([
            "study-planner",
            "plan",
            "--syllabus",
            "bio.json",
            "--exam-date",
            "2025-06-01",
            "--config",
            "planner.json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("planner.json")));
        match cli.command {
            Command::Plan {
                minutes_per_day,
                start,
                exam_date,
                ..
            } => {
                assert_eq!(minutes_per_day, 60);
                assert_eq!(start, None);
                assert_eq!(exam_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_requires_exam_date() {
        assert!(Cli::try_parse_from(["study-planner", "today", "--masteries", "m.json"]).is_err());
    }
}
