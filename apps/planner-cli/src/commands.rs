//! Subcommand handlers. Each reads JSON inputs and returns a JSON document.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use study_planner_core::{
    adjust_plan, fill_missing_masteries, generate_plan, schedule_stats, schedule_with_config,
    update_mastery_after_review, PlaceholderResolver, PlanRequest, ScheduleStats, Settings, StudyPlan, StudyTask,
    Syllabus, TestResult, TopicMastery,
};

use crate::Command;

/// A topic known to the course catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicRef {
    pub id: String,
    pub name: String,
}

/// Output of the `today` command.
#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub tasks: Vec<StudyTask>,
    pub stats: ScheduleStats,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Run one subcommand.
///
/// The wall clock is read here, and only when the caller gave no explicit
/// date or time.
pub fn execute(command: Command, settings: &Settings) -> anyhow::Result<Value> {
    let value = match command {
        Command::Plan {
            syllabus,
            exam_date,
            start,
            minutes_per_day,
        } => {
            let start = start.unwrap_or_else(|| Utc::now().date_naive());
            serde_json::to_value(plan(&syllabus, start, exam_date, minutes_per_day, settings)?)?
        }
        Command::Today {
            masteries,
            topics,
            exam_date,
            minutes,
            now,
        } => {
            let now = now.unwrap_or_else(Utc::now);
            serde_json::to_value(today(&masteries, topics.as_deref(), exam_date, minutes, now, settings)?)?
        }
        Command::Review { mastery, score, now } => {
            let now = now.unwrap_or_else(Utc::now);
            serde_json::to_value(review(&mastery, score, now)?)?
        }
        Command::Adjust { plan, results, today } => {
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            serde_json::to_value(adjust(&plan, results.as_deref(), today, settings)?)?
        }
    };
    Ok(value)
}

pub fn plan(
    syllabus_path: &Path,
    start_date: NaiveDate,
    exam_date: NaiveDate,
    minutes_per_day: u32,
    settings: &Settings,
) -> anyhow::Result<StudyPlan> {
    let raw = std::fs::read_to_string(syllabus_path)
        .with_context(|| format!("failed to read {}", syllabus_path.display()))?;
    let syllabus = Syllabus::from_json(&raw)?;

    tracing::info!(
        "Planning {} units for {} until {}",
        syllabus.units.len(),
        syllabus.title,
        exam_date
    );

    let request = PlanRequest {
        syllabus,
        start_date,
        exam_date,
        minutes_per_day,
        config: settings.planner.clone(),
    };
    Ok(generate_plan(&request, &PlaceholderResolver)?)
}

pub fn today(
    masteries_path: &Path,
    topics_path: Option<&Path>,
    exam_date: DateTime<Utc>,
    minutes: i64,
    now: DateTime<Utc>,
    settings: &Settings,
) -> anyhow::Result<TodayResponse> {
    let records: Vec<TopicMastery> = read_json(masteries_path)?;
    let masteries = match topics_path {
        Some(path) => {
            let topics: Vec<TopicRef> = read_json(path)?;
            let pairs: Vec<(String, String)> = topics.into_iter().map(|t| (t.id, t.name)).collect();
            fill_missing_masteries(&pairs, &records, now)
        }
        None => records,
    };

    let tasks = schedule_with_config(&masteries, exam_date, minutes, &settings.schedule, now);
    Ok(TodayResponse {
        tasks,
        stats: schedule_stats(&masteries, now),
    })
}

pub fn review(mastery_path: &Path, score: f64, now: DateTime<Utc>) -> anyhow::Result<TopicMastery> {
    let mastery: TopicMastery = read_json(mastery_path)?;
    Ok(update_mastery_after_review(&mastery, score, now))
}

pub fn adjust(
    plan_path: &Path,
    results_path: Option<&Path>,
    today: NaiveDate,
    settings: &Settings,
) -> anyhow::Result<StudyPlan> {
    let plan: StudyPlan = read_json(plan_path)?;
    let results: Vec<TestResult> = match results_path {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    Ok(adjust_plan(&plan, &results, today, &settings.adjust))
}
