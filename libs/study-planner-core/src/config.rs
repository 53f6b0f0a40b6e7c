//! Tunable settings for plan generation, daily scheduling, and adjustment.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::priority::URGENT_PRIORITY_THRESHOLD;

/// Settings for the plan generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Weekdays with no study.
    pub rest_days: Vec<Weekday>,
    /// Share of a unit's minutes reserved for its closing review.
    pub unit_review_share: f64,
    /// Share of a topic's minutes spent on the learn task; the rest is practice.
    pub learn_share: f64,
    /// Upper bound on a single topic or unit-review task.
    pub max_task_minutes: u32,
    /// Length of a practice exam milestone.
    pub milestone_minutes: u32,
    /// Divide unit weights by their sum before allocating time.
    pub normalize_weights: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            rest_days: vec![Weekday::Sun],
            unit_review_share: 0.15,
            learn_share: 0.6,
            max_task_minutes: 60,
            milestone_minutes: 90,
            normalize_weights: false,
        }
    }
}

impl PlannerConfig {
    pub fn is_rest_day(&self, weekday: Weekday) -> bool {
        self.rest_days.contains(&weekday)
    }
}

/// Settings for the daily adaptive schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub task_duration: u32,
    /// Priority above which a topic is scheduled even when not yet due.
    pub urgent_threshold: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            task_duration: 30,
            urgent_threshold: URGENT_PRIORITY_THRESHOLD,
        }
    }
}

/// Settings for replanning from quiz results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustConfig {
    /// Mean score below which a topic's tasks become longer reviews.
    pub remediation_threshold: f64,
    /// Mean score below which a topic gets an extra catch-up review.
    pub weak_threshold: f64,
    /// Duration multiplier for remediated tasks.
    pub remediation_factor: f64,
    pub catch_up_minutes: u32,
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            remediation_threshold: 70.0,
            weak_threshold: 60.0,
            remediation_factor: 1.3,
            catch_up_minutes: 30,
        }
    }
}

/// All planner settings, as loaded from a settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub planner: PlannerConfig,
    pub schedule: ScheduleConfig,
    pub adjust: AdjustConfig,
}
