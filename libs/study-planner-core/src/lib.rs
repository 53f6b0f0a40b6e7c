//! Study planning core: decides what to study, for how long, and when to revisit it.
//!
//! Provides:
//! - SM-2 interval scheduling for topic mastery
//! - Priority scoring and a daily adaptive schedule
//! - Calendar generation from a weighted syllabus
//! - Plan adjustment from missed work and quiz results
//!
//! Every function is pure: the current time is always passed in.

pub mod algorithm;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod plan;
pub mod priority;
pub mod resources;
pub mod schedule;
pub mod syllabus;
pub mod types;

pub use algorithm::sm2::{calculate_next_interval, needs_review, score_to_quality, update_mastery_after_review, IntervalUpdate};
pub use algorithm::SpacedRepetitionAlgorithm;
pub use config::{AdjustConfig, PlannerConfig, ScheduleConfig, Settings};
pub use error::{PlannerError, Result};
pub use plan::adjuster::{topic_averages, weak_topics, TopicAverage};
pub use plan::{adjust_plan, generate_plan, workable_days, PlanBuilder, PlanRequest, StudyDay, StudyPlan};
pub use priority::{calculate_priority, determine_task_type, generate_task_reason};
pub use resources::{PlaceholderResolver, Resource, ResourceResolver, ResourceUsage};
pub use schedule::{
    fill_missing_masteries, generate_adaptive_schedule, schedule_stats, schedule_with_config, ScheduleStats,
};
pub use syllabus::{Syllabus, SyllabusUnit, TopicRow};
pub use types::{StudyTask, TaskKind, TestResult, TopicMastery};
