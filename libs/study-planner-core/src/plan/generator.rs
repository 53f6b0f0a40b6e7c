//! Lays a syllabus out over the calendar between today and the exam.
//!
//! Each unit's share of the available minutes is split into learn and
//! practice tasks per topic plus a closing unit review, with practice exams at
//! the midpoint and the end. The resulting queue is packed greedily into
//! study days.

use std::collections::VecDeque;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{PlanBuilder, StudyDay, StudyPlan};
use crate::config::PlannerConfig;
use crate::date_utils::date_range;
use crate::error::Result;
use crate::resources::{Resource, ResourceResolver, ResourceUsage};
use crate::syllabus::Syllabus;
use crate::types::{StudyTask, TaskKind};

/// Everything needed to generate a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub syllabus: Syllabus,
    pub start_date: NaiveDate,
    pub exam_date: NaiveDate,
    pub minutes_per_day: u32,
    #[serde(default)]
    pub config: PlannerConfig,
}

/// Days in `[start, exam)` that are not rest days.
pub fn workable_days(start: NaiveDate, exam: NaiveDate, rest_days: &[Weekday]) -> u32 {
    date_range(start, exam)
        .filter(|d| !rest_days.contains(&d.weekday()))
        .count() as u32
}

/// Build a study calendar for `request`.
///
/// Fails only when the syllabus carries an unusable weight; an exam on or
/// before the start date yields a plan with no days.
pub fn generate_plan(request: &PlanRequest, resolver: &impl ResourceResolver) -> Result<StudyPlan> {
    request.syllabus.validate()?;

    let config = &request.config;
    let workable = workable_days(request.start_date, request.exam_date, &config.rest_days);
    let total_minutes = u64::from(workable) * u64::from(request.minutes_per_day);

    let queue = build_task_queue(&request.syllabus, total_minutes, request.minutes_per_day, config, resolver);
    let queued = queue.len();
    let plan = fill_calendar(request, queue);

    tracing::debug!(
        exam = %request.syllabus.title,
        workable_days = workable,
        total_minutes,
        queued,
        days = plan.days.len(),
        "generated study plan"
    );
    Ok(plan)
}

fn build_task_queue(
    syllabus: &Syllabus,
    total_minutes: u64,
    minutes_per_day: u32,
    config: &PlannerConfig,
    resolver: &impl ResourceResolver,
) -> VecDeque<StudyTask> {
    let unit_count = syllabus.units.len();
    let midterm_index = (unit_count / 2).checked_sub(1);
    let weight_sum = syllabus.total_weight();
    let task_cap = u64::from(minutes_per_day.min(config.max_task_minutes));

    let mut queue = VecDeque::new();

    for (index, unit) in syllabus.units.iter().enumerate() {
        let unit_name = unit.display_name(index);
        let weight = if config.normalize_weights && weight_sum > 0.0 {
            unit.weight / weight_sum
        } else {
            unit.weight
        };

        let unit_minutes = (total_minutes as f64 * weight).floor() as u64;
        let review_time = (unit_minutes as f64 * config.unit_review_share).floor() as u64;
        let study_time = unit_minutes.saturating_sub(review_time);

        if unit.topics.is_empty() {
            tracing::warn!(unit = %unit_name, "unit has no topics, skipping its study tasks");
        } else {
            let per_topic = task_cap.min(study_time / unit.topics.len() as u64);
            let learn_time = (per_topic as f64 * config.learn_share).floor() as u64;
            let practice_time = per_topic.saturating_sub(learn_time);

            for topic in &unit.topics {
                if learn_time > 0 {
                    queue.push_back(
                        StudyTask::new(topic.clone(), TaskKind::Learn, learn_time as u32)
                            .with_resources(resolver.resolve(topic, ResourceUsage::Learn)),
                    );
                }
                if practice_time > 0 {
                    queue.push_back(
                        StudyTask::new(topic.clone(), TaskKind::Practice, practice_time as u32)
                            .with_resources(resolver.resolve(topic, ResourceUsage::Practice)),
                    );
                }
            }

            if review_time > 0 {
                queue.push_back(
                    StudyTask::new(
                        format!("Review {}", unit_name),
                        TaskKind::Review,
                        task_cap.min(review_time) as u32,
                    )
                    .with_resources(vec![
                        Resource::new(format!("Summary Notes for {}", unit_name)).with_url("check-syllabus")
                    ]),
                );
            }
        }

        let is_midterm = midterm_index == Some(index);
        let is_final = index + 1 == unit_count;
        if is_midterm || is_final {
            let label = if is_midterm { "Midterm" } else { "Final" };
            queue.push_back(
                StudyTask::new(
                    format!("Full Practice Exam ({})", label),
                    TaskKind::Test,
                    config.milestone_minutes,
                )
                .with_resources(vec![Resource::new("Mock Exam PDF").with_url("exam-repository")]),
            );
        }
    }

    queue
}

fn fill_calendar(request: &PlanRequest, mut queue: VecDeque<StudyTask>) -> StudyPlan {
    let mut builder = PlanBuilder::new(request.syllabus.title.clone());
    if queue.is_empty() {
        return builder.build();
    }

    let minutes_per_day = request.minutes_per_day;

    for date in date_range(request.start_date, request.exam_date) {
        if request.config.is_rest_day(date.weekday()) {
            builder.push_day(StudyDay::rest(date));
            continue;
        }

        let mut remaining = minutes_per_day;
        let mut tasks = Vec::new();

        while remaining > 0 {
            let Some(next) = queue.front() else {
                break;
            };

            if next.duration_minutes <= remaining {
                remaining -= next.duration_minutes;
            } else if tasks.is_empty() && next.duration_minutes > minutes_per_day {
                // Oversized tasks get a day to themselves
                remaining = 0;
            } else {
                break;
            }

            if let Some(task) = queue.pop_front() {
                tasks.push(task);
            }
        }

        builder.push_day(StudyDay::study(date, tasks));

        if queue.is_empty() {
            break;
        }
    }

    builder.build()
}
