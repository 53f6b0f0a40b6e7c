//! Replanning from missed work and quiz results.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::{PlanBuilder, StudyDay, StudyPlan};
use crate::config::AdjustConfig;
use crate::resources::Resource;
use crate::types::{StudyTask, TaskKind, TestResult};

/// Mean quiz score for one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicAverage {
    /// Topic name as first reported.
    pub topic: String,
    pub mean_score: f64,
}

/// Mean score per topic, in order of first appearance.
///
/// Topic names are matched case-insensitively.
pub fn topic_averages(results: &[TestResult]) -> Vec<TopicAverage> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, (String, f64, u32)> = HashMap::new();

    for result in results {
        let key = topic_key(&result.topic);
        let entry = totals.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (result.topic.clone(), 0.0, 0)
        });
        entry.1 += result.score;
        entry.2 += 1;
    }

    order
        .into_iter()
        .filter_map(|key| totals.remove(&key))
        .map(|(topic, sum, count)| TopicAverage {
            topic,
            mean_score: sum / f64::from(count),
        })
        .collect()
}

/// Topics whose mean score is below the weak threshold.
pub fn weak_topics(averages: &[TopicAverage], config: &AdjustConfig) -> Vec<String> {
    averages
        .iter()
        .filter(|a| a.mean_score < config.weak_threshold)
        .map(|a| a.topic.clone())
        .collect()
}

/// Rewrite `plan` as of `today`.
///
/// Past days are dropped and their unfinished tasks move to the front of
/// today. Tasks for topics averaging below the remediation threshold get more
/// time, with practice turned into review. Each weak topic gets one catch-up
/// review on the first upcoming study day. With nothing missed and no results
/// the plan comes back unchanged.
pub fn adjust_plan(plan: &StudyPlan, results: &[TestResult], today: NaiveDate, config: &AdjustConfig) -> StudyPlan {
    let (past, upcoming): (Vec<&StudyDay>, Vec<&StudyDay>) = plan.days.iter().partition(|d| d.date < today);

    let missed: Vec<StudyTask> = past
        .iter()
        .flat_map(|d| d.tasks.iter())
        .filter(|t| !t.completed)
        .cloned()
        .collect();

    if missed.is_empty() && results.is_empty() {
        return plan.clone();
    }

    let mut days: Vec<StudyDay> = upcoming.into_iter().cloned().collect();

    carry_forward(&mut days, missed, today);

    let averages = topic_averages(results);
    let means: HashMap<String, f64> = averages
        .iter()
        .map(|a| (topic_key(&a.topic), a.mean_score))
        .collect();

    for day in days.iter_mut().filter(|d| !d.is_rest_day) {
        for task in &mut day.tasks {
            if let Some(mean) = means.get(&topic_key(&task.topic)) {
                if *mean < config.remediation_threshold {
                    remediate(task, config);
                }
            }
        }
    }

    let weak = weak_topics(&averages, config);
    if let Some(day) = days.iter_mut().find(|d| !d.is_rest_day) {
        for topic in &weak {
            let key = topic_key(topic);
            let has_review = day
                .tasks
                .iter()
                .any(|t| t.kind == TaskKind::Review && topic_key(&t.topic) == key);
            if !has_review {
                day.tasks.push(catch_up_task(topic, config));
            }
        }
    }

    tracing::debug!(
        exam = %plan.exam_name,
        dropped_days = past.len(),
        weak_topics = weak.len(),
        "adjusted study plan"
    );

    let mut builder = PlanBuilder::new(plan.exam_name.clone());
    for day in days {
        builder.push_day(day);
    }
    builder.build()
}

/// Case-folded topic name used for every topic comparison.
fn topic_key(topic: &str) -> String {
    topic.to_lowercase()
}

fn carry_forward(days: &mut [StudyDay], missed: Vec<StudyTask>, today: NaiveDate) {
    if missed.is_empty() {
        return;
    }

    let target = days
        .iter()
        .position(|d| d.date == today && !d.is_rest_day)
        .or_else(|| days.iter().position(|d| !d.is_rest_day));

    match target {
        Some(index) => {
            let day = &mut days[index];
            let mut tasks = missed;
            tasks.append(&mut day.tasks);
            day.tasks = tasks;
        }
        None => {
            tracing::warn!(count = missed.len(), "no upcoming study day for missed tasks, dropping them");
        }
    }
}

fn remediate(task: &mut StudyTask, config: &AdjustConfig) {
    task.duration_minutes = (f64::from(task.duration_minutes) * config.remediation_factor).floor() as u32;
    if task.kind == TaskKind::Practice {
        task.kind = TaskKind::Review;
    }
}

fn catch_up_task(topic: &str, config: &AdjustConfig) -> StudyTask {
    StudyTask::new(topic, TaskKind::Review, config.catch_up_minutes)
        .with_resources(vec![Resource::new(format!("Review materials for {}", topic)).with_url("#")])
        .with_reason(format!("Review {}", topic))
}
