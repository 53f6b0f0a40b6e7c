//! Today's study queue, built from mastery records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;
use crate::priority::{calculate_priority, determine_task_type, generate_task_reason};
use crate::types::{StudyTask, TopicMastery};

/// Mastery level at which a topic counts as mastered.
pub const MASTERED_LEVEL: u8 = 80;

/// Summary of a learner's standing across topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub total_topics: usize,
    pub mastered_topics: usize,
    pub due_topics: usize,
    pub average_mastery: u8,
}

/// Rank topics by urgency and fill `minutes_available` with fixed-length tasks.
///
/// Topics that are neither due nor urgent are held back while more than half
/// of the budget remains, so due work claims the early slots.
pub fn generate_adaptive_schedule(
    masteries: &[TopicMastery],
    exam_date: DateTime<Utc>,
    minutes_available: i64,
    task_duration: u32,
    now: DateTime<Utc>,
) -> Vec<StudyTask> {
    let config = ScheduleConfig {
        task_duration,
        ..ScheduleConfig::default()
    };
    schedule_with_config(masteries, exam_date, minutes_available, &config, now)
}

/// [`generate_adaptive_schedule`] with the task length and urgency threshold
/// taken from `config`.
pub fn schedule_with_config(
    masteries: &[TopicMastery],
    exam_date: DateTime<Utc>,
    minutes_available: i64,
    config: &ScheduleConfig,
    now: DateTime<Utc>,
) -> Vec<StudyTask> {
    let task_duration = config.task_duration;
    if task_duration == 0 || minutes_available <= 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(&TopicMastery, u32)> = masteries
        .iter()
        .map(|mastery| (mastery, calculate_priority(mastery, exam_date, now)))
        .collect();
    // sort_by is stable: equal priorities keep input order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let duration = i64::from(task_duration);
    let half_budget = minutes_available as f64 * 0.5;
    let mut remaining = minutes_available;
    let mut tasks = Vec::new();

    for (mastery, priority) in ranked {
        if remaining < duration {
            break;
        }

        let is_due = mastery.is_due(now);
        let is_urgent = priority > config.urgent_threshold;
        if !is_due && !is_urgent && remaining as f64 > half_budget {
            tracing::trace!(topic = %mastery.topic_name, priority, "holding back topic");
            continue;
        }

        tasks.push(StudyTask {
            topic_id: Some(mastery.topic_id.clone()),
            due_date: Some(mastery.next_review_date),
            priority: Some(priority),
            ..StudyTask::new(mastery.topic_name.clone(), determine_task_type(mastery), task_duration)
                .with_reason(generate_task_reason(mastery, now))
        });
        remaining -= duration;
    }

    tracing::debug!(
        topics = masteries.len(),
        scheduled = tasks.len(),
        minutes_left = remaining,
        "built adaptive schedule"
    );
    tasks
}

/// One mastery record per topic, creating fresh records for unseen topics.
///
/// `topics` is `(topic_id, topic_name)` in display order; stored records are
/// matched by id.
pub fn fill_missing_masteries(
    topics: &[(String, String)],
    records: &[TopicMastery],
    now: DateTime<Utc>,
) -> Vec<TopicMastery> {
    let by_id: HashMap<&str, &TopicMastery> = records.iter().map(|r| (r.topic_id.as_str(), r)).collect();

    topics
        .iter()
        .map(|(id, name)| match by_id.get(id.as_str()) {
            Some(existing) => TopicMastery {
                topic_name: name.clone(),
                ..(*existing).clone()
            },
            None => TopicMastery::new(id.clone(), name.clone(), now),
        })
        .collect()
}

/// Counts and average mastery for a set of topics.
pub fn schedule_stats(masteries: &[TopicMastery], now: DateTime<Utc>) -> ScheduleStats {
    let total_topics = masteries.len();
    let average_mastery = if total_topics == 0 {
        0
    } else {
        let sum: u64 = masteries.iter().map(|m| u64::from(m.mastery_level)).sum();
        (sum as f64 / total_topics as f64).round() as u8
    };

    ScheduleStats {
        total_topics,
        mastered_topics: masteries.iter().filter(|m| m.mastery_level >= MASTERED_LEVEL).count(),
        due_topics: masteries.iter().filter(|m| m.is_due(now)).count(),
        average_mastery,
    }
}
