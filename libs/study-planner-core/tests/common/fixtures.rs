//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, Utc};
use study_planner_core::{Syllabus, SyllabusUnit, TestResult, TopicMastery};

/// A syllabus with `units` equally weighted units of `topics_per_unit` topics.
///
/// # Arguments
/// * `units` - Number of units to generate
/// * `topics_per_unit` - Topics in each unit
pub fn sample_syllabus(units: usize, topics_per_unit: usize) -> Syllabus {
    Syllabus {
        title: "AP Biology".to_string(),
        units: (0..units)
            .map(|u| SyllabusUnit {
                title: Some(format!("Unit {}", u + 1)),
                weight: 1.0 / units as f64,
                topics: (0..topics_per_unit)
                    .map(|t| format!("Topic {}.{}", u + 1, t + 1))
                    .collect(),
            })
            .collect(),
    }
}

/// A mastery record reviewed `repetitions` times, due `due_in_days` from `now`.
pub fn mastery(id: &str, level: u8, repetitions: u32, due_in_days: i64, now: DateTime<Utc>) -> TopicMastery {
    TopicMastery {
        mastery_level: level,
        repetitions,
        last_reviewed: Some(now - chrono::Duration::days(3)),
        next_review_date: now + chrono::Duration::days(due_in_days),
        ..TopicMastery::new(id, format!("Topic {}", id), now)
    }
}

/// A quiz result for `topic` recorded at `at`.
pub fn quiz_result(topic: &str, score: f64, at: DateTime<Utc>) -> TestResult {
    TestResult {
        topic: topic.to_string(),
        score,
        date: at,
    }
}
