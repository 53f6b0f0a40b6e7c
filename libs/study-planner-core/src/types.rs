//! Core types for the study planner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::sm2::{DEFAULT_EASE_FACTOR, INITIAL_INTERVAL};
use crate::resources::Resource;

/// Kind of study task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Learn,
    Practice,
    Review,
    Test,
}

impl TaskKind {
    /// Get the task kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learn => "learn",
            Self::Practice => "practice",
            Self::Review => "review",
            Self::Test => "test",
        }
    }
}

/// A learner's spaced-repetition state for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicMastery {
    pub topic_id: String,
    pub topic_name: String,
    /// Mastery estimate, 0-100.
    pub mastery_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review_date: DateTime<Utc>,
    pub ease_factor: f64,
    pub interval_days: u32,
    /// Successful reviews.
    pub repetitions: u32,
    /// Failed reviews.
    pub lapses: u32,
}

impl TopicMastery {
    /// Record for a topic seen for the first time: no mastery, due at `now`.
    pub fn new(topic_id: impl Into<String>, topic_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            topic_id: topic_id.into(),
            topic_name: topic_name.into(),
            mastery_level: 0,
            last_reviewed: None,
            next_review_date: now,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: INITIAL_INTERVAL,
            repetitions: 0,
            lapses: 0,
        }
    }

    /// Whether the topic is due for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}

/// A single unit of study work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyTask {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    pub kind: TaskKind,
    pub duration_minutes: u32,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default)]
    pub completed: bool,
}

impl StudyTask {
    /// Create a task with no optional metadata.
    pub fn new(topic: impl Into<String>, kind: TaskKind, duration_minutes: u32) -> Self {
        Self {
            topic: topic.into(),
            topic_id: None,
            kind,
            duration_minutes,
            resources: Vec::new(),
            due_date: None,
            reason: None,
            priority: None,
            completed: false,
        }
    }

    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// A quiz result reported for a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub topic: String,
    /// Score, 0-100.
    pub score: f64,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_mastery_is_due_immediately() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let mastery = TopicMastery::new("t1", "Cell Biology", now);
        assert_eq!(mastery.mastery_level, 0);
        assert_eq!(mastery.ease_factor, 2.5);
        assert_eq!(mastery.interval_days, 1);
        assert_eq!(mastery.last_reviewed, None);
        assert!(mastery.is_due(now));
    }

    #[test]
    fn task_kind_serializes_snake_case() {
        let json = serde_json::to_string(&TaskKind::Practice).unwrap();
        assert_eq!(json, "\"practice\"");
        assert_eq!(TaskKind::Test.as_str(), "test");
    }

    #[test]
    fn task_completed_defaults_to_false() {
        let task: StudyTask =
            serde_json::from_str(r#"{"topic":"Genetics","kind":"learn","duration_minutes":30}"#)
                .unwrap();
        assert!(!task.completed);
        assert!(task.resources.is_empty());
    }
}
