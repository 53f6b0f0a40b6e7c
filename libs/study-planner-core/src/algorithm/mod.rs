//! Spaced repetition scheduling for topic mastery.

pub mod sm2;

use crate::types::TopicMastery;
use chrono::{DateTime, Utc};

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Mastery record after a quiz scored `score` (0-100) at `now`.
    fn review(&self, mastery: &TopicMastery, score: f64, now: DateTime<Utc>) -> TopicMastery;

    /// Record for a topic the learner has never studied.
    fn initial_mastery(&self, topic_id: &str, topic_name: &str, now: DateTime<Utc>) -> TopicMastery;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(sm2::Sm2::default())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(get_algorithm("sm2").map(|a| a.name()), Some("sm2"));
        assert!(get_algorithm("leitner").is_none());
    }
}
