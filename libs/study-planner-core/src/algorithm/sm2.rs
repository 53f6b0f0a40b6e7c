//! SM-2 spaced repetition for topics.
//!
//! Quiz scores (0-100) are bucketed into SuperMemo quality ratings (0-5),
//! which drive the ease factor and review interval. Mastery level is tracked
//! separately as an exponential moving average of scores.

use super::SpacedRepetitionAlgorithm;
use crate::date_utils::{add_days, whole_days_between};
use crate::types::TopicMastery;
use chrono::{DateTime, Utc};

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const INITIAL_INTERVAL: u32 = 1;
pub const GRADUATING_INTERVAL: u32 = 6;
/// Longest interval the scheduler will hand out (about a century).
pub const MAX_INTERVAL: u32 = 36_500;
/// Lowest quality rating that counts as a successful review.
pub const PASSING_QUALITY: u8 = 3;
/// Weight of the newest score in the mastery moving average.
pub const LEARNING_RATE: f64 = 0.3;

/// New spacing produced by one review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalUpdate {
    pub interval_days: u32,
    pub ease_factor: f64,
}

/// Convert a quiz score (0-100) to an SM-2 quality rating (0-5).
pub fn score_to_quality(score: f64) -> u8 {
    if score >= 90.0 {
        5
    } else if score >= 80.0 {
        4
    } else if score >= 70.0 {
        3
    } else if score >= 50.0 {
        2
    } else if score >= 30.0 {
        1
    } else {
        0
    }
}

/// SM-2 recurrence for the next interval and ease factor.
pub fn calculate_next_interval(current_interval: u32, ease_factor: f64, quality: u8) -> IntervalUpdate {
    let q = f64::from(quality.min(5));
    let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    let new_ease = (ease_factor + ease_delta).max(MIN_EASE_FACTOR);

    let new_interval = if quality < PASSING_QUALITY {
        // Lapse: start spacing over
        INITIAL_INTERVAL
    } else if current_interval == 1 {
        INITIAL_INTERVAL
    } else if current_interval <= INITIAL_INTERVAL {
        GRADUATING_INTERVAL
    } else {
        ((f64::from(current_interval) * new_ease).round() as u32).clamp(1, MAX_INTERVAL)
    };

    IntervalUpdate {
        interval_days: new_interval,
        ease_factor: new_ease,
    }
}

/// Apply a review scored `score` at `now` using the default SM-2 settings.
pub fn update_mastery_after_review(mastery: &TopicMastery, score: f64, now: DateTime<Utc>) -> TopicMastery {
    Sm2::default().review(mastery, score, now)
}

/// Whether enough time has passed since the last review for this mastery band.
///
/// Struggling topics (below 60) are revisited daily, moderate ones every three
/// days, and strong ones weekly.
pub fn needs_review(last_reviewed: Option<DateTime<Utc>>, mastery_level: u8, now: DateTime<Utc>) -> bool {
    let Some(last) = last_reviewed else {
        return true;
    };

    let threshold = if mastery_level < 60 {
        1
    } else if mastery_level < 80 {
        3
    } else {
        7
    };

    whole_days_between(last, now) >= threshold
}

/// SM-2 scheduler with a configurable mastery learning rate.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub learning_rate: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            learning_rate: LEARNING_RATE,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_mastery(&self, topic_id: &str, topic_name: &str, now: DateTime<Utc>) -> TopicMastery {
        TopicMastery::new(topic_id, topic_name, now)
    }

    fn review(&self, mastery: &TopicMastery, score: f64, now: DateTime<Utc>) -> TopicMastery {
        let quality = score_to_quality(score);
        let update = calculate_next_interval(mastery.interval_days, mastery.ease_factor, quality);
        let passed = quality >= PASSING_QUALITY;

        TopicMastery {
            mastery_level: self.blend_mastery(mastery.mastery_level, score),
            last_reviewed: Some(now),
            next_review_date: add_days(now, update.interval_days),
            ease_factor: update.ease_factor,
            interval_days: update.interval_days,
            repetitions: if passed { mastery.repetitions.saturating_add(1) } else { mastery.repetitions },
            lapses: if passed { mastery.lapses } else { mastery.lapses.saturating_add(1) },
            ..mastery.clone()
        }
    }
}

impl Sm2 {
    fn blend_mastery(&self, current: u8, score: f64) -> u8 {
        let score = if score.is_finite() { score } else { 0.0 };
        let blended = f64::from(current) * (1.0 - self.learning_rate) + score * self.learning_rate;
        blended.round().clamp(0.0, 100.0) as u8
    }
}
