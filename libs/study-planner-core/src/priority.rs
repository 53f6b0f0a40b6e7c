//! Urgency scoring for individual topics.
//!
//! A priority is the sum of four capped terms:
//! - overdue: up to 40 points, 5 per day past the review date
//! - low mastery: up to 30 points
//! - lapses: up to 15 points, 3 per failed review
//! - exam proximity: up to 15 points

use crate::date_utils::ceil_days_between;
use crate::types::{TaskKind, TopicMastery};
use chrono::{DateTime, Utc};

/// Priority at or below which a topic is not considered urgent.
pub const URGENT_PRIORITY_THRESHOLD: u32 = 20;

/// Priority score for a topic. Higher is more urgent.
pub fn calculate_priority(mastery: &TopicMastery, exam_date: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let mut priority = 0.0;

    let days_overdue = ceil_days_between(mastery.next_review_date, now);
    if days_overdue > 0 {
        priority += (days_overdue.saturating_mul(5)).min(40) as f64;
    }

    priority += f64::from(100 - mastery.mastery_level.min(100)) * 0.3;

    priority += f64::from(mastery.lapses.saturating_mul(3).min(15));

    priority += exam_proximity_points(ceil_days_between(now, exam_date));

    priority.round() as u32
}

fn exam_proximity_points(days_remaining: i64) -> f64 {
    if days_remaining < 7 {
        15.0
    } else if days_remaining < 14 {
        10.0
    } else if days_remaining < 30 {
        5.0
    } else {
        0.0
    }
}

/// Kind of task a topic should get next.
pub fn determine_task_type(mastery: &TopicMastery) -> TaskKind {
    if mastery.repetitions == 0 {
        TaskKind::Learn
    } else if mastery.mastery_level >= 70 {
        TaskKind::Practice
    } else {
        TaskKind::Review
    }
}

/// Human-readable explanation of why a topic was scheduled.
pub fn generate_task_reason(mastery: &TopicMastery, now: DateTime<Utc>) -> String {
    if mastery.repetitions == 0 {
        return "New topic - never studied".to_string();
    }

    let days_overdue = ceil_days_between(mastery.next_review_date, now);
    if days_overdue > 0 {
        let plural = if days_overdue > 1 { "s" } else { "" };
        return format!("Due for review ({} day{} overdue)", days_overdue, plural);
    }

    if mastery.mastery_level < 50 {
        return "Low mastery - needs reinforcement".to_string();
    }

    if mastery.lapses > 2 {
        return "Frequently forgotten - extra practice needed".to_string();
    }

    "Scheduled review to maintain retention".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap()
    }

    fn mastery(level: u8, repetitions: u32, lapses: u32, due_in_days: i64) -> TopicMastery {
        TopicMastery {
            mastery_level: level,
            repetitions,
            lapses,
            next_review_date: now() + Duration::days(due_in_days),
            ..TopicMastery::new("t", "Topic", now())
        }
    }

    #[test]
    fn overdue_term_is_capped() {
        let exam = now() + Duration::days(60);
        // 10 days overdue -> 40 (cap), mastery 100 -> 0
        assert_eq!(calculate_priority(&mastery(100, 3, 0, -10), exam, now()), 40);
        // 2 days overdue -> 10
        assert_eq!(calculate_priority(&mastery(100, 3, 0, -2), exam, now()), 10);
    }

    #[test]
    fn all_terms_combine() {
        let exam = now() + Duration::days(5);
        // overdue 3 days -> 15, mastery 40 -> 18, lapses 2 -> 6, exam < 7 days -> 15
        assert_eq!(calculate_priority(&mastery(40, 2, 2, -3), exam, now()), 54);
    }

    #[test]
    fn exam_proximity_bands() {
        let m = mastery(100, 1, 0, 5);
        assert_eq!(calculate_priority(&m, now() + Duration::days(10), now()), 10);
        assert_eq!(calculate_priority(&m, now() + Duration::days(20), now()), 5);
        assert_eq!(calculate_priority(&m, now() + Duration::days(45), now()), 0);
        assert_eq!(calculate_priority(&m, now() - Duration::days(1), now()), 15);
    }

    #[test]
    fn lapse_term_is_capped() {
        let exam = now() + Duration::days(90);
        assert_eq!(calculate_priority(&mastery(100, 1, 9, 5), exam, now()), 15);
    }

    #[test]
    fn low_mastery_rounds() {
        let exam = now() + Duration::days(90);
        // (100 - 95) * 0.3 = 1.5 -> 2
        assert_eq!(calculate_priority(&mastery(95, 1, 0, 5), exam, now()), 2);
    }

    #[test]
    fn task_types() {
        assert_eq!(determine_task_type(&mastery(90, 0, 0, 0)), TaskKind::Learn);
        assert_eq!(determine_task_type(&mastery(70, 2, 0, 0)), TaskKind::Practice);
        assert_eq!(determine_task_type(&mastery(69, 2, 0, 0)), TaskKind::Review);
    }

    #[test]
    fn reasons() {
        assert_eq!(generate_task_reason(&mastery(0, 0, 0, 0), now()), "New topic - never studied");
        assert_eq!(
            generate_task_reason(&mastery(80, 2, 0, -1), now()),
            "Due for review (1 day overdue)"
        );
        assert_eq!(
            generate_task_reason(&mastery(80, 2, 0, -4), now()),
            "Due for review (4 days overdue)"
        );
        assert_eq!(
            generate_task_reason(&mastery(30, 2, 0, 3), now()),
            "Low mastery - needs reinforcement"
        );
        assert_eq!(
            generate_task_reason(&mastery(60, 2, 3, 3), now()),
            "Frequently forgotten - extra practice needed"
        );
        assert_eq!(
            generate_task_reason(&mastery(85, 5, 0, 3), now()),
            "Scheduled review to maintain retention"
        );
    }
}
