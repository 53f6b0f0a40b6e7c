//! Study calendars: generation from a syllabus and adjustment from results.

pub mod adjuster;
pub mod generator;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::StudyTask;

pub use adjuster::adjust_plan;
pub use generator::{generate_plan, workable_days, PlanRequest};

/// One calendar day of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyDay {
    pub date: NaiveDate,
    pub is_rest_day: bool,
    #[serde(default)]
    pub tasks: Vec<StudyTask>,
}

impl StudyDay {
    pub fn rest(date: NaiveDate) -> Self {
        Self {
            date,
            is_rest_day: true,
            tasks: Vec::new(),
        }
    }

    pub fn study(date: NaiveDate, tasks: Vec<StudyTask>) -> Self {
        Self {
            date,
            is_rest_day: false,
            tasks,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.tasks.iter().map(|t| t.duration_minutes).sum()
    }
}

/// A calendar of study days leading up to an exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub exam_name: String,
    pub days: Vec<StudyDay>,
}

impl StudyPlan {
    pub fn day(&self, date: NaiveDate) -> Option<&StudyDay> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Days that are not rest days.
    pub fn study_day_count(&self) -> usize {
        self.days.iter().filter(|d| !d.is_rest_day).count()
    }

    pub fn total_minutes(&self) -> u32 {
        self.days.iter().map(StudyDay::total_minutes).sum()
    }

    /// Copy of the plan with one task flagged as done.
    ///
    /// Unknown dates or indices leave the copy unchanged.
    pub fn with_task_completed(&self, date: NaiveDate, index: usize) -> StudyPlan {
        let mut builder = PlanBuilder::new(self.exam_name.clone());
        for day in &self.days {
            let mut day = day.clone();
            if day.date == date {
                if let Some(task) = day.tasks.get_mut(index) {
                    task.completed = true;
                }
            }
            builder.push_day(day);
        }
        builder.build()
    }
}

/// Assembles a new plan day by day.
///
/// Rest days pushed through the builder always end up with no tasks.
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    exam_name: String,
    days: Vec<StudyDay>,
}

impl PlanBuilder {
    pub fn new(exam_name: impl Into<String>) -> Self {
        Self {
            exam_name: exam_name.into(),
            days: Vec::new(),
        }
    }

    pub fn push_day(&mut self, mut day: StudyDay) -> &mut Self {
        if day.is_rest_day {
            day.tasks.clear();
        }
        self.days.push(day);
        self
    }

    pub fn build(self) -> StudyPlan {
        StudyPlan {
            exam_name: self.exam_name,
            days: self.days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskKind;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn sample_plan() -> StudyPlan {
        StudyPlan {
            exam_name: "Chemistry".to_string(),
            days: vec![
                StudyDay::study(
                    date(1),
                    vec![
                        StudyTask::new("Atoms", TaskKind::Learn, 36),
                        StudyTask::new("Atoms", TaskKind::Practice, 24),
                    ],
                ),
                StudyDay::rest(date(7)),
            ],
        }
    }

    #[test]
    fn test_summaries() {
        let plan = sample_plan();
        assert_eq!(plan.study_day_count(), 1);
        assert_eq!(plan.total_minutes(), 60);
        assert_eq!(plan.day(date(1)).map(StudyDay::total_minutes), Some(60));
        assert!(plan.day(date(2)).is_none());
    }

    #[test]
    fn test_complete_task_copies_plan() {
        let plan = sample_plan();
        let updated = plan.with_task_completed(date(1), 1);
        assert!(!plan.days[0].tasks[1].completed);
        assert!(updated.days[0].tasks[1].completed);
        assert!(!updated.days[0].tasks[0].completed);
        assert_eq!(plan.with_task_completed(date(1), 9), plan);
    }

    #[test]
    fn test_builder_keeps_rest_days_empty() {
        let mut rest = StudyDay::rest(date(7));
        rest.tasks.push(StudyTask::new("Atoms", TaskKind::Review, 30));
        let mut builder = PlanBuilder::new("Chemistry");
        builder.push_day(rest);
        assert!(builder.build().days[0].tasks.is_empty());
    }

    #[test]
    fn test_dates_serialize_as_iso() {
        let json = serde_json::to_value(StudyDay::rest(date(7))).unwrap();
        assert_eq!(json["date"], "2025-09-07");
        assert_eq!(json["is_rest_day"], true);
    }
}
