//! Course syllabus: ordered units of weighted topics.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Unit name used for topics imported without one.
pub const DEFAULT_UNIT_NAME: &str = "General Topics";
/// Unit weight used when imported topics carry none.
pub const DEFAULT_UNIT_WEIGHT: f64 = 0.1;

/// A course outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllabus {
    pub title: String,
    pub units: Vec<SyllabusUnit>,
}

/// A unit of a course. `weight` is its share of total study time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusUnit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub weight: f64,
    pub topics: Vec<String>,
}

impl SyllabusUnit {
    /// Display name, falling back to its 1-based position.
    pub fn display_name(&self, index: usize) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => format!("Unit {}", index + 1),
        }
    }
}

/// A topic row as stored by a course catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRow {
    pub name: String,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub order: i64,
}

impl Syllabus {
    /// Parse and validate a syllabus from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let syllabus: Self = serde_json::from_str(json)?;
        syllabus.validate()?;
        Ok(syllabus)
    }

    /// Group catalogue rows into units.
    ///
    /// Rows are ordered by `order`; units appear in the order their first
    /// topic does and take that topic's weight.
    pub fn from_topics(title: impl Into<String>, rows: &[TopicRow]) -> Self {
        let mut sorted: Vec<&TopicRow> = rows.iter().collect();
        sorted.sort_by_key(|row| row.order);

        let mut units: Vec<(String, SyllabusUnit)> = Vec::new();
        for row in sorted {
            let unit_name = row
                .unit_name
                .clone()
                .unwrap_or_else(|| DEFAULT_UNIT_NAME.to_string());

            match units.iter_mut().find(|(name, _)| *name == unit_name) {
                Some((_, unit)) => unit.topics.push(row.name.clone()),
                None => units.push((
                    unit_name.clone(),
                    SyllabusUnit {
                        title: Some(unit_name),
                        weight: row.weight.unwrap_or(DEFAULT_UNIT_WEIGHT),
                        topics: vec![row.name.clone()],
                    },
                )),
            }
        }

        Self {
            title: title.into(),
            units: units.into_iter().map(|(_, unit)| unit).collect(),
        }
    }

    /// Reject weights that cannot be turned into minutes.
    pub fn validate(&self) -> Result<()> {
        for (index, unit) in self.units.iter().enumerate() {
            if !unit.weight.is_finite() || unit.weight < 0.0 {
                return Err(PlannerError::InvalidWeight {
                    unit: unit.display_name(index),
                    weight: unit.weight,
                });
            }
        }
        Ok(())
    }

    pub fn topic_count(&self) -> usize {
        self.units.iter().map(|u| u.topics.len()).sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.units.iter().map(|u| u.weight).sum()
    }
}
