//! Core data records: notes, reviewers, grades, and workload snapshots
//!
//! These are the in-memory shapes exchanged between the store, the
//! reliability analyzer, and the assignment balancer. The SQLite store is
//! the system of record; everything here is a materialized copy.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RubricConfig;
use crate::error::{ConcordError, Result};

/// A note under review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Opaque note identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Attributed author, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

/// Experience tier of a reviewer, an attribute assigned by administrators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceTier {
    /// Senior reviewers (the original system's attendings and fellows)
    Experienced,
    /// Reviewers still building calibration (residents and students)
    Developing,
}

impl FromStr for ExperienceTier {
    type Err = ConcordError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "experienced" => Ok(ExperienceTier::Experienced),
            "developing" => Ok(ExperienceTier::Developing),
            other => Err(ConcordError::invalid_value("experience tier", other)),
        }
    }
}

impl fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceTier::Experienced => write!(f, "experienced"),
            ExperienceTier::Developing => write!(f, "developing"),
        }
    }
}

/// A reviewer who can hold assignments and submit grades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    /// Opaque reviewer identifier
    pub id: String,
    /// Contact email, unique per reviewer
    pub email: String,
    /// Experience tier used by the experience-based pairing strategy
    pub tier: ExperienceTier,
    /// Registration timestamp
    pub created: DateTime<Utc>,
}

/// One reviewer's scoring of one note.
///
/// At most one current record exists per (note, reviewer) pair; the store
/// upserts on resubmission rather than appending duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub note_id: String,
    pub reviewer_id: String,
    /// Sum of the per-domain scores
    pub total_score: f64,
    /// Submission (or last resubmission) timestamp
    pub created_at: DateTime<Utc>,
}

/// A note bundled with all of its current grades, the analyzer's input unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteWithGrades {
    pub note: NoteRecord,
    pub grades: Vec<GradeRecord>,
}

/// Per-domain scores for a single evaluation, keyed by rubric domain name.
///
/// Validated against the rubric's declared domain set before the grade is
/// accepted, so arbitrary keys never reach the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainScores(pub BTreeMap<String, f64>);

impl DomainScores {
    /// Sum of all domain scores
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Validate every entry against the rubric: the domain must be declared
    /// and the score must lie in `[0, domain_max]`.
    pub fn validate(&self, rubric: &RubricConfig) -> Result<()> {
        for (domain, score) in &self.0 {
            let max = rubric.domain_max(domain).ok_or_else(|| {
                ConcordError::UnknownDomain {
                    domain: domain.clone(),
                    declared: rubric.declared_domains(),
                }
            })?;
            if *score < 0.0 || *score > max {
                return Err(ConcordError::ScoreOutOfRange {
                    domain: domain.clone(),
                    score: *score,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Fresh per-reviewer workload snapshot, recomputed on every balancing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewerWorkload {
    pub reviewer_id: String,
    /// Experience tier carried along from the reviewer row
    pub tier: ExperienceTier,
    /// Assignments not yet completed
    pub active_assignments: u32,
    /// Assignments already completed
    pub completed_assignments: u32,
}

impl ReviewerWorkload {
    /// Completed share of all assignments ever held, as a percentage.
    /// A reviewer with no assignments at all reports 0.
    pub fn completion_rate(&self) -> f64 {
        let total = self.active_assignments + self.completed_assignments;
        if total == 0 {
            0.0
        } else {
            (self.completed_assignments as f64 / total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, f64)]) -> DomainScores {
        DomainScores(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }

    #[test]
    fn test_domain_scores_total() {
        let s = scores(&[("indication", 4.0), ("technique", 3.5)]);
        assert_eq!(s.total(), 7.5);
        assert_eq!(DomainScores::default().total(), 0.0);
    }

    #[test]
    fn test_validate_accepts_declared_domains() {
        let rubric = RubricConfig::default();
        let s = scores(&[("indication", 5.0), ("disposition", 0.0)]);
        assert!(s.validate(&rubric).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_domain() {
        let rubric = RubricConfig::default();
        let s = scores(&[("bedside_manner", 3.0)]);
        let err = s.validate(&rubric).unwrap_err();
        assert!(matches!(err, ConcordError::UnknownDomain { .. }));
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let rubric = RubricConfig::default();
        let s = scores(&[("technique", 6.0)]);
        let err = s.validate(&rubric).unwrap_err();
        assert!(matches!(err, ConcordError::ScoreOutOfRange { .. }));

        let s = scores(&[("technique", -1.0)]);
        assert!(s.validate(&rubric).is_err());
    }

    #[test]
    fn test_tier_parse_and_display() {
        assert_eq!(
            "Experienced".parse::<ExperienceTier>().unwrap(),
            ExperienceTier::Experienced
        );
        assert_eq!(ExperienceTier::Developing.to_string(), "developing");
        assert!("attending".parse::<ExperienceTier>().is_err());
    }

    #[test]
    fn test_completion_rate() {
        let w = ReviewerWorkload {
            reviewer_id: "r1".into(),
            tier: ExperienceTier::Developing,
            active_assignments: 1,
            completed_assignments: 3,
        };
        assert_eq!(w.completion_rate(), 75.0);

        let idle = ReviewerWorkload {
            reviewer_id: "r2".into(),
            tier: ExperienceTier::Experienced,
            active_assignments: 0,
            completed_assignments: 0,
        };
        assert_eq!(idle.completion_rate(), 0.0);
    }
}
