//! Inter-rater reliability analysis
//!
//! Computes per-note agreement statistics over the grades submitted by
//! independent reviewers and classifies each note into a reliability level.
//! Notes graded by fewer than two reviewers carry no inter-rater signal and
//! are excluded from the report entirely.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RubricConfig;
use crate::records::NoteWithGrades;
use crate::stats;

/// Three-level classification of inter-rater agreement.
///
/// Ordered so that `High > Medium > Low`, which the report sort relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ReliabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReliabilityLevel::High => write!(f, "high"),
            ReliabilityLevel::Medium => write!(f, "medium"),
            ReliabilityLevel::Low => write!(f, "low"),
        }
    }
}

/// Agreement statistics for one multiply-graded note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteAgreementReport {
    pub note_id: String,
    pub title: String,
    /// Distinct reviewers with a current grade for this note
    pub grader_count: usize,
    pub mean_score: f64,
    pub std_deviation: f64,
    /// In [0, 100], monotonically decreasing in score variance
    pub agreement_percentage: f64,
    pub reliability_level: ReliabilityLevel,
    /// Most recent grade submission for this note
    pub last_graded: DateTime<Utc>,
}

/// Aggregate counts over a reliability report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReliabilitySummary {
    pub total_notes: usize,
    pub high_reliability: usize,
    pub medium_reliability: usize,
    pub low_reliability: usize,
    /// Mean grader count over reported notes; 0 when nothing qualified
    pub average_graders_per_note: f64,
}

/// Full analyzer output: sorted per-note reports plus summary counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityReport {
    pub reports: Vec<NoteAgreementReport>,
    pub summary: ReliabilitySummary,
}

/// Analyze inter-rater agreement across the given notes.
///
/// Notes with fewer than two grades are dropped silently; they contribute
/// to neither the report list nor the summary. Degenerate input (nothing
/// qualifying) yields an empty report with a zeroed summary, never an error.
pub fn analyze(notes: &[NoteWithGrades], rubric: &RubricConfig) -> ReliabilityReport {
    let max_possible_variance = rubric.max_possible_variance();

    let mut reports: Vec<NoteAgreementReport> = notes
        .iter()
        .filter(|n| n.grades.len() >= 2)
        .map(|n| analyze_note(n, rubric, max_possible_variance))
        .collect();

    // Stable sort: level descending, then agreement descending. Ties keep
    // input order.
    reports.sort_by(|a, b| {
        b.reliability_level
            .cmp(&a.reliability_level)
            .then_with(|| {
                b.agreement_percentage
                    .partial_cmp(&a.agreement_percentage)
                    .unwrap_or(Ordering::Equal)
            })
    });

    let summary = summarize(&reports);

    tracing::debug!(
        analyzed = notes.len(),
        reported = reports.len(),
        "reliability_analysis"
    );

    ReliabilityReport { reports, summary }
}

fn analyze_note(
    note: &NoteWithGrades,
    rubric: &RubricConfig,
    max_possible_variance: f64,
) -> NoteAgreementReport {
    let scores: Vec<f64> = note.grades.iter().map(|g| g.total_score).collect();

    let mean_score = stats::mean(&scores);
    let variance = stats::population_variance(&scores);
    let std_deviation = stats::std_deviation(&scores);

    // Lower variance means higher agreement, normalized against the
    // worst-case spread for the rubric's scoring scale.
    let agreement_percentage = (100.0 - (variance / max_possible_variance) * 100.0).max(0.0);

    let reliability_level = classify(agreement_percentage, rubric);

    let last_graded = note
        .grades
        .iter()
        .map(|g| g.created_at)
        .max()
        .unwrap_or(note.note.created);

    NoteAgreementReport {
        note_id: note.note.id.clone(),
        title: note.note.title.clone(),
        grader_count: note.grades.len(),
        mean_score,
        std_deviation,
        agreement_percentage,
        reliability_level,
        last_graded,
    }
}

fn classify(agreement_percentage: f64, rubric: &RubricConfig) -> ReliabilityLevel {
    if agreement_percentage >= rubric.thresholds.high {
        ReliabilityLevel::High
    } else if agreement_percentage >= rubric.thresholds.medium {
        ReliabilityLevel::Medium
    } else {
        ReliabilityLevel::Low
    }
}

fn summarize(reports: &[NoteAgreementReport]) -> ReliabilitySummary {
    let total_notes = reports.len();
    let count_level = |level| {
        reports
            .iter()
            .filter(|r| r.reliability_level == level)
            .count()
    };

    let average_graders_per_note = if total_notes == 0 {
        0.0
    } else {
        reports.iter().map(|r| r.grader_count).sum::<usize>() as f64 / total_notes as f64
    };

    ReliabilitySummary {
        total_notes,
        high_reliability: count_level(ReliabilityLevel::High),
        medium_reliability: count_level(ReliabilityLevel::Medium),
        low_reliability: count_level(ReliabilityLevel::Low),
        average_graders_per_note,
    }
}
