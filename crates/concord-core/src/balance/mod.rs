//! Assignment balancing: distributing unassigned notes across reviewers
//!
//! The balancer is a pure batch computation. It takes fresh workload
//! snapshots, a pairing strategy, and the set of already-existing
//! (note, reviewer) assignments, and emits one outcome per item. Persisting
//! the successful outcomes is the caller's job; the store's uniqueness
//! constraint remains the authoritative duplicate guard against concurrent
//! balancing runs.


use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::ConcordError;
use crate::records::{ExperienceTier, ReviewerWorkload};

/// Pairing policy for a balancing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// One reviewer per item, always the currently least-loaded one.
    /// Picks feed back into a batch-local load count so later items see
    /// earlier picks; ties are broken by the injected RNG.
    LeastWorkload,
    /// Shuffle the pool and take the first two, independently per item
    RandomPairs,
    /// One reviewer at random from each experience tier; falls back to
    /// random pairs for an item when either tier is empty
    ExperienceBased,
    /// Fan every item out to every reviewer, for deliberate
    /// inter-rater-reliability seeding
    DuplicateToAll,
}

impl FromStr for Strategy {
    type Err = ConcordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "least-workload" => Ok(Strategy::LeastWorkload),
            "random-pairs" => Ok(Strategy::RandomPairs),
            "experience-based" => Ok(Strategy::ExperienceBased),
            "duplicate-to-all" => Ok(Strategy::DuplicateToAll),
            other => Err(ConcordError::invalid_value("strategy", other)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::LeastWorkload => write!(f, "least-workload"),
            Strategy::RandomPairs => write!(f, "random-pairs"),
            Strategy::ExperienceBased => write!(f, "experience-based"),
            Strategy::DuplicateToAll => write!(f, "duplicate-to-all"),
        }
    }
}

/// Why an item could not be assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Fewer than two eligible reviewers exist for the whole batch
    NoEligibleReviewers,
    /// Every reviewer the strategy chose already holds this item
    AllCandidatesAssigned,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoEligibleReviewers => write!(f, "no eligible reviewers"),
            FailureReason::AllCandidatesAssigned => {
                write!(f, "all candidate reviewers already assigned")
            }
        }
    }
}

/// Result of one attempted (item, reviewer-set) pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub item_id: String,
    /// Reviewers chosen for the item; empty on failure
    pub reviewer_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
}

impl AssignmentOutcome {
    fn assigned(item_id: &str, reviewer_ids: Vec<String>) -> Self {
        Self {
            item_id: item_id.to_string(),
            reviewer_ids,
            failure: None,
        }
    }

    fn failed(item_id: &str, reason: FailureReason) -> Self {
        Self {
            item_id: item_id.to_string(),
            reviewer_ids: Vec::new(),
            failure: Some(reason),
        }
    }

    /// Whether this item received at least one reviewer
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Distribute the given items across the reviewer pool.
///
/// Items are processed in input order. No single item's failure is fatal;
/// every item gets an outcome. A pool of fewer than two reviewers fails the
/// whole batch up front with one shared reason, without running any
/// strategy logic.
pub fn balance(
    items: &[String],
    reviewers: &[ReviewerWorkload],
    strategy: Strategy,
    existing: &HashSet<(String, String)>,
    rng: &mut StdRng,
) -> Vec<AssignmentOutcome> {
    if reviewers.len() < 2 {
        tracing::warn!(
            reviewers = reviewers.len(),
            items = items.len(),
            "balance_batch_rejected"
        );
        return items
            .iter()
            .map(|item| AssignmentOutcome::failed(item, FailureReason::NoEligibleReviewers))
            .collect();
    }

    // Batch-local load counts, threaded through the fold so each item's
    // pick observes the loads left behind by the previous items. Discarded
    // at the end of the run; the store is never written here.
    let initial_loads: HashMap<String, u32> = reviewers
        .iter()
        .map(|r| (r.reviewer_id.clone(), r.active_assignments))
        .collect();

    let (outcomes, _loads) = items.iter().fold(
        (Vec::with_capacity(items.len()), initial_loads),
        |(mut outcomes, mut loads), item| {
            outcomes.push(assign_one(item, reviewers, strategy, &mut loads, existing, rng));
            (outcomes, loads)
        },
    );

    tracing::debug!(
        items = items.len(),
        assigned = outcomes.iter().filter(|o| o.is_success()).count(),
        strategy = %strategy,
        "balance_batch"
    );

    outcomes
}

fn assign_one(
    item: &str,
    reviewers: &[ReviewerWorkload],
    strategy: Strategy,
    loads: &mut HashMap<String, u32>,
    existing: &HashSet<(String, String)>,
    rng: &mut StdRng,
) -> AssignmentOutcome {
    let mut chosen = match strategy {
        Strategy::LeastWorkload => pick_least_loaded(reviewers, loads, rng),
        Strategy::RandomPairs => pick_random_pair(reviewers, rng),
        Strategy::ExperienceBased => pick_across_tiers(reviewers, rng),
        Strategy::DuplicateToAll => reviewers.iter().map(|r| r.reviewer_id.clone()).collect(),
    };

    // Reviewers already holding this item are skipped, not re-assigned
    chosen.retain(|reviewer| !existing.contains(&(item.to_string(), reviewer.clone())));

    if chosen.is_empty() {
        AssignmentOutcome::failed(item, FailureReason::AllCandidatesAssigned)
    } else {
        AssignmentOutcome::assigned(item, chosen)
    }
}

/// Least-workload pick: shuffle first so equal loads resolve randomly, then
/// a stable sort by load keeps the shuffle as the tie order.
fn pick_least_loaded(
    reviewers: &[ReviewerWorkload],
    loads: &mut HashMap<String, u32>,
    rng: &mut StdRng,
) -> Vec<String> {
    let mut pool: Vec<&ReviewerWorkload> = reviewers.iter().collect();
    pool.shuffle(rng);
    pool.sort_by_key(|r| loads.get(&r.reviewer_id).copied().unwrap_or(0));

    let picked = pool[0].reviewer_id.clone();
    *loads.entry(picked.clone()).or_insert(0) += 1;
    vec![picked]
}

fn pick_random_pair(reviewers: &[ReviewerWorkload], rng: &mut StdRng) -> Vec<String> {
    let mut pool: Vec<&ReviewerWorkload> = reviewers.iter().collect();
    pool.shuffle(rng);
    pool.iter()
        .take(2)
        .map(|r| r.reviewer_id.clone())
        .collect()
}

fn pick_across_tiers(reviewers: &[ReviewerWorkload], rng: &mut StdRng) -> Vec<String> {
    let experienced: Vec<&ReviewerWorkload> = reviewers
        .iter()
        .filter(|r| r.tier == ExperienceTier::Experienced)
        .collect();
    let developing: Vec<&ReviewerWorkload> = reviewers
        .iter()
        .filter(|r| r.tier == ExperienceTier::Developing)
        .collect();

    match (experienced.choose(rng), developing.choose(rng)) {
        (Some(senior), Some(junior)) => {
            vec![senior.reviewer_id.clone(), junior.reviewer_id.clone()]
        }
        // Not enough variety in the pool for a cross-tier pair
        _ => pick_random_pair(reviewers, rng),
    }
}
