//! Scoreboard computation.
//!
//! Everything here is a pure function over borrowed snapshots: no I/O, no
//! shared state, and the same input always yields the same ordered output.

pub mod podium;

use crate::types::config::NameOrder;
use crate::types::model::{Category, Nominee, Prediction, ScoreboardEntry};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Category id to the nominee flagged as its winner.
pub type WinnerIndex<'a> = HashMap<&'a str, &'a Nominee>;

/// Indexes flagged winners by category.
///
/// Undecided categories are absent. When a category has more than one flagged
/// nominee the last one in input order is kept.
pub fn build_winner_index(nominees: &[Nominee]) -> WinnerIndex<'_> {
    let mut index = WinnerIndex::new();
    for nominee in nominees.iter().filter(|nominee| nominee.is_winner) {
        if let Some(previous) = index.insert(nominee.category_id.as_str(), nominee) {
            tracing::warn!(
                category = %nominee.category_id,
                replaced = %previous.id,
                kept = %nominee.id,
                "more than one winner flagged in category"
            );
        }
    }
    index
}

/// Scores predictions against decided winners, ordered by points then owner name.
pub fn score(
    predictions: &[Prediction],
    categories: &[Category],
    winners: &WinnerIndex<'_>,
    order: NameOrder,
) -> Vec<ScoreboardEntry> {
    let decided: Vec<(&str, &str)> = categories
        .iter()
        .filter_map(|category| {
            winners
                .get(category.id.as_str())
                .map(|winner| (category.id.as_str(), winner.name.as_str()))
        })
        .collect();

    let mut entries: Vec<ScoreboardEntry> = predictions
        .iter()
        .map(|prediction| ScoreboardEntry {
            prediction_id: prediction.id.clone(),
            name: prediction.name.clone(),
            points: points_for(prediction, &decided),
        })
        .collect();

    // `sort_by` is stable, equal names keep their input order.
    entries.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| compare_names(&a.name, &b.name, order))
    });

    tracing::debug!(
        predictions = entries.len(),
        categories = categories.len(),
        decided = decided.len(),
        "scoreboard computed"
    );
    entries
}

/// Number of categories that have a decided winner.
pub fn decided_count(categories: &[Category], winners: &WinnerIndex<'_>) -> usize {
    categories
        .iter()
        .filter(|category| winners.contains_key(category.id.as_str()))
        .count()
}

fn points_for(prediction: &Prediction, decided: &[(&str, &str)]) -> u32 {
    decided
        .iter()
        .filter(|(category_id, winner_name)| prediction.pick(category_id) == Some(*winner_name))
        .count() as u32
}

pub fn compare_names(a: &str, b: &str, order: NameOrder) -> Ordering {
    match order {
        NameOrder::Lexical => a.cmp(b),
        NameOrder::Caseless => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}
