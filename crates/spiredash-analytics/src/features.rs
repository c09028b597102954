//! Numeric feature extraction for correlation analysis.
//!
//! Every run maps to a fixed-shape vector of [`FEATURE_NAMES`] values, so a
//! batch of runs becomes a [`FeatureMatrix`] whose columns line up across
//! rows and can label a correlation matrix. Extraction never fails: fields a
//! record lacks were already defaulted when it was deserialized, so they
//! contribute 0.
//!
//! # Examples
//!
//! ```
//! use spiredash_analytics::features::{FEATURE_NAMES, FeatureMatrix};
//! use spiredash_runs::RunRecord;
//!
//! let runs = vec![RunRecord::default()];
//! let features = FeatureMatrix::from_runs(&runs);
//! assert_eq!(features.names.len(), FEATURE_NAMES.len());
//! assert_eq!(features.rows[0].len(), FEATURE_NAMES.len());
//! ```

use spiredash_runs::record::{Character, RunRecord};

/// Ordered names of every extracted feature.
///
/// The order is fixed: it labels correlation matrix rows and columns and
/// breaks ranking ties.
pub const FEATURE_NAMES: [&str; 30] = [
    "victory",
    "is_daily",
    "floor_reached",
    "score",
    "playtime",
    "gold",
    "ascension_level",
    "campfire_rested",
    "campfire_upgraded",
    "items_purged_count",
    "purchased_purges",
    "deck_size",
    "relic_count",
    "potions_used",
    "total_damage_taken",
    "battles_count",
    "avg_damage_per_battle",
    "cards_picked",
    "cards_skipped",
    "events_encountered",
    "items_purchased_count",
    "max_hp_final",
    "current_hp_final",
    "is_defect",
    "is_ironclad",
    "is_silent",
    "is_watcher",
    "small_deck",
    "medium_deck",
    "large_deck",
];

/// Feature vectors for a batch of runs, one row per run.
///
/// `names` and the row layout are identical for every batch, so matrices
/// from different batches are directly comparable.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// Feature names labeling the columns.
    pub names: Vec<String>,
    /// One feature vector per run, aligned with `names`.
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Extracts one feature vector per run in the batch.
    ///
    /// The input is not mutated; an empty batch produces a matrix with the
    /// full name set and no rows.
    #[must_use]
    pub fn from_runs(runs: &[RunRecord]) -> Self {
        Self {
            names: FEATURE_NAMES.iter().map(|&name| name.to_owned()).collect(),
            rows: runs.iter().map(feature_row).collect(),
        }
    }

    /// Values of one column across all rows.
    #[must_use]
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }
}

/// Extracts the feature vector of a single run, aligned with
/// [`FEATURE_NAMES`].
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn feature_row(run: &RunRecord) -> Vec<f64> {
    let deck_size = run.master_deck.len();
    let battles = run.damage_taken.len();
    let total_damage: f64 = run.damage_taken.iter().map(|event| event.damage).sum();
    let cards_skipped = run
        .card_choices
        .iter()
        .filter(|choice| choice.picked == "SKIP")
        .count();

    vec![
        flag(run.victory),
        flag(run.is_daily),
        f64::from(run.floor_reached),
        run.score as f64,
        run.playtime as f64,
        run.gold as f64,
        f64::from(run.ascension_level),
        f64::from(run.campfire_rested),
        f64::from(run.campfire_upgraded),
        run.items_purged.len() as f64,
        f64::from(run.purchased_purges),
        deck_size as f64,
        run.relics.len() as f64,
        run.potions_floor_usage.len() as f64,
        total_damage,
        battles as f64,
        total_damage / battles.max(1) as f64,
        run.card_choices.len() as f64,
        cards_skipped as f64,
        run.event_choices.len() as f64,
        run.items_purchased.len() as f64,
        run.max_hp_per_floor.last().copied().unwrap_or(0.0),
        run.current_hp_per_floor.last().copied().unwrap_or(0.0),
        flag(run.character == Character::Defect),
        flag(run.character == Character::Ironclad),
        flag(run.character == Character::Silent),
        flag(run.character == Character::Watcher),
        flag(deck_size <= 25),
        flag((26..=40).contains(&deck_size)),
        flag(deck_size > 40),
    ]
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}
