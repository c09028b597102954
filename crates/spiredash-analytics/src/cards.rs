//! Card pick statistics across a run batch.
//!
//! Every card reward offer contributes: the taken card counts a pick, the
//! declined cards count availability, and a declined offer with no pick at
//! all additionally counts a skip for each card it showed. Campfire `SMITH`
//! actions count upgrade events for the smithed card. Upgraded card names
//! (`+1` suffix) fold into their base card.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use spiredash_runs::record::RunRecord;

/// Identifier prefixes of known modded content, dropped when the report
/// excludes mods.
pub const MOD_PREFIXES: [&str; 10] = [
    "collector:",
    "hermit:",
    "slimebound:",
    "guardian:",
    "snecko:",
    "gremlin:",
    "champ:",
    "automaton:",
    "spirit:",
    "bronze:",
];

/// Reward options that are not cards but appear in card choices.
const NON_CARD_OPTIONS: [&str; 1] = ["Singing Bowl"];

/// Aggregated statistics of one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardStat {
    /// Base card identifier (upgrade suffix stripped).
    pub card: String,
    /// Times the card was taken from a reward.
    pub picks: usize,
    /// Percentage of appearances that ended in a pick.
    pub pick_rate: f64,
    /// Picks where the offered card was already upgraded.
    pub picked_upgraded: usize,
    /// Times the card was upgraded at a campfire.
    pub campfire_upgrades: usize,
    /// Times the card was offered in a fully skipped reward.
    pub skips_when_available: usize,
    /// Percentage of picking runs that ended in victory.
    pub win_rate: f64,
    /// Picking runs that ended in victory.
    pub victories: usize,
    /// Total appearances in rewards, picked or not.
    pub times_available: usize,
    /// Characters that picked the card, sorted.
    pub characters: Vec<String>,
}

#[derive(Debug, Default)]
struct CardAccumulator {
    picks: usize,
    picked_upgraded: usize,
    campfire_upgrades: usize,
    skips_when_available: usize,
    not_picked: usize,
    victories: usize,
    characters: BTreeSet<String>,
}

/// Splits an offered card name into its base name and upgrade flag.
#[must_use]
pub fn base_card_name(name: &str) -> (&str, bool) {
    match name.strip_suffix("+1") {
        Some(base) => (base, true),
        None => (name, false),
    }
}

fn is_card(name: &str) -> bool {
    !name.is_empty() && name != "SKIP" && !NON_CARD_OPTIONS.contains(&name)
}

fn is_modded(name: &str) -> bool {
    let name = name.to_lowercase();
    MOD_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Aggregates card statistics over a run batch.
///
/// Only cards with at least one pick produce a row; rows are sorted by pick
/// count descending. With `include_modded` unset, cards whose identifier
/// starts with a known mod prefix are dropped from the report.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn card_stats(runs: &[RunRecord], include_modded: bool) -> Vec<CardStat> {
    let mut cards: BTreeMap<String, CardAccumulator> = BTreeMap::new();

    for run in runs {
        let character = run.character.to_string();
        for choice in &run.card_choices {
            if is_card(&choice.picked) {
                let (base, upgraded) = base_card_name(&choice.picked);
                let entry = cards.entry(base.to_owned()).or_default();
                entry.picks += 1;
                if upgraded {
                    entry.picked_upgraded += 1;
                }
                entry.characters.insert(character.clone());
                if run.victory {
                    entry.victories += 1;
                }
            }
            for offered in &choice.not_picked {
                if !is_card(offered) {
                    continue;
                }
                let (base, _) = base_card_name(offered);
                let entry = cards.entry(base.to_owned()).or_default();
                entry.not_picked += 1;
                if choice.picked == "SKIP" {
                    entry.skips_when_available += 1;
                }
            }
        }
        for choice in &run.campfire_choices {
            if choice.key != "SMITH" {
                continue;
            }
            if let Some(card) = &choice.data {
                let (base, _) = base_card_name(card);
                cards.entry(base.to_owned()).or_default().campfire_upgrades += 1;
            }
        }
    }

    let mut result: Vec<CardStat> = cards
        .into_iter()
        .filter(|(_, stats)| stats.picks > 0)
        .filter(|(card, _)| include_modded || !is_modded(card))
        .map(|(card, stats)| {
            let times_available = stats.not_picked + stats.picks;
            CardStat {
                card,
                picks: stats.picks,
                pick_rate: stats.picks as f64 / times_available as f64 * 100.0,
                picked_upgraded: stats.picked_upgraded,
                campfire_upgrades: stats.campfire_upgrades,
                skips_when_available: stats.skips_when_available,
                win_rate: stats.victories as f64 / stats.picks as f64 * 100.0,
                victories: stats.victories,
                times_available,
                characters: stats.characters.into_iter().collect(),
            }
        })
        .collect();
    result.sort_by(|a, b| b.picks.cmp(&a.picks));
    result
}
