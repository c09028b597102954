//! Relic pick statistics across a run batch.
//!
//! Picks come from relics obtained on the floor and from boss relic offers
//! that were taken; availability comes from boss relic offers that were
//! declined (ordinary relic drops have no decline path, so only boss offers
//! contribute there).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use spiredash_runs::record::RunRecord;

use crate::cards::MOD_PREFIXES;

/// Mod prefix specific to relic identifiers, on top of [`MOD_PREFIXES`].
const RELIC_MOD_PREFIXES: [&str; 1] = ["sneckomod:"];

/// Aggregated statistics of one relic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelicStat {
    /// Relic identifier.
    pub relic: String,
    /// Times the relic was obtained.
    pub picks: usize,
    /// Percentage of picking runs that ended in victory.
    pub win_rate: f64,
    /// Picking runs that ended in victory.
    pub victories: usize,
    /// Picking runs that ended in defeat.
    pub defeats: usize,
    /// Characters that obtained the relic, sorted.
    pub characters: Vec<String>,
}

#[derive(Debug, Default)]
struct RelicAccumulator {
    picks: usize,
    victories: usize,
    characters: BTreeSet<String>,
}

fn is_modded(name: &str) -> bool {
    let name = name.to_lowercase();
    MOD_PREFIXES
        .iter()
        .chain(&RELIC_MOD_PREFIXES)
        .any(|prefix| name.starts_with(prefix))
}

/// Aggregates relic statistics over a run batch.
///
/// Only relics obtained at least once produce a row; rows are sorted by pick
/// count descending. With `include_modded` unset, relics whose identifier
/// starts with a known mod prefix are dropped from the report.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn relic_stats(runs: &[RunRecord], include_modded: bool) -> Vec<RelicStat> {
    let mut relics: BTreeMap<String, RelicAccumulator> = BTreeMap::new();

    for run in runs {
        let character = run.character.to_string();
        let mut record_pick = |relic: &str| {
            if relic.is_empty() {
                return;
            }
            let entry = relics.entry(relic.to_owned()).or_default();
            entry.picks += 1;
            entry.characters.insert(character.clone());
            if run.victory {
                entry.victories += 1;
            }
        };
        for obtained in &run.relics_obtained {
            record_pick(&obtained.key);
        }
        for offer in &run.boss_relics {
            record_pick(&offer.picked);
        }
    }

    let mut result: Vec<RelicStat> = relics
        .into_iter()
        .filter(|(relic, _)| include_modded || !is_modded(relic))
        .map(|(relic, stats)| RelicStat {
            relic,
            picks: stats.picks,
            win_rate: stats.victories as f64 / stats.picks as f64 * 100.0,
            victories: stats.victories,
            defeats: stats.picks - stats.victories,
            characters: stats.characters.into_iter().collect(),
        })
        .collect();
    result.sort_by(|a, b| b.picks.cmp(&a.picks));
    result
}

#[cfg(test)]
mod tests {
    use spiredash_runs::record::{BossRelicChoice, Character, RelicChoice};

    use super::*;

    fn obtained(key: &str) -> RelicChoice {
        RelicChoice {
            key: key.to_owned(),
            floor: 0,
        }
    }

    #[test]
    fn test_picks_from_drops_and_boss_offers() {
        let runs = vec![
            RunRecord {
                victory: true,
                character: Character::Watcher,
                relics_obtained: vec![obtained("Vajra"), obtained("Anchor")],
                boss_relics: vec![BossRelicChoice {
                    picked: "Runic Dome".to_owned(),
                    not_picked: vec!["Sozu".to_owned(), "Ectoplasm".to_owned()],
                }],
                ..RunRecord::default()
            },
            RunRecord {
                character: Character::Ironclad,
                relics_obtained: vec![obtained("Vajra")],
                ..RunRecord::default()
            },
        ];
        let stats = relic_stats(&runs, true);
        let vajra = stats.iter().find(|stat| stat.relic == "Vajra").unwrap();
        assert_eq!(vajra.picks, 2);
        assert_eq!(vajra.victories, 1);
        assert_eq!(vajra.defeats, 1);
        assert_eq!(vajra.win_rate, 50.0);
        assert_eq!(vajra.characters, ["IRONCLAD", "WATCHER"]);
        assert!(stats.iter().any(|stat| stat.relic == "Runic Dome"));
    }

    #[test]
    fn test_declined_boss_relics_are_not_reported() {
        let runs = vec![RunRecord {
            boss_relics: vec![BossRelicChoice {
                picked: "Runic Dome".to_owned(),
                not_picked: vec!["Sozu".to_owned()],
            }],
            ..RunRecord::default()
        }];
        let stats = relic_stats(&runs, true);
        assert!(stats.iter().all(|stat| stat.relic != "Sozu"));
    }

    #[test]
    fn test_skipped_boss_offer_counts_nothing() {
        let runs = vec![RunRecord {
            boss_relics: vec![BossRelicChoice {
                picked: String::new(),
                not_picked: vec!["Sozu".to_owned()],
            }],
            ..RunRecord::default()
        }];
        assert!(relic_stats(&runs, true).is_empty());
    }

    #[test]
    fn test_modded_relics_dropped_unless_included() {
        let runs = vec![RunRecord {
            relics_obtained: vec![obtained("sneckomod:Ring of Snek"), obtained("Vajra")],
            ..RunRecord::default()
        }];
        let base_only = relic_stats(&runs, false);
        assert_eq!(base_only.len(), 1);
        assert_eq!(base_only[0].relic, "Vajra");
        assert_eq!(relic_stats(&runs, true).len(), 2);
    }

    #[test]
    fn test_rows_sorted_by_picks_descending() {
        let runs = vec![RunRecord {
            relics_obtained: vec![obtained("Anchor"), obtained("Vajra"), obtained("Vajra")],
            ..RunRecord::default()
        }];
        let stats = relic_stats(&runs, true);
        assert_eq!(stats[0].relic, "Vajra");
    }
}
