//! Enemy encounter statistics across a run batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spiredash_runs::record::RunRecord;

/// Aggregated statistics of one enemy encounter label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStat {
    /// Encounter label from the combat log.
    pub enemy: String,
    /// Times the encounter was fought.
    pub encounters: usize,
    /// Mean damage taken per encounter.
    pub avg_damage: f64,
    /// Mean turns per encounter.
    pub avg_turns: f64,
    /// Runs that ended with this enemy as the killer.
    pub defeats_player: usize,
    /// Percentage of encounters that killed the player.
    pub defeat_rate: f64,
    /// Encounters within runs that ended in victory.
    pub in_victories: usize,
    /// Encounters within runs that ended in defeat.
    pub in_defeats: usize,
}

#[derive(Debug, Default)]
struct EnemyAccumulator {
    encounters: usize,
    total_damage: f64,
    total_turns: u64,
    defeats_player: usize,
    in_victories: usize,
    in_defeats: usize,
}

/// Aggregates enemy statistics over a run batch.
///
/// Combat events with an empty encounter label are ignored. Rows are sorted
/// by encounter count descending.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn enemy_stats(runs: &[RunRecord]) -> Vec<EnemyStat> {
    let mut enemies: BTreeMap<String, EnemyAccumulator> = BTreeMap::new();

    for run in runs {
        for fight in &run.damage_taken {
            if fight.enemies.is_empty() {
                continue;
            }
            let entry = enemies.entry(fight.enemies.clone()).or_default();
            entry.encounters += 1;
            entry.total_damage += fight.damage;
            entry.total_turns += u64::from(fight.turns);
            if run.victory {
                entry.in_victories += 1;
            } else {
                entry.in_defeats += 1;
            }
            if run.killed_by.as_deref() == Some(fight.enemies.as_str()) {
                entry.defeats_player += 1;
            }
        }
    }

    let mut result: Vec<EnemyStat> = enemies
        .into_iter()
        .map(|(enemy, stats)| {
            let encounters = stats.encounters as f64;
            EnemyStat {
                enemy,
                encounters: stats.encounters,
                avg_damage: stats.total_damage / encounters,
                avg_turns: stats.total_turns as f64 / encounters,
                defeats_player: stats.defeats_player,
                defeat_rate: stats.defeats_player as f64 / encounters * 100.0,
                in_victories: stats.in_victories,
                in_defeats: stats.in_defeats,
            }
        })
        .collect();
    result.sort_by(|a, b| b.encounters.cmp(&a.encounters));
    result
}
