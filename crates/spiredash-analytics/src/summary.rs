//! Aggregate statistics for a run batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spiredash_runs::record::RunRecord;
use spiredash_stats::descriptive::DescriptiveStats;

/// Win/loss record of one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Victories with this character.
    pub wins: usize,
    /// Runs with this character.
    pub total: usize,
    /// Win percentage for this character.
    pub win_rate: f64,
}

/// Aggregate statistics over a filtered run batch.
///
/// # Examples
///
/// ```
/// use spiredash_analytics::summary::RunSummary;
/// use spiredash_runs::RunRecord;
///
/// let runs = vec![
///     RunRecord {
///         victory: true,
///         score: 2100,
///         floor_reached: 57,
///         ..RunRecord::default()
///     },
///     RunRecord {
///         score: 640,
///         floor_reached: 24,
///         ..RunRecord::default()
///     },
/// ];
/// let summary = RunSummary::from_runs(&runs).unwrap();
/// assert_eq!(summary.win_rate, 50.0);
/// assert_eq!(summary.highest_score, 2100);
/// assert!(RunSummary::from_runs(&[]).is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Runs in the batch.
    pub total_runs: usize,
    /// Victorious runs.
    pub victories: usize,
    /// Win percentage across the batch.
    pub win_rate: f64,
    /// Run count per character.
    pub character_distribution: BTreeMap<String, usize>,
    /// Win/loss record per character.
    pub win_rate_by_character: BTreeMap<String, CharacterRecord>,
    /// Mean floor reached.
    pub avg_floor_reached: f64,
    /// Mean final score.
    pub avg_score: f64,
    /// Mean run duration in seconds.
    pub avg_playtime_seconds: f64,
    /// Best final score in the batch.
    pub highest_score: i64,
    /// Deepest floor reached in the batch.
    pub deepest_floor: u32,
}

impl RunSummary {
    /// Summarizes a run batch, or `None` when the batch is empty.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn from_runs(runs: &[RunRecord]) -> Option<Self> {
        let floors = DescriptiveStats::new(runs.iter().map(|run| f64::from(run.floor_reached)))?;
        let scores = DescriptiveStats::new(runs.iter().map(|run| run.score as f64))?;
        let playtimes = DescriptiveStats::new(runs.iter().map(|run| run.playtime as f64))?;

        let total_runs = runs.len();
        let victories = runs.iter().filter(|run| run.victory).count();

        let mut character_distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut win_rate_by_character: BTreeMap<String, CharacterRecord> = BTreeMap::new();
        for run in runs {
            let character = run.character.to_string();
            *character_distribution.entry(character.clone()).or_insert(0) += 1;
            let record = win_rate_by_character
                .entry(character)
                .or_insert(CharacterRecord {
                    wins: 0,
                    total: 0,
                    win_rate: 0.0,
                });
            record.total += 1;
            if run.victory {
                record.wins += 1;
            }
        }
        for record in win_rate_by_character.values_mut() {
            record.win_rate = record.wins as f64 / record.total as f64 * 100.0;
        }

        let count = total_runs as f64;
        Some(Self {
            total_runs,
            victories,
            win_rate: victories as f64 / count * 100.0,
            character_distribution,
            win_rate_by_character,
            avg_floor_reached: floors.mean,
            avg_score: scores.mean,
            avg_playtime_seconds: playtimes.mean,
            highest_score: scores.max as i64,
            deepest_floor: floors.max as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use spiredash_runs::record::Character;

    use super::*;

    fn run(character: Character, victory: bool, score: i64, floor: u32) -> RunRecord {
        RunRecord {
            character,
            victory,
            score,
            floor_reached: floor,
            playtime: 1800,
            ..RunRecord::default()
        }
    }

    #[test]
    fn test_empty_batch_has_no_summary() {
        assert!(RunSummary::from_runs(&[]).is_none());
    }

    #[test]
    fn test_batch_aggregates() {
        let runs = vec![
            run(Character::Ironclad, true, 2100, 57),
            run(Character::Ironclad, false, 500, 20),
            run(Character::Silent, false, 800, 30),
            run(Character::Watcher, true, 1500, 57),
        ];
        let summary = RunSummary::from_runs(&runs).unwrap();
        assert_eq!(summary.total_runs, 4);
        assert_eq!(summary.victories, 2);
        assert_eq!(summary.win_rate, 50.0);
        assert_eq!(summary.avg_floor_reached, 41.0);
        assert_eq!(summary.avg_score, 1225.0);
        assert_eq!(summary.avg_playtime_seconds, 1800.0);
        assert_eq!(summary.highest_score, 2100);
        assert_eq!(summary.deepest_floor, 57);
    }

    #[test]
    fn test_per_character_records() {
        let runs = vec![
            run(Character::Ironclad, true, 2100, 57),
            run(Character::Ironclad, false, 500, 20),
            run(Character::Silent, false, 800, 30),
        ];
        let summary = RunSummary::from_runs(&runs).unwrap();
        assert_eq!(summary.character_distribution["IRONCLAD"], 2);
        assert_eq!(summary.character_distribution["THE_SILENT"], 1);
        let ironclad = &summary.win_rate_by_character["IRONCLAD"];
        assert_eq!(ironclad.wins, 1);
        assert_eq!(ironclad.total, 2);
        assert_eq!(ironclad.win_rate, 50.0);
        assert_eq!(summary.win_rate_by_character["THE_SILENT"].win_rate, 0.0);
    }

    #[test]
    fn test_modded_characters_keep_their_identifier() {
        let runs = vec![run(
            Character::Modded("hermit:HERMIT".to_owned()),
            true,
            900,
            40,
        )];
        let summary = RunSummary::from_runs(&runs).unwrap();
        assert_eq!(summary.character_distribution["hermit:HERMIT"], 1);
    }
}
