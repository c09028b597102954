//! Cumulative time series over a run batch.
//!
//! All series bucket runs by the local calendar date of their completion
//! timestamp and emit one point per distinct date, ordered ascending. The
//! cumulative series process runs in timestamp order, so a date's point
//! reflects the running state as of the last run completed that day.
//!
//! # Examples
//!
//! ```
//! use spiredash_analytics::timeseries::cumulative_win_rate;
//! use spiredash_runs::RunRecord;
//!
//! let runs = vec![
//!     RunRecord {
//!         timestamp: 1_684_000_000,
//!         victory: true,
//!         ..RunRecord::default()
//!     },
//!     RunRecord {
//!         timestamp: 1_684_000_600,
//!         ..RunRecord::default()
//!     },
//! ];
//! let series = cumulative_win_rate(&runs);
//! assert_eq!(series.last().unwrap().win_rate, 50.0);
//! assert_eq!(series.last().unwrap().games_so_far, 2);
//! ```

use std::collections::{BTreeMap, btree_map::Entry};

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use spiredash_runs::record::RunRecord;

/// Running win rate as of the last run on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRatePoint {
    /// Local calendar date of the bucket.
    pub date: NaiveDate,
    /// Running win percentage across all runs so far, one decimal.
    pub win_rate: f64,
    /// Total runs completed up to and including this date.
    pub games_so_far: usize,
}

/// Cumulative per-character run counts as of one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterCountPoint {
    /// Local calendar date of the bucket.
    pub date: NaiveDate,
    /// Runs completed per character up to and including this date.
    #[serde(flatten)]
    pub counts: BTreeMap<String, usize>,
}

/// Wins and losses on one date (non-cumulative).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyGames {
    /// Local calendar date of the bucket.
    pub date: NaiveDate,
    /// Victories completed on this date.
    pub wins: usize,
    /// Defeats completed on this date.
    pub losses: usize,
}

/// Builds the cumulative win-rate-over-time series.
///
/// Runs are processed in timestamp order; each one updates the running game
/// and win counts and overwrites its date's point, so a date with several
/// runs keeps only the snapshot after the last of them. An empty batch
/// produces an empty series.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn cumulative_win_rate(runs: &[RunRecord]) -> Vec<WinRatePoint> {
    let mut games = 0_usize;
    let mut wins = 0_usize;
    let mut by_date = BTreeMap::new();
    for run in chronological(runs) {
        games += 1;
        if run.victory {
            wins += 1;
        }
        let date = local_date(run.timestamp);
        by_date.insert(
            date,
            WinRatePoint {
                date,
                win_rate: round_to_decimal(wins as f64 / games as f64 * 100.0),
                games_so_far: games,
            },
        );
    }
    by_date.into_values().collect()
}

/// Builds the cumulative runs-by-character series.
///
/// The first run on a new date snapshots every character counter seen so far
/// (carry-forward); later runs on that date bump only their own character's
/// entry. A post-pass fills every point with a 0 for each of
/// `character_keys` it lacks, so all points share one key set.
#[must_use]
pub fn cumulative_runs_by_character(
    runs: &[RunRecord],
    character_keys: &[String],
) -> Vec<CharacterCountPoint> {
    let mut totals: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_date: BTreeMap<NaiveDate, BTreeMap<String, usize>> = BTreeMap::new();
    for run in chronological(runs) {
        let character = run.character.to_string();
        let count = totals
            .entry(character.clone())
            .and_modify(|count| *count += 1)
            .or_insert(1);
        let count = *count;
        match by_date.entry(local_date(run.timestamp)) {
            Entry::Vacant(entry) => {
                entry.insert(totals.clone());
            }
            Entry::Occupied(mut entry) => {
                entry.get_mut().insert(character, count);
            }
        }
    }

    by_date
        .into_iter()
        .map(|(date, mut counts)| {
            for key in character_keys {
                counts.entry(key.clone()).or_insert(0);
            }
            CharacterCountPoint { date, counts }
        })
        .collect()
}

/// Counts wins and losses per local calendar date.
#[must_use]
pub fn games_per_day(runs: &[RunRecord]) -> Vec<DailyGames> {
    let mut by_date: BTreeMap<NaiveDate, DailyGames> = BTreeMap::new();
    for run in runs {
        let date = local_date(run.timestamp);
        let entry = by_date.entry(date).or_insert(DailyGames {
            date,
            wins: 0,
            losses: 0,
        });
        if run.victory {
            entry.wins += 1;
        } else {
            entry.losses += 1;
        }
    }
    by_date.into_values().collect()
}

/// Runs ordered by timestamp ascending, leaving the batch untouched.
fn chronological(runs: &[RunRecord]) -> Vec<&RunRecord> {
    let mut ordered: Vec<&RunRecord> = runs.iter().collect();
    ordered.sort_by_key(|run| run.timestamp);
    ordered
}

/// Local calendar date of an epoch timestamp.
fn local_date(timestamp: i64) -> NaiveDate {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
        .date_naive()
}

fn round_to_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use spiredash_runs::record::Character;

    use super::*;

    fn run_at(year: i32, month: u32, day: u32, hour: u32) -> RunRecord {
        RunRecord {
            timestamp: Local
                .with_ymd_and_hms(year, month, day, hour, 0, 0)
                .unwrap()
                .timestamp(),
            ..RunRecord::default()
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_batch() -> Vec<RunRecord> {
        let mut first = run_at(2023, 6, 1, 9);
        first.character = Character::Ironclad;
        first.victory = true;
        let mut second = run_at(2023, 6, 1, 14);
        second.character = Character::Defect;
        let mut third = run_at(2023, 6, 2, 11);
        third.character = Character::Ironclad;
        vec![first, second, third]
    }

    #[test]
    fn test_win_rate_snapshots_one_point_per_date() {
        let series = cumulative_win_rate(&sample_batch());
        assert_eq!(
            series,
            [
                WinRatePoint {
                    date: date(2023, 6, 1),
                    win_rate: 50.0,
                    games_so_far: 2,
                },
                WinRatePoint {
                    date: date(2023, 6, 2),
                    win_rate: 33.3,
                    games_so_far: 3,
                },
            ]
        );
    }

    #[test]
    fn test_win_rate_sorts_unordered_batches() {
        let mut runs = sample_batch();
        runs.reverse();
        assert_eq!(cumulative_win_rate(&runs), cumulative_win_rate(&sample_batch()));
    }

    #[test]
    fn test_win_rate_empty_batch_is_empty() {
        assert!(cumulative_win_rate(&[]).is_empty());
    }

    #[test]
    fn test_character_counts_carry_forward() {
        let series = cumulative_runs_by_character(&sample_batch(), &[]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, date(2023, 6, 1));
        assert_eq!(series[0].counts["IRONCLAD"], 1);
        assert_eq!(series[0].counts["DEFECT"], 1);
        // The second date only saw an Ironclad run; Defect carries forward.
        assert_eq!(series[1].counts["IRONCLAD"], 2);
        assert_eq!(series[1].counts["DEFECT"], 1);
    }

    #[test]
    fn test_character_counts_zero_fill_missing_keys() {
        let keys: Vec<String> = Character::BASE_GAME
            .iter()
            .map(ToString::to_string)
            .collect();
        let series = cumulative_runs_by_character(&sample_batch(), &keys);
        for point in &series {
            for key in &keys {
                assert!(point.counts.contains_key(key));
            }
            assert_eq!(point.counts["WATCHER"], 0);
        }
    }

    #[test]
    fn test_character_counts_are_monotone() {
        let mut runs = sample_batch();
        let mut late = run_at(2023, 6, 5, 20);
        late.character = Character::Defect;
        runs.push(late);
        let series = cumulative_runs_by_character(&runs, &[]);
        for pair in series.windows(2) {
            for (character, count) in &pair[0].counts {
                assert!(pair[1].counts.get(character).is_none_or(|later| later >= count));
            }
        }
    }

    #[test]
    fn test_games_per_day_counts_outcomes() {
        let daily = games_per_day(&sample_batch());
        assert_eq!(
            daily,
            [
                DailyGames {
                    date: date(2023, 6, 1),
                    wins: 1,
                    losses: 1,
                },
                DailyGames {
                    date: date(2023, 6, 2),
                    wins: 0,
                    losses: 1,
                },
            ]
        );
    }

    #[test]
    fn test_flattened_point_serialization() {
        let series = cumulative_runs_by_character(&sample_batch(), &[]);
        let value = serde_json::to_value(&series[0]).unwrap();
        assert!(value.get("date").is_some());
        assert_eq!(value.get("IRONCLAD").unwrap(), 1);
    }
}
