//! Floor-by-floor score progression reconstruction.
//!
//! Run records carry only the final score, not per-fight deltas, so the
//! progression chart approximates each fight's contribution from its tier
//! (boss, elite, normal) and then rescales the whole curve so the last point
//! lands exactly on the recorded score. The rescale step is the correctness
//! anchor: whatever the heuristic weights, the curve ends where the run did.
//!
//! # Examples
//!
//! ```
//! use spiredash_analytics::progression::score_progression;
//! use spiredash_runs::RunRecord;
//!
//! let run: RunRecord = serde_json::from_str(
//!     r#"{
//!         "score": 425,
//!         "path_taken": ["M", "M", "M", "M", "M", "M", "M", "M", "M", "E",
//!                        "M", "M", "M", "M", "M", "M", "B"],
//!         "damage_taken": [
//!             {"floor": 3, "enemies": "Jaw Worm", "damage": 6, "turns": 2},
//!             {"floor": 9, "enemies": "Gremlin Nob", "damage": 24, "turns": 5},
//!             {"floor": 16, "enemies": "The Guardian", "damage": 18, "turns": 8}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let points = score_progression(&run);
//! assert_eq!(points.last().unwrap().score, 425);
//! ```

use serde::{Deserialize, Serialize};
use spiredash_runs::record::RunRecord;

/// Combat encounter tier, looked up from the run's floor path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FightKind {
    /// A regular monster room (`M`, or any room the path does not classify).
    Normal,
    /// An elite room (`E`).
    Elite,
    /// An act boss (`BOSS` or `B`).
    Boss,
}

impl FightKind {
    /// Classifies the fight on `floor` from the room symbol in `path_taken`.
    ///
    /// Floors beyond the recorded path classify as [`FightKind::Normal`].
    #[must_use]
    pub fn classify(path_taken: &[String], floor: u32) -> Self {
        match path_taken.get(floor as usize).map(String::as_str) {
            Some("BOSS" | "B") => Self::Boss,
            Some("E") => Self::Elite,
            _ => Self::Normal,
        }
    }

    /// Heuristic score contribution of one fight of this tier.
    #[must_use]
    pub fn score_gain(self) -> i64 {
        match self {
            Self::Normal => 10,
            Self::Elite => 25,
            Self::Boss => 50,
        }
    }
}

/// One point of a reconstructed score curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionPoint {
    /// Floor the point sits on.
    pub floor: u32,
    /// Cumulative score as of this fight, rescaled to the run's final score.
    pub score: i64,
    /// Encounter label, `"Start"` for the synthetic first point.
    pub enemy: String,
    /// Damage taken during the fight.
    pub damage: f64,
    /// Turns the fight lasted.
    pub turns: u32,
    /// Encounter tier; `None` only on the synthetic start point.
    pub fight_type: Option<FightKind>,
}

/// Reconstructs the cumulative score curve of one run.
///
/// Emits a synthetic start point at floor 0, then one point per combat
/// event with a heuristic increment by tier (normal +10, elite +25, boss
/// +50). When the run has a nonzero final score and at least one fight
/// contributed, every point is rescaled by `score / heuristic_total` and
/// rounded to the nearest integer, so the last point equals the recorded
/// score. A run with no fights yields the start point alone.
#[must_use]
pub fn score_progression(run: &RunRecord) -> Vec<ProgressionPoint> {
    let mut points = vec![ProgressionPoint {
        floor: 0,
        score: 0,
        enemy: "Start".to_owned(),
        damage: 0.0,
        turns: 0,
        fight_type: None,
    }];

    let mut cumulative = 0;
    for fight in &run.damage_taken {
        let kind = FightKind::classify(&run.path_taken, fight.floor);
        cumulative += kind.score_gain();
        points.push(ProgressionPoint {
            floor: fight.floor,
            score: cumulative,
            enemy: fight.enemies.clone(),
            damage: fight.damage,
            turns: fight.turns,
            fight_type: Some(kind),
        });
    }

    if cumulative > 0 && run.score != 0 {
        #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let rescale =
            |score: i64| (score as f64 * run.score as f64 / cumulative as f64).round() as i64;
        for point in &mut points {
            point.score = rescale(point.score);
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use spiredash_runs::record::CombatEvent;

    use super::*;

    fn fight_on(floor: u32, enemies: &str) -> CombatEvent {
        CombatEvent {
            floor,
            enemies: enemies.to_owned(),
            damage: 10.0,
            turns: 3,
        }
    }

    fn path(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn test_fight_kind_classification() {
        let path = path(&["M", "?", "E", "B", "BOSS", "R"]);
        assert_eq!(FightKind::classify(&path, 0), FightKind::Normal);
        assert_eq!(FightKind::classify(&path, 1), FightKind::Normal);
        assert_eq!(FightKind::classify(&path, 2), FightKind::Elite);
        assert_eq!(FightKind::classify(&path, 3), FightKind::Boss);
        assert_eq!(FightKind::classify(&path, 4), FightKind::Boss);
        assert_eq!(FightKind::classify(&path, 5), FightKind::Normal);
    }

    #[test]
    fn test_floor_beyond_path_is_normal() {
        let path = path(&["M"]);
        assert_eq!(FightKind::classify(&path, 40), FightKind::Normal);
        assert_eq!(FightKind::classify(&[], 0), FightKind::Normal);
    }

    #[test]
    fn test_rescaled_curve_ends_on_recorded_score() {
        let mut symbols = vec!["M"; 17];
        symbols[9] = "E";
        symbols[16] = "B";
        let run = RunRecord {
            score: 425,
            path_taken: path(&symbols),
            damage_taken: vec![
                fight_on(3, "Jaw Worm"),
                fight_on(9, "Gremlin Nob"),
                fight_on(16, "The Guardian"),
            ],
            ..RunRecord::default()
        };
        // Heuristic totals 10, 35, 85; factor 425 / 85 = 5.
        let scores: Vec<i64> = score_progression(&run).iter().map(|p| p.score).collect();
        assert_eq!(scores, [0, 50, 175, 425]);
    }

    #[test]
    fn test_start_point_stays_zero() {
        let run = RunRecord {
            score: 1000,
            path_taken: path(&["M", "M"]),
            damage_taken: vec![fight_on(1, "Cultist")],
            ..RunRecord::default()
        };
        let points = score_progression(&run);
        assert_eq!(points[0].score, 0);
        assert_eq!(points[0].enemy, "Start");
        assert_eq!(points[0].fight_type, None);
    }

    #[test]
    fn test_no_fights_yields_start_point_only() {
        let run = RunRecord {
            score: 300,
            ..RunRecord::default()
        };
        let points = score_progression(&run);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].score, 0);
    }

    #[test]
    fn test_zero_score_skips_rescaling() {
        let run = RunRecord {
            path_taken: path(&["M", "M", "M"]),
            damage_taken: vec![fight_on(1, "Cultist"), fight_on(2, "Jaw Worm")],
            ..RunRecord::default()
        };
        let scores: Vec<i64> = score_progression(&run).iter().map(|p| p.score).collect();
        assert_eq!(scores, [0, 10, 20]);
    }

    #[test]
    fn test_scores_are_monotonically_non_decreasing() {
        let mut symbols = vec!["M"; 34];
        symbols[6] = "E";
        symbols[16] = "B";
        symbols[25] = "E";
        symbols[33] = "BOSS";
        let run = RunRecord {
            score: 777,
            path_taken: path(&symbols),
            damage_taken: (0..34).step_by(3).map(|f| fight_on(f, "Cultist")).collect(),
            ..RunRecord::default()
        };
        let points = score_progression(&run);
        for pair in points.windows(2) {
            assert!(pair[0].score <= pair[1].score);
            assert!(pair[0].floor <= pair[1].floor);
        }
        assert_eq!(points.last().unwrap().score, 777);
    }

    #[test]
    fn test_point_carries_fight_details() {
        let run = RunRecord {
            score: 50,
            path_taken: path(&["M", "E"]),
            damage_taken: vec![CombatEvent {
                floor: 1,
                enemies: "Lagavulin".to_owned(),
                damage: 31.0,
                turns: 9,
            }],
            ..RunRecord::default()
        };
        let point = score_progression(&run)[1].clone();
        assert_eq!(point.enemy, "Lagavulin");
        assert_eq!(point.damage, 31.0);
        assert_eq!(point.turns, 9);
        assert_eq!(point.fight_type, Some(FightKind::Elite));
    }
}
