//! Parsed run record structures.
//!
//! A [`RunRecord`] is the JSON shape of one completed run as produced by the
//! game's run-history exporter, reduced to the fields the analysis layer
//! consumes. Records are immutable once loaded; every derived statistic is
//! recomputed from them on demand.
//!
//! # Field defaults
//!
//! Run files vary by game version and installed mods, so every field is
//! optional in the input: missing numeric fields read as 0, missing
//! collections as empty, and a missing character as an unnamed modded
//! character. Unknown keys are ignored.
//!
//! # Serialization
//!
//! Records accept both the exporter's native `character_chosen` key and the
//! normalized `character` key:
//!
//! ```json
//! {
//!   "character_chosen": "THE_SILENT",
//!   "timestamp": 1684108800,
//!   "victory": false,
//!   "score": 1339,
//!   "floor_reached": 34,
//!   "killed_by": "Gremlin Nob",
//!   "path_taken": ["M", "M", "?", "E", "R", "B"],
//!   "damage_taken": [{"floor": 1, "enemies": "2 Louse", "damage": 12, "turns": 3}]
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use spiredash_runs::record::{Character, RunRecord};
//!
//! let run: RunRecord = serde_json::from_str(
//!     r#"{"character_chosen": "WATCHER", "score": 2200, "victory": true}"#,
//! )
//! .unwrap();
//! assert_eq!(run.character, Character::Watcher);
//! assert_eq!(run.score, 2200);
//! assert_eq!(run.floor_reached, 0);
//! assert!(run.path_taken.is_empty());
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Playable character of a run.
///
/// The four base-game characters use their exporter identifiers
/// (`IRONCLAD`, `THE_SILENT`, `DEFECT`, `WATCHER`); any other identifier is
/// preserved verbatim as [`Character::Modded`], which the base-game-only
/// filter excludes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Character {
    /// `IRONCLAD`
    Ironclad,
    /// `THE_SILENT`
    Silent,
    /// `DEFECT`
    Defect,
    /// `WATCHER`
    Watcher,
    /// Any non-base-game character identifier, kept as-is.
    Modded(String),
}

impl Character {
    /// The four base-game characters, in exporter order.
    pub const BASE_GAME: [Self; 4] = [Self::Ironclad, Self::Silent, Self::Defect, Self::Watcher];

    /// Returns the exporter identifier for this character.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ironclad => "IRONCLAD",
            Self::Silent => "THE_SILENT",
            Self::Defect => "DEFECT",
            Self::Watcher => "WATCHER",
            Self::Modded(name) => name,
        }
    }

    /// Returns `true` for the four base-game characters.
    #[must_use]
    pub fn is_base_game(&self) -> bool {
        !matches!(self, Self::Modded(_))
    }
}

impl Default for Character {
    /// Records without a character key deserialize as an unnamed modded
    /// character, which never matches a base-game filter.
    fn default() -> Self {
        Self::Modded(String::new())
    }
}

impl From<String> for Character {
    fn from(value: String) -> Self {
        match value.as_str() {
            "IRONCLAD" => Self::Ironclad,
            "THE_SILENT" => Self::Silent,
            "DEFECT" => Self::Defect,
            "WATCHER" => Self::Watcher,
            _ => Self::Modded(value),
        }
    }
}

impl From<Character> for String {
    fn from(value: Character) -> Self {
        match value {
            Character::Modded(name) => name,
            other => other.as_str().to_owned(),
        }
    }
}

impl FromStr for Character {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed run, as exported by the game's run-history screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunRecord {
    /// Character played; accepts the exporter's `character_chosen` key.
    #[serde(alias = "character_chosen")]
    pub character: Character,
    /// Run completion time, seconds since the Unix epoch.
    pub timestamp: i64,
    /// Whether the run ended in victory.
    pub victory: bool,
    /// Final score.
    pub score: i64,
    /// Ascension difficulty level (0 when not playing ascension).
    pub ascension_level: u32,
    /// Highest floor reached.
    pub floor_reached: u32,
    /// Run duration in seconds.
    pub playtime: u64,
    /// Enemy that ended the run; present only on defeats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub killed_by: Option<String>,
    /// Whether this was a daily-climb run.
    pub is_daily: bool,
    /// Room type per floor (`M`, `E`, `B`, `?`, `R`, `T`, `$`, ...), indexed
    /// by floor number.
    pub path_taken: Vec<String>,
    /// Combat log: one entry per fight, ordered by floor.
    pub damage_taken: Vec<CombatEvent>,
    /// Gold held at the end of the run.
    pub gold: i64,
    /// Campfires spent resting.
    pub campfire_rested: u32,
    /// Campfires spent upgrading a card.
    pub campfire_upgraded: u32,
    /// Cards removed from the deck during the run.
    pub items_purged: Vec<String>,
    /// Card removals bought at shops.
    pub purchased_purges: u32,
    /// Final deck list.
    pub master_deck: Vec<String>,
    /// Relics held at the end of the run.
    pub relics: Vec<String>,
    /// Floors on which a potion was used.
    pub potions_floor_usage: Vec<u32>,
    /// Card reward offers, picked or skipped.
    pub card_choices: Vec<CardChoice>,
    /// Event rooms visited and the option taken.
    pub event_choices: Vec<EventChoice>,
    /// Items bought at shops.
    pub items_purchased: Vec<String>,
    /// Maximum HP at the end of each floor.
    pub max_hp_per_floor: Vec<f64>,
    /// Current HP at the end of each floor.
    pub current_hp_per_floor: Vec<f64>,
    /// Campfire actions taken (`REST`, `SMITH`, ...).
    pub campfire_choices: Vec<CampfireChoice>,
    /// Relics picked up during the run.
    pub relics_obtained: Vec<RelicChoice>,
    /// Boss relic offers after act bosses.
    pub boss_relics: Vec<BossRelicChoice>,
}

/// One fight from the combat log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatEvent {
    /// Floor the fight took place on.
    pub floor: u32,
    /// Encounter label, e.g. `"2 Louse"` or `"The Guardian"`.
    pub enemies: String,
    /// Total damage taken during the fight.
    pub damage: f64,
    /// Number of turns the fight lasted.
    pub turns: u32,
}

/// One card reward offer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardChoice {
    /// Card taken, or `"SKIP"` when the offer was declined.
    pub picked: String,
    /// Cards offered but not taken.
    pub not_picked: Vec<String>,
    /// Floor the offer appeared on.
    pub floor: u32,
}

/// One event room visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventChoice {
    /// Event identifier.
    pub event_name: String,
    /// Option the player took.
    pub player_choice: String,
    /// Floor the event appeared on.
    pub floor: u32,
}

/// One campfire action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CampfireChoice {
    /// Action key (`REST`, `SMITH`, `DIG`, ...).
    pub key: String,
    /// Action payload; for `SMITH` the card that was upgraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Floor of the campfire.
    pub floor: u32,
}

/// One relic pickup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelicChoice {
    /// Relic identifier.
    pub key: String,
    /// Floor the relic was obtained on.
    pub floor: u32,
}

/// One boss relic offer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BossRelicChoice {
    /// Relic taken, empty when none was.
    pub picked: String,
    /// Relics offered but not taken.
    pub not_picked: Vec<String>,
}
