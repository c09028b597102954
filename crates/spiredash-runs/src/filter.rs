//! Batch scoping for run records.
//!
//! A [`RunFilter`] narrows a loaded batch to the runs an analysis should see,
//! mirroring the query parameters of the original dashboard: character, date
//! range, ascension level, victory, daily flag, and the base-game-only switch
//! that drops modded content. Unset fields leave the batch untouched.

use chrono::{Local, MappedLocalTime, NaiveDate, NaiveTime, TimeZone as _};

use crate::record::{Character, RunRecord};

/// Filter applied to a run batch before analysis.
///
/// Date bounds are calendar dates resolved against the local time zone: the
/// start bound keeps runs at or after midnight of `start_date`, and the end
/// bound keeps runs at or before midnight at the **start** of `end_date`
/// (runs later that day fall outside the range).
///
/// # Examples
///
/// ```
/// use spiredash_runs::{Character, RunFilter, RunRecord};
///
/// let filter = RunFilter {
///     character: Some(Character::Silent),
///     base_game_only: true,
///     ..RunFilter::default()
/// };
/// let run = RunRecord {
///     character: Character::Silent,
///     ..RunRecord::default()
/// };
/// assert!(filter.matches(&run));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunFilter {
    /// Keep only runs played as this character.
    pub character: Option<Character>,
    /// Keep only runs completed at or after local midnight of this date.
    pub start_date: Option<NaiveDate>,
    /// Keep only runs completed at or before local midnight of this date.
    pub end_date: Option<NaiveDate>,
    /// Keep only runs at this ascension level.
    pub ascension_level: Option<u32>,
    /// Keep only victories (`true`) or defeats (`false`).
    pub victory: Option<bool>,
    /// Keep only daily climbs (`true`) or regular runs (`false`).
    pub daily: Option<bool>,
    /// Drop runs played as modded characters.
    pub base_game_only: bool,
}

impl RunFilter {
    /// Returns `true` when the run passes every set field of the filter.
    #[must_use]
    pub fn matches(&self, run: &RunRecord) -> bool {
        if self.base_game_only && !run.character.is_base_game() {
            return false;
        }
        if self
            .character
            .as_ref()
            .is_some_and(|character| run.character != *character)
        {
            return false;
        }
        if self
            .start_date
            .is_some_and(|date| run.timestamp < local_midnight(date))
        {
            return false;
        }
        if self
            .end_date
            .is_some_and(|date| run.timestamp > local_midnight(date))
        {
            return false;
        }
        if self
            .ascension_level
            .is_some_and(|level| run.ascension_level != level)
        {
            return false;
        }
        if self.victory.is_some_and(|victory| run.victory != victory) {
            return false;
        }
        if self.daily.is_some_and(|daily| run.is_daily != daily) {
            return false;
        }
        true
    }

    /// Drops every run that does not pass the filter.
    pub fn retain(&self, runs: &mut Vec<RunRecord>) {
        runs.retain(|run| self.matches(run));
    }
}

/// Epoch timestamp of local midnight on `date`.
fn local_midnight(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        MappedLocalTime::Single(dt) | MappedLocalTime::Ambiguous(dt, _) => dt.timestamp(),
        // A DST jump can skip midnight entirely; fall back to UTC.
        MappedLocalTime::None => midnight.and_utc().timestamp(),
    }
}
