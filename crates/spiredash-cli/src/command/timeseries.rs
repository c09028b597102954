use std::path::PathBuf;

use serde::Serialize;
use spiredash_analytics::timeseries::{self, CharacterCountPoint, DailyGames, WinRatePoint};

use crate::{command::filter::FilterArgs, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TimeseriesArg {
    #[clap(flatten)]
    filter: FilterArgs,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TimeseriesReport {
    win_rate_over_time: Vec<WinRatePoint>,
    runs_by_character: Vec<CharacterCountPoint>,
    games_per_day: Vec<DailyGames>,
}

pub(crate) fn run(arg: &TimeseriesArg) -> anyhow::Result<()> {
    let runs = arg.filter.load_runs()?;

    // Character keys come from the batch, like the dashboard's distribution.
    let mut characters: Vec<String> = runs.iter().map(|run| run.character.to_string()).collect();
    characters.sort();
    characters.dedup();

    let report = TimeseriesReport {
        win_rate_over_time: timeseries::cumulative_win_rate(&runs),
        runs_by_character: timeseries::cumulative_runs_by_character(&runs, &characters),
        games_per_day: timeseries::games_per_day(&runs),
    };
    Output::save_json(&report, arg.output.clone())?;
    Ok(())
}
