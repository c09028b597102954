use std::path::PathBuf;

use chrono::NaiveDate;
use spiredash_runs::{Character, RunFilter, RunRecord};

use crate::util;

/// Batch source and scoping options shared by every analysis subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FilterArgs {
    /// Path to the runs JSON file
    #[arg(long)]
    pub runs: PathBuf,
    /// Keep only runs played as this character (exporter identifier)
    #[arg(long)]
    pub character: Option<Character>,
    /// Keep only runs completed at or after this date (YYYY-MM-DD, local)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    /// Keep only runs completed at or before the start of this date
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
    /// Keep only runs at this ascension level
    #[arg(long)]
    pub ascension: Option<u32>,
    /// Keep only victories (true) or defeats (false)
    #[arg(long)]
    pub victory: Option<bool>,
    /// Keep only daily climbs (true) or regular runs (false)
    #[arg(long)]
    pub daily: Option<bool>,
    /// Keep runs played as modded characters
    #[arg(long)]
    pub include_modded: bool,
}

impl FilterArgs {
    fn filter(&self) -> RunFilter {
        RunFilter {
            character: self.character.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            ascension_level: self.ascension,
            victory: self.victory,
            daily: self.daily,
            base_game_only: !self.include_modded,
        }
    }

    /// Loads the runs file and drops every run the filter rejects.
    pub fn load_runs(&self) -> anyhow::Result<Vec<RunRecord>> {
        let mut runs = util::read_runs_file(&self.runs)?;
        let total = runs.len();
        self.filter().retain(&mut runs);
        eprintln!("Loaded {total} runs, {} after filtering", runs.len());
        Ok(runs)
    }
}
