use clap::{Parser, Subcommand};

use self::{
    correlation::{CorrelationMatrixArg, TopCorrelationsArg},
    generate_runs::GenerateRunsArg,
    progression::ProgressionArg,
    summary::SummaryArg,
    tables::{CardsArg, EnemiesArg, RelicsArg},
    timeseries::TimeseriesArg,
};

mod correlation;
mod filter;
mod generate_runs;
mod progression;
mod summary;
mod tables;
mod timeseries;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What report to produce
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Aggregate statistics for a run batch
    Summary(#[clap(flatten)] SummaryArg),
    /// Win-rate, per-character, and per-day time series
    Timeseries(#[clap(flatten)] TimeseriesArg),
    /// Full feature correlation matrix
    CorrelationMatrix(#[clap(flatten)] CorrelationMatrixArg),
    /// Ranked correlations for the key metrics or one target feature
    TopCorrelations(#[clap(flatten)] TopCorrelationsArg),
    /// Reconstructed score progression curves
    Progression(#[clap(flatten)] ProgressionArg),
    /// Card pick statistics
    Cards(#[clap(flatten)] CardsArg),
    /// Relic pick statistics
    Relics(#[clap(flatten)] RelicsArg),
    /// Enemy encounter statistics
    Enemies(#[clap(flatten)] EnemiesArg),
    /// Generate a synthetic run batch
    GenerateRuns(#[clap(flatten)] GenerateRunsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Timeseries(arg) => timeseries::run(&arg)?,
        Mode::CorrelationMatrix(arg) => correlation::run_matrix(&arg)?,
        Mode::TopCorrelations(arg) => correlation::run_top(&arg)?,
        Mode::Progression(arg) => progression::run(&arg)?,
        Mode::Cards(arg) => tables::run_cards(&arg)?,
        Mode::Relics(arg) => tables::run_relics(&arg)?,
        Mode::Enemies(arg) => tables::run_enemies(&arg)?,
        Mode::GenerateRuns(arg) => generate_runs::run(&arg)?,
    }
    Ok(())
}
