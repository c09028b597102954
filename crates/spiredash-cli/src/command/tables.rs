use std::path::PathBuf;

use spiredash_analytics::{cards::card_stats, enemies::enemy_stats, relics::relic_stats};

use crate::{command::filter::FilterArgs, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CardsArg {
    #[clap(flatten)]
    filter: FilterArgs,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run_cards(arg: &CardsArg) -> anyhow::Result<()> {
    let runs = arg.filter.load_runs()?;
    let stats = card_stats(&runs, arg.filter.include_modded);
    eprintln!("Aggregated {} cards", stats.len());
    Output::save_json(&stats, arg.output.clone())?;
    Ok(())
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RelicsArg {
    #[clap(flatten)]
    filter: FilterArgs,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run_relics(arg: &RelicsArg) -> anyhow::Result<()> {
    let runs = arg.filter.load_runs()?;
    let stats = relic_stats(&runs, arg.filter.include_modded);
    eprintln!("Aggregated {} relics", stats.len());
    Output::save_json(&stats, arg.output.clone())?;
    Ok(())
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EnemiesArg {
    #[clap(flatten)]
    filter: FilterArgs,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run_enemies(arg: &EnemiesArg) -> anyhow::Result<()> {
    let runs = arg.filter.load_runs()?;
    let stats = enemy_stats(&runs);
    eprintln!("Aggregated {} enemies", stats.len());
    Output::save_json(&stats, arg.output.clone())?;
    Ok(())
}
