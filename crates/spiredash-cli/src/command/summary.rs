use std::path::PathBuf;

use spiredash_analytics::summary::RunSummary;

use crate::{command::filter::FilterArgs, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    filter: FilterArgs,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let runs = arg.filter.load_runs()?;
    let summary =
        RunSummary::from_runs(&runs).ok_or_else(|| anyhow::anyhow!("No runs match the filter"))?;
    Output::save_json(&summary, arg.output.clone())?;
    Ok(())
}
