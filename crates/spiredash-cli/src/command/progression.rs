use std::path::PathBuf;

use spiredash_analytics::progression::score_progression;

use crate::{command::filter::FilterArgs, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProgressionArg {
    #[clap(flatten)]
    filter: FilterArgs,
    /// Only the curve of the run at this index in the filtered batch
    #[arg(long)]
    index: Option<usize>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ProgressionArg) -> anyhow::Result<()> {
    let runs = arg.filter.load_runs()?;
    match arg.index {
        Some(index) => {
            let run = runs.get(index).ok_or_else(|| {
                anyhow::anyhow!("Run index {index} out of range, batch has {} runs", runs.len())
            })?;
            Output::save_json(&score_progression(run), arg.output.clone())?;
        }
        None => {
            let curves: Vec<_> = runs.iter().map(score_progression).collect();
            Output::save_json(&curves, arg.output.clone())?;
        }
    }
    Ok(())
}
