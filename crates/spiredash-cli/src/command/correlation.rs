use std::{
    collections::{BTreeMap, HashSet},
    path::PathBuf,
};

use spiredash_analytics::{
    correlation::{CorrelationMatrix, DEFAULT_TOP_K, KeyMetricCorrelations, top_k_for_target},
    features::FeatureMatrix,
};

use crate::{command::filter::FilterArgs, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CorrelationMatrixArg {
    #[clap(flatten)]
    filter: FilterArgs,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run_matrix(arg: &CorrelationMatrixArg) -> anyhow::Result<()> {
    let runs = arg.filter.load_runs()?;
    let matrix = CorrelationMatrix::from_features(&FeatureMatrix::from_runs(&runs));
    Output::save_json(&matrix, arg.output.clone())?;
    Ok(())
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TopCorrelationsArg {
    #[clap(flatten)]
    filter: FilterArgs,
    /// Rank correlates of this feature instead of the key metrics
    #[arg(long)]
    target: Option<String>,
    /// Number of entries kept per direction
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top: usize,
    /// Feature to hide from the ranking (repeatable)
    #[arg(long)]
    exclude: Vec<String>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run_top(arg: &TopCorrelationsArg) -> anyhow::Result<()> {
    let runs = arg.filter.load_runs()?;
    let matrix = CorrelationMatrix::from_features(&FeatureMatrix::from_runs(&runs));
    match &arg.target {
        Some(target) => {
            let excluded: HashSet<String> = arg.exclude.iter().cloned().collect();
            let top = top_k_for_target(&matrix, target, arg.top, &excluded)?;
            let report = BTreeMap::from([(target.clone(), top)]);
            Output::save_json(&report, arg.output.clone())?;
        }
        None => {
            let report = KeyMetricCorrelations::from_matrix(&matrix, arg.top);
            Output::save_json(&report, arg.output.clone())?;
        }
    }
    Ok(())
}
