//! Pairwise correlation analysis over extracted run features.
//!
//! [`CorrelationMatrix::from_features`] turns a feature matrix into the full
//! symmetric Pearson matrix; [`top_k_for_target`] ranks the strongest
//! positive and negative correlates of one feature for the explorer view,
//! and [`KeyMetricCorrelations`] precomputes those rankings for the three
//! dashboard key metrics.
//!
//! # Examples
//!
//! ```
//! use spiredash_analytics::{correlation::CorrelationMatrix, features::FeatureMatrix};
//! use spiredash_runs::RunRecord;
//!
//! let runs = vec![
//!     RunRecord {
//!         victory: true,
//!         floor_reached: 57,
//!         ..RunRecord::default()
//!     },
//!     RunRecord {
//!         floor_reached: 12,
//!         ..RunRecord::default()
//!     },
//! ];
//! let matrix = CorrelationMatrix::from_features(&FeatureMatrix::from_runs(&runs));
//! assert_eq!(matrix.features.len(), matrix.matrix.len());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use spiredash_stats::correlation::pearson;

use crate::features::FeatureMatrix;

/// Number of entries kept per direction in ranked correlation views.
pub const DEFAULT_TOP_K: usize = 5;

/// Pairwise Pearson correlations between every extracted feature.
///
/// `matrix[i][j]` is the correlation between `features[i]` and
/// `features[j]`. The matrix is symmetric, its diagonal is exactly 1.0, and
/// zero-variance features correlate as 0 rather than NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Ordered feature names labeling both axes.
    pub features: Vec<String>,
    /// Square correlation matrix.
    pub matrix: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Builds the correlation matrix for a batch of feature vectors.
    ///
    /// Only the upper triangle is computed; the lower triangle mirrors it
    /// and the diagonal is assigned 1.0 outright, so self-correlation never
    /// drifts from floating-point rounding. An empty batch produces an empty
    /// matrix.
    #[must_use]
    pub fn from_features(features: &FeatureMatrix) -> Self {
        if features.rows.is_empty() {
            return Self {
                features: Vec::new(),
                matrix: Vec::new(),
            };
        }

        let size = features.names.len();
        let columns: Vec<Vec<f64>> = (0..size).map(|index| features.column(index)).collect();
        let mut matrix = vec![vec![0.0; size]; size];
        for i in 0..size {
            matrix[i][i] = 1.0;
            for j in (i + 1)..size {
                let r = pearson(&columns[i], &columns[j]);
                matrix[i][j] = r;
                matrix[j][i] = r;
            }
        }

        Self {
            features: features.names.clone(),
            matrix,
        }
    }

    fn feature_index(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|feature| feature == name)
    }
}

/// One ranked correlate of a target feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    /// Correlated feature name.
    pub feature: String,
    /// Correlation with the target, in [-1, 1].
    pub correlation: f64,
}

/// Ranked positive and negative correlates of one target feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopCorrelations {
    /// Strongest positive correlates, descending by absolute value.
    pub positive: Vec<CorrelationEntry>,
    /// Strongest negative correlates, descending by absolute value.
    pub negative: Vec<CorrelationEntry>,
}

/// The requested target feature is not part of the matrix.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("feature {name:?} is not part of the correlation matrix")]
pub struct UnknownFeatureError {
    /// The feature name that was requested.
    pub name: String,
}

/// Ranks every feature by its correlation with `target`.
///
/// Features are partitioned by the sign of their correlation (exact zeros
/// belong to neither side), each partition is sorted by descending absolute
/// value with ties keeping the original feature order, and both partitions
/// are truncated to `k` entries. The target itself and every feature in
/// `excluded` are left out, which lets the explorer accumulate user-hidden
/// features across calls without the engine holding that state.
///
/// # Errors
///
/// Returns [`UnknownFeatureError`] when `target` is not one of the matrix's
/// features.
pub fn top_k_for_target(
    matrix: &CorrelationMatrix,
    target: &str,
    k: usize,
    excluded: &HashSet<String>,
) -> Result<TopCorrelations, UnknownFeatureError> {
    let target_index = matrix
        .feature_index(target)
        .ok_or_else(|| UnknownFeatureError {
            name: target.to_owned(),
        })?;

    let mut positive = Vec::new();
    let mut negative = Vec::new();
    for (index, feature) in matrix.features.iter().enumerate() {
        if index == target_index || excluded.contains(feature) {
            continue;
        }
        let correlation = matrix.matrix[target_index][index];
        let entry = CorrelationEntry {
            feature: feature.clone(),
            correlation,
        };
        if correlation > 0.0 {
            positive.push(entry);
        } else if correlation < 0.0 {
            negative.push(entry);
        }
    }

    // Stable sorts keep the original feature order on ties.
    positive.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    negative.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    positive.truncate(k);
    negative.truncate(k);

    Ok(TopCorrelations { positive, negative })
}

/// Precomputed top correlations for the dashboard's key metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMetricCorrelations {
    /// Correlates of winning the run.
    pub victory: TopCorrelations,
    /// Correlates of the floor the run ended on.
    pub floor_reached: TopCorrelations,
    /// Correlates of the final score.
    pub score: TopCorrelations,
}

impl KeyMetricCorrelations {
    /// Ranks the correlates of `victory`, `floor_reached`, and `score`.
    ///
    /// A target missing from the matrix (an empty batch, say) yields empty
    /// lists rather than an error.
    #[must_use]
    pub fn from_matrix(matrix: &CorrelationMatrix, k: usize) -> Self {
        let excluded = HashSet::new();
        let rank = |target| top_k_for_target(matrix, target, k, &excluded).unwrap_or_default();
        Self {
            victory: rank("victory"),
            floor_reached: rank("floor_reached"),
            score: rank("score"),
        }
    }
}

#[cfg(test)]
mod tests {
    use spiredash_runs::RunRecord;

    use super::*;

    fn sample_matrix() -> CorrelationMatrix {
        // target correlates: a +0.9, b -0.3, c +0.5, d -0.8, e 0.0
        CorrelationMatrix {
            features: ["target", "a", "b", "c", "d", "e"]
                .iter()
                .map(|&name| name.to_owned())
                .collect(),
            matrix: vec![
                vec![1.0, 0.9, -0.3, 0.5, -0.8, 0.0],
                vec![0.9, 1.0, 0.0, 0.0, 0.0, 0.0],
                vec![-0.3, 0.0, 1.0, 0.0, 0.0, 0.0],
                vec![0.5, 0.0, 0.0, 1.0, 0.0, 0.0],
                vec![-0.8, 0.0, 0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let runs = vec![
            RunRecord {
                victory: true,
                floor_reached: 57,
                score: 2100,
                gold: 310,
                ..RunRecord::default()
            },
            RunRecord {
                floor_reached: 24,
                score: 640,
                gold: 95,
                ..RunRecord::default()
            },
            RunRecord {
                floor_reached: 8,
                score: 120,
                gold: 140,
                ..RunRecord::default()
            },
        ];
        let matrix = CorrelationMatrix::from_features(&crate::features::FeatureMatrix::from_runs(
            &runs,
        ));
        let size = matrix.features.len();
        for i in 0..size {
            assert_eq!(matrix.matrix[i][i], 1.0);
            for j in 0..size {
                assert_eq!(matrix.matrix[i][j], matrix.matrix[j][i]);
                assert!(matrix.matrix[i][j].abs() <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_variance_feature_correlates_as_zero() {
        // ascension_level is 20 in every run, so its column has no variance.
        let runs: Vec<RunRecord> = (0..3)
            .map(|i| RunRecord {
                ascension_level: 20,
                floor_reached: 10 * (i + 1),
                ..RunRecord::default()
            })
            .collect();
        let matrix = CorrelationMatrix::from_features(&crate::features::FeatureMatrix::from_runs(
            &runs,
        ));
        let index = matrix
            .features
            .iter()
            .position(|name| name == "ascension_level")
            .unwrap();
        for (j, value) in matrix.matrix[index].iter().enumerate() {
            if j == index {
                assert_eq!(*value, 1.0);
            } else {
                assert_eq!(*value, 0.0);
            }
        }
    }

    #[test]
    fn test_empty_batch_yields_empty_matrix() {
        let matrix =
            CorrelationMatrix::from_features(&crate::features::FeatureMatrix::from_runs(&[]));
        assert!(matrix.features.is_empty());
        assert!(matrix.matrix.is_empty());
    }

    #[test]
    fn test_single_run_batch_has_no_off_diagonal_signal() {
        let runs = vec![RunRecord {
            victory: true,
            floor_reached: 57,
            ..RunRecord::default()
        }];
        let matrix = CorrelationMatrix::from_features(&crate::features::FeatureMatrix::from_runs(
            &runs,
        ));
        for (i, row) in matrix.matrix.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                if i == j {
                    assert_eq!(*value, 1.0);
                } else {
                    assert_eq!(*value, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_top_k_partitions_by_sign_and_sorts_by_magnitude() {
        let top = top_k_for_target(&sample_matrix(), "target", 5, &HashSet::new()).unwrap();
        let positive: Vec<&str> = top.positive.iter().map(|e| e.feature.as_str()).collect();
        let negative: Vec<&str> = top.negative.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(positive, ["a", "c"]);
        assert_eq!(negative, ["d", "b"]);
    }

    #[test]
    fn test_top_k_drops_exact_zero_correlations() {
        let top = top_k_for_target(&sample_matrix(), "target", 5, &HashSet::new()).unwrap();
        assert!(
            top.positive
                .iter()
                .chain(&top.negative)
                .all(|entry| entry.feature != "e")
        );
    }

    #[test]
    fn test_top_k_truncates_and_excludes() {
        let excluded = HashSet::from(["a".to_owned()]);
        let top = top_k_for_target(&sample_matrix(), "target", 1, &excluded).unwrap();
        let positive: Vec<&str> = top.positive.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(positive, ["c"]);
        assert_eq!(top.negative.len(), 1);
        assert_eq!(top.negative[0].feature, "d");
    }

    #[test]
    fn test_top_k_ties_keep_feature_order() {
        let matrix = CorrelationMatrix {
            features: ["t", "x", "y"].iter().map(|&n| n.to_owned()).collect(),
            matrix: vec![
                vec![1.0, 0.5, 0.5],
                vec![0.5, 1.0, 0.0],
                vec![0.5, 0.0, 1.0],
            ],
        };
        let top = top_k_for_target(&matrix, "t", 5, &HashSet::new()).unwrap();
        let positive: Vec<&str> = top.positive.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(positive, ["x", "y"]);
    }

    #[test]
    fn test_unknown_target_is_an_error() {
        let err = top_k_for_target(&sample_matrix(), "luck", 5, &HashSet::new()).unwrap_err();
        assert_eq!(err.name, "luck");
    }

    #[test]
    fn test_key_metrics_empty_matrix_yields_empty_lists() {
        let matrix = CorrelationMatrix {
            features: Vec::new(),
            matrix: Vec::new(),
        };
        let key_metrics = KeyMetricCorrelations::from_matrix(&matrix, DEFAULT_TOP_K);
        assert!(key_metrics.victory.positive.is_empty());
        assert!(key_metrics.score.negative.is_empty());
    }

    #[test]
    fn test_serialized_shapes_match_the_api() {
        let matrix = CorrelationMatrix {
            features: vec!["victory".to_owned()],
            matrix: vec![vec![1.0]],
        };
        let value = serde_json::to_value(&matrix).unwrap();
        assert!(value.get("features").is_some());
        assert!(value.get("matrix").is_some());

        let key_metrics = KeyMetricCorrelations::from_matrix(&matrix, DEFAULT_TOP_K);
        let value = serde_json::to_value(&key_metrics).unwrap();
        for target in ["victory", "floor_reached", "score"] {
            assert!(value.get(target).and_then(|t| t.get("positive")).is_some());
        }
    }
}
