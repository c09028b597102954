//! Run analytics for Slay the Spire run history.
//!
//! This crate holds the pure transformations behind the dashboard views.
//! Every function takes an already-filtered batch of
//! [`RunRecord`](spiredash_runs::RunRecord)s, mutates nothing, and returns a
//! freshly computed result, so concurrent refreshes can never interleave
//! state.
//!
//! # Modules
//!
//! - [`features`]: fixed-shape numeric feature vectors per run
//! - [`correlation`]: Pearson correlation matrix and top-k rankings
//! - [`progression`]: per-run cumulative score reconstruction
//! - [`timeseries`]: cumulative win-rate and per-character series
//! - [`summary`]: aggregate batch statistics
//! - [`cards`], [`relics`], [`enemies`]: pick and encounter tables
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
//! assert_eq!(matrix.matrix[0][0], 1.0);
//! ```

pub mod cards;
pub mod correlation;
pub mod enemies;
pub mod features;
pub mod progression;
pub mod relics;
pub mod summary;
pub mod timeseries;
