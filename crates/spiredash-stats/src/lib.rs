//! Numeric primitives for the spiredash analysis crates.
//!
//! This crate is dependency-free and provides:
//!
//! - **Descriptive statistics**: min, max, mean, median, variance, standard
//!   deviation over an `f64` dataset
//! - **Pearson correlation**: pairwise linear correlation with degenerate
//!   inputs (short or zero-variance samples) mapped to 0.0
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`correlation`]: Pearson correlation coefficient
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use spiredash_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.max, 5.0);
//! ```
//!
//! ## Computing a correlation coefficient
//!
//! ```
//! use spiredash_stats::correlation::pearson;
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let y = [2.0, 4.0, 6.0, 8.0];
//! assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
//! ```

pub mod correlation;
pub mod descriptive;
