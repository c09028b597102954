//! Run record model and batch scoping for Slay the Spire run history.
//!
//! This crate defines the deserialized shape of a parsed run record
//! ([`record::RunRecord`]), the character enumeration with its modded-content
//! fallback ([`record::Character`]), and the filter applied to a batch of
//! records before any analysis runs ([`filter::RunFilter`]).
//!
//! # Examples
//!
//! ```
//! use spiredash_runs::{Character, RunFilter, RunRecord};
//!
//! let run: RunRecord = serde_json::from_str(
//!     r#"{"character_chosen": "IRONCLAD", "victory": true, "floor_reached": 57}"#,
//! )
//! .unwrap();
//! assert_eq!(run.character, Character::Ironclad);
//!
//! let filter = RunFilter {
//!     victory: Some(true),
//!     ..RunFilter::default()
//! };
//! assert!(filter.matches(&run));
//! ```

pub use self::{filter::*, record::*};

pub mod filter;
pub mod record;
