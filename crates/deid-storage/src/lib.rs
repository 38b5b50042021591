//! Storage layer for deid
//!
//! Persists an [`AnnotationSet`](deid_core::AnnotationSet) as a JSON record.
//! The record is the hand-off between the analysis run (needs an annotator)
//! and the substitution run (does not), and doubles as an audit trail.

pub mod error;
pub mod store;

pub use error::{Result, StorageError};
pub use store::{AnnotationStore, load, save};
