//! Core domain models and logic for deid
//!
//! This crate contains:
//! - Annotation model (entity spans, pronoun tokens, possible misses)
//! - Merge engine (descending-offset interleaving)
//! - Substitution engine (offset-safe splicing)
//! - Possible-miss detector
//!
//! Everything here is synchronous and free of I/O. Offsets are `char`
//! indices into the original message.

pub mod annotation;
pub mod error;
pub mod merge;
pub mod miss;
pub mod pronouns;
pub mod substitute;

pub use annotation::{AnnotationSet, EntitySpan, MissRecord, PronounToken, Token};
pub use error::{Error, Result};
pub use merge::{Annotation, MergedItem, SourceList, merge};
pub use miss::detect_misses;
pub use substitute::{Markup, Substituter, substitute};
