//! Annotator boundary for deid
//!
//! Everything that talks to the outside world during analysis lives here:
//! the annotator output shape, the providers that produce it, and the
//! decoding/normalization applied to raw input before it is annotated.

pub mod command;
pub mod file;
pub mod normalize;
pub mod provider;

pub use command::CommandProvider;
pub use file::FileProvider;
pub use normalize::{decode_input, normalize_punctuation};
pub use provider::{AnnotatedDoc, AnnotationProvider, EntityRecord};
