use thiserror::Error;

use crate::merge::SourceList;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{list} are not sorted by descending start offset (index {index}: {start} follows {previous})")]
    Unsorted {
        list: SourceList,
        index: usize,
        previous: usize,
        start: usize,
    },

    #[error("Invalid entity span {text:?}: start {start} is not before end {end}")]
    InvalidSpan {
        text: String,
        start: usize,
        end: usize,
    },

    #[error("Span {text:?} at {start}..{end} is outside the text ({len} chars)")]
    OutOfBounds {
        text: String,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Unknown pronoun {0:?}: not in the replacement table")]
    UnknownPronoun(String),
}

pub type Result<T> = std::result::Result<T, Error>;
