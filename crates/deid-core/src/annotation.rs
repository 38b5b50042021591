//! Annotation model
//!
//! All offsets are `char` (Unicode scalar value) indices into the original,
//! unmodified message. They stop being meaningful for any other string.

use serde::{Deserialize, Serialize};

/// A detected person name. `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    #[serde(alias = "start_char")]
    pub start: usize,
    #[serde(alias = "end_char")]
    pub end: usize,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// A detected gendered pronoun or honorific.
///
/// There is no stored end offset: the replaced range is always derived from
/// the token text at substitution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PronounToken {
    pub text: String,
    #[serde(alias = "idx")]
    pub start: usize,
}

impl PronounToken {
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        Self {
            text: text.into(),
            start,
        }
    }

    /// Exclusive end offset, `start + chars(text)`
    pub fn end(&self) -> usize {
        self.start + self.text.chars().count()
    }
}

/// Advisory record of text the annotator probably failed to flag.
/// Never substituted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissRecord {
    pub text: String,
    #[serde(alias = "idx")]
    pub start: usize,
}

impl MissRecord {
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        Self {
            text: text.into(),
            start,
        }
    }
}

/// One token of the annotator's output stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Coarse part of speech (`PRON`, `PROPN`, `VERB`, ...)
    pub pos: String,
    /// Fine-grained tag (`NNP`, `HYPH`, ...)
    pub tag: String,
    #[serde(alias = "idx")]
    pub start: usize,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        pos: impl Into<String>,
        tag: impl Into<String>,
        start: usize,
    ) -> Self {
        Self {
            text: text.into(),
            pos: pos.into(),
            tag: tag.into(),
            start,
        }
    }
}

/// The unit of persistence: the message plus everything found in it.
///
/// All four fields are required when deserializing; an absent list is
/// written as `[]`, never omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotationSet {
    pub message: String,
    pub entities: Vec<EntitySpan>,
    pub pronouns: Vec<PronounToken>,
    pub possible_misses: Vec<MissRecord>,
}

impl AnnotationSet {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Sort all three lists by descending start offset.
    ///
    /// The sort is stable, so items sharing a start keep their relative order.
    pub fn sort_descending(&mut self) {
        self.entities.sort_by(|a, b| b.start.cmp(&a.start));
        self.pronouns.sort_by(|a, b| b.start.cmp(&a.start));
        self.possible_misses.sort_by(|a, b| b.start.cmp(&a.start));
    }

    pub fn is_sorted_descending(&self) -> bool {
        self.entities.windows(2).all(|w| w[0].start >= w[1].start)
            && self.pronouns.windows(2).all(|w| w[0].start >= w[1].start)
            && self
                .possible_misses
                .windows(2)
                .all(|w| w[0].start >= w[1].start)
    }
}
