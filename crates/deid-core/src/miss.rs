//! Possible-miss detector
//!
//! Flags two known annotator failure modes for human review. Single token of
//! lookback; matches never chain across more than two tokens.

use crate::annotation::{MissRecord, Token};

const POSSESSIVE: &str = "'s";

/// Scan the token stream (ascending) and collect advisory records.
pub fn detect_misses(tokens: &[Token]) -> Vec<MissRecord> {
    let mut misses = Vec::new();

    for pair in tokens.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);

        // Possessive clitic tagged as a verb: the name before it was skipped
        if current.text == POSSESSIVE && current.pos == "VERB" {
            misses.push(MissRecord::new(
                format!("{}{}", previous.text, POSSESSIVE),
                previous.start,
            ));
        }

        // Singular proper noun right after a hyphen: half of a compound name
        if current.pos == "PROPN" && current.tag == "NNP" && previous.tag == "HYPH" {
            misses.push(MissRecord::new(
                format!("{}{}", previous.text, current.text),
                previous.start,
            ));
        }
    }

    if !misses.is_empty() {
        tracing::debug!(count = misses.len(), "possible misses detected");
    }

    misses
}
