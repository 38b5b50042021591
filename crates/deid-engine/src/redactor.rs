//! Substitution phase: AnnotationSet → redacted text

use deid_core::{AnnotationSet, Markup, Substituter, merge};

#[derive(Debug, Clone)]
pub struct RedactOptions {
    /// Text every person name is replaced with
    pub replacement: String,
    pub markup: Markup,
}

impl Default for RedactOptions {
    fn default() -> Self {
        Self {
            replacement: "EMPLOYEE".to_string(),
            markup: Markup::Plain,
        }
    }
}

/// Outcome of a substitution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redaction {
    pub text: String,
    pub entities: usize,
    pub pronouns: usize,
}

pub struct Redactor {
    substituter: Substituter,
}

impl Redactor {
    pub fn new(options: RedactOptions) -> Self {
        Self {
            substituter: Substituter::new(options.replacement).with_markup(options.markup),
        }
    }

    /// Merge and substitute the entities and pronouns of `set`.
    ///
    /// Both lists must already be sorted by descending start, as they are
    /// after a round trip through the store.
    pub fn redact(&self, set: &AnnotationSet) -> deid_core::Result<Redaction> {
        let merged = merge(&set.entities, &set.pronouns)?;
        let text = self.substituter.apply(&set.message, &merged)?;

        tracing::info!(
            entities = set.entities.len(),
            pronouns = set.pronouns.len(),
            markup = ?self.substituter.markup(),
            "substitution finished"
        );

        Ok(Redaction {
            text,
            entities: set.entities.len(),
            pronouns: set.pronouns.len(),
        })
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(RedactOptions::default())
    }
}
