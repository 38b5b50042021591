//! Analysis phase: annotator output → AnnotationSet

use std::sync::Arc;

use anyhow::Result;
use deid_core::{AnnotationSet, EntitySpan, PronounToken, detect_misses, pronouns};
use deid_sources::{AnnotatedDoc, AnnotationProvider};

/// Entity label treated as a person name
pub const PERSON_LABEL: &str = "PERSON";

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Messages this short (in chars) or shorter get no entity pass
    pub min_message_chars: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_message_chars: 7,
        }
    }
}

pub struct Analyzer {
    provider: Arc<dyn AnnotationProvider>,
    options: AnalysisOptions,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn AnnotationProvider>, options: AnalysisOptions) -> Self {
        Self { provider, options }
    }

    /// Annotate `message` and collect entities, pronouns and possible misses.
    ///
    /// Lists come back in document (ascending) order; the store sorts them.
    pub async fn analyze(&self, message: &str) -> Result<AnnotationSet> {
        let doc = self.provider.annotate(message).await?;
        let set = self.collect(message, &doc)?;

        tracing::info!(
            provider = self.provider.name(),
            entities = set.entities.len(),
            pronouns = set.pronouns.len(),
            possible_misses = set.possible_misses.len(),
            "analysis finished"
        );

        Ok(set)
    }

    /// Turn annotator output for `message` into an annotation set
    pub fn collect(&self, message: &str, doc: &AnnotatedDoc) -> Result<AnnotationSet> {
        let chars: Vec<char> = message.chars().collect();
        let mut set = AnnotationSet::new(message);

        if chars.len() > self.options.min_message_chars {
            for entity in doc.entities.iter().filter(|e| e.label == PERSON_LABEL) {
                if entity.start >= entity.end || entity.end > chars.len() {
                    anyhow::bail!(
                        "Annotator returned entity {:?} at {}..{} outside a {} char message",
                        entity.text,
                        entity.start,
                        entity.end,
                        chars.len()
                    );
                }
                let covered: String = chars[entity.start..entity.end].iter().collect();
                if covered != entity.text {
                    tracing::warn!(
                        expected = %entity.text,
                        found = %covered,
                        start = entity.start,
                        "entity text does not match message"
                    );
                }
                set.entities
                    .push(EntitySpan::new(&entity.text, entity.start, entity.end));
            }
        } else {
            tracing::debug!(chars = chars.len(), "message too short for entity pass");
        }

        for token in doc
            .tokens
            .iter()
            .filter(|t| (t.pos == "PRON" || t.pos == "PROPN") && pronouns::is_gendered(&t.text))
        {
            let token = PronounToken::new(&token.text, token.start);
            if token.end() > chars.len() {
                anyhow::bail!(
                    "Annotator returned token {:?} at {} outside a {} char message",
                    token.text,
                    token.start,
                    chars.len()
                );
            }
            set.pronouns.push(token);
        }

        set.possible_misses = detect_misses(&doc.tokens);

        Ok(set)
    }
}
