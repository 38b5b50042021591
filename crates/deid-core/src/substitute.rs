//! Substitution engine
//!
//! Walks a merged, descending sequence once, from the end of the text towards
//! its start. Each item replaces `original[start..end]`; the text between it
//! and the span replaced before it is copied through untouched. Offsets are
//! only ever resolved against the original text, and every item still
//! pending lies below the part already rewritten.

use crate::merge::{Annotation, MergedItem};
use crate::{Error, Result, pronouns};

/// Class attribute of the inline marker around entity replacements
pub const ENTITY_CLASS: &str = "deid-entity";
/// Class attribute of the inline marker around pronoun replacements
pub const PRONOUN_CLASS: &str = "deid-pronoun";

/// How replacements are highlighted in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    #[default]
    Plain,
    /// `<span class="...">` markers, distinct for entities and pronouns.
    /// Untouched text is HTML-escaped.
    Html,
    /// `**bold**`, for Markdown output
    Markdown,
}

/// Replaces merged annotations in the text they were found in
#[derive(Debug, Clone)]
pub struct Substituter {
    replacement: String,
    markup: Markup,
}

impl Substituter {
    pub fn new(replacement: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            markup: Markup::Plain,
        }
    }

    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    pub fn markup(&self) -> Markup {
        self.markup
    }

    /// Apply `items` to `text` in the order given.
    ///
    /// `items` must be sorted by descending start (the output of
    /// [`crate::merge`]); they are never re-sorted here.
    pub fn apply(&self, text: &str, items: &[MergedItem]) -> Result<String> {
        let original: Vec<char> = text.chars().collect();
        let len = original.len();
        // Everything below `floor` has not been emitted yet
        let mut floor = len;
        // Output pieces, last piece first
        let mut pieces: Vec<String> = Vec::with_capacity(items.len() * 2 + 1);

        for item in items {
            let (start, end, replacement) = match &item.annotation {
                Annotation::Pronoun(token) => {
                    let anon = pronouns::replacement_for(&token.text)
                        .ok_or_else(|| Error::UnknownPronoun(token.text.clone()))?;
                    (token.start, token.end(), self.pronoun_marker(anon))
                }
                Annotation::Entity(span) => {
                    if span.start >= span.end {
                        return Err(Error::InvalidSpan {
                            text: span.text.clone(),
                            start: span.start,
                            end: span.end,
                        });
                    }
                    (span.start, span.end, self.entity_marker())
                }
            };

            if end > len {
                return Err(Error::OutOfBounds {
                    text: item.annotation.text().to_string(),
                    start,
                    end,
                    len,
                });
            }
            if start > floor {
                return Err(Error::Unsorted {
                    list: item.annotation.source(),
                    index: item.index,
                    previous: floor,
                    start,
                });
            }

            let end = if end > floor {
                tracing::warn!(
                    text = item.annotation.text(),
                    start,
                    end,
                    clamped_to = floor,
                    "annotation overlaps an already replaced span"
                );
                floor
            } else {
                end
            };

            tracing::debug!(
                source = %item.annotation.source(),
                index = item.index,
                start,
                end,
                "replacing span"
            );
            pieces.push(self.untouched(&original[end..floor]));
            pieces.push(replacement);
            floor = start;
        }
        pieces.push(self.untouched(&original[..floor]));

        Ok(pieces.into_iter().rev().collect())
    }

    fn untouched(&self, segment: &[char]) -> String {
        let segment: String = segment.iter().collect();
        match self.markup {
            Markup::Html => escape_html(&segment),
            Markup::Plain | Markup::Markdown => segment,
        }
    }

    fn entity_marker(&self) -> String {
        match self.markup {
            Markup::Plain => self.replacement.clone(),
            Markup::Html => html_span(ENTITY_CLASS, &self.replacement),
            Markup::Markdown => format!("**{}**", self.replacement),
        }
    }

    fn pronoun_marker(&self, anon: &str) -> String {
        if anon.is_empty() {
            return String::new();
        }
        match self.markup {
            Markup::Plain => anon.to_string(),
            Markup::Html => html_span(PRONOUN_CLASS, anon),
            Markup::Markdown => format!("**{}**", anon),
        }
    }
}

fn html_span(class: &str, content: &str) -> String {
    format!("<span class=\"{}\">{}</span>", class, escape_html(content))
}

/// Escape text for use in HTML element content or a quoted attribute
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Substitute `items` into `text`, replacing entities with `replacement`
/// and pronouns from the fixed table.
pub fn substitute(
    text: &str,
    items: &[MergedItem],
    replacement: &str,
    html_wrap: bool,
) -> Result<String> {
    let markup = if html_wrap { Markup::Html } else { Markup::Plain };
    Substituter::new(replacement)
        .with_markup(markup)
        .apply(text, items)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::annotation::{EntitySpan, PronounToken};
    use crate::merge;
    use crate::pronouns::replacement_for;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Piece {
        Plain(String),
        Name(String),
        Pronoun(&'static str),
    }

    fn arb_piece() -> impl Strategy<Value = Piece> {
        prop_oneof![
            "[a-z é漢ß<>&\"]{0,6}".prop_map(Piece::Plain),
            "[A-ZÉ][a-zé漢]{0,5}".prop_map(Piece::Name),
            prop::sample::select(vec!["he", "She", "HIM", "his", "Mr.", "mrs.", "herself"])
                .prop_map(Piece::Pronoun),
        ]
    }

    struct Case {
        message: String,
        entities: Vec<EntitySpan>,
        pronouns: Vec<PronounToken>,
        plain: String,
        html: String,
    }

    /// Build a message from pieces, along with its annotations and the
    /// expected output of each mode, assembled front to back.
    fn build(pieces: &[Piece]) -> Case {
        let mut case = Case {
            message: String::new(),
            entities: Vec::new(),
            pronouns: Vec::new(),
            plain: String::new(),
            html: String::new(),
        };
        let mut pos = 0;
        for piece in pieces {
            match piece {
                Piece::Plain(text) => {
                    case.plain.push_str(text);
                    case.html.push_str(&escape_html(text));
                    case.message.push_str(text);
                    pos += text.chars().count();
                }
                Piece::Name(text) => {
                    let end = pos + text.chars().count();
                    case.entities.push(EntitySpan::new(text.as_str(), pos, end));
                    case.plain.push('X');
                    case.html.push_str(&html_span(ENTITY_CLASS, "X"));
                    case.message.push_str(text);
                    pos = end;
                }
                Piece::Pronoun(text) => {
                    let anon = replacement_for(text).unwrap();
                    case.pronouns.push(PronounToken::new(*text, pos));
                    case.plain.push_str(anon);
                    if !anon.is_empty() {
                        case.html.push_str(&html_span(PRONOUN_CLASS, anon));
                    }
                    case.message.push_str(text);
                    pos += text.chars().count();
                }
            }
        }
        case.entities.reverse();
        case.pronouns.reverse();
        case
    }

    proptest! {
        /// Descending substitution agrees with an ascending rebuild, whatever
        /// the mix of multi-byte text and adjacent spans.
        #[test]
        fn matches_ascending_rebuild(pieces in prop::collection::vec(arb_piece(), 0..24)) {
            let case = build(&pieces);
            let items = merge(&case.entities, &case.pronouns).unwrap();

            let plain = Substituter::new("X").apply(&case.message, &items).unwrap();
            prop_assert_eq!(plain, case.plain);

            let html = Substituter::new("X")
                .with_markup(Markup::Html)
                .apply(&case.message, &items)
                .unwrap();
            prop_assert_eq!(html, case.html);
        }
    }
}
