//! Merge engine
//!
//! Interleaves entity spans and pronoun tokens into a single sequence sorted
//! by descending start offset, so substitution can run in one pass without
//! any offset bookkeeping.

use std::fmt;

use crate::annotation::{EntitySpan, PronounToken};
use crate::{Error, Result};

/// Which input list an item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceList {
    Entities,
    Pronouns,
}

impl fmt::Display for SourceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceList::Entities => f.write_str("entities"),
            SourceList::Pronouns => f.write_str("pronouns"),
        }
    }
}

/// Something the substitution engine replaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Entity(EntitySpan),
    Pronoun(PronounToken),
}

impl Annotation {
    pub fn start(&self) -> usize {
        match self {
            Annotation::Entity(span) => span.start,
            Annotation::Pronoun(token) => token.start,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Annotation::Entity(span) => &span.text,
            Annotation::Pronoun(token) => &token.text,
        }
    }

    pub fn source(&self) -> SourceList {
        match self {
            Annotation::Entity(_) => SourceList::Entities,
            Annotation::Pronoun(_) => SourceList::Pronouns,
        }
    }
}

/// An annotation plus its position in the list it was taken from.
/// `index` is for tracing only and plays no part in ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedItem {
    pub annotation: Annotation,
    pub index: usize,
}

impl MergedItem {
    fn entity(index: usize, span: &EntitySpan) -> Self {
        Self {
            annotation: Annotation::Entity(span.clone()),
            index,
        }
    }

    fn pronoun(index: usize, token: &PronounToken) -> Self {
        Self {
            annotation: Annotation::Pronoun(token.clone()),
            index,
        }
    }

    pub fn start(&self) -> usize {
        self.annotation.start()
    }
}

/// Merge two lists, each sorted by descending start, into one descending
/// sequence.
///
/// On equal starts the entity is emitted first, so it is replaced before the
/// pronoun sharing its offset.
pub fn merge(entities: &[EntitySpan], pronouns: &[PronounToken]) -> Result<Vec<MergedItem>> {
    check_descending(SourceList::Entities, entities.iter().map(|e| e.start))?;
    check_descending(SourceList::Pronouns, pronouns.iter().map(|p| p.start))?;

    let mut merged = Vec::with_capacity(entities.len() + pronouns.len());
    let (mut e, mut p) = (0, 0);

    while e < entities.len() && p < pronouns.len() {
        if pronouns[p].start > entities[e].start {
            merged.push(MergedItem::pronoun(p, &pronouns[p]));
            p += 1;
        } else {
            merged.push(MergedItem::entity(e, &entities[e]));
            e += 1;
        }
    }

    // At most one of these has anything left, already in descending order
    merged.extend(
        entities[e..]
            .iter()
            .enumerate()
            .map(|(i, span)| MergedItem::entity(e + i, span)),
    );
    merged.extend(
        pronouns[p..]
            .iter()
            .enumerate()
            .map(|(i, token)| MergedItem::pronoun(p + i, token)),
    );

    tracing::debug!(
        entities = entities.len(),
        pronouns = pronouns.len(),
        "merged annotations"
    );

    Ok(merged)
}

fn check_descending(list: SourceList, starts: impl Iterator<Item = usize>) -> Result<()> {
    let mut previous: Option<usize> = None;
    for (index, start) in starts.enumerate() {
        if let Some(prev) = previous
            && start > prev
        {
            return Err(Error::Unsorted {
                list,
                index,
                previous: prev,
                start,
            });
        }
        previous = Some(start);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(items: &[MergedItem]) -> Vec<usize> {
        items.iter().map(MergedItem::start).collect()
    }

    #[test]
    fn test_both_empty() {
        assert!(merge(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_only_entities() {
        let entities = vec![EntitySpan::new("Jane", 30, 34), EntitySpan::new("John", 8, 12)];
        let merged = merge(&entities, &[]).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].annotation, Annotation::Entity(entities[0].clone()));
        assert_eq!(merged[1].annotation, Annotation::Entity(entities[1].clone()));
        assert_eq!(merged[1].index, 1);
    }

    #[test]
    fn test_only_pronouns() {
        let pronouns = vec![PronounToken::new("she", 40), PronounToken::new("he", 2)];
        let merged = merge(&[], &pronouns).unwrap();

        assert_eq!(starts(&merged), vec![40, 2]);
        assert!(merged.iter().all(|m| m.annotation.source() == SourceList::Pronouns));
    }

    #[test]
    fn test_interleaves_descending() {
        let entities = vec![
            EntitySpan::new("Kim", 60, 63),
            EntitySpan::new("Lee", 25, 28),
            EntitySpan::new("Ann", 0, 3),
        ];
        let pronouns = vec![
            PronounToken::new("her", 70),
            PronounToken::new("she", 40),
            PronounToken::new("he", 10),
        ];

        let merged = merge(&entities, &pronouns).unwrap();

        assert_eq!(starts(&merged), vec![70, 60, 40, 25, 10, 0]);
        let sources: Vec<_> = merged.iter().map(|m| m.annotation.source()).collect();
        assert_eq!(
            sources,
            vec![
                SourceList::Pronouns,
                SourceList::Entities,
                SourceList::Pronouns,
                SourceList::Entities,
                SourceList::Pronouns,
                SourceList::Entities,
            ]
        );
    }

    #[test]
    fn test_flushes_remaining_entities() {
        // More entities than pronouns, trailing entities below every pronoun
        let entities = vec![
            EntitySpan::new("A", 50, 51),
            EntitySpan::new("B", 20, 21),
            EntitySpan::new("C", 5, 6),
        ];
        let pronouns = vec![PronounToken::new("he", 30)];

        let merged = merge(&entities, &pronouns).unwrap();
        assert_eq!(starts(&merged), vec![50, 30, 20, 5]);
    }

    #[test]
    fn test_tie_emits_entity_first() {
        let entities = vec![EntitySpan::new("Sam", 12, 15)];
        let pronouns = vec![PronounToken::new("he", 12)];

        for _ in 0..3 {
            let merged = merge(&entities, &pronouns).unwrap();
            assert_eq!(merged[0].annotation.source(), SourceList::Entities);
            assert_eq!(merged[1].annotation.source(), SourceList::Pronouns);
        }
    }

    #[test]
    fn test_is_permutation_of_inputs() {
        let entities = vec![EntitySpan::new("X", 9, 10), EntitySpan::new("Y", 9, 10)];
        let pronouns = vec![PronounToken::new("he", 11), PronounToken::new("him", 1)];

        let merged = merge(&entities, &pronouns).unwrap();

        assert_eq!(merged.len(), 4);
        for (i, e) in entities.iter().enumerate() {
            assert!(merged
                .iter()
                .any(|m| m.index == i && m.annotation == Annotation::Entity(e.clone())));
        }
        for (i, p) in pronouns.iter().enumerate() {
            assert!(merged
                .iter()
                .any(|m| m.index == i && m.annotation == Annotation::Pronoun(p.clone())));
        }
        assert!(starts(&merged).windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_rejects_ascending_input() {
        let entities = vec![EntitySpan::new("A", 1, 2), EntitySpan::new("B", 5, 6)];
        let err = merge(&entities, &[]).unwrap_err();

        assert_eq!(
            err,
            Error::Unsorted {
                list: SourceList::Entities,
                index: 1,
                previous: 1,
                start: 5,
            }
        );
    }

    #[test]
    fn test_rejects_unsorted_pronouns() {
        let pronouns = vec![PronounToken::new("he", 3), PronounToken::new("she", 4)];
        let err = merge(&[], &pronouns).unwrap_err();
        assert!(matches!(err, Error::Unsorted { list: SourceList::Pronouns, .. }));
    }
}
