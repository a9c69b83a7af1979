use crate::error::{Result, SemanticError};
use crate::lexicon::Lexicon;
use crate::text;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use trace_code_model::{CodeUnitIndex, UnitDeclaration};

/// Token counts for one code unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentProfile {
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl DocumentProfile {
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut profile = Self::default();
        for token in tokens {
            *profile.counts.entry(token).or_insert(0) += 1;
            profile.total += 1;
        }
        profile
    }

    /// Occurrences of one term
    pub fn count(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Number of surviving tokens
    pub fn total(&self) -> usize {
        self.total
    }

    /// Distinct terms with their counts, in term order
    pub fn terms(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(term, &count)| (term.as_str(), count))
    }

    pub fn distinct_terms(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Every distinct term across all profiles, with dense sorted ordinals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyIndex {
    terms: Vec<String>,
    ordinals: HashMap<String, usize>,
}

impl VocabularyIndex {
    pub fn from_profiles(profiles: &[DocumentProfile]) -> Self {
        let sorted: BTreeSet<&str> = profiles
            .iter()
            .flat_map(|profile| profile.counts.keys().map(String::as_str))
            .collect();
        let terms: Vec<String> = sorted.into_iter().map(str::to_string).collect();
        let ordinals = terms
            .iter()
            .enumerate()
            .map(|(ordinal, term)| (term.clone(), ordinal))
            .collect();
        Self { terms, ordinals }
    }

    pub fn ordinal(&self, term: &str) -> Option<usize> {
        self.ordinals.get(term).copied()
    }

    pub fn term(&self, ordinal: usize) -> Option<&str> {
        self.terms.get(ordinal).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Profiles in code-unit ordinal order plus their shared vocabulary
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub profiles: Vec<DocumentProfile>,
    pub vocabulary: VocabularyIndex,
}

impl Corpus {
    /// Number of documents (one per code unit)
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Turns each unit's comments and identifiers into a [`DocumentProfile`]
pub struct DocumentModelBuilder<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> DocumentModelBuilder<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Reduce raw document text to its surviving terms.
    ///
    /// Stage order matters: normalize, tokenize, split camel case, length
    /// filter and strip, stop words, keywords, stem.
    pub fn terms(&self, document_text: &str) -> Vec<String> {
        let normalized = text::normalize(document_text);
        text::tokenize(&normalized)
            .iter()
            .flat_map(|token| text::split_camel_case(token))
            .filter_map(|token| text::purge(&token))
            .filter(|token| !self.lexicon.is_stop_word(token))
            .filter(|token| !self.lexicon.is_keyword(token))
            .map(|token| self.lexicon.stem(&token))
            .collect()
    }

    pub fn profile(&self, unit: &UnitDeclaration) -> DocumentProfile {
        DocumentProfile::from_tokens(self.terms(&unit.document_text()))
    }

    /// Profile every unit in parallel and collect the vocabulary.
    ///
    /// Index entries without a declaration get an empty profile.
    pub fn build(&self, index: &CodeUnitIndex, units: &[UnitDeclaration]) -> Result<Corpus> {
        let profiled: Vec<(usize, DocumentProfile)> = units
            .par_iter()
            .map(|unit| -> Result<(usize, DocumentProfile)> {
                let ordinal = index
                    .ordinal(&unit.name)
                    .ok_or_else(|| SemanticError::UnknownUnit(unit.name.clone()))?;
                Ok((ordinal, self.profile(unit)))
            })
            .collect::<Result<_>>()?;

        let mut profiles = vec![DocumentProfile::default(); index.len()];
        for (ordinal, profile) in profiled {
            profiles[ordinal] = profile;
        }

        let vocabulary = VocabularyIndex::from_profiles(&profiles);
        log::info!(
            "Built document model: {} documents, {} distinct terms, {} empty",
            profiles.len(),
            vocabulary.len(),
            profiles.iter().filter(|p| p.is_empty()).count()
        );

        Ok(Corpus {
            profiles,
            vocabulary,
        })
    }
}
