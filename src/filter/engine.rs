use tracing::debug;

use crate::candidate::{Candidate, ClaimMetadata};
use crate::constants::BASE_FILTER_WEIGHT;

use super::types::{FilterField, FilterMode, FilterWeight, QueryFilters};

/// An active constraint with its value lowercased once per search.
#[derive(Debug, Clone)]
struct Rule {
    field: FilterField,
    needle: String,
    mode: FilterMode,
}

/// Candidate metadata lowercased for case-insensitive matching.
struct FoldedMetadata {
    title: String,
    classification: String,
    r#abstract: String,
}

impl FoldedMetadata {
    fn new(meta: &ClaimMetadata) -> Self {
        Self {
            title: meta.title.to_lowercase(),
            classification: meta.classification.to_lowercase(),
            r#abstract: meta.r#abstract.to_lowercase(),
        }
    }
}

impl Rule {
    fn matches(&self, meta: &FoldedMetadata) -> bool {
        match self.field {
            FilterField::Classification => meta.classification.starts_with(&self.needle),
            FilterField::Title => meta.title == self.needle,
            FilterField::Keyword => {
                meta.title.contains(&self.needle) || meta.r#abstract.contains(&self.needle)
            }
        }
    }
}

/// Evaluates [`QueryFilters`] against candidates.
///
/// Required constraints form a conjunction: one failure excludes the candidate.
/// Each matching preferred constraint adds its field's boost to a base weight of `1.0`.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    required: Vec<Rule>,
    preferred: Vec<Rule>,
}

impl FilterEngine {
    pub fn new(filters: &QueryFilters) -> Self {
        let (required, preferred): (Vec<Rule>, Vec<Rule>) = filters
            .active()
            .map(|(field, c)| Rule {
                field,
                needle: c.value.trim().to_lowercase(),
                mode: c.mode,
            })
            .partition(|rule| rule.mode == FilterMode::Required);

        Self {
            required,
            preferred,
        }
    }

    /// `true` when no constraint is active, so every weight is `1.0`.
    pub fn is_noop(&self) -> bool {
        self.required.is_empty() && self.preferred.is_empty()
    }

    pub fn weigh(&self, candidate: &Candidate) -> FilterWeight {
        let meta = FoldedMetadata::new(&candidate.metadata);

        if !self.required.iter().all(|rule| rule.matches(&meta)) {
            return FilterWeight::Excluded;
        }

        let weight = self
            .preferred
            .iter()
            .filter(|rule| rule.matches(&meta))
            .fold(BASE_FILTER_WEIGHT, |w, rule| w + rule.field.boost());

        FilterWeight::Included(weight)
    }

    /// One weight per candidate, in candidate order.
    pub fn weigh_all(&self, candidates: &[Candidate]) -> Vec<FilterWeight> {
        if self.is_noop() {
            return vec![FilterWeight::Included(BASE_FILTER_WEIGHT); candidates.len()];
        }

        let weights: Vec<FilterWeight> = candidates.iter().map(|c| self.weigh(c)).collect();

        debug!(
            candidates = candidates.len(),
            excluded = weights.iter().filter(|w| w.is_excluded()).count(),
            required = self.required.len(),
            preferred = self.preferred.len(),
            "Filter weights computed"
        );

        weights
    }
}

/// Convenience wrapper around [`FilterEngine::weigh_all`].
pub fn compute_filter_weights(candidates: &[Candidate], filters: &QueryFilters) -> Vec<FilterWeight> {
    FilterEngine::new(filters).weigh_all(candidates)
}
