use serde::{Deserialize, Serialize};

use crate::constants::{CLASSIFICATION_BOOST, KEYWORD_BOOST, TITLE_BOOST};

/// How a metadata constraint affects ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterMode {
    /// Candidates failing the constraint are excluded.
    Required,
    /// Candidates matching the constraint are boosted.
    Preferred,
    /// Any other mode string: the constraint has no effect.
    #[default]
    Ignored,
}

impl FilterMode {
    /// Case-insensitive; unknown strings map to [`FilterMode::Ignored`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "required" => FilterMode::Required,
            "preferred" => FilterMode::Preferred,
            _ => FilterMode::Ignored,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Required => "required",
            FilterMode::Preferred => "preferred",
            FilterMode::Ignored => "ignored",
        }
    }
}

impl From<String> for FilterMode {
    fn from(value: String) -> Self {
        FilterMode::parse(&value)
    }
}

impl From<FilterMode> for String {
    fn from(mode: FilterMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate metadata field a constraint is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Prefix match on the classification code.
    Classification,
    /// Exact match on the title.
    Title,
    /// Substring match on the title or the abstract.
    Keyword,
}

impl FilterField {
    /// Additive boost for a matching preferred constraint on this field.
    pub fn boost(&self) -> f32 {
        match self {
            FilterField::Classification => CLASSIFICATION_BOOST,
            FilterField::Title => TITLE_BOOST,
            FilterField::Keyword => KEYWORD_BOOST,
        }
    }
}

/// A user-supplied constraint value paired with its mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub mode: FilterMode,
}

impl Constraint {
    pub fn new(value: impl Into<String>, mode: FilterMode) -> Self {
        Self {
            value: value.into().trim().to_string(),
            mode,
        }
    }

    pub fn required(value: impl Into<String>) -> Self {
        Self::new(value, FilterMode::Required)
    }

    pub fn preferred(value: impl Into<String>) -> Self {
        Self::new(value, FilterMode::Preferred)
    }

    /// `false` for an empty value or an ignored mode.
    pub fn is_active(&self) -> bool {
        !self.value.trim().is_empty() && self.mode != FilterMode::Ignored
    }
}

/// The three metadata constraints of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilters {
    #[serde(default)]
    pub classification: Constraint,
    #[serde(default)]
    pub title: Constraint,
    #[serde(default)]
    pub keyword: Constraint,
}

impl QueryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classification(mut self, constraint: Constraint) -> Self {
        self.classification = constraint;
        self
    }

    pub fn title(mut self, constraint: Constraint) -> Self {
        self.title = constraint;
        self
    }

    pub fn keyword(mut self, constraint: Constraint) -> Self {
        self.keyword = constraint;
        self
    }

    /// Active constraints in classification, title, keyword order.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &Constraint)> {
        [
            (FilterField::Classification, &self.classification),
            (FilterField::Title, &self.title),
            (FilterField::Keyword, &self.keyword),
        ]
        .into_iter()
        .filter(|(_, c)| c.is_active())
    }

    pub fn has_required(&self) -> bool {
        self.active().any(|(_, c)| c.mode == FilterMode::Required)
    }
}

/// Per-candidate outcome of filter evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterWeight {
    /// Multiplier applied to the relevance score (`>= 1.0`).
    Included(f32),
    /// A required constraint failed; the candidate is dropped.
    Excluded,
}

impl FilterWeight {
    pub fn is_excluded(&self) -> bool {
        matches!(self, FilterWeight::Excluded)
    }

    pub fn weight(&self) -> Option<f32> {
        match self {
            FilterWeight::Included(w) => Some(*w),
            FilterWeight::Excluded => None,
        }
    }

    /// `relevance * weight`, or `None` for an excluded candidate.
    pub fn apply(&self, relevance: f32) -> Option<f32> {
        self.weight().map(|w| relevance * w)
    }
}
