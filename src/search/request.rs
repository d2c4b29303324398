use serde::{Deserialize, Serialize};

use crate::filter::{Constraint, FilterMode, QueryFilters};

/// Caller input: the query text and the six filter fields.
///
/// Field names match the search form; all fields default to empty / ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub classification_mode: FilterMode,

    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub keyword_mode: FilterMode,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_mode: FilterMode,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn classification(mut self, value: impl Into<String>, mode: FilterMode) -> Self {
        self.classification = value.into();
        self.classification_mode = mode;
        self
    }

    pub fn keyword(mut self, value: impl Into<String>, mode: FilterMode) -> Self {
        self.keyword = value.into();
        self.keyword_mode = mode;
        self
    }

    pub fn title(mut self, value: impl Into<String>, mode: FilterMode) -> Self {
        self.title = value.into();
        self.title_mode = mode;
        self
    }

    /// The query with surrounding whitespace removed.
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed_query().is_empty()
    }

    pub fn filters(&self) -> QueryFilters {
        QueryFilters {
            classification: Constraint::new(&self.classification, self.classification_mode),
            title: Constraint::new(&self.title, self.title_mode),
            keyword: Constraint::new(&self.keyword, self.keyword_mode),
        }
    }
}
