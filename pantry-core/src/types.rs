use serde::{Deserialize, Serialize};

/// A recipe as held in memory after load. Every list field has already been
/// normalized; nothing downstream sees the raw cell shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    /// Free-text ingredient lines, as shown to users.
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Lower-case, unit-free ingredient names used for matching and
    /// shopping-list keys.
    pub tags: Vec<String>,
}

/// A recipe that satisfied an ingredient query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    #[serde(flatten)]
    pub recipe: &'a RecipeRecord,
    /// Found query ingredients / total query ingredients, times 100.
    pub match_percentage: f64,
    /// Query ingredients with no matching tag. Only populated under
    /// `MatchPolicy::Partial`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

/// One page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed
    pub page: usize,
    pub page_size: usize,
    /// Size of the full result set
    pub total: usize,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
