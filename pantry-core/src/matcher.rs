//! Ingredient matching.
//!
//! A query ingredient is "found" in a recipe when any of the recipe's tags
//! contains it as a case-insensitive substring ("egg" finds "eggs" and
//! "egg yolk").

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{MatchResult, RecipeRecord};

/// Which recipes make it into the result set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Every query ingredient must be found. Match percentage is then 100
    /// for every result.
    #[default]
    RequireAll,
    /// At least one query ingredient must be found; results carry the
    /// fraction found and the ingredients that were missing.
    Partial,
}

/// Trim and lower-case the query, dropping blank entries.
pub fn normalize_query<S: AsRef<str>>(query: &[S]) -> Result<Vec<String>, SearchError> {
    let terms: Vec<String> = query
        .iter()
        .map(|q| q.as_ref().trim().to_lowercase())
        .filter(|q| !q.is_empty())
        .collect();
    if terms.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(terms)
}

/// Find the recipes that satisfy `query` under `policy`, in dataset order.
///
/// An empty `Ok` means nothing matched; errors are reserved for invalid input.
pub fn match_recipes<'a, S: AsRef<str>>(
    query: &[S],
    recipes: &'a [RecipeRecord],
    policy: MatchPolicy,
) -> Result<Vec<MatchResult<'a>>, SearchError> {
    let terms = normalize_query(query)?;

    let results: Vec<MatchResult<'a>> = recipes
        .iter()
        .filter_map(|recipe| score_recipe(&terms, recipe, policy))
        .collect();

    tracing::debug!(
        query = ?terms,
        ?policy,
        matches = results.len(),
        "Matched recipes"
    );
    Ok(results)
}

/// Score one recipe against already-normalized terms.
fn score_recipe<'a>(
    terms: &[String],
    recipe: &'a RecipeRecord,
    policy: MatchPolicy,
) -> Option<MatchResult<'a>> {
    let lowered: Vec<String> = recipe.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut found = 0usize;
    let mut missing = Vec::new();
    for term in terms {
        if lowered.iter().any(|tag| tag.contains(term.as_str())) {
            found += 1;
        } else if policy == MatchPolicy::RequireAll {
            return None;
        } else {
            missing.push(term.clone());
        }
    }

    if found == 0 {
        return None;
    }

    Some(MatchResult {
        recipe,
        match_percentage: found as f64 / terms.len() as f64 * 100.0,
        missing,
    })
}
