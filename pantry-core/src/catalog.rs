//! The loaded dataset, shared read-only across every operation.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::dataset::{load_dataset, Dataset, DatasetLocation, SkippedRow};
use crate::error::{LoadError, SearchError};
use crate::matcher::{match_recipes, MatchPolicy};
use crate::ranking::{paginate, rank};
use crate::types::{MatchResult, Page, RecipeRecord};

/// Minimum input length before title suggestions are offered.
const MIN_SUGGEST_CHARS: usize = 2;

/// Cheap-to-clone handle to an immutable set of recipes.
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: Arc<[RecipeRecord]>,
    skipped: Arc<[SkippedRow]>,
    source: String,
}

impl RecipeCatalog {
    pub fn new(dataset: Dataset, source: impl Into<String>) -> Self {
        Self {
            recipes: dataset.recipes.into(),
            skipped: dataset.skipped.into(),
            source: source.into(),
        }
    }

    /// Load from `location` and wrap the result.
    pub async fn load(location: &DatasetLocation, table: &str) -> Result<Self, LoadError> {
        let dataset = load_dataset(location, table).await?;
        Ok(Self::new(dataset, location.to_string()))
    }

    pub fn recipes(&self) -> &[RecipeRecord] {
        &self.recipes
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Match, rank and page in one step.
    pub fn search<S: AsRef<str>>(
        &self,
        query: &[S],
        policy: MatchPolicy,
        page: usize,
        page_size: usize,
    ) -> Result<Page<MatchResult<'_>>, SearchError> {
        let matches = match_recipes(query, &self.recipes, policy)?;
        paginate(rank(matches), page, page_size)
    }

    /// The featured recipe for `date`: rotates through the dataset by day of
    /// the month.
    pub fn recipe_of_the_day(&self, date: NaiveDate) -> Option<&RecipeRecord> {
        if self.recipes.is_empty() {
            return None;
        }
        self.recipes.get(date.day() as usize % self.recipes.len())
    }

    /// Titles containing `input`, in dataset order, at most `limit`.
    pub fn suggest_titles(&self, input: &str, limit: usize) -> Vec<&str> {
        let needle = input.trim().to_lowercase();
        if needle.chars().count() < MIN_SUGGEST_CHARS {
            return vec![];
        }
        self.recipes
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&needle))
            .map(|r| r.title.as_str())
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(titles: &[&str]) -> RecipeCatalog {
        let recipes = titles
            .iter()
            .map(|t| RecipeRecord {
                title: t.to_string(),
                ingredients: vec![],
                directions: vec![],
                link: None,
                source: None,
                site: None,
                tags: vec!["salt".to_string()],
            })
            .collect();
        RecipeCatalog::new(
            Dataset {
                recipes,
                skipped: vec![],
            },
            "test",
        )
    }

    #[test]
    fn test_recipe_of_the_day_rotates() {
        let catalog = catalog(&["A", "B", "C"]);
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(catalog.recipe_of_the_day(date).unwrap().title, "B");
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        assert_eq!(catalog.recipe_of_the_day(date).unwrap().title, "A");
    }

    #[test]
    fn test_recipe_of_the_day_empty() {
        let catalog = catalog(&[]);
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert!(catalog.recipe_of_the_day(date).is_none());
    }

    #[test]
    fn test_suggest_titles() {
        let catalog = catalog(&["Banana Bread", "Bread Pudding", "Tomato Soup"]);
        assert_eq!(
            catalog.suggest_titles("BREAD", 10),
            vec!["Banana Bread", "Bread Pudding"]
        );
        assert_eq!(catalog.suggest_titles("bread", 1), vec!["Banana Bread"]);
        assert!(catalog.suggest_titles("b", 10).is_empty());
    }

    #[test]
    fn test_search_pages() {
        let titles: Vec<String> = (0..25).map(|i| format!("Recipe {i}")).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
        let catalog = catalog(&titles);

        let page = catalog.search(&["salt"], MatchPolicy::RequireAll, 3, 10).unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 25);
        assert!(!page.has_more);
        assert_eq!(page.items[0].recipe.title, "Recipe 20");
    }
}
