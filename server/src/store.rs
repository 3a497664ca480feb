//! User-submitted recipes, kept in a single JSON file.
//!
//! The whole file is read on every operation and rewritten on every change.
//! A missing file is an empty store. Changes are written to a sibling temp
//! file and renamed over the store, so a reader never sees a partial file.
//! Writers hold the write half of a lock for the whole read-modify-write
//! cycle; readers take the read half.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pantry_core::ingredient_parser::{clean_tag, derive_tags};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Rating must be between 1 and 5")]
    InvalidRating(i64),

    #[error("Recipe not found: {0}")]
    NotFound(Uuid),

    #[error("Failed to access recipe store: {0}")]
    Io(#[from] io::Error),

    #[error("Recipe store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRecipe {
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Normalized ingredient names
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// 0 until rated
    pub rating: u8,
    pub review: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewUserRecipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub directions: Vec<String>,
    pub link: Option<String>,
    pub site: Option<String>,
    /// Derived from the ingredients when left empty
    #[serde(default)]
    pub tags: Vec<String>,
}

pub struct RecipeStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl RecipeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Result<Vec<UserRecipe>, StoreError> {
        let _guard = self.lock.read().await;
        self.read_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<UserRecipe, StoreError> {
        let _guard = self.lock.read().await;
        self.read_all()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn create(&self, new: NewUserRecipe) -> Result<UserRecipe, StoreError> {
        let title = new.title.trim();
        if title.is_empty() || new.ingredients.is_empty() || new.directions.is_empty() {
            return Err(StoreError::MissingFields);
        }

        let mut tags: Vec<String> = Vec::with_capacity(new.tags.len());
        for tag in new.tags.iter().filter_map(|t| clean_tag(t)) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        if tags.is_empty() {
            tags = derive_tags(&new.ingredients);
        }

        let recipe = UserRecipe {
            id: Uuid::new_v4(),
            title: title.to_string(),
            link: non_blank(new.link),
            site: non_blank(new.site),
            tags,
            ingredients: new.ingredients,
            directions: new.directions,
            created_at: Utc::now(),
            rating: 0,
            review: String::new(),
        };

        let _guard = self.lock.write().await;
        let mut recipes = self.read_all().await?;
        recipes.push(recipe.clone());
        self.write_all(&recipes).await?;

        tracing::info!(id = %recipe.id, title = %recipe.title, "Saved user recipe");
        Ok(recipe)
    }

    pub async fn rate(
        &self,
        id: Uuid,
        rating: i64,
        review: Option<String>,
    ) -> Result<UserRecipe, StoreError> {
        let rating = u8::try_from(rating)
            .ok()
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(&i64::from(*r)))
            .ok_or(StoreError::InvalidRating(rating))?;

        let _guard = self.lock.write().await;
        let mut recipes = self.read_all().await?;
        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        recipe.rating = rating;
        recipe.review = review.unwrap_or_default();
        let updated = recipe.clone();
        self.write_all(&recipes).await?;

        Ok(updated)
    }

    async fn read_all(&self) -> Result<Vec<UserRecipe>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(vec![]),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(vec![]),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, recipes: &[UserRecipe]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(recipes)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> RecipeStore {
        RecipeStore::new(dir.path().join("data").join("recipes.json"))
    }

    fn new_recipe(title: &str) -> NewUserRecipe {
        NewUserRecipe {
            title: title.to_string(),
            ingredients: vec!["2 large eggs".to_string(), "1 pinch salt".to_string()],
            directions: vec!["Boil.".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let created = store.create(new_recipe("Boiled Eggs")).await.unwrap();
        assert_eq!(created.rating, 0);
        assert_eq!(created.review, "");
        assert_eq!(created.tags, vec!["eggs", "salt"]);
        assert_eq!(created.link, None);

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(store.path().exists());

        // A second handle on the same file sees the same data
        let reopened = RecipeStore::new(store.path());
        assert_eq!(reopened.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_create_keeps_given_tags() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let mut new = new_recipe("Boiled Eggs");
        new.tags = vec![" Eggs".to_string(), "eggs".to_string(), "".to_string()];
        new.link = Some("  ".to_string());
        new.site = Some("example.com".to_string());
        let created = store.create(new).await.unwrap();

        assert_eq!(created.tags, vec!["eggs"]);
        assert_eq!(created.link, None);
        assert_eq!(created.site.as_deref(), Some("example.com"));
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let mut missing_directions = new_recipe("Toast");
        missing_directions.directions.clear();
        assert!(matches!(
            store.create(missing_directions).await,
            Err(StoreError::MissingFields)
        ));
        assert!(matches!(
            store.create(new_recipe("   ")).await,
            Err(StoreError::MissingFields)
        ));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rate() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let created = store.create(new_recipe("Boiled Eggs")).await.unwrap();

        let rated = store
            .rate(created.id, 4, Some("Nice".to_string()))
            .await
            .unwrap();
        assert_eq!(rated.rating, 4);
        assert_eq!(rated.review, "Nice");
        assert_eq!(store.get(created.id).await.unwrap().rating, 4);

        assert!(matches!(
            store.rate(created.id, 6, None).await,
            Err(StoreError::InvalidRating(6))
        ));
        assert!(matches!(
            store.rate(created.id, 0, None).await,
            Err(StoreError::InvalidRating(0))
        ));
        assert!(matches!(
            store.rate(created.id, 300, None).await,
            Err(StoreError::InvalidRating(300))
        ));
        assert!(matches!(
            store.rate(created.id, -1, None).await,
            Err(StoreError::InvalidRating(-1))
        ));
        assert_eq!(store.get(created.id).await.unwrap().rating, 4);
        assert!(matches!(
            store.rate(Uuid::new_v4(), 3, None).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_reads_during_writes_see_committed_recipes() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store(&dir));
        for i in 0..20 {
            store.create(new_recipe(&format!("Recipe {i}"))).await.unwrap();
        }

        let writer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for i in 0..100 {
                    store.create(new_recipe(&format!("Extra {i}"))).await.unwrap();
                }
            })
        };

        let mut last_seen = 20;
        while !writer.is_finished() {
            let count = store.list().await.unwrap().len();
            assert!(count >= last_seen, "read {count} recipes after seeing {last_seen}");
            last_seen = count;
        }
        writer.await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 120);
        // No temp file left behind
        let mut entries = tokio::fs::read_dir(store.path().parent().unwrap())
            .await
            .unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["recipes.json"]);
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        tokio::fs::create_dir_all(store.path().parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(store.path(), b"{not json").await.unwrap();
        assert!(matches!(store.list().await, Err(StoreError::Corrupt(_))));
    }
}
