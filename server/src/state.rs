use dashmap::DashMap;
use pantry_core::{PlannerSession, RecipeCatalog};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::store::RecipeStore;

/// Everything handlers share. The catalog is immutable after startup.
pub struct AppContext {
    pub config: ServerConfig,
    pub catalog: RecipeCatalog,
    pub store: RecipeStore,
    /// In-progress meal planner sessions
    pub planners: DashMap<Uuid, PlannerSession>,
}

impl AppContext {
    pub fn new(config: ServerConfig, catalog: RecipeCatalog) -> Self {
        let store = RecipeStore::new(config.recipes_file.clone());
        Self {
            config,
            catalog,
            store,
            planners: DashMap::new(),
        }
    }
}
