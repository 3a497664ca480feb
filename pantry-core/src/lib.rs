pub mod catalog;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod ingredient_parser;
pub mod matcher;
pub mod meal_plan;
pub mod ranking;
pub mod types;

pub use catalog::RecipeCatalog;
pub use dataset::{
    load_dataset, parse_dataset, Dataset, DatasetFormat, DatasetLocation, SkippedRow,
    DEFAULT_TABLE,
};
pub use error::{FetchError, LoadError, PlanError, RowError, SearchError};
pub use matcher::{match_recipes, MatchPolicy};
pub use meal_plan::{
    build_shopping_list, resolve_plan, resolve_recipe, DayResolution, MealPlan, PlannerSession,
    ShoppingList, Weekday,
};
pub use ranking::{paginate, rank};
pub use types::{MatchResult, Page, RecipeRecord};
