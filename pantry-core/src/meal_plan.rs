//! Weekly meal plans and the shopping lists derived from them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::types::RecipeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Planning order
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlanError::UnknownDay(s.to_string()))
    }
}

/// A recipe name for each day of the week. An empty name means the day has
/// not been chosen yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealPlan {
    meals: [String; 7],
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a plan from day-name keys (case-insensitive). Any unknown key
    /// fails the whole plan.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut plan = Self::new();
        for (day, recipe) in entries {
            let day: Weekday = day.as_ref().parse()?;
            plan.set(day, recipe);
        }
        Ok(plan)
    }

    pub fn get(&self, day: Weekday) -> &str {
        &self.meals[day.index()]
    }

    pub fn set(&mut self, day: Weekday, recipe: impl Into<String>) {
        self.meals[day.index()] = recipe.into().trim().to_string();
    }

    /// Days in planning order, with their (possibly empty) recipe names.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &str)> {
        Weekday::ALL
            .into_iter()
            .map(move |day| (day, self.meals[day.index()].as_str()))
    }

    /// First day without a recipe, in planning order.
    pub fn first_unplanned(&self) -> Option<Weekday> {
        self.iter().find(|(_, meal)| meal.is_empty()).map(|(day, _)| day)
    }

    pub fn is_complete(&self) -> bool {
        self.first_unplanned().is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.iter().all(String::is_empty)
    }
}

impl Serialize for MealPlan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(7))?;
        for (day, meal) in self.iter() {
            map.serialize_entry(day.as_str(), meal)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MealPlan {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, String>::deserialize(deserializer)?;
        MealPlan::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

/// Ingredient tag → the days it is needed, in planning order, without
/// repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList {
    items: BTreeMap<String, Vec<Weekday>>,
}

impl ShoppingList {
    /// Record that `ingredient` is needed on `day`. Repeats are ignored.
    pub fn add(&mut self, ingredient: &str, day: Weekday) {
        let days = self.items.entry(ingredient.to_string()).or_default();
        if !days.contains(&day) {
            days.push(day);
        }
    }

    pub fn days_for(&self, ingredient: &str) -> Option<&[Weekday]> {
        self.items.get(ingredient).map(Vec::as_slice)
    }

    /// Ingredients in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Weekday])> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// First recipe, in dataset order, whose title contains `name`
/// case-insensitively.
pub fn resolve_recipe<'a>(name: &str, recipes: &'a [RecipeRecord]) -> Option<&'a RecipeRecord> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    recipes
        .iter()
        .find(|recipe| recipe.title.to_lowercase().contains(&needle))
}

/// How one day of a plan resolved against the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayResolution<'a> {
    pub day: Weekday,
    pub requested: String,
    /// `None` when the name matched no title
    pub recipe: Option<&'a RecipeRecord>,
}

/// Resolve every planned day. Days without a recipe name are left out.
pub fn resolve_plan<'a>(plan: &MealPlan, recipes: &'a [RecipeRecord]) -> Vec<DayResolution<'a>> {
    plan.iter()
        .filter(|(_, name)| !name.is_empty())
        .map(|(day, name)| DayResolution {
            day,
            requested: name.to_string(),
            recipe: resolve_recipe(name, recipes),
        })
        .collect()
}

/// Aggregate the tags of every planned recipe into a fresh shopping list.
///
/// Days whose recipe name does not resolve contribute nothing.
pub fn build_shopping_list(plan: &MealPlan, recipes: &[RecipeRecord]) -> ShoppingList {
    let mut list = ShoppingList::default();

    for resolution in resolve_plan(plan, recipes) {
        let Some(recipe) = resolution.recipe else {
            tracing::debug!(
                day = %resolution.day,
                recipe = %resolution.requested,
                "No recipe matches planned meal, skipping"
            );
            continue;
        };
        for tag in &recipe.tags {
            list.add(tag, resolution.day);
        }
    }

    list
}

/// A meal plan being filled in one day at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannerSession {
    plan: MealPlan,
    /// Next day to fill, `None` once every day has been entered
    current_day: Option<Weekday>,
}

impl PlannerSession {
    pub fn new() -> Self {
        Self {
            plan: MealPlan::new(),
            current_day: Some(Weekday::Monday),
        }
    }

    pub fn plan(&self) -> &MealPlan {
        &self.plan
    }

    pub fn current_day(&self) -> Option<Weekday> {
        self.current_day
    }

    pub fn is_complete(&self) -> bool {
        self.current_day.is_none()
    }

    /// Enter the recipe for the current day and move on to the next one.
    /// Returns the day that was filled.
    pub fn submit(&mut self, recipe: &str) -> Result<Weekday, PlanError> {
        if recipe.trim().is_empty() {
            return Err(PlanError::EmptyRecipeName);
        }
        let day = self.current_day.ok_or(PlanError::PlanComplete)?;
        self.plan.set(day, recipe);
        self.current_day = Weekday::ALL.get(day.index() + 1).copied();
        Ok(day)
    }

    /// Replace one day's recipe once the whole week has been entered.
    pub fn change_day(&mut self, day: Weekday, recipe: &str) -> Result<(), PlanError> {
        if !self.is_complete() {
            return Err(PlanError::PlanIncomplete);
        }
        if recipe.trim().is_empty() {
            return Err(PlanError::EmptyRecipeName);
        }
        self.plan.set(day, recipe);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn shopping_list(&self, recipes: &[RecipeRecord]) -> ShoppingList {
        build_shopping_list(&self.plan, recipes)
    }
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str, tags: &[&str]) -> RecipeRecord {
        RecipeRecord {
            title: title.to_string(),
            ingredients: vec![],
            directions: vec![],
            link: None,
            source: None,
            site: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_weekday_parse() {
        assert_eq!("monday".parse::<Weekday>(), Ok(Weekday::Monday));
        assert_eq!(" SUNDAY ".parse::<Weekday>(), Ok(Weekday::Sunday));
        assert_eq!(
            "Funday".parse::<Weekday>(),
            Err(PlanError::UnknownDay("Funday".to_string()))
        );
    }

    #[test]
    fn test_from_entries_rejects_unknown_keys() {
        let result = MealPlan::from_entries([("Monday", "Pancakes"), ("Caturday", "Tuna")]);
        assert_eq!(result, Err(PlanError::UnknownDay("Caturday".to_string())));
    }

    #[test]
    fn test_plan_serde() {
        let plan: MealPlan =
            serde_json::from_str(r#"{"Monday": "Pancakes", "friday": " Fish "}"#).unwrap();
        assert_eq!(plan.get(Weekday::Monday), "Pancakes");
        assert_eq!(plan.get(Weekday::Friday), "Fish");
        assert_eq!(plan.get(Weekday::Tuesday), "");

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["Monday"], "Pancakes");
        assert_eq!(json["Sunday"], "");

        assert!(serde_json::from_str::<MealPlan>(r#"{"Someday": "x"}"#).is_err());
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let recipes = vec![
            recipe("Blueberry Pancakes", &["blueberries"]),
            recipe("Pancakes", &["flour"]),
        ];
        let found = resolve_recipe("pancakes", &recipes).unwrap();
        assert_eq!(found.title, "Blueberry Pancakes");
        assert!(resolve_recipe("waffles", &recipes).is_none());
        assert!(resolve_recipe("  ", &recipes).is_none());
    }

    #[test]
    fn test_shopping_list_example() {
        let recipes = vec![recipe("Pancakes", &["egg", "flour", "milk"])];
        let plan = MealPlan::from_entries([("Monday", "Pancakes"), ("Tuesday", "")]).unwrap();

        let list = build_shopping_list(&plan, &recipes);
        assert_eq!(list.len(), 3);
        for tag in ["egg", "flour", "milk"] {
            assert_eq!(list.days_for(tag), Some(&[Weekday::Monday][..]));
        }
    }

    #[test]
    fn test_shopping_list_dedupes_days() {
        let recipes = vec![recipe("Egg Fried Rice", &["egg", "rice", "egg"])];
        let mut plan = MealPlan::new();
        plan.set(Weekday::Wednesday, "fried rice");
        plan.set(Weekday::Monday, "egg fried");

        let list = build_shopping_list(&plan, &recipes);
        assert_eq!(
            list.days_for("egg"),
            Some(&[Weekday::Monday, Weekday::Wednesday][..])
        );
    }

    #[test]
    fn test_unresolved_days_are_skipped() {
        let recipes = vec![recipe("Tacos", &["tortilla"])];
        let plan = MealPlan::from_entries([("Monday", "Lasagna"), ("Tuesday", "Tacos")]).unwrap();

        let list = build_shopping_list(&plan, &recipes);
        assert_eq!(list.days_for("tortilla"), Some(&[Weekday::Tuesday][..]));
        assert_eq!(list.len(), 1);

        let resolutions = resolve_plan(&plan, &recipes);
        assert_eq!(resolutions.len(), 2);
        assert!(resolutions[0].recipe.is_none());
        assert_eq!(resolutions[1].recipe.map(|r| r.title.as_str()), Some("Tacos"));
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = PlannerSession::new();
        assert_eq!(session.current_day(), Some(Weekday::Monday));
        assert_eq!(session.submit("  "), Err(PlanError::EmptyRecipeName));
        assert_eq!(
            session.change_day(Weekday::Monday, "Soup"),
            Err(PlanError::PlanIncomplete)
        );

        for (i, day) in Weekday::ALL.into_iter().enumerate() {
            assert_eq!(session.submit(&format!("Meal {i}")), Ok(day));
        }
        assert!(session.is_complete());
        assert!(session.plan().is_complete());
        assert_eq!(session.submit("Extra"), Err(PlanError::PlanComplete));
        assert_eq!(session.current_day(), None);

        session.change_day(Weekday::Thursday, "Soup").unwrap();
        assert_eq!(session.plan().get(Weekday::Thursday), "Soup");

        session.reset();
        assert!(session.plan().is_empty());
        assert_eq!(session.current_day(), Some(Weekday::Monday));
    }
}
