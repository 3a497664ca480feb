use pantry_core::{build_shopping_list, resolve_plan, MealPlan, RecipeCatalog, Weekday};

/// Parse a `Day=Recipe` argument.
pub fn parse_day_entry(s: &str) -> Result<(Weekday, String), String> {
    let (day, recipe) = s
        .split_once('=')
        .ok_or_else(|| format!("expected DAY=RECIPE, got {:?}", s))?;
    let day: Weekday = day.parse().map_err(|e| format!("{}", e))?;
    let recipe = recipe.trim();
    if recipe.is_empty() {
        return Err(format!("no recipe given for {}", day));
    }
    Ok((day, recipe.to_string()))
}

pub fn plan(catalog: &RecipeCatalog, days: Vec<(Weekday, String)>) {
    let mut plan = MealPlan::new();
    for (day, recipe) in days {
        plan.set(day, recipe);
    }

    println!("Meal plan:");
    for resolution in resolve_plan(&plan, catalog.recipes()) {
        match resolution.recipe {
            Some(recipe) => println!("  {:<9} {}", resolution.day, recipe.title),
            None => println!(
                "  {:<9} {} (no matching recipe)",
                resolution.day, resolution.requested
            ),
        }
    }

    let list = build_shopping_list(&plan, catalog.recipes());
    if list.is_empty() {
        println!("\nNothing to buy");
        return;
    }

    println!("\nShopping list ({} items):", list.len());
    for (ingredient, days) in list.iter() {
        let days: Vec<&str> = days.iter().map(Weekday::as_str).collect();
        println!("  {} ({})", ingredient, days.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_entry() {
        assert_eq!(
            parse_day_entry("monday= Pancakes ").unwrap(),
            (Weekday::Monday, "Pancakes".to_string())
        );
        assert_eq!(
            parse_day_entry("Friday=Fish=Chips").unwrap(),
            (Weekday::Friday, "Fish=Chips".to_string())
        );
    }

    #[test]
    fn test_parse_day_entry_errors() {
        assert!(parse_day_entry("Pancakes").is_err());
        assert!(parse_day_entry("Someday=Pancakes").is_err());
        assert!(parse_day_entry("Monday=  ").is_err());
    }
}
