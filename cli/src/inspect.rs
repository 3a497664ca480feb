use pantry_core::RecipeCatalog;

/// How many skipped rows to list before summarizing the rest
const MAX_SKIPPED_SHOWN: usize = 20;

pub fn inspect(catalog: &RecipeCatalog) {
    println!("Source:  {}", catalog.source());
    println!("Recipes: {}", catalog.len());
    println!("Skipped: {}", catalog.skipped().len());

    for row in catalog.skipped().iter().take(MAX_SKIPPED_SHOWN) {
        println!("  row {}: {}", row.index, row.reason);
    }
    if catalog.skipped().len() > MAX_SKIPPED_SHOWN {
        println!("  ... and {} more", catalog.skipped().len() - MAX_SKIPPED_SHOWN);
    }

    if let Some(first) = catalog.recipes().first() {
        println!("\nFirst recipe: {}", first.title);
        println!("  Ingredients: {}", first.ingredients.len());
        println!("  Directions:  {}", first.directions.len());
        println!("  Tags:        {}", first.tags.join(", "));
    }
}
