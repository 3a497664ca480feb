use anyhow::Result;
use pantry_core::{MatchPolicy, RecipeCatalog};

pub fn search(
    catalog: &RecipeCatalog,
    ingredients: &[String],
    page: usize,
    page_size: usize,
    partial: bool,
    json: bool,
) -> Result<()> {
    let policy = if partial {
        MatchPolicy::Partial
    } else {
        MatchPolicy::RequireAll
    };
    let results = catalog.search(ingredients, policy, page, page_size)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.total == 0 {
        println!("No recipes found with the specified ingredients");
        return Ok(());
    }

    let first = (page - 1).saturating_mul(page_size) + 1;
    for (i, result) in results.items.iter().enumerate() {
        println!(
            "{:>3}. {} ({:.0}%)",
            first + i,
            result.recipe.title,
            result.match_percentage
        );
        if !result.missing.is_empty() {
            println!("     missing: {}", result.missing.join(", "));
        }
        if let Some(link) = &result.recipe.link {
            println!("     {}", link);
        }
    }

    println!(
        "\nPage {} ({} of {} recipes shown){}",
        results.page,
        results.items.len(),
        results.total,
        if results.has_more {
            format!(", next: --page {}", results.page + 1)
        } else {
            String::new()
        }
    );

    Ok(())
}
