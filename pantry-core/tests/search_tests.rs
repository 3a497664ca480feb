//! Searching the fixture dataset through the catalog.

use pantry_core::{
    match_recipes, paginate, rank, DatasetLocation, MatchPolicy, RecipeCatalog, SearchError,
    DEFAULT_TABLE,
};
use std::path::PathBuf;

async fn catalog() -> RecipeCatalog {
    let location = DatasetLocation::Path(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/recipes.csv"),
    );
    RecipeCatalog::load(&location, DEFAULT_TABLE).await.unwrap()
}

fn titles<'a>(results: &'a [pantry_core::MatchResult<'_>]) -> Vec<&'a str> {
    results.iter().map(|r| r.recipe.title.as_str()).collect()
}

#[tokio::test]
async fn test_require_all_keeps_dataset_order() {
    let catalog = catalog().await;
    let page = catalog
        .search(&["Butter"], MatchPolicy::RequireAll, 1, 10)
        .unwrap();

    assert_eq!(titles(&page.items), vec!["No-Bake Nut Cookies", "Creamy Corn"]);
    assert!(page.items.iter().all(|r| r.match_percentage == 100.0));
    assert_eq!(page.total, 2);
    assert!(!page.has_more);
}

#[tokio::test]
async fn test_require_all_needs_every_ingredient() {
    let catalog = catalog().await;
    let page = catalog
        .search(&["milk", "butter"], MatchPolicy::RequireAll, 1, 10)
        .unwrap();
    assert_eq!(titles(&page.items), vec!["No-Bake Nut Cookies"]);
}

#[tokio::test]
async fn test_partial_ranks_by_percentage() {
    let catalog = catalog().await;
    let page = catalog
        .search(&["milk", "butter"], MatchPolicy::Partial, 1, 10)
        .unwrap();

    assert_eq!(
        titles(&page.items),
        vec!["No-Bake Nut Cookies", "Creamy Corn", "Pancakes"]
    );
    assert_eq!(page.items[1].match_percentage, 50.0);
    assert_eq!(page.items[1].missing, vec!["milk"]);
    assert_eq!(page.items[2].missing, vec!["butter"]);
}

#[tokio::test]
async fn test_no_match_is_empty_not_error() {
    let catalog = catalog().await;
    let page = catalog
        .search(&["truffle"], MatchPolicy::RequireAll, 1, 10)
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_invalid_input() {
    let catalog = catalog().await;
    assert_eq!(
        catalog.search(&["  ", ""], MatchPolicy::RequireAll, 1, 10).unwrap_err(),
        SearchError::EmptyQuery
    );
    assert_eq!(
        catalog.search(&["salt"], MatchPolicy::RequireAll, 0, 10).unwrap_err(),
        SearchError::InvalidPage
    );
}

#[tokio::test]
async fn test_pages_cover_result_set_exactly_once() {
    let catalog = catalog().await;
    let all = rank(match_recipes(&["e"], catalog.recipes(), MatchPolicy::Partial).unwrap());
    let expected = titles(&all);

    for page_size in 1..=5 {
        let mut seen = Vec::new();
        let mut page_no = 1;
        loop {
            let page = paginate(all.clone(), page_no, page_size).unwrap();
            assert!(page.items.len() <= page_size);
            seen.extend(page.items.iter().map(|r| r.recipe.title.as_str()));
            if !page.has_more {
                break;
            }
            page_no += 1;
        }
        assert_eq!(seen, expected, "page_size {page_size}");
    }
}
