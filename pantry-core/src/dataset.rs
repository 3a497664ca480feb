//! Loading the recipe dataset.
//!
//! The dataset is a spreadsheet: an Excel workbook whose `recipes_data`
//! sheet holds the recipes, or a CSV/JSON export of it. One row per recipe
//! with `title`,
//! `ingredients`, `directions`, `link`, `source`, `site` and the normalized
//! ingredient tag column `NER`. List columns arrive either as native lists
//! (JSON exports) or as JSON-encoded text (CSV cells, some JSON exports).
//! Every row is normalized into a [`RecipeRecord`] here; rows that cannot be
//! normalized are skipped and reported, never fatal.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader};
use serde_json::{Map, Number, Value};

use crate::error::{FetchError, LoadError, RowError};
use crate::fetch::{fetch_bytes, is_http_url};
use crate::ingredient_parser::{clean_tag, derive_tags};
use crate::types::RecipeRecord;

/// Sheet name used by the recipe workbook.
pub const DEFAULT_TABLE: &str = "recipes_data";

const TITLE_COLUMN: &str = "title";
const TAG_COLUMNS: &[&str] = &["NER", "ner", "tags"];

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Where a dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLocation {
    Path(PathBuf),
    Url(String),
}

impl DatasetLocation {
    /// http(s) references become URLs, anything else a filesystem path.
    pub fn parse(s: &str) -> Self {
        if is_http_url(s) {
            DatasetLocation::Url(s.to_string())
        } else {
            DatasetLocation::Path(PathBuf::from(s))
        }
    }

    fn extension(&self) -> Option<String> {
        let path = match self {
            DatasetLocation::Path(p) => p.as_path(),
            // Ignore any query string
            DatasetLocation::Url(u) => Path::new(u.split(['?', '#']).next().unwrap_or(u)),
        };
        path.extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }
}

impl fmt::Display for DatasetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetLocation::Path(p) => write!(f, "{}", p.display()),
            DatasetLocation::Url(u) => f.write_str(u),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Json,
    /// Excel workbook (xlsx, xlsm, xls, ods), read sheet by sheet.
    Workbook,
}

impl DatasetFormat {
    pub fn from_location(location: &DatasetLocation) -> Option<Self> {
        match location.extension()?.as_str() {
            "csv" => Some(DatasetFormat::Csv),
            "json" => Some(DatasetFormat::Json),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(DatasetFormat::Workbook),
            _ => None,
        }
    }

    /// Guess from content. Workbooks are zip (xlsx) or OLE (xls) containers;
    /// JSON documents start with `[` or `{`.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            return DatasetFormat::Workbook;
        }
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'[') | Some(b'{') => DatasetFormat::Json,
            _ => DatasetFormat::Csv,
        }
    }
}

/// A row dropped during load.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 0-based position among the table's data rows
    pub index: usize,
    pub reason: RowError,
}

/// Result of a successful load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub recipes: Vec<RecipeRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Read and normalize the dataset at `location`.
pub async fn load_dataset(location: &DatasetLocation, table: &str) -> Result<Dataset, LoadError> {
    let bytes = match location {
        DatasetLocation::Path(path) => match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(location.to_string()))
            }
            Err(e) => return Err(e.into()),
        },
        DatasetLocation::Url(url) => match fetch_bytes(url).await {
            Ok(bytes) => bytes,
            Err(FetchError::Status { status: 404, .. }) => {
                return Err(LoadError::NotFound(location.to_string()))
            }
            Err(e) => return Err(e.into()),
        },
    };

    let format = DatasetFormat::from_location(location).unwrap_or_else(|| DatasetFormat::sniff(&bytes));
    let dataset = parse_dataset(&bytes, format, table)?;

    tracing::info!(
        location = %location,
        recipes = dataset.recipes.len(),
        skipped = dataset.skipped.len(),
        "Loaded recipe dataset"
    );
    Ok(dataset)
}

/// Normalize an in-memory dataset document.
pub fn parse_dataset(bytes: &[u8], format: DatasetFormat, table: &str) -> Result<Dataset, LoadError> {
    let rows = match format {
        DatasetFormat::Json => json_rows(bytes, table)?,
        DatasetFormat::Csv => csv_rows(bytes)?,
        DatasetFormat::Workbook => workbook_rows(bytes, table)?,
    };

    let mut dataset = Dataset::default();
    for (index, row) in rows.into_iter().enumerate() {
        match row.and_then(|row| normalize_row(&row)) {
            Ok(recipe) => dataset.recipes.push(recipe),
            Err(reason) => {
                tracing::warn!(row = index, error = %reason, "Skipping dataset row");
                dataset.skipped.push(SkippedRow { index, reason });
            }
        }
    }
    Ok(dataset)
}

type RawRow = Result<Map<String, Value>, RowError>;

fn json_rows(bytes: &[u8], table: &str) -> Result<Vec<RawRow>, LoadError> {
    let document: Value = serde_json::from_slice(bytes)?;

    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut tables) => match tables.remove(table) {
            Some(rows) => serde_json::from_value::<Vec<Value>>(rows)?,
            None => {
                return Err(LoadError::TableNotFound {
                    table: table.to_string(),
                    available: tables.keys().cloned().collect(),
                })
            }
        },
        // Scalars: let serde report the type mismatch
        other => serde_json::from_value::<Vec<Value>>(other)?,
    };

    Ok(rows
        .into_iter()
        .map(|row| match row {
            Value::Object(map) => Ok(map),
            _ => Err(RowError::NotAnObject),
        })
        .collect())
}

fn csv_rows(bytes: &[u8]) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    if !headers.iter().any(|h| h == TITLE_COLUMN) {
        return Err(LoadError::MissingColumn(TITLE_COLUMN.to_string()));
    }

    Ok(reader
        .records()
        .map(|record| match record {
            Ok(record) => Ok(headers
                .iter()
                .zip(record.iter())
                .map(|(h, cell)| (h.clone(), Value::String(cell.to_string())))
                .collect()),
            Err(e) => Err(RowError::Unreadable(e.to_string())),
        })
        .collect())
}

fn workbook_rows(bytes: &[u8], table: &str) -> Result<Vec<RawRow>, LoadError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheets = workbook.sheet_names();
    if !sheets.iter().any(|name| name == table) {
        return Err(LoadError::TableNotFound {
            table: table.to_string(),
            available: sheets,
        });
    }

    let range = workbook.worksheet_range(table)?;
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|cell| cell.to_string().trim().to_string()).collect())
        .unwrap_or_default();
    if !headers.iter().any(|h| h == TITLE_COLUMN) {
        return Err(LoadError::MissingColumn(TITLE_COLUMN.to_string()));
    }

    Ok(rows
        // Blank rows inside the used range are not recipes
        .filter(|cells| cells.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|cells| {
            Ok(headers
                .iter()
                .zip(cells)
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, cell)| (h.clone(), cell_value(cell)))
                .collect())
        })
        .collect())
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Value::Number((*f as i64).into()),
        Data::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        // Dates, durations and cell errors keep their display text
        other => Value::String(other.to_string()),
    }
}

fn normalize_row(row: &Map<String, Value>) -> Result<RecipeRecord, RowError> {
    let title = text_field(row, &[TITLE_COLUMN]).ok_or(RowError::MissingTitle)?;
    let ingredients = list_field(row, "ingredients", &["ingredients"], false)?;
    let directions = list_field(row, "directions", &["directions"], true)?;
    let raw_tags = list_field(row, "NER", TAG_COLUMNS, false)?;

    let mut tags: Vec<String> = Vec::with_capacity(raw_tags.len());
    for tag in raw_tags.iter().filter_map(|t| clean_tag(t)) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    if tags.is_empty() {
        tags = derive_tags(&ingredients);
    }

    Ok(RecipeRecord {
        title,
        ingredients,
        directions,
        link: text_field(row, &["link"]),
        source: text_field(row, &["source"]),
        site: text_field(row, &["site"]),
        tags,
    })
}

fn lookup<'a>(row: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| row.get(*name))
        .find(|v| !v.is_null())
}

fn text_field(row: &Map<String, Value>, names: &[&str]) -> Option<String> {
    let text = match lookup(row, names)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Read a list column stored as a native list or JSON-encoded text.
/// With `plain_text_ok`, non-JSON text is taken as a single entry.
fn list_field(
    row: &Map<String, Value>,
    field: &'static str,
    names: &[&str],
    plain_text_ok: bool,
) -> Result<Vec<String>, RowError> {
    let malformed = |reason: String| RowError::MalformedField { field, reason };

    let items: Vec<Value> = match lookup(row, names) {
        None => return Ok(vec![]),
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(vec![]);
            }
            if text.starts_with('[') {
                serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?
            } else if plain_text_ok {
                return Ok(vec![text.to_string()]);
            } else {
                return Err(malformed("expected a list".to_string()));
            }
        }
        Some(_) => return Err(malformed("expected a list".to_string())),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| Ok(s.to_string()))
            }
            Value::Number(n) => Some(Ok(n.to_string())),
            Value::Null => None,
            other => Some(Err(malformed(format!("unexpected list entry {other}")))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_json(doc: &str) -> Dataset {
        parse_dataset(doc.as_bytes(), DatasetFormat::Json, DEFAULT_TABLE).unwrap()
    }

    #[test]
    fn test_location_parse() {
        assert_eq!(
            DatasetLocation::parse("https://example.com/r.csv"),
            DatasetLocation::Url("https://example.com/r.csv".to_string())
        );
        assert_eq!(
            DatasetLocation::parse("data/r.csv"),
            DatasetLocation::Path(PathBuf::from("data/r.csv"))
        );
    }

    #[test]
    fn test_format_from_extension() {
        let csv = DatasetLocation::parse("data/recipes.CSV");
        let json = DatasetLocation::parse("https://example.com/recipes.json?v=2");
        let other = DatasetLocation::parse("data/recipes");
        assert_eq!(DatasetFormat::from_location(&csv), Some(DatasetFormat::Csv));
        assert_eq!(DatasetFormat::from_location(&json), Some(DatasetFormat::Json));
        assert_eq!(DatasetFormat::from_location(&other), None);
        let workbook = DatasetLocation::parse("data/recipes_data_processing.xlsx");
        assert_eq!(
            DatasetFormat::from_location(&workbook),
            Some(DatasetFormat::Workbook)
        );
    }

    #[test]
    fn test_sniff() {
        assert_eq!(DatasetFormat::sniff(b"  [{\"title\": \"x\"}]"), DatasetFormat::Json);
        assert_eq!(DatasetFormat::sniff(b"{}"), DatasetFormat::Json);
        assert_eq!(DatasetFormat::sniff(b"title,ingredients\n"), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::sniff(b"PK\x03\x04\x14\x00"), DatasetFormat::Workbook);
    }

    #[test]
    fn test_cell_value() {
        assert_eq!(cell_value(&Data::Float(3.0)), Value::from(3));
        assert_eq!(cell_value(&Data::Float(1.5)), Value::from(1.5));
        assert_eq!(cell_value(&Data::Empty), Value::Null);
        assert_eq!(cell_value(&Data::String("Soup".into())), Value::from("Soup"));
    }

    #[test]
    fn test_invalid_workbook() {
        let err = parse_dataset(b"PK\x03\x04 not a zip", DatasetFormat::Workbook, DEFAULT_TABLE)
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidWorkbook(_)));
    }

    #[test]
    fn test_native_and_encoded_lists_agree() {
        let native = parse_json(
            r#"[{"title": "Pancakes", "ingredients": ["1 cup flour", "2 eggs"],
                 "directions": ["Mix.", "Fry."], "NER": ["flour", "eggs"]}]"#,
        );
        let encoded = parse_json(
            r#"[{"title": "Pancakes", "ingredients": "[\"1 cup flour\", \"2 eggs\"]",
                 "directions": "[\"Mix.\", \"Fry.\"]", "NER": "[\"flour\", \"eggs\"]"}]"#,
        );
        assert_eq!(native.recipes, encoded.recipes);
        assert_eq!(native.recipes.len(), 1);
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let dataset = parse_json(
            r#"[{"title": "Good", "ingredients": "[\"salt\"]", "NER": "[\"salt\"]"},
                {"title": "Bad", "ingredients": "[\"salt\"", "NER": "[]"},
                {"title": "Also good", "ingredients": [], "NER": ["pepper"]}]"#,
        );
        assert_eq!(dataset.recipes.len(), 2);
        assert_eq!(dataset.skipped.len(), 1);
        assert_eq!(dataset.skipped[0].index, 1);
        assert!(matches!(
            dataset.skipped[0].reason,
            RowError::MalformedField { field: "ingredients", .. }
        ));
    }

    #[test]
    fn test_missing_title_is_skipped() {
        let dataset = parse_json(r#"[{"title": "  ", "NER": ["salt"]}, 42]"#);
        assert!(dataset.recipes.is_empty());
        assert_eq!(dataset.skipped[0].reason, RowError::MissingTitle);
        assert_eq!(dataset.skipped[1].reason, RowError::NotAnObject);
    }

    #[test]
    fn test_plain_text_directions() {
        let dataset = parse_json(r#"[{"title": "Toast", "directions": "Toast the bread."}]"#);
        assert_eq!(dataset.recipes[0].directions, vec!["Toast the bread."]);
    }

    #[test]
    fn test_plain_text_ingredients_rejected() {
        let dataset = parse_json(r#"[{"title": "Toast", "ingredients": "bread"}]"#);
        assert!(dataset.recipes.is_empty());
        assert_eq!(dataset.skipped.len(), 1);
    }

    #[test]
    fn test_tags_are_normalized() {
        let dataset = parse_json(r#"[{"title": "Cookies", "NER": [" Brown Sugar", "brown sugar", "", "Butter"]}]"#);
        assert_eq!(dataset.recipes[0].tags, vec!["brown sugar", "butter"]);
    }

    #[test]
    fn test_tags_derived_when_missing() {
        let dataset = parse_json(
            r#"[{"title": "Scramble", "ingredients": ["3 large eggs", "1 tbsp butter, melted"]}]"#,
        );
        assert_eq!(dataset.recipes[0].tags, vec!["eggs", "butter"]);
    }

    #[test]
    fn test_workbook_table_lookup() {
        let dataset = parse_json(r#"{"recipes_data": [{"title": "Soup", "NER": ["water"]}], "other": []}"#);
        assert_eq!(dataset.recipes[0].title, "Soup");
    }

    #[test]
    fn test_workbook_missing_table() {
        let err = parse_dataset(br#"{"Sheet1": []}"#, DatasetFormat::Json, DEFAULT_TABLE).unwrap_err();
        match err {
            LoadError::TableNotFound { table, available } => {
                assert_eq!(table, "recipes_data");
                assert_eq!(available, vec!["Sheet1"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_json_document() {
        let err = parse_dataset(b"[{", DatasetFormat::Json, DEFAULT_TABLE).unwrap_err();
        assert!(matches!(err, LoadError::InvalidJson(_)));
        let err = parse_dataset(b"\"hello\"", DatasetFormat::Json, DEFAULT_TABLE).unwrap_err();
        assert!(matches!(err, LoadError::InvalidJson(_)));
    }

    #[test]
    fn test_csv_rows() {
        let csv = "title,ingredients,directions,link,source,NER,site\n\
                   Pancakes,\"[\"\"1 cup flour\"\"]\",\"[\"\"Mix.\"\"]\",example.com/p,Gathered,\"[\"\"flour\"\"]\",example.com\n";
        let dataset = parse_dataset(csv.as_bytes(), DatasetFormat::Csv, DEFAULT_TABLE).unwrap();
        let recipe = &dataset.recipes[0];
        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.ingredients, vec!["1 cup flour"]);
        assert_eq!(recipe.directions, vec!["Mix."]);
        assert_eq!(recipe.link.as_deref(), Some("example.com/p"));
        assert_eq!(recipe.source.as_deref(), Some("Gathered"));
        assert_eq!(recipe.tags, vec!["flour"]);
    }

    #[test]
    fn test_csv_missing_title_column() {
        let err = parse_dataset(b"name,NER\nx,[]\n", DatasetFormat::Csv, DEFAULT_TABLE).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(c) if c == "title"));
    }
}
