//! Ingredient normalization.
//!
//! Reduces a free-text ingredient line (e.g. "1/2 c. chopped nuts") to the
//! canonical tag used for matching and shopping lists ("nuts").

/// Units recognised after a leading amount. Compared against a single
/// lower-cased word with any trailing period removed.
const UNITS: &[&str] = &[
    "cup", "cups", "c", "tablespoon", "tablespoons", "tbsp", "tbs", "tb", "t", "teaspoon",
    "teaspoons", "tsp", "ts", "pint", "pints", "pt", "quart", "quarts", "qt", "gallon",
    "gallons", "gal", "ml", "milliliter", "milliliters", "l", "liter", "liters", "litre",
    "litres", "ounce", "ounces", "oz", "pound", "pounds", "lb", "lbs", "g", "gram", "grams",
    "kg", "kilogram", "kilograms", "mg", "package", "packages", "pkg", "pkgs", "can", "cans",
    "jar", "jars", "bottle", "bottles", "box", "boxes", "bag", "bags", "stick", "sticks",
    "clove", "cloves", "slice", "slices", "piece", "pieces", "pinch", "pinches", "dash",
    "dashes", "bunch", "bunches", "sprig", "sprigs", "stalk", "stalks", "head", "heads",
    "handful", "handfuls", "envelope", "envelopes", "carton", "cartons", "container",
    "containers", "squares", "square",
];

/// Two-word units, checked before single-word ones.
const COMPOUND_UNITS: &[(&str, &str)] = &[("fl", "oz"), ("fl.", "oz"), ("fluid", "ounce"), ("fluid", "ounces")];

/// Size and preparation words dropped from the front of the item.
const LEADING_DESCRIPTORS: &[&str] = &[
    "large", "medium", "small", "extra-large", "heaping", "level", "scant", "chopped", "minced",
    "diced", "sliced", "grated", "shredded", "melted", "softened", "sifted", "crushed",
    "beaten", "finely", "coarsely", "roughly", "thinly", "freshly", "fresh", "packed",
    "lightly", "firmly", "loosely",
];

/// Phrases dropped from the end of the item.
const TRAILING_PHRASES: &[&str] = &[
    "to taste",
    "as needed",
    "for serving",
    "for garnish",
    "or more",
    "optional",
];

/// Normalize one ingredient line to a tag.
///
/// Returns `None` when nothing but quantity/unit text remains.
pub fn normalize_ingredient(raw: &str) -> Option<String> {
    let lower = strip_parentheticals(&raw.to_lowercase());
    // Everything after the first comma is preparation detail.
    let head = lower.split(',').next().unwrap_or_default();

    let words: Vec<&str> = head.split_whitespace().collect();
    let mut start = 0;

    while start < words.len() && is_amount(words[start]) {
        start += 1;
    }
    // "a pinch of salt"
    if start < words.len()
        && (words[start] == "a" || words[start] == "an")
        && words.get(start + 1).is_some_and(|w| is_unit(w))
    {
        start += 1;
    }
    if let (Some(first), Some(second)) = (words.get(start), words.get(start + 1)) {
        let second = second.trim_end_matches('.');
        if COMPOUND_UNITS.iter().any(|(a, b)| first == a && second == *b) {
            start += 2;
        }
    }
    if words.get(start).is_some_and(|w| is_unit(w)) {
        start += 1;
    }
    if words.get(start) == Some(&"of") {
        start += 1;
    }
    while words
        .get(start)
        .is_some_and(|w| LEADING_DESCRIPTORS.contains(&w.trim_end_matches(',')))
    {
        start += 1;
    }

    let mut item = words[start.min(words.len())..].join(" ");
    loop {
        let before = item.len();
        for phrase in TRAILING_PHRASES {
            if let Some(stripped) = item.strip_suffix(phrase) {
                item = stripped.trim_end().to_string();
            }
        }
        if item.len() == before {
            break;
        }
    }

    let item = item.trim_matches(|c: char| c == '.' || c == ':' || c == '*' || c.is_whitespace());
    if item.is_empty() {
        None
    } else {
        Some(item.to_string())
    }
}

/// Normalize a tag that is already supposed to be canonical: lower-case,
/// trimmed, inner whitespace collapsed.
pub fn clean_tag(tag: &str) -> Option<String> {
    let cleaned = tag.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Derive tags for a list of ingredient lines, keeping first-seen order and
/// dropping duplicates.
pub fn derive_tags<S: AsRef<str>>(ingredients: &[S]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(ingredients.len());
    for line in ingredients {
        if let Some(tag) = normalize_ingredient(line.as_ref()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    tags
}

fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// "2", "1/2", "1.5", "2-3", "½", "1½"
fn is_amount(word: &str) -> bool {
    !word.is_empty()
        && word.chars().any(|c| c.is_ascii_digit() || is_vulgar_fraction(c))
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '/' | '-') || is_vulgar_fraction(c))
}

fn is_vulgar_fraction(c: char) -> bool {
    matches!(c, '½' | '⅓' | '⅔' | '¼' | '¾' | '⅛' | '⅜' | '⅝' | '⅞')
}

fn is_unit(word: &str) -> bool {
    UNITS.contains(&word.trim_end_matches('.'))
}
