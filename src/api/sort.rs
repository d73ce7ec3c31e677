//! Result Ordering
//!
//! Client-side ordering of mapped entity pages via the `ordering` query
//! parameter: `ordering=name` ascending, `ordering=-name` descending.
//!
//! Fields holding numeric-looking strings (height, mass, population, ...)
//! are compared numerically; placeholder values such as "unknown" or
//! "n/a" always sort last. Unknown field names leave the page unsorted.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use crate::models::Page;

// == Apply Ordering ==
/// Sorts a page's results in place of the upstream order.
///
/// The sort is stable, so equal keys keep their upstream relative order.
pub fn apply_ordering<T: Serialize>(page: Page<T>, ordering: Option<&str>) -> Page<T> {
    let Some(ordering) = ordering.map(str::trim) else {
        return page;
    };

    let descending = ordering.starts_with('-');
    let field = ordering.trim_start_matches('-').trim().to_lowercase();
    if field.is_empty() {
        return page;
    }

    let Page { count, results } = page;

    let raws: Vec<Option<Value>> = results
        .iter()
        .map(|item| {
            serde_json::to_value(item)
                .ok()
                .and_then(|v| v.get(&field).cloned())
        })
        .collect();

    // Unknown field: nothing to sort on, keep the upstream order
    if raws.iter().all(|raw| raw.is_none()) {
        return Page { count, results };
    }

    // The field sorts numerically only when every present value does
    let numeric = raws
        .iter()
        .flatten()
        .all(|v| is_placeholder(v) || parse_numeric(v).is_some());

    let mut keyed: Vec<(SortKey, T)> = raws
        .into_iter()
        .zip(results)
        .map(|(raw, item)| (SortKey::build(raw, numeric), item))
        .collect();

    keyed.sort_by(|a, b| a.0.compare(&b.0, descending));

    Page {
        count,
        results: keyed.into_iter().map(|(_, item)| item).collect(),
    }
}

// == Sort Key ==
#[derive(Debug)]
enum SortKey {
    Num(f64),
    Text(String),
    /// Absent or placeholder value; always sorts last
    Missing,
}

impl SortKey {
    fn build(raw: Option<Value>, numeric: bool) -> Self {
        let Some(value) = raw else {
            return SortKey::Missing;
        };
        if is_placeholder(&value) {
            return SortKey::Missing;
        }
        if numeric {
            return match parse_numeric(&value) {
                Some(n) => SortKey::Num(n),
                None => SortKey::Missing,
            };
        }
        match value.as_str() {
            Some(s) => SortKey::Text(s.to_lowercase()),
            None => SortKey::Text(value.to_string().to_lowercase()),
        }
    }

    fn compare(&self, other: &Self, descending: bool) -> Ordering {
        use SortKey::*;
        let ordering = match (self, other) {
            (Missing, Missing) => return Ordering::Equal,
            // Placeholders stay last in both directions
            (Missing, _) => return Ordering::Greater,
            (_, Missing) => return Ordering::Less,
            (Num(a), Num(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Num(_), Text(_)) => Ordering::Less,
            (Text(_), Num(_)) => Ordering::Greater,
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Placeholder values SWAPI uses where no real datum exists.
fn is_placeholder(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let s = s.trim().to_lowercase();
            s.is_empty() || s == "unknown" || s == "n/a" || s == "none"
        }
        _ => false,
    }
}

/// Parses a numeric sort key, tolerating thousands separators.
fn parse_numeric(value: &Value) -> Option<f64> {
    if let Some(n) = value.as_f64() {
        return Some(n);
    }
    value.as_str()?.replace(',', "").trim().parse().ok()
}
