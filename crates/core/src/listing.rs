//! Search filtering and summary tiles shared by every collection.
//!
//! Collections are small enough to be fetched whole, so filtering and
//! aggregation happen in memory over the fetched records.

use serde::Serialize;
use validator::ValidationError;

/// A record that can be matched by the free-text search box.
pub trait Searchable {
    /// Text fields the query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether any search field contains `needle`.
    ///
    /// `needle` must already be lower-cased.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Keep the records matching `query`, case-insensitively.
///
/// A missing, empty or whitespace-only query keeps everything. The query is
/// matched as typed otherwise, surrounding spaces included.
pub fn filter<T: Searchable>(records: Vec<T>, query: Option<&str>) -> Vec<T> {
    let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
        return records;
    };

    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.matches(&needle))
        .collect()
}

/// Number of records satisfying `predicate`.
pub fn count_where<T>(records: &[T], predicate: impl Fn(&T) -> bool) -> usize {
    records.iter().filter(|record| predicate(record)).count()
}

/// Sum of `value` over all records.
pub fn sum_by<T>(records: &[T], value: impl Fn(&T) -> f64) -> f64 {
    records.iter().map(value).sum()
}

/// Mean of `value` over all records, 0 for an empty collection.
pub fn average_by<T>(records: &[T], value: impl Fn(&T) -> f64) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    sum_by(records, value) / records.len() as f64
}

/// Rounded percentage of `part` in `whole`, 0 when `whole` is 0.
#[must_use]
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 * 100.0) / whole as f64).round() as u32
}

/// Value shown on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TileValue {
    /// Number of records.
    Count(usize),
    /// Money sum or average.
    Amount(f64),
    /// Whole percent, 0 to 100.
    Percent(u32),
}

/// Named summary value computed over a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTile {
    /// Stable identifier (e.g. `totalAmount`).
    pub key: &'static str,
    /// Human-readable label.
    pub title: &'static str,
    #[serde(flatten)]
    pub value: TileValue,
}

impl SummaryTile {
    /// Count tile.
    #[must_use]
    pub const fn count(key: &'static str, title: &'static str, value: usize) -> Self {
        Self {
            key,
            title,
            value: TileValue::Count(value),
        }
    }

    /// Money tile.
    #[must_use]
    pub const fn amount(key: &'static str, title: &'static str, value: f64) -> Self {
        Self {
            key,
            title,
            value: TileValue::Amount(value),
        }
    }

    /// Percentage tile.
    #[must_use]
    pub const fn percent(key: &'static str, title: &'static str, value: u32) -> Self {
        Self {
            key,
            title,
            value: TileValue::Percent(value),
        }
    }
}

/// Validator rejecting empty and whitespace-only text.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        title: &'static str,
        body: &'static str,
    }

    impl Searchable for Note {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.title, self.body]
        }
    }

    fn notes() -> Vec<Note> {
        vec![
            Note {
                title: "Easter Vigil",
                body: "Saturday night",
            },
            Note {
                title: "Choir practice",
                body: "Bring the EASTER hymnal",
            },
            Note {
                title: "Parking",
                body: "Use the back lot",
            },
        ]
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        assert_eq!(filter(notes(), None).len(), 3);
        assert_eq!(filter(notes(), Some("")).len(), 3);
        assert_eq!(filter(notes(), Some("   ")).len(), 3);
    }

    #[test]
    fn test_query_matches_any_field_ignoring_case() {
        let found = filter(notes(), Some("easter"));
        let titles: Vec<_> = found.iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Easter Vigil", "Choir practice"]);
    }

    #[test]
    fn test_query_without_match_is_empty() {
        assert!(filter(notes(), Some("bazaar")).is_empty());
    }

    #[test]
    fn test_count_where_and_sums() {
        let amounts = [10.0, 20.0, 0.5];
        assert_eq!(count_where(&amounts, |a| *a >= 10.0), 2);
        assert_eq!(sum_by(&amounts, |a| *a), 30.5);
        assert_eq!(average_by(&amounts[..2], |a| *a), 15.0);
        assert_eq!(average_by::<f64>(&[], |a| *a), 0.0);
    }

    #[test]
    fn test_percentage_rounds_and_handles_empty() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_tile_serializes_kind_and_value() {
        let tile = SummaryTile::count("total", "Total", 4);
        let json = serde_json::to_value(&tile).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({"key": "total", "title": "Total", "kind": "count", "value": 4})
        );
    }

    #[test]
    fn test_non_blank() {
        assert!(non_blank("Hall").is_ok());
        assert!(non_blank(" \t").is_err());
    }
}
