use bisoshi_types::{Row, SortDirection};
use std::cmp::Ordering;

/// Ordering of rows by one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparator<'a> {
    pub field: &'a str,
    pub direction: SortDirection,
}

impl<'a> Comparator<'a> {
    pub fn new(field: &'a str, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Rows without a value in the column sort before rows that have one.
    pub fn compare<R: Row>(&self, a: &R, b: &R) -> Ordering {
        let ascending = match (a.field(self.field), b.field(self.field)) {
            (Some(x), Some(y)) => x.compare(&y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match self.direction {
            SortDirection::Ascending => ascending,
            SortDirection::Descending => ascending.reverse(),
        }
    }
}

/// Case-insensitive substring match; the empty filter matches everything.
pub fn matches_filter<R: Row>(row: &R, filter: &str) -> bool {
    contains_needle(row, &filter.to_lowercase())
}

/// `needle` is already lowercased.
fn contains_needle<R: Row>(row: &R, needle: &str) -> bool {
    needle.is_empty() || row.filter_text().to_lowercase().contains(needle)
}

/// Filter then sort, borrowing from `records`.
///
/// `sort_by` is a stable merge sort, so rows that compare equal keep their
/// original relative order in both directions. Without a comparator the
/// insertion order is kept.
pub fn apply_filter<'r, R: Row>(
    records: &'r [R],
    comparator: Option<Comparator<'_>>,
    filter: &str,
) -> Vec<&'r R> {
    let needle = filter.to_lowercase();
    let mut rows: Vec<&R> = records
        .iter()
        .filter(|row| contains_needle(*row, &needle))
        .collect();

    if let Some(comparator) = comparator {
        rows.sort_by(|a, b| comparator.compare(*a, *b));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use bisoshi_types::Record;

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.row_id().to_string()).collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::new().with("id", 1_i64).with("name", "A").with("qty", 5_i64),
            Record::new().with("id", 2_i64).with("name", "B").with("qty", 2_i64),
            Record::new().with("id", 3_i64).with("name", "a").with("qty", 9_i64),
        ]
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let records = sample();
        let rows = apply_filter(&records, None, "a");
        assert_eq!(ids(&rows), vec!["1", "3"]);
    }

    #[test]
    fn test_filtered_then_sorted_by_qty_ascending() {
        let records = sample();
        let rows = apply_filter(
            &records,
            Some(Comparator::new("qty", SortDirection::Ascending)),
            "a",
        );
        assert_eq!(ids(&rows), vec!["1", "3"]);

        let rows = apply_filter(
            &records,
            Some(Comparator::new("qty", SortDirection::Descending)),
            "a",
        );
        assert_eq!(ids(&rows), vec!["3", "1"]);
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let records = sample();
        let rows = apply_filter(&records, None, "");
        assert_eq!(ids(&rows), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_empty_collection() {
        let records: Vec<Record> = Vec::new();
        assert!(apply_filter(&records, None, "x").is_empty());
    }

    #[test]
    fn test_missing_values_sort_first() {
        let records = vec![
            Record::new().with("id", 1_i64).with("qty", 3_i64),
            Record::new().with("id", 2_i64),
        ];
        let rows = apply_filter(
            &records,
            Some(Comparator::new("qty", SortDirection::Ascending)),
            "",
        );
        assert_eq!(ids(&rows), vec!["2", "1"]);
    }

    #[test]
    fn test_matches_filter() {
        let row = Record::new().with("name", "Fertilizer NPK");
        assert!(matches_filter(&row, "npk"));
        assert!(matches_filter(&row, ""));
        assert!(!matches_filter(&row, "urea"));
    }

    #[test]
    fn test_apply_filter_agrees_with_matches_filter() {
        let records = sample();
        for filter in ["A", "b", "", "z"] {
            let expected: Vec<&Record> =
                records.iter().filter(|r| matches_filter(*r, filter)).collect();
            assert_eq!(ids(&apply_filter(&records, None, filter)), ids(&expected));
        }
    }
}
