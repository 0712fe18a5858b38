//! Partition rows into buckets keyed by one column's value.

use crate::dataset::Row;
use std::collections::HashMap;

/// Key of the single bucket produced when no group-by column is set.
pub const ALL_KEY: &str = "All";
/// Key for rows whose group-by value is missing or empty.
pub const UNKNOWN_KEY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<'a> {
    pub key: String,
    pub rows: Vec<&'a Row>,
}

/// Group `rows` by the value in `group_by`.
///
/// Buckets come out in first-seen order and each keeps its rows in input
/// order. With no group-by column every row lands in one [`ALL_KEY`] bucket,
/// which is returned even when there are no rows.
pub fn group_rows<'a>(rows: &[&'a Row], group_by: Option<&str>) -> Vec<Bucket<'a>> {
    let Some(column) = group_by else {
        return vec![Bucket {
            key: ALL_KEY.to_string(),
            rows: rows.to_vec(),
        }];
    };

    let mut buckets: Vec<Bucket<'a>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for &row in rows {
        let key = match row.get(column) {
            Some(v) if !v.is_empty() => v,
            _ => UNKNOWN_KEY,
        };
        let pos = *positions.entry(key).or_insert_with(|| {
            buckets.push(Bucket {
                key: key.to_string(),
                rows: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[pos].rows.push(row);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn systems() -> Dataset {
        Dataset::from_records(
            [("A", "X"), ("B", "Y"), ("C", "X"), ("D", "")]
                .iter()
                .map(|(n, s)| {
                    vec![
                        ("name".to_string(), n.to_string()),
                        ("system.name".to_string(), s.to_string()),
                    ]
                })
                .collect(),
        )
    }

    fn keys_and_names(buckets: &[Bucket]) -> Vec<(String, Vec<String>)> {
        buckets
            .iter()
            .map(|b| {
                (
                    b.key.clone(),
                    b.rows
                        .iter()
                        .map(|r| r.value_or_empty("name").to_string())
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_ungrouped_is_single_all_bucket() {
        let ds = systems();
        let rows: Vec<&Row> = ds.rows().iter().collect();
        let buckets = group_rows(&rows, None);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, ALL_KEY);
        assert_eq!(buckets[0].rows.len(), 4);
    }

    #[test]
    fn test_first_seen_order_and_unknown() {
        let ds = systems();
        let rows: Vec<&Row> = ds.rows().iter().collect();
        let buckets = group_rows(&rows, Some("system.name"));
        assert_eq!(
            keys_and_names(&buckets),
            vec![
                ("X".to_string(), vec!["A".to_string(), "C".to_string()]),
                ("Y".to_string(), vec!["B".to_string()]),
                (UNKNOWN_KEY.to_string(), vec!["D".to_string()]),
            ]
        );
    }

    #[test]
    fn test_missing_column_goes_to_unknown() {
        let ds = systems();
        let rows: Vec<&Row> = ds.rows().iter().collect();
        let buckets = group_rows(&rows, Some("no_such_column"));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, UNKNOWN_KEY);
        assert_eq!(buckets[0].rows.len(), 4);
    }

    #[test]
    fn test_every_row_in_exactly_one_bucket() {
        let ds = systems();
        let rows: Vec<&Row> = ds.rows().iter().collect();
        let buckets = group_rows(&rows, Some("system.name"));
        let mut seen: Vec<usize> = buckets
            .iter()
            .flat_map(|b| b.rows.iter().map(|r| r.index()))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_rows(&[], Some("a")).is_empty());
        assert_eq!(group_rows(&[], None)[0].rows.len(), 0);
    }
}
