//! Pure search and filter functions
//!
//! No I/O here. Every function takes the current record list and returns a
//! filtered copy in the original order.

use crate::record::Record;

/// Label of the category button that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// Category selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// The "all categories" sentinel
    #[default]
    All,
    /// Exact, case-sensitive match on `category`
    Only(String),
}

impl CategoryFilter {
    /// Map a button label to a filter. [`ALL_CATEGORIES`] is the sentinel.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(label) => label,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => record.category.as_deref() == Some(label.as_str()),
        }
    }
}

/// Keyword and category together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub keyword: String,
    pub category: CategoryFilter,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.keyword.is_empty() && self.category == CategoryFilter::All
    }
}

/// True if the case-folded keyword occurs in any field value of `record`
pub fn matches_keyword(record: &Record, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    let needle = keyword.to_lowercase();
    record
        .field_values()
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// Keep records whose text contains `keyword` (case-insensitive).
/// An empty keyword keeps everything.
pub fn filter_by_keyword(records: &[Record], keyword: &str) -> Vec<Record> {
    if keyword.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| matches_keyword(r, keyword))
        .cloned()
        .collect()
}

/// Keep records in the given category
pub fn filter_by_category(records: &[Record], category: &CategoryFilter) -> Vec<Record> {
    records
        .iter()
        .filter(|r| category.matches(r))
        .cloned()
        .collect()
}

/// Apply keyword and category in one pass
pub fn apply(records: &[Record], query: &Query) -> Vec<Record> {
    records
        .iter()
        .filter(|r| query.category.matches(r) && matches_keyword(r, &query.keyword))
        .cloned()
        .collect()
}

/// Positions in `records` that pass `query`, for views that keep indices
pub fn matching_indices(records: &[Record], query: &Query) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| query.category.matches(r) && matches_keyword(r, &query.keyword))
        .map(|(i, _)| i)
        .collect()
}

/// Unique non-empty categories present in `records`, sorted
pub fn categories_in(records: &[Record]) -> Vec<String> {
    let mut categories: Vec<String> = records
        .iter()
        .filter_map(|r| r.category.clone())
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_record(title: &str, command: &str, category: Option<&str>) -> Record {
        Record {
            title: Some(title.to_string()),
            command: Some(command.to_string()),
            category: category.map(str::to_string),
            ..Record::default()
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            make_record("SQL injection", "sqlmap -u 'http://test.com?id=1'", Some("Web Security")),
            make_record("Port scan", "nmap -sV target.com", Some("Network Security")),
            make_record("System info", "uname -a", Some("System Security")),
            make_record("Ping sweep", "nmap -sn 10.0.0.0/24", None),
        ]
    }

    #[test]
    fn test_empty_keyword_returns_everything() {
        let records = sample();
        assert_eq!(filter_by_keyword(&records, ""), records);
    }

    #[test]
    fn test_keyword_matches_command() {
        let records = vec![make_record("Port scan", "nmap -sV target.com", None)];
        assert_eq!(filter_by_keyword(&records, "nmap").len(), 1);
        assert!(filter_by_keyword(&records, "zzzz").is_empty());
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let records = sample();
        let hits = filter_by_keyword(&records, "NMAP");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].display_title(), "Port scan");
        assert_eq!(hits[1].display_title(), "Ping sweep");
    }

    #[test]
    fn test_keyword_searches_tags_category_and_extra_fields() {
        let mut record = make_record("Reverse shell", "nc -e /bin/sh", None);
        record.tags = vec!["Netcat".to_string()];
        record.category = Some("Post Exploitation".to_string());
        record
            .extra
            .insert("platform".to_string(), serde_json::json!("FreeBSD"));
        let records = vec![record];

        assert_eq!(filter_by_keyword(&records, "netcat").len(), 1);
        assert_eq!(filter_by_keyword(&records, "exploitation").len(), 1);
        assert_eq!(filter_by_keyword(&records, "freebsd").len(), 1);
    }

    #[test]
    fn test_keyword_does_not_match_field_names() {
        let records = sample();
        assert!(filter_by_keyword(&records, "title").is_empty());
    }

    #[test]
    fn test_category_filter_is_exact() {
        let records = sample();
        let web = filter_by_category(&records, &CategoryFilter::Only("Web Security".to_string()));
        assert_eq!(web.len(), 1);
        assert_eq!(web[0].display_title(), "SQL injection");

        let lower = filter_by_category(&records, &CategoryFilter::Only("web security".to_string()));
        assert!(lower.is_empty());
    }

    #[test]
    fn test_all_categories_sentinel() {
        let records = sample();
        assert_eq!(CategoryFilter::from_label("All"), CategoryFilter::All);
        assert_eq!(filter_by_category(&records, &CategoryFilter::from_label("All")), records);
        assert_eq!(
            CategoryFilter::from_label("Other"),
            CategoryFilter::Only("Other".to_string())
        );
        assert_eq!(CategoryFilter::from_label("Other").label(), "Other");
    }

    #[test]
    fn test_apply_composes_keyword_and_category() {
        let records = sample();
        let query = Query {
            keyword: "nmap".to_string(),
            category: CategoryFilter::Only("Network Security".to_string()),
        };
        let hits = apply(&records, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_title(), "Port scan");
        assert_eq!(matching_indices(&records, &query), vec![1]);
        assert!(Query::default().is_empty());
        assert!(!query.is_empty());
    }

    #[test]
    fn test_categories_in() {
        assert_eq!(
            categories_in(&sample()),
            vec!["Network Security", "System Security", "Web Security"]
        );
    }

    fn arb_record() -> impl Strategy<Value = Record> {
        (
            proptest::option::of("[a-zA-Z0-9 ]{0,12}"),
            proptest::option::of("[a-zA-Z0-9 -]{0,16}"),
            proptest::collection::vec("[a-z]{1,6}", 0..3),
            proptest::option::of(prop_oneof![
                Just("Web Security".to_string()),
                Just("Network Security".to_string()),
                Just("Other".to_string()),
            ]),
        )
            .prop_map(|(title, command, tags, category)| Record {
                title,
                command,
                tags,
                category,
                ..Record::default()
            })
    }

    proptest! {
        #[test]
        fn prop_keyword_filter_is_ordered_subsequence(
            records in proptest::collection::vec(arb_record(), 0..20),
            keyword in "[a-zA-Z]{0,3}",
        ) {
            let hits = filter_by_keyword(&records, &keyword);
            prop_assert!(hits.len() <= records.len());

            // Every hit appears in the input, in the same relative order
            let mut cursor = 0;
            for hit in &hits {
                let pos = records[cursor..].iter().position(|r| r == hit);
                prop_assert!(pos.is_some());
                cursor += pos.unwrap_or(0) + 1;
            }
            for hit in &hits {
                prop_assert!(matches_keyword(hit, &keyword));
            }
        }

        #[test]
        fn prop_all_categories_is_identity(records in proptest::collection::vec(arb_record(), 0..20)) {
            prop_assert_eq!(filter_by_category(&records, &CategoryFilter::All), records);
        }

        #[test]
        fn prop_apply_equals_both_filters(
            records in proptest::collection::vec(arb_record(), 0..20),
            keyword in "[a-z]{0,2}",
            label in prop_oneof![Just("All"), Just("Web Security"), Just("Other")],
        ) {
            let query = Query { keyword: keyword.clone(), category: CategoryFilter::from_label(label) };
            let composed = apply(&records, &query);
            let chained = filter_by_keyword(&filter_by_category(&records, &query.category), &keyword);
            prop_assert_eq!(composed, chained);
        }
    }
}
