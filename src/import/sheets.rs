use serde::Serialize;
use serde_json::{Map, Value};

/// Canonical key and the spreadsheet-header alternative for each field
const KEY_PAIRS: [(&str, &str); 6] = [
    ("storeName", "Store Name"),
    ("location", "Location"),
    ("status", "Status"),
    ("salesRep", "Sales Rep"),
    ("date", "Date"),
    ("notes", "Notes"),
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRow {
    pub store_name: String,
    pub location: String,
    pub status: String,
    pub sales_rep: String,
    pub date: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportMetrics {
    pub total_stores_contacted: usize,
    pub samples_given: usize,
    pub stores_bought_once: usize,
    pub stores_bought_more_than_once: usize,
}

/// Resolve every row onto the canonical field names and drop rows without a store name
pub fn normalize(rows: &[Map<String, Value>]) -> Vec<ProcessedRow> {
    rows.iter()
        .map(normalize_row)
        .filter(|row| !row.store_name.is_empty())
        .collect()
}

fn normalize_row(raw: &Map<String, Value>) -> ProcessedRow {
    let [store_name, location, status, sales_rep, date, notes] =
        KEY_PAIRS.map(|(canonical, alternate)| resolve(raw, canonical, alternate));

    ProcessedRow {
        store_name,
        location,
        status,
        sales_rep,
        date,
        notes,
    }
}

/// Canonical key first, then the alternate; null and "" count as absent
fn resolve(raw: &Map<String, Value>, canonical: &str, alternate: &str) -> String {
    [canonical, alternate]
        .iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| is_present(value))
        .map(coerce_to_string)
        .unwrap_or_default()
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Status-keyword counters. They overlap: one row may land in several buckets.
pub fn summarize(rows: &[ProcessedRow]) -> ImportMetrics {
    let mut metrics = ImportMetrics {
        total_stores_contacted: rows.len(),
        ..Default::default()
    };

    for row in rows {
        let status = row.status.to_lowercase();

        if status.contains("sample") {
            metrics.samples_given += 1;
        }
        if status.contains("first purchase") || status.contains("bought once") {
            metrics.stores_bought_once += 1;
        }
        if status.contains("repeat") || status.contains("more than once") {
            metrics.stores_bought_more_than_once += 1;
        }
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn both_naming_conventions_resolve_to_same_field() {
        let processed = normalize(&rows(json!([
            { "storeName": "Pet Palace", "salesRep": "Alex" },
            { "Store Name": "Pet Palace", "Sales Rep": "Alex" }
        ])));

        assert_eq!(processed.len(), 2);
        assert_eq!(processed[0], processed[1]);
        assert_eq!(processed[0].sales_rep, "Alex");
    }

    #[test]
    fn canonical_key_wins_over_alternate() {
        let processed = normalize(&rows(json!([
            { "storeName": "Canonical", "Store Name": "Alternate" }
        ])));
        assert_eq!(processed[0].store_name, "Canonical");
    }

    #[test]
    fn empty_canonical_falls_through_to_alternate() {
        let processed = normalize(&rows(json!([
            { "storeName": "", "Store Name": "Alternate", "location": null, "Location": "Quebec" }
        ])));
        assert_eq!(processed[0].store_name, "Alternate");
        assert_eq!(processed[0].location, "Quebec");
    }

    #[test]
    fn non_string_values_are_coerced() {
        let processed = normalize(&rows(json!([
            { "storeName": 42, "notes": true, "date": 20240105 }
        ])));
        assert_eq!(processed[0].store_name, "42");
        assert_eq!(processed[0].notes, "true");
        assert_eq!(processed[0].date, "20240105");
    }

    #[test]
    fn rows_without_store_name_are_dropped() {
        let processed = normalize(&rows(json!([
            { "location": "Montreal" },
            { "storeName": "Kept" }
        ])));
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].store_name, "Kept");
        assert_eq!(processed[0].status, "");
    }

    #[test]
    fn metrics_buckets_are_independent() {
        let processed = normalize(&rows(json!([
            { "storeName": "A", "status": "Sample given" },
            { "storeName": "B", "status": "First Purchase" },
            { "storeName": "C", "status": "Bought once, sample of new line" },
            { "storeName": "D", "status": "REPEAT customer" },
            { "storeName": "E", "status": "Ordered more than once" },
            { "storeName": "F", "status": "Visited" }
        ])));

        let metrics = summarize(&processed);
        assert_eq!(metrics.total_stores_contacted, 6);
        assert_eq!(metrics.samples_given, 2);
        assert_eq!(metrics.stores_bought_once, 2);
        assert_eq!(metrics.stores_bought_more_than_once, 2);
    }

    #[test]
    fn metrics_serialize_camel_case() {
        let value = serde_json::to_value(summarize(&[])).unwrap();
        assert_eq!(value["totalStoresContacted"], 0);
        assert_eq!(value["storesBoughtMoreThanOnce"], 0);
    }
}
