use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::ValidationResult;
use crate::validation::{validate, CsvRow, Schema};

/// A data line that failed validation. `row` is the 1-based line number in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRowError {
    pub row: usize,
    pub message: String,
}

impl std::fmt::Display for CsvRowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvParseOutcome {
    pub headers: Vec<String>,
    pub valid_rows: Vec<CsvRow>,
    pub row_errors: Vec<CsvRowError>,
}

/// Split raw CSV text into validated rows.
///
/// Fields are split on bare commas; quoted fields containing commas are not
/// supported. The first line is the header. Data lines with fewer than two
/// fields are skipped without being reported. Invalid rows are collected and
/// never abort the batch.
pub fn parse_csv(raw: &str) -> CsvParseOutcome {
    let mut lines = raw.split('\n');

    let headers = match lines.next() {
        Some(line) if !line.trim().is_empty() => split_fields(line),
        _ => Vec::new(),
    };

    let mut outcome = CsvParseOutcome {
        headers,
        ..Default::default()
    };

    for (index, line) in lines.enumerate() {
        let values = split_fields(line);
        if values.len() < 2 {
            continue;
        }

        match validate::<CsvRow>(&positional_record(&values)) {
            ValidationResult::Success { data } => {
                if !data.store_name.is_empty() {
                    outcome.valid_rows.push(data);
                }
            }
            ValidationResult::Failure { error, .. } => {
                outcome.row_errors.push(CsvRowError {
                    row: index + 2,
                    message: error,
                });
            }
        }
    }

    tracing::debug!(
        "Parsed CSV: {} valid rows, {} row errors",
        outcome.valid_rows.len(),
        outcome.row_errors.len()
    );

    outcome
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|v| v.trim().to_string()).collect()
}

/// Map values onto the row fields by position; extra columns are ignored
fn positional_record(values: &[String]) -> Value {
    let record: Map<String, Value> = CsvRow::FIELDS
        .iter()
        .zip(values)
        .map(|((wire, _), value)| (wire.to_string(), Value::String(value.clone())))
        .collect();

    Value::Object(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Store Name,Location,Status,Sales Rep,Date,Notes";

    #[test]
    fn header_is_excluded_from_rows() {
        let raw = format!("{HEADER}\nPet Palace,Montreal,Sample given,Alex,2024-01-05,Liked it\n");
        let outcome = parse_csv(&raw);

        assert_eq!(outcome.headers[0], "Store Name");
        assert_eq!(outcome.headers.len(), 6);
        assert_eq!(outcome.valid_rows.len(), 1);
        assert!(outcome.row_errors.is_empty());

        let row = &outcome.valid_rows[0];
        assert_eq!(row.store_name, "Pet Palace");
        assert_eq!(row.sales_rep, "Alex");
        assert_eq!(row.notes, "Liked it");
    }

    #[test]
    fn single_field_lines_are_skipped_silently() {
        let raw = format!("{HEADER}\nLonely\n\nPet Palace,Montreal\n");
        let outcome = parse_csv(&raw);

        assert_eq!(outcome.valid_rows.len(), 1);
        assert!(outcome.row_errors.is_empty());
    }

    #[test]
    fn short_rows_get_default_fields() {
        let outcome = parse_csv(&format!("{HEADER}\nPet Palace,Montreal"));
        let row = &outcome.valid_rows[0];
        assert_eq!(row.location, "Montreal");
        assert_eq!(row.status, "");
        assert_eq!(row.date, "");
    }

    #[test]
    fn invalid_rows_are_collected_with_line_numbers() {
        let raw = format!("{HEADER}\nPet Palace,Montreal\n,Toronto,Visited\nCat Corner,Laval\n");
        let outcome = parse_csv(&raw);

        assert_eq!(outcome.valid_rows.len(), 2);
        assert_eq!(
            outcome.row_errors,
            vec![CsvRowError {
                row: 3,
                message: "Store name is required".to_string()
            }]
        );
        assert_eq!(outcome.row_errors[0].to_string(), "Row 3: Store name is required");
    }

    #[test]
    fn fields_are_trimmed_and_crlf_tolerated() {
        let raw = "Store Name,Location\r\n  Pet Palace , Montreal \r\n";
        let outcome = parse_csv(raw);

        assert_eq!(outcome.headers, vec!["Store Name", "Location"]);
        assert_eq!(outcome.valid_rows[0].store_name, "Pet Palace");
        assert_eq!(outcome.valid_rows[0].location, "Montreal");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let raw = format!("{HEADER}\nA,B,C,D,E,F,G,H");
        let outcome = parse_csv(&raw);
        assert_eq!(outcome.valid_rows[0].notes, "F");
    }

    #[test]
    fn empty_input_yields_nothing() {
        let outcome = parse_csv("");
        assert!(outcome.headers.is_empty());
        assert!(outcome.valid_rows.is_empty());
        assert!(outcome.row_errors.is_empty());
    }
}
