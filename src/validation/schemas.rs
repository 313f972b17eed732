use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::Schema;
use crate::types::FieldError;

// ---------------------------------------------------------------------------
// Login

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(required(message = "Required"), email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(
        required(message = "Required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: Option<String>,
    #[serde(rename = "rememberMe", default)]
    pub remember_me: Option<bool>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

impl Schema for LoginCredentials {
    type Input = LoginInput;

    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("email", "email"),
        ("password", "password"),
        ("rememberMe", "remember_me"),
    ];

    fn from_input(input: LoginInput) -> Self {
        Self {
            email: input.email.unwrap_or_default(),
            password: input.password.unwrap_or_default(),
            remember_me: input.remember_me.unwrap_or(false),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV row

#[derive(Debug, Deserialize, Validate)]
pub struct CsvRowInput {
    #[serde(rename = "storeName")]
    #[validate(
        required(message = "Store name is required"),
        length(min = 1, message = "Store name is required")
    )]
    pub store_name: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "salesRep")]
    pub sales_rep: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// One imported store-contact record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvRow {
    pub store_name: String,
    pub location: String,
    pub status: String,
    pub sales_rep: String,
    pub date: String,
    pub notes: String,
}

impl Schema for CsvRow {
    type Input = CsvRowInput;

    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("storeName", "store_name"),
        ("location", "location"),
        ("status", "status"),
        ("salesRep", "sales_rep"),
        ("date", "date"),
        ("notes", "notes"),
    ];

    fn from_input(input: CsvRowInput) -> Self {
        Self {
            store_name: input.store_name.unwrap_or_default(),
            location: input.location.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            sales_rep: input.sales_rep.unwrap_or_default(),
            date: input.date.unwrap_or_default(),
            notes: input.notes.unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Google Sheets import

#[derive(Debug, Deserialize, Validate)]
pub struct SheetsImportInput {
    #[validate(
        required(message = "Required"),
        length(min = 1, message = "At least one row is required")
    )]
    pub rows: Option<Vec<Map<String, Value>>>,
}

/// Raw spreadsheet rows; keys follow either naming convention
#[derive(Debug, Clone, PartialEq)]
pub struct SheetsImportPayload {
    pub rows: Vec<Map<String, Value>>,
}

impl Schema for SheetsImportPayload {
    type Input = SheetsImportInput;

    const FIELDS: &'static [(&'static str, &'static str)] = &[("rows", "rows")];

    fn from_input(input: SheetsImportInput) -> Self {
        Self {
            rows: input.rows.unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard metrics query

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Day,
        Period::Week,
        Period::Month,
        Period::Quarter,
        Period::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct MetricsQueryInput {
    pub period: Option<String>,
    #[serde(rename = "includeDetails", default)]
    pub include_details: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsQuery {
    pub period: Period,
    pub include_details: bool,
}

impl Schema for MetricsQuery {
    type Input = MetricsQueryInput;

    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("period", "period"),
        ("includeDetails", "include_details"),
    ];

    fn refine(input: &MetricsQueryInput) -> Vec<FieldError> {
        match input.period.as_deref() {
            Some(p) if Period::parse(p).is_none() => vec![FieldError::new(
                "period",
                "Period must be one of day, week, month, quarter, year",
            )],
            _ => Vec::new(),
        }
    }

    fn from_input(input: MetricsQueryInput) -> Self {
        Self {
            period: input
                .period
                .as_deref()
                .and_then(Period::parse)
                .unwrap_or_default(),
            include_details: input.include_details.unwrap_or(false),
        }
    }
}
