// ABOUTME: Shared argument parsing for tool handlers: date filters, limits, required fields
// ABOUTME: Every failure is a ToolError naming the offending field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

//! # Tool Parameter Parsing
//!
//! Most tools share the same four optional date parameters: `year`,
//! `month` (1-12, requires `year`), `before`, and `after` (`YYYY-MM-DD`).
//! Explicit `before`/`after` override any bound implied by `year`/`month` —
//! that precedence lives in [`ActivityQuery::resolved_bounds`].

use crate::cache::ActivityQuery;
use crate::errors::AppResult;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

use super::errors::ToolError;
use super::schema::PropertySchema;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build the date filter shared by most tools from raw arguments.
///
/// # Errors
///
/// Returns a validation error naming the offending field for a non-integer
/// year, an out-of-range or orphaned month, or an unparseable date string.
pub fn date_filter_from_args(tool: &str, args: &Value) -> AppResult<ActivityQuery> {
    let year = optional_year(tool, args)?;
    let month = optional_month(tool, args)?;
    if month.is_some() && year.is_none() {
        return Err(ToolError::invalid_parameter(tool, "month", "month requires year").into());
    }

    Ok(ActivityQuery {
        year,
        month,
        before: optional_date(tool, args, "before")?,
        after: optional_date(tool, args, "after")?,
        sport: None,
        include_private: false,
    })
}

fn optional_year(tool: &str, args: &Value) -> AppResult<Option<i32>> {
    match args.get("year") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let year = value.as_i64().ok_or_else(|| {
                ToolError::invalid_parameter(tool, "year", "expected an integer")
            })?;
            if !(1900..=2100).contains(&year) {
                return Err(
                    ToolError::invalid_parameter(tool, "year", "expected 1900-2100").into(),
                );
            }
            Ok(Some(year as i32))
        }
    }
}

fn optional_month(tool: &str, args: &Value) -> AppResult<Option<u32>> {
    match args.get("month") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let month = value.as_u64().ok_or_else(|| {
                ToolError::invalid_parameter(tool, "month", "expected an integer")
            })?;
            if !(1..=12).contains(&month) {
                return Err(
                    ToolError::invalid_parameter(tool, "month", "expected 1-12").into(),
                );
            }
            Ok(Some(month as u32))
        }
    }
}

fn optional_date(tool: &str, args: &Value, field: &str) -> AppResult<Option<NaiveDate>> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let raw = value.as_str().ok_or_else(|| {
                ToolError::invalid_parameter(tool, field, "expected a YYYY-MM-DD string")
            })?;
            let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
                ToolError::invalid_parameter(tool, field, format!("expected YYYY-MM-DD: {e}"))
            })?;
            Ok(Some(date))
        }
    }
}

/// Optional positive integer with a default.
///
/// # Errors
///
/// Returns a validation error when present but not a positive integer.
pub fn optional_limit(tool: &str, args: &Value, field: &str, default: usize) -> AppResult<usize> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => {
            let limit = value.as_u64().ok_or_else(|| {
                ToolError::invalid_parameter(tool, field, "expected a positive integer")
            })?;
            if limit == 0 {
                return Err(
                    ToolError::invalid_parameter(tool, field, "expected at least 1").into(),
                );
            }
            Ok(limit as usize)
        }
    }
}

/// Optional non-negative number with a default.
///
/// # Errors
///
/// Returns a validation error when present but not a non-negative number.
pub fn optional_f64(tool: &str, args: &Value, field: &str, default: f64) -> AppResult<f64> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => {
            let number = value.as_f64().ok_or_else(|| {
                ToolError::invalid_parameter(tool, field, "expected a number")
            })?;
            if number < 0.0 || !number.is_finite() {
                return Err(ToolError::invalid_parameter(
                    tool,
                    field,
                    "expected a non-negative number",
                )
                .into());
            }
            Ok(number)
        }
    }
}

/// Required string field.
///
/// # Errors
///
/// Returns a missing-parameter error when absent, or a validation error when
/// present but not a non-empty string.
pub fn required_str(tool: &str, args: &Value, field: &str) -> AppResult<String> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ToolError::missing_parameter(tool, field).into()),
        Some(value) => {
            let raw = value
                .as_str()
                .ok_or_else(|| ToolError::invalid_parameter(tool, field, "expected a string"))?;
            if raw.is_empty() {
                return Err(
                    ToolError::invalid_parameter(tool, field, "must not be empty").into(),
                );
            }
            Ok(raw.to_owned())
        }
    }
}

/// Required positive number field.
///
/// # Errors
///
/// Returns a missing-parameter error when absent, or a validation error when
/// not a positive finite number.
pub fn required_positive_f64(tool: &str, args: &Value, field: &str) -> AppResult<f64> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ToolError::missing_parameter(tool, field).into()),
        Some(value) => {
            let number = value.as_f64().ok_or_else(|| {
                ToolError::invalid_parameter(tool, field, "expected a number")
            })?;
            if number <= 0.0 || !number.is_finite() {
                return Err(ToolError::invalid_parameter(
                    tool,
                    field,
                    "expected a positive number",
                )
                .into());
            }
            Ok(number)
        }
    }
}

/// The four shared date-filter property schemas.
#[must_use]
pub fn date_filter_properties() -> HashMap<String, PropertySchema> {
    let mut properties = HashMap::new();
    properties.insert(
        "year".to_owned(),
        PropertySchema::new("integer", "Restrict to a calendar year"),
    );
    properties.insert(
        "month".to_owned(),
        PropertySchema::new("integer", "Restrict to a month (1-12); requires year"),
    );
    properties.insert(
        "before".to_owned(),
        PropertySchema::new(
            "string",
            "Only activities before this date (YYYY-MM-DD); overrides year/month",
        ),
    );
    properties.insert(
        "after".to_owned(),
        PropertySchema::new(
            "string",
            "Only activities on or after this date (YYYY-MM-DD); overrides year/month",
        ),
    );
    properties
}
