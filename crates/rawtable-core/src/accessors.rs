//! Typed cell getters on row views
//!
//! Every getter looks the column up by name, trims the value and parses it
//! with locale-independent rules. A missing or blank value is an error unless
//! the `_or` form is used, in which case the default is returned. A value
//! that is present but malformed is always an error.

use crate::error::RowValueError;
use crate::names::eq_ignore_case;
use crate::row::RowView;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::str::FromStr;

type ValueResult<T> = std::result::Result<T, RowValueError>;

/// Enums readable from a cell by variant name (case-insensitive)
pub trait RowEnum: Sized + Copy + 'static {
    /// Declared variant names and their values
    const VARIANTS: &'static [(&'static str, Self)];

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(variant, _)| eq_ignore_case(variant, name))
            .map(|&(_, value)| value)
    }
}

/// Parse a bool literal: true/false (any case), +/-, 1/0
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "+" | "1" => Some(true),
        "-" | "0" => Some(false),
        v if v.eq_ignore_ascii_case("true") => Some(true),
        v if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Parse a float, accepting a comma as decimal separator when no dot is present
pub fn parse_float<T: FromStr>(value: &str) -> Option<T> {
    if let Ok(v) = value.parse() {
        return Some(v);
    }
    if value.contains(',') && !value.contains('.') {
        return value.replacen(',', ".", 1).parse().ok();
    }
    None
}

/// Parse a UTC timestamp with a chrono format string.
///
/// Date-only formats produce midnight.
pub fn parse_datetime_utc(value: &str, format: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, format)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl<'a> RowView<'a> {
    /// Trimmed, non-blank value of a column, or an error explaining why not
    fn required(&self, column: &str) -> ValueResult<&str> {
        self.present(column).ok_or_else(|| {
            if self.has_column_in_header(column) {
                self.make_error(format!("value of column '{}' is empty", column))
            } else {
                self.make_error(format!("column '{}' not found", column))
            }
        })
    }

    /// Trimmed, non-blank value of a column, `None` when absent or blank
    fn present(&self, column: &str) -> Option<&str> {
        self.raw_value(column)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn parse_required<T>(
        &self,
        column: &str,
        kind: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> ValueResult<T> {
        let value = self.required(column)?;
        parse(value).ok_or_else(|| self.parse_error(column, kind, value))
    }

    fn parse_or<T>(
        &self,
        column: &str,
        kind: &str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> ValueResult<T> {
        match self.present(column) {
            Some(value) => parse(value).ok_or_else(|| self.parse_error(column, kind, value)),
            None => Ok(default),
        }
    }

    fn parse_error(&self, column: &str, kind: &str, value: &str) -> RowValueError {
        self.make_error(format!(
            "cannot parse value '{}' of column '{}' as {}",
            value, column, kind
        ))
    }

    /// Raw (untrimmed) string value; blank values are an error
    pub fn get_string(&self, column: &str) -> ValueResult<&str> {
        self.required(column)?;
        Ok(self.raw_value(column).unwrap_or_default())
    }

    pub fn get_string_or<'s>(&'s self, column: &str, default: &'s str) -> &'s str {
        match self.raw_value(column) {
            Some(v) if !v.trim().is_empty() => v,
            _ => default,
        }
    }

    pub fn get_int(&self, column: &str) -> ValueResult<i32> {
        self.parse_required(column, "int", |v| v.parse().ok())
    }

    pub fn get_int_or(&self, column: &str, default: i32) -> ValueResult<i32> {
        self.parse_or(column, "int", default, |v| v.parse().ok())
    }

    pub fn get_long(&self, column: &str) -> ValueResult<i64> {
        self.parse_required(column, "long", |v| v.parse().ok())
    }

    pub fn get_long_or(&self, column: &str, default: i64) -> ValueResult<i64> {
        self.parse_or(column, "long", default, |v| v.parse().ok())
    }

    pub fn get_float(&self, column: &str) -> ValueResult<f32> {
        self.parse_required(column, "float", parse_float)
    }

    pub fn get_float_or(&self, column: &str, default: f32) -> ValueResult<f32> {
        self.parse_or(column, "float", default, parse_float)
    }

    pub fn get_double(&self, column: &str) -> ValueResult<f64> {
        self.parse_required(column, "double", parse_float)
    }

    pub fn get_double_or(&self, column: &str, default: f64) -> ValueResult<f64> {
        self.parse_or(column, "double", default, parse_float)
    }

    /// Bool value; a blank cell reads as `false`, an unknown column is an error
    pub fn get_bool(&self, column: &str) -> ValueResult<bool> {
        if !self.has_column_in_header(column) {
            return Err(self.make_error(format!("column '{}' not found", column)));
        }
        self.parse_or(column, "bool", false, parse_bool)
    }

    pub fn get_bool_or(&self, column: &str, default: bool) -> ValueResult<bool> {
        self.parse_or(column, "bool", default, parse_bool)
    }

    pub fn get_enum<T: RowEnum>(&self, column: &str) -> ValueResult<T> {
        self.parse_required(column, std::any::type_name::<T>(), T::from_name)
    }

    pub fn get_enum_or<T: RowEnum>(&self, column: &str, default: T) -> ValueResult<T> {
        self.parse_or(column, std::any::type_name::<T>(), default, T::from_name)
    }

    /// Timestamp parsed with a chrono format (e.g. `"%d/%m/%Y %H:%M"`)
    pub fn get_datetime_utc(&self, column: &str, format: &str) -> ValueResult<DateTime<Utc>> {
        self.parse_required(column, "date", |v| parse_datetime_utc(v, format))
    }

    pub fn get_datetime_utc_or(
        &self,
        column: &str,
        format: &str,
        default: DateTime<Utc>,
    ) -> ValueResult<DateTime<Utc>> {
        self.parse_or(column, "date", default, |v| parse_datetime_utc(v, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_literals() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("+"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("-"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("3.0"), None);
    }

    #[test]
    fn test_parse_float_comma_fallback() {
        assert_eq!(parse_float::<f32>("3.0"), Some(3.0));
        assert_eq!(parse_float::<f32>("3,0"), Some(3.0));
        assert_eq!(parse_float::<f64>("1,000.5"), None);
        assert_eq!(parse_float::<f64>("string"), None);
    }

    #[test]
    fn test_parse_datetime_formats() {
        let date = parse_datetime_utc("31/12/2019", "%d/%m/%Y").unwrap();
        assert_eq!(date.to_rfc3339(), "2019-12-31T00:00:00+00:00");

        let dt = parse_datetime_utc("31/12/2019 23:59", "%d/%m/%Y %H:%M").unwrap();
        assert_eq!(dt.to_rfc3339(), "2019-12-31T23:59:00+00:00");

        assert!(parse_datetime_utc("31/12/2019 23:59", "%d/%m/%Y").is_none());
        assert!(parse_datetime_utc("31.12.2019", "%d/%m/%Y").is_none());
    }
}
