//! Field kinds and realized field values.
//!
//! A `FieldKind` says how the raw value of an input is validated and
//! serialized; a `FieldValue` is what ends up bound to an INSERT parameter.

use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_hhmm, parse_hhmm, parse_time};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::{ToSql, ToSqlOutput, Value};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Calendar date, stored as `yyyy-MM-dd`.
    Date,
    /// Time of day, stored as `hh:mm:ss`.
    Time,
    /// Integer slider bounded by `min..=max`.
    Slider { min: i64, max: i64 },
    /// Non-negative free integer (calories, ...).
    Integer,
    /// One of a fixed set of integers (cup sizes).
    Choice(&'static [i64]),
    /// Checkbox, stored as 0/1.
    Check,
    /// Free text; must not be blank.
    Text,
    /// Elapsed `HH:MM`, stored as text.
    Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Date(NaiveDate),
    Time(NaiveTime),
    Int(i64),
    Bool(bool),
    Text(String),
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::Slider { .. } => "slider",
            FieldKind::Integer => "integer",
            FieldKind::Choice(_) => "choice",
            FieldKind::Check => "checkbox",
            FieldKind::Text => "text",
            FieldKind::Duration => "duration",
        }
    }

    /// SQLite column type used by the migrations.
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldKind::Slider { .. }
            | FieldKind::Integer
            | FieldKind::Choice(_)
            | FieldKind::Check => "INTEGER",
            _ => "TEXT",
        }
    }

    /// Parse a raw string typed on the command line.
    pub fn parse(&self, input: &str, raw: &str) -> AppResult<FieldValue> {
        let raw = raw.trim();
        let value = match self {
            FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(FieldValue::Date)
                .map_err(|_| AppError::InvalidDate(raw.to_string()))?,
            FieldKind::Time => parse_time(raw)
                .map(FieldValue::Time)
                .ok_or_else(|| AppError::InvalidTime(raw.to_string()))?,
            FieldKind::Slider { .. } | FieldKind::Integer | FieldKind::Choice(_) => raw
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| AppError::invalid_input(input, format!("'{}' is not a number", raw)))?,
            FieldKind::Check => match raw.to_lowercase().as_str() {
                "1" | "y" | "yes" | "true" | "on" => FieldValue::Bool(true),
                "0" | "n" | "no" | "false" | "off" => FieldValue::Bool(false),
                other => {
                    return Err(AppError::invalid_input(
                        input,
                        format!("'{}' is not a checkbox state (use yes/no)", other),
                    ));
                }
            },
            FieldKind::Text => FieldValue::Text(raw.to_string()),
            FieldKind::Duration => {
                let mins = parse_hhmm(raw).ok_or_else(|| AppError::InvalidTime(raw.to_string()))?;
                FieldValue::Text(format_hhmm(mins))
            }
        };

        self.realize(input, Some(value))
    }

    /// Validate the current value of an input against this kind.
    pub fn realize(&self, input: &str, value: Option<FieldValue>) -> AppResult<FieldValue> {
        let value = value.ok_or_else(|| AppError::invalid_input(input, "no value"))?;

        match (self, value) {
            (FieldKind::Date, v @ FieldValue::Date(_)) => Ok(v),
            (FieldKind::Time, v @ FieldValue::Time(_)) => Ok(v),
            (FieldKind::Slider { min, max }, FieldValue::Int(n)) => {
                if n < *min || n > *max {
                    Err(AppError::invalid_input(
                        input,
                        format!("{} is outside {}..={}", n, min, max),
                    ))
                } else {
                    Ok(FieldValue::Int(n))
                }
            }
            (FieldKind::Integer, FieldValue::Int(n)) => {
                if n < 0 {
                    Err(AppError::invalid_input(input, "must not be negative"))
                } else {
                    Ok(FieldValue::Int(n))
                }
            }
            (FieldKind::Choice(allowed), FieldValue::Int(n)) => {
                if allowed.contains(&n) {
                    Ok(FieldValue::Int(n))
                } else {
                    Err(AppError::invalid_input(
                        input,
                        format!("{} is not one of {:?}", n, allowed),
                    ))
                }
            }
            (FieldKind::Check, v @ FieldValue::Bool(_)) => Ok(v),
            (FieldKind::Text, FieldValue::Text(s)) => {
                if s.trim().is_empty() {
                    Err(AppError::invalid_input(input, "must not be empty"))
                } else {
                    Ok(FieldValue::Text(s))
                }
            }
            (FieldKind::Duration, FieldValue::Text(s)) => parse_hhmm(&s)
                .map(|m| FieldValue::Text(format_hhmm(m)))
                .ok_or(AppError::InvalidTime(s)),
            (kind, other) => Err(AppError::invalid_input(
                input,
                format!("expected a {} value, got {}", kind.name(), other),
            )),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            FieldValue::Time(t) => write!(f, "{}", t.format(TIME_FORMAT)),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", if *b { 1 } else { 0 }),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            FieldValue::Int(n) => ToSqlOutput::Owned(Value::Integer(*n)),
            FieldValue::Bool(b) => ToSqlOutput::Owned(Value::Integer(i64::from(*b))),
            FieldValue::Text(s) => ToSqlOutput::from(s.as_str()),
            other => ToSqlOutput::Owned(Value::Text(other.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_rejects_out_of_range() {
        let kind = FieldKind::Slider { min: 0, max: 10 };
        assert_eq!(kind.parse("mood", "7").unwrap(), FieldValue::Int(7));
        assert!(kind.parse("mood", "11").is_err());
        assert!(kind.parse("mood", "-1").is_err());
        assert!(kind.parse("mood", "abc").is_err());
    }

    #[test]
    fn time_is_serialized_with_seconds() {
        let v = FieldKind::Time.parse("diet_time", "07:05").unwrap();
        assert_eq!(v.to_string(), "07:05:00");
    }

    #[test]
    fn date_is_serialized_iso() {
        let v = FieldKind::Date.parse("diet_date", "2025-03-09").unwrap();
        assert_eq!(v.to_string(), "2025-03-09");
        assert!(FieldKind::Date.parse("diet_date", "09/03/2025").is_err());
    }

    #[test]
    fn checkbox_accepts_common_spellings() {
        assert_eq!(
            FieldKind::Check.parse("shower_check", "yes").unwrap(),
            FieldValue::Bool(true)
        );
        assert_eq!(
            FieldKind::Check.parse("shower_check", "0").unwrap(),
            FieldValue::Bool(false)
        );
        assert!(FieldKind::Check.parse("shower_check", "maybe").is_err());
    }

    #[test]
    fn choice_only_accepts_listed_values() {
        let kind = FieldKind::Choice(&[8, 16, 24, 32]);
        assert!(kind.parse("amount", "16").is_ok());
        assert!(kind.parse("amount", "12").is_err());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(FieldKind::Text.parse("pet_notes", "   ").is_err());
        assert_eq!(
            FieldKind::Text.parse("pet_notes", "ate well").unwrap(),
            FieldValue::Text("ate well".into())
        );
    }

    #[test]
    fn kind_mismatch_is_an_input_error() {
        let err = FieldKind::Check
            .realize("shower_check", Some(FieldValue::Int(1)))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { .. }));
        assert!(FieldKind::Integer.realize("calories", None).is_err());
    }

    #[test]
    fn duration_is_normalized() {
        let v = FieldKind::Duration.parse("total_hours_slept", "8:5").unwrap();
        assert_eq!(v, FieldValue::Text("08:05".into()));
    }
}
