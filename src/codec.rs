//! Row codec: conversion between raw engine values and record fields.
//!
//! Reading happens in two steps. [`decode_field`] applies the column-kind
//! coercion (a `BIT` becomes a boolean, a textual `INTEGER` becomes an integer)
//! and [`FromValue`] then narrows the decoded value to the record's field type,
//! which is where an `INTEGER` turns into an `i32` or stays an `i64`.

use chrono::NaiveDateTime;

use crate::column::{Column, ColumnType};
use crate::error::{ConversionError, Result};
use crate::table::{Row, Table};
use crate::value::{Value, DATETIME_FORMAT};

/// Typed extraction from a decoded [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError>;
}

fn mismatch<T>(expected: &'static str, found: &Value) -> std::result::Result<T, ConversionError> {
    Err(ConversionError::TypeMismatch {
        expected,
        found: found.type_name(),
    })
}

impl FromValue for Value {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError> {
        Ok(value)
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError> {
        match value {
            Value::Integer(i) => Ok(i),
            Value::Boolean(b) => Ok(i64::from(b)),
            other => mismatch("integer", &other),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| ConversionError::OutOfRange(wide))
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError> {
        match value {
            Value::Boolean(b) => Ok(b),
            Value::Integer(i) => Ok(i == 1),
            other => mismatch("boolean", &other),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError> {
        match value {
            Value::Real(f) => Ok(f),
            Value::Integer(i) => Ok(i as f64),
            other => mismatch("real", &other),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError> {
        match value {
            Value::Text(s) => Ok(s),
            other => mismatch("text", &other),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError> {
        match value {
            Value::Blob(b) => Ok(b),
            other => mismatch("blob", &other),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError> {
        match value {
            Value::Text(s) => parse_datetime(&s),
            other => mismatch("datetime text", &other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> std::result::Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn parse_datetime(s: &str) -> std::result::Result<NaiveDateTime, ConversionError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|_| ConversionError::InvalidDateTime(s.to_string()))
}

/// Apply the column-kind coercion to a raw engine value.
///
/// `NULL` stays `NULL` whatever the column kind. A `BIT` is true iff its
/// integer value is exactly `1`. A real or numeric text in an `INTEGER` column
/// becomes an integer, reals rounding half to even. Everything else passes
/// through unchanged.
pub fn decode_field(raw: Value, column_type: ColumnType) -> Value {
    match (raw, column_type) {
        (Value::Null, _) => Value::Null,
        (Value::Integer(i), ColumnType::Bit) => Value::Boolean(i == 1),
        (Value::Real(f), ColumnType::Bit) => Value::Boolean(f == 1.0),
        (Value::Text(s), ColumnType::Bit) => match s.trim().parse::<i64>() {
            Ok(i) => Value::Boolean(i == 1),
            Err(_) => Value::Text(s),
        },
        (Value::Real(f), ColumnType::Integer) => match real_to_integer(f) {
            Some(i) => Value::Integer(i),
            None => Value::Real(f),
        },
        (Value::Text(s), ColumnType::Integer) => match s.trim().parse::<i64>() {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Text(s),
        },
        (other, _) => other,
    }
}

// i64::MAX is not representable as f64; 2^63 is the first value out of range.
fn real_to_integer(f: f64) -> Option<i64> {
    let rounded = f.round_ties_even();
    if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

/// Build a record from one result row.
///
/// Only the columns declared by `T` are read. A declared column missing from
/// the result is skipped, leaving it to [`Table::from_row`] to fall back on the
/// field's blank value.
pub fn deserialize_row<T: Table>(raw: &Row) -> Result<T> {
    let mut decoded = Row::new();
    for column in T::columns() {
        if let Some(value) = raw.get(column.name) {
            decoded.set(column.name, decode_field(value.clone(), column.column_type));
        }
    }
    T::from_row(&decoded)
}

/// Value to bind for `column`. Absent fields serialize as `NULL`.
pub fn serialize_field(row: &Row, column: &Column) -> Value {
    row.get(column.name).cloned().unwrap_or(Value::Null)
}
