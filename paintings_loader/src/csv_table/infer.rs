//! Column type inference for CSV data.

use std::{borrow::Cow, fmt};

use crate::common::*;

/// The type of a column, as inferred from its cells.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DataType {
    /// `true` or `false`, in any case.
    Boolean,
    /// A 64-bit signed integer.
    Bigint,
    /// A 64-bit float.
    DoublePrecision,
    /// Anything else.
    Text,
}

impl DataType {
    /// The PostgreSQL type we use to store this column.
    pub(crate) fn pg_type(self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Bigint => "bigint",
            DataType::DoublePrecision => "double precision",
            DataType::Text => "text",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pg_type().fmt(f)
    }
}

/// Tracks which types are still possible for a column as we see its cells.
///
/// Empty cells are nulls and don't constrain the type. A column which never
/// sees a non-empty cell is `Text`.
#[derive(Clone, Debug)]
pub(crate) struct TypeCandidate {
    saw_value: bool,
    could_be_boolean: bool,
    could_be_bigint: bool,
    could_be_double: bool,
}

impl Default for TypeCandidate {
    fn default() -> Self {
        Self {
            saw_value: false,
            could_be_boolean: true,
            could_be_bigint: true,
            could_be_double: true,
        }
    }
}

impl TypeCandidate {
    /// Narrow our candidate types using `cell`.
    pub(crate) fn observe(&mut self, cell: &str) {
        let cell = cell.trim();
        if cell.is_empty() {
            return;
        }
        self.saw_value = true;
        if self.could_be_boolean && parse_bool(cell).is_none() {
            self.could_be_boolean = false;
        }
        if self.could_be_bigint && cell.parse::<i64>().is_err() {
            self.could_be_bigint = false;
        }
        if self.could_be_double && cell.parse::<f64>().is_err() {
            self.could_be_double = false;
        }
    }

    /// The narrowest type that fits every cell we've seen.
    pub(crate) fn decide(&self) -> DataType {
        if !self.saw_value {
            DataType::Text
        } else if self.could_be_boolean {
            DataType::Boolean
        } else if self.could_be_bigint {
            DataType::Bigint
        } else if self.could_be_double {
            DataType::DoublePrecision
        } else {
            DataType::Text
        }
    }
}

/// Parse `true` or `false`, ignoring ASCII case.
fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A single cell, converted to its column's type.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Convert `cell` to a value of `data_type`. Empty cells are `Null`, and
    /// so are blank cells in non-`Text` columns.
    pub(crate) fn parse(cell: &str, data_type: DataType) -> Result<Value> {
        if cell.is_empty() {
            return Ok(Value::Null);
        }
        // Text keeps its whitespace. Other types ignore it.
        let trimmed = match data_type {
            DataType::Text => return Ok(Value::Text(cell.to_owned())),
            _ => cell.trim(),
        };
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }
        match data_type {
            DataType::Boolean => parse_bool(trimmed)
                .map(Value::Boolean)
                .ok_or_else(|| format_err!("expected true or false, found {:?}", cell)),
            DataType::Bigint => Ok(Value::Integer(
                trimmed
                    .parse::<i64>()
                    .with_context(|| format!("expected an integer, found {:?}", cell))?,
            )),
            DataType::DoublePrecision => Ok(Value::Float(
                trimmed
                    .parse::<f64>()
                    .with_context(|| format!("expected a number, found {:?}", cell))?,
            )),
            DataType::Text => Ok(Value::Text(cell.to_owned())),
        }
    }

    /// Format this value as a field for PostgreSQL's CSV `COPY` format, or
    /// `None` for a null.
    pub(crate) fn to_copy_field(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Boolean(true) => Some(Cow::Borrowed("true")),
            Value::Boolean(false) => Some(Cow::Borrowed("false")),
            Value::Integer(i) => Some(Cow::Owned(i.to_string())),
            Value::Float(f) if f.is_nan() => Some(Cow::Borrowed("NaN")),
            Value::Float(f) if f.is_infinite() && *f > 0.0 => {
                Some(Cow::Borrowed("Infinity"))
            }
            Value::Float(f) if f.is_infinite() => Some(Cow::Borrowed("-Infinity")),
            Value::Float(f) => Some(Cow::Owned(f.to_string())),
            Value::Text(s) => Some(Cow::Borrowed(s)),
        }
    }
}
