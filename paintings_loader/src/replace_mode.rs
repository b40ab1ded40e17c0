//! What to do if a destination table already exists.

use std::{fmt, str::FromStr};

use crate::common::*;

/// What to do if the destination table already exists.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum ReplaceMode {
    /// Drop the existing table, then recreate it from the schema inferred
    /// from the new data. Nothing of the old table's contents or columns
    /// survives.
    #[default]
    Full,
    /// If the destination exists, return an error and leave it untouched.
    Error,
}

impl ReplaceMode {
    /// Should we drop any existing table before creating the new one?
    pub(crate) fn drops_existing(self) -> bool {
        self == ReplaceMode::Full
    }
}

impl fmt::Display for ReplaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplaceMode::Full => "full".fmt(f),
            ReplaceMode::Error => "error".fmt(f),
        }
    }
}

impl FromStr for ReplaceMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<ReplaceMode> {
        match s {
            "full" => Ok(ReplaceMode::Full),
            "error" => Ok(ReplaceMode::Error),
            // Incremental modes are deliberately absent.
            "append" | "upsert" => Err(format_err!(
                "replace mode {:?} is not supported; every load replaces the table",
                s
            )),
            _ => Err(format_err!("unknown replace mode: {}", s)),
        }
    }
}

#[test]
fn parse_and_display() {
    let examples = [("full", ReplaceMode::Full), ("error", ReplaceMode::Error)];
    for (serialized, value) in &examples {
        assert_eq!(&serialized.parse::<ReplaceMode>().unwrap(), value);
        assert_eq!(serialized, &value.to_string());
    }
}

#[test]
fn default_is_full_replace() {
    assert_eq!(ReplaceMode::default(), ReplaceMode::Full);
    assert!(ReplaceMode::Full.drops_existing());
    assert!(!ReplaceMode::Error.drops_existing());
}

#[test]
fn incremental_modes_are_rejected() {
    let err = "append".parse::<ReplaceMode>().unwrap_err();
    assert!(err.to_string().contains("not supported"));
    assert!("overwrite".parse::<ReplaceMode>().is_err());
}
