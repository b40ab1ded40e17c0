//! The fixed catalog of datasets we know how to load.

use std::str::FromStr;

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::common::*;

/// One of the datasets we load. Each name is both the stem of a CSV file and
/// the name of the table it is loaded into.
///
/// The declaration order is the load order.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum DatasetName {
    Artist,
    CanvasSize,
    ImageLink,
    MuseumHours,
    Museum,
    ProductSize,
    Subject,
    Work,
}

impl DatasetName {
    /// All datasets, in load order.
    pub(crate) fn all() -> impl Iterator<Item = DatasetName> {
        Self::iter()
    }

    /// Parse a dataset name, with an error message listing the valid ones.
    pub(crate) fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            format_err!(
                "unknown dataset {:?} (expected one of: {})",
                s,
                Self::all().join(", "),
            )
        })
    }

    /// The file we read this dataset from, relative to the source directory.
    pub(crate) fn csv_file_name(self) -> String {
        format!("{}.csv", self)
    }

    /// The table we write this dataset to, optionally inside a PostgreSQL
    /// namespace.
    pub(crate) fn table_name(self, table_schema: Option<&str>) -> PgName {
        PgName::new(table_schema.map(str::to_owned), self.to_string())
    }
}

#[test]
fn datasets_are_in_load_order() {
    let names = DatasetName::all()
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        &[
            "artist",
            "canvas_size",
            "image_link",
            "museum_hours",
            "museum",
            "product_size",
            "subject",
            "work",
        ]
    );
}

#[test]
fn dataset_names_round_trip_through_parse() {
    for name in DatasetName::all() {
        assert_eq!(DatasetName::parse(&name.to_string()).unwrap(), name);
    }
}

#[test]
fn unknown_dataset_lists_valid_names() {
    let err = DatasetName::parse("paintings").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("\"paintings\""));
    assert!(msg.contains("museum_hours"));
}

#[test]
fn file_and_table_names_match_the_dataset() {
    assert_eq!(DatasetName::MuseumHours.csv_file_name(), "museum_hours.csv");
    assert_eq!(
        DatasetName::Museum.table_name(None).quoted().to_string(),
        "\"museum\""
    );
    assert_eq!(
        DatasetName::Work.table_name(Some("art")).quoted().to_string(),
        "\"art\".\"work\""
    );
}
