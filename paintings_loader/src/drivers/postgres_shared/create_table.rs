//! PostgreSQL `CREATE TABLE` statements built from CSV data.

use std::fmt;

use super::Ident;
use crate::common::*;

/// A PostgreSQL column declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PgColumn {
    pub(crate) name: String,
    pub(crate) data_type: DataType,
}

/// A `CREATE TABLE` statement. Every column is nullable, because any CSV cell
/// may be empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PgCreateTable {
    pub(crate) name: PgName,
    pub(crate) columns: Vec<PgColumn>,
}

impl PgCreateTable {
    /// Declare a table named `name` matching the columns of `table`.
    pub(crate) fn from_csv_table(name: PgName, table: &CsvTable) -> Self {
        let columns = table
            .columns()
            .iter()
            .map(|c| PgColumn {
                name: c.name.clone(),
                data_type: c.data_type,
            })
            .collect();
        Self { name, columns }
    }

    /// A quoted, comma-separated list of our column names.
    pub(crate) fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| Ident(&c.name).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PgCreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CREATE TABLE {} (", self.name.quoted())?;
        for (idx, col) in self.columns.iter().enumerate() {
            write!(f, "    {} {}", Ident(&col.name), col.data_type.pg_type())?;
            if idx + 1 < self.columns.len() {
                writeln!(f, ",")?;
            } else {
                writeln!(f)?;
            }
        }
        writeln!(f, ");")
    }
}
