//! A driver which prints the SQL we would run instead of running it.

use std::io::Write;

use crate::common::*;
use crate::drivers::postgres_shared::PgCreateTable;
use crate::loader::TableWriter;

/// Writes `DROP TABLE` and `CREATE TABLE` statements for each table to `out`,
/// without touching a database.
pub(crate) struct SqlPrinter<W> {
    out: W,
}

impl<W: Write + Send> SqlPrinter<W> {
    /// Print SQL to `out`.
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    /// Return our output.
    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: Write + Send> TableWriter for SqlPrinter<W> {
    async fn write_table(
        &mut self,
        name: &PgName,
        table: &CsvTable,
        mode: ReplaceMode,
    ) -> Result<u64> {
        let create_table = PgCreateTable::from_csv_table(name.clone(), table);
        writeln!(self.out, "-- {}: {} rows", name, table.rows().len())?;
        if mode.drops_existing() {
            writeln!(self.out, "DROP TABLE IF EXISTS {};", name.quoted())?;
        }
        writeln!(self.out, "{}", create_table)?;
        self.out.flush().context("could not write SQL")?;
        Ok(table.rows().len() as u64)
    }
}
