//! A driver for writing tables to PostgreSQL.

use bytes::Bytes;
use tokio_postgres::Transaction;

use crate::common::*;
use crate::drivers::postgres_shared::{
    column_names, count_rows, table_exists, Client, PgCreateTable,
};
use crate::loader::TableWriter;

/// How many rows we send to `COPY` per chunk.
const ROWS_PER_CHUNK: usize = 1_000;

/// Writes tables over a single PostgreSQL connection.
pub(crate) struct PostgresWriter {
    client: Client,
}

impl PostgresWriter {
    /// Write tables using `client`.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableWriter for PostgresWriter {
    #[instrument(level = "debug", skip(self, table), fields(table = %name))]
    async fn write_table(
        &mut self,
        name: &PgName,
        table: &CsvTable,
        mode: ReplaceMode,
    ) -> Result<u64> {
        // One transaction per table, so a failure leaves this table as it was.
        let tx = self
            .client
            .transaction()
            .await
            .context("could not begin transaction")?;
        let create_table = PgCreateTable::from_csv_table(name.clone(), table);
        prepare_table(&tx, &create_table, mode).await?;
        copy_rows(&tx, &create_table, table.rows()).await?;
        let rows = verify_table(&tx, name, table).await?;
        tx.commit()
            .await
            .with_context(|| format!("could not commit {}", name))?;
        Ok(rows)
    }
}

/// Drop any existing table (or refuse to touch it), then create it.
async fn prepare_table(
    tx: &Transaction<'_>,
    create_table: &PgCreateTable,
    mode: ReplaceMode,
) -> Result<()> {
    let name = &create_table.name;
    if mode.drops_existing() {
        debug!("deleting destination table if exists");
        let drop_sql = format!("DROP TABLE IF EXISTS {}", name.quoted());
        tx.batch_execute(&drop_sql)
            .await
            .with_context(|| format!("error deleting existing {}", name))?;
    } else if table_exists(tx, name).await? {
        return Err(format_err!(
            "table {} already exists (replace mode is {})",
            name,
            mode
        ));
    }

    debug!("creating destination table");
    trace!(sql = %create_table, "CREATE TABLE");
    tx.batch_execute(&create_table.to_string())
        .await
        .with_context(|| format!("error creating table {}", name))?;
    Ok(())
}

/// Stream our rows into the table using `COPY FROM STDIN`.
async fn copy_rows(
    tx: &Transaction<'_>,
    create_table: &PgCreateTable,
    rows: &[Vec<Value>],
) -> Result<()> {
    let name = &create_table.name;
    let columns = create_table.column_list();
    // We never produce empty non-null strings, so any empty field is a null,
    // even though `encode_chunk` quotes it.
    let copy_sql = format!(
        "COPY {} ({}) FROM STDIN WITH (FORMAT csv, FORCE_NULL ({}))",
        name.quoted(),
        columns,
        columns,
    );

    debug!("copying data into table");
    let sink = tx
        .copy_in::<_, Bytes>(&copy_sql)
        .await
        .with_context(|| format!("error starting COPY into {}", name))?;
    let mut sink = Box::pin(sink);
    for chunk in rows.chunks(ROWS_PER_CHUNK) {
        sink.send(encode_chunk(chunk)?)
            .await
            .with_context(|| format!("error copying data into {}", name))?;
    }
    let copied = sink
        .as_mut()
        .finish()
        .await
        .with_context(|| format!("error finishing COPY into {}", name))?;
    trace!(copied, "COPY finished");
    Ok(())
}

/// Encode rows as PostgreSQL-compatible CSV, with nulls as empty fields.
///
/// Every field is quoted, so a value like `\.` can never be mistaken for the
/// end-of-data marker.
fn encode_chunk(rows: &[Vec<Value>]) -> Result<Bytes> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(vec![]);
    for row in rows {
        let fields = row.iter().map(|value| value.to_copy_field().unwrap_or_default());
        wtr.write_record(fields.map(|field| field.into_owned()))?;
    }
    let buf = wtr.into_inner().context("could not encode CSV for COPY")?;
    Ok(Bytes::from(buf))
}

/// Check that the table we built matches the CSV file.
async fn verify_table(tx: &Transaction<'_>, name: &PgName, table: &CsvTable) -> Result<u64> {
    let rows = count_rows(tx, name).await?;
    if rows != table.rows().len() as u64 {
        return Err(format_err!(
            "expected {} rows in {}, found {}",
            table.rows().len(),
            name,
            rows
        ));
    }
    let actual_columns = column_names(tx, name).await?;
    if !actual_columns.iter().map(|c| &c[..]).eq(table.column_names()) {
        return Err(format_err!(
            "expected columns {:?} in {}, found {:?}",
            table.column_names().collect::<Vec<_>>(),
            name,
            actual_columns
        ));
    }
    Ok(rows)
}
