//! Questions we ask the PostgreSQL catalog about our tables.

use tokio_postgres::GenericClient;

use crate::common::*;

/// Does a table named `name` exist? A name without a schema is resolved using
/// the connection's `search_path`.
pub(crate) async fn table_exists<C>(client: &C, name: &PgName) -> Result<bool>
where
    C: GenericClient + Sync,
{
    let quoted = name.quoted().to_string();
    let row = client
        .query_one(
            "SELECT to_regclass($1::text) IS NOT NULL AS present",
            &[&quoted],
        )
        .await
        .with_context(|| format!("could not look up table {}", name))?;
    Ok(row.get("present"))
}

/// Count the rows in table `name`.
pub(crate) async fn count_rows<C>(client: &C, name: &PgName) -> Result<u64>
where
    C: GenericClient + Sync,
{
    let sql = format!("SELECT COUNT(*) AS count FROM {}", name.quoted());
    let row = client
        .query_one(&sql[..], &[])
        .await
        .with_context(|| format!("could not count rows in {}", name))?;
    let count: i64 = row.get("count");
    u64::try_from(count).context("negative row count")
}

/// The column names of table `name`, in table order.
pub(crate) async fn column_names<C>(client: &C, name: &PgName) -> Result<Vec<String>>
where
    C: GenericClient + Sync,
{
    let quoted = name.quoted().to_string();
    let columns_sql = r#"
SELECT attname::text AS column_name
FROM pg_catalog.pg_attribute
WHERE
    attrelid = $1::text::regclass AND
    attnum > 0 AND
    NOT attisdropped
ORDER BY attnum
"#;
    let rows = client
        .query(columns_sql, &[&quoted])
        .await
        .with_context(|| format!("could not list columns of {}", name))?;
    Ok(rows.into_iter().map(|row| row.get("column_name")).collect())
}
