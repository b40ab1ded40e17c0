//! Code shared between our PostgreSQL-related drivers.

use std::{fmt, str::FromStr};
use tokio_postgres::{config::SslMode, tls::MakeTlsConnect, Config, Connection, Socket};
pub(crate) use tokio_postgres::Client;

use crate::common::*;
use crate::tls::rustls_client_config;

mod catalog;
mod create_table;

pub(crate) use self::catalog::{column_names, count_rows, table_exists};
pub(crate) use self::create_table::PgCreateTable;

/// Connect to the database, using TLS unless the URL says `sslmode=disable`.
#[instrument(level = "debug", skip(ctx))]
pub(crate) async fn connect(ctx: &Context, url: &DatabaseUrl) -> Result<Client> {
    let config = Config::from_str(url.with_password())
        .context("could not configure PostgreSQL connection")?;

    if matches!(config.get_ssl_mode(), SslMode::Disable) {
        debug!("connecting without TLS");
        connect_with(ctx, &config, tokio_postgres::NoTls).await
    } else {
        let tls_config = rustls_client_config()?;
        let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);
        connect_with(ctx, &config, tls).await
    }
}

/// Connect using `tls`, and run the connection object in the background.
async fn connect_with<T>(ctx: &Context, config: &Config, tls: T) -> Result<Client>
where
    T: MakeTlsConnect<Socket>,
    Connection<Socket, T::Stream>: Future<Output = Result<(), tokio_postgres::Error>>,
    Connection<Socket, T::Stream>: Send + 'static,
{
    let (client, connection) = config
        .connect(tls)
        .await
        .context("could not connect to PostgreSQL")?;

    // The docs say we need to run this connection object in the background.
    ctx.spawn_worker(
        debug_span!("postgres_shared::connect worker"),
        connection.map_err(|e| -> Error {
            Error::new(e).context("error on PostgreSQL connection")
        }),
    );
    Ok(client)
}

/// A PostgreSQL identifier. This will be printed with quotes so that names
/// like `open`, `day` or `close` never clash with keywords.
pub(crate) struct Ident<'a>(pub(crate) &'a str);

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.replace('"', "\"\""))
    }
}

/// A PostgreSQL table name, including a possible PostgreSQL schema (a
/// namespace, not a table layout).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PgName {
    schema: Option<String>,
    name: String,
}

impl PgName {
    /// Create a new `PgName`.
    pub(crate) fn new(schema: Option<String>, name: impl Into<String>) -> Self {
        Self {
            schema,
            name: name.into(),
        }
    }

    /// The schema (namespace) portion of the name, or `None` if none was
    /// provided.
    pub(crate) fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// The base portion of the name, not including the schema.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Properly quote a name for use in SQL.
    pub(crate) fn quoted(&self) -> PgNameQuoted<'_> {
        PgNameQuoted(self)
    }
}

impl fmt::Display for PgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.{}", schema, self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// A wrapper for `PgName` that quotes each part when displayed.
pub(crate) struct PgNameQuoted<'a>(&'a PgName);

impl fmt::Display for PgNameQuoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = self.0.schema() {
            write!(f, "{}.{}", Ident(schema), Ident(self.0.name()))
        } else {
            write!(f, "{}", Ident(self.0.name()))
        }
    }
}

#[test]
fn postgres_name_is_quoted_correctly() {
    assert_eq!(
        format!("{}", PgName::new(None, "museum").quoted()),
        "\"museum\""
    );
    assert_eq!(
        format!("{}", PgName::new(Some("art".to_owned()), "museum").quoted()),
        "\"art\".\"museum\""
    );

    let with_quote = PgName::new(Some("art".to_owned()), "lat-\"lon");
    assert_eq!(
        format!("{}", with_quote.quoted()),
        "\"art\".\"lat-\"\"lon\""
    );
}

#[test]
fn postgres_name_displays_unquoted() {
    assert_eq!(PgName::new(None, "work").to_string(), "work");
    assert_eq!(
        PgName::new(Some("public".to_owned()), "work").to_string(),
        "public.work"
    );
}
