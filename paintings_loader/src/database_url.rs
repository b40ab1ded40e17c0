//! PostgreSQL connection URLs that can be printed and logged safely.

use std::{borrow::Cow, fmt, str::FromStr};

use crate::common::*;

/// Placeholder shown instead of a real password.
const HIDDEN_PASSWORD: &str = "XXXXXX";

/// A `postgres://` or `postgresql://` URL naming a user, host, port and
/// database. `Display` and `Debug` never reveal the password.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct DatabaseUrl(Url);

impl DatabaseUrl {
    /// Wrap `url`, checking that it addresses a PostgreSQL database.
    pub(crate) fn new(url: Url) -> Result<Self> {
        match url.scheme() {
            "postgres" | "postgresql" => {}
            other => {
                return Err(format_err!(
                    "expected a postgres:// URL, found scheme {:?}",
                    other
                ))
            }
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(format_err!("database URL must include a host"));
        }
        if url.path().trim_start_matches('/').is_empty() {
            return Err(format_err!("database URL must include a database name"));
        }
        Ok(DatabaseUrl(url))
    }

    /// The full URL, including the password. Only hand this to the driver.
    pub(crate) fn with_password(&self) -> &str {
        self.0.as_str()
    }

    /// The name of the database we connect to.
    pub(crate) fn database_name(&self) -> &str {
        self.0.path().trim_start_matches('/')
    }

    /// Our URL with any password replaced by a placeholder.
    fn without_password(&self) -> Cow<'_, Url> {
        if self.0.password().is_some() {
            let mut url = self.0.clone();
            // URLs with a host always accept a password.
            let _ = url.set_password(Some(HIDDEN_PASSWORD));
            Cow::Owned(url)
        } else {
            Cow::Borrowed(&self.0)
        }
    }
}

impl fmt::Debug for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.without_password().as_str(), f)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.without_password(), f)
    }
}

impl FromStr for DatabaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Be careful not to print `s` in this error, it contains the password.
        let url = Url::parse(s).context("cannot parse database URL")?;
        DatabaseUrl::new(url)
    }
}
