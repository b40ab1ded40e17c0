//! Configuration file support, and merging it with flags and environment
//! variables.
use std::{
    env, fmt,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use toml_edit::DocumentMut;

use crate::common::*;

/// Environment variable overriding our configuration directory.
const CONFIG_DIR_VAR: &str = "PAINTINGS_LOADER_CONFIG_DIR";
/// Environment variable holding the source directory.
pub(crate) const SOURCE_DIR_VAR: &str = "PAINTINGS_SOURCE_DIR";
/// Environment variable holding the database URL.
pub(crate) const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Find the path to our configuration directory.
pub(crate) fn config_dir() -> Result<PathBuf> {
    // Use `var_os` instead of `var`, because if it returns a non-Unicode path,
    // we can hand it off directly to `PathBuf`.
    match env::var_os(CONFIG_DIR_VAR) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(dirs::config_dir()
            // AFAIK, this only fails under weird conditions, such as no home
            // directory.
            .ok_or_else(|| format_err!("could not find user config dir"))?
            .join("paintings_loader")),
    }
}

/// Find the path to our configuration file.
pub(crate) fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("paintings_loader.toml"))
}

/// A configuration file key.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Key(&'static str);

impl Key {
    pub(crate) const SOURCE_DIR: Key = Key("source_dir");
    pub(crate) const DATABASE_URL: Key = Key("database_url");
    pub(crate) const TABLE_SCHEMA: Key = Key("table_schema");
    pub(crate) const REPLACE_MODE: Key = Key("replace_mode");
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Our `paintings_loader.toml` configuration file. A missing file behaves
/// like an empty one.
#[derive(Debug)]
pub(crate) struct Configuration {
    /// The path from which we read this file.
    path: PathBuf,
    /// Our raw configuration data.
    doc: DocumentMut,
}

impl Configuration {
    /// Load our default configuration.
    pub(crate) fn try_default() -> Result<Self> {
        Self::from_path(&config_file()?)
    }

    /// Load the configuration file at `path`.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        match File::open(path) {
            Ok(rdr) => Ok(Self::from_reader(path.to_owned(), rdr)
                .with_context(|| format!("could not read file {}", path.display()))?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self {
                path: path.to_owned(),
                doc: DocumentMut::default(),
            }),
            Err(err) => {
                Err(err).context(format!("could not open file {}", path.display()))
            }
        }
    }

    /// Load a configuration file from the specified reader.
    fn from_reader<R: Read>(path: PathBuf, mut rdr: R) -> Result<Self> {
        let mut buf = String::new();
        rdr.read_to_string(&mut buf)?;
        let doc = buf.parse::<DocumentMut>()?;
        Ok(Self { path, doc })
    }

    /// The path of our configuration file.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Get the string value of `key`, if present.
    fn string_value(&self, key: Key) -> Result<Option<&str>> {
        match self.doc.get(key.0) {
            None => Ok(None),
            Some(item) => item.as_str().map(Some).ok_or_else(|| {
                format_err!(
                    "expected {} in {} to be a string",
                    key,
                    self.path.display()
                )
            }),
        }
    }

    /// Parse the value of `key` using `FromStr`.
    fn parsed_value<T>(&self, key: Key) -> Result<Option<T>>
    where
        T: std::str::FromStr<Err = Error>,
    {
        self.string_value(key)?
            .map(|s| {
                s.parse::<T>().with_context(|| {
                    format!("could not parse {} in {}", key, self.path.display())
                })
            })
            .transpose()
    }
}

/// Values given on the command line, which beat everything else.
#[derive(Clone, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) source_dir: Option<PathBuf>,
    pub(crate) database_url: Option<DatabaseUrl>,
    pub(crate) table_schema: Option<String>,
    pub(crate) replace_mode: Option<ReplaceMode>,
}

/// Our effective settings, taken from flags, then environment variables,
/// then the configuration file, then defaults.
#[derive(Clone, Debug)]
pub(crate) struct Settings {
    pub(crate) source_dir: PathBuf,
    pub(crate) database_url: Option<DatabaseUrl>,
    pub(crate) table_schema: Option<String>,
    pub(crate) replace_mode: ReplaceMode,
}

impl Settings {
    /// Merge our settings. `env_var` looks up environment variables, and is
    /// normally `|name| env::var(name).ok()`.
    pub(crate) fn resolve<F>(
        config: &Configuration,
        overrides: Overrides,
        env_var: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_dir = match overrides.source_dir {
            Some(dir) => dir,
            None => match env_var(SOURCE_DIR_VAR) {
                Some(dir) => PathBuf::from(dir),
                None => config
                    .string_value(Key::SOURCE_DIR)?
                    .map_or_else(|| PathBuf::from("."), PathBuf::from),
            },
        };

        let database_url = match overrides.database_url {
            Some(url) => Some(url),
            None => match env_var(DATABASE_URL_VAR) {
                Some(url) => Some(
                    url.parse::<DatabaseUrl>()
                        .with_context(|| format!("could not parse ${}", DATABASE_URL_VAR))?,
                ),
                None => config.parsed_value::<DatabaseUrl>(Key::DATABASE_URL)?,
            },
        };

        let table_schema = match overrides.table_schema {
            Some(schema) => Some(schema),
            None => config.string_value(Key::TABLE_SCHEMA)?.map(str::to_owned),
        };

        let replace_mode = match overrides.replace_mode {
            Some(mode) => mode,
            None => config
                .parsed_value::<ReplaceMode>(Key::REPLACE_MODE)?
                .unwrap_or_default(),
        };

        Ok(Settings {
            source_dir,
            database_url,
            table_schema,
            replace_mode,
        })
    }

    /// The database URL, or an error explaining how to provide one.
    pub(crate) fn require_database_url(&self) -> Result<&DatabaseUrl> {
        self.database_url.as_ref().ok_or_else(|| {
            format_err!(
                "no database URL: pass --database-url, set ${}, or set {} in the config file",
                DATABASE_URL_VAR,
                Key::DATABASE_URL,
            )
        })
    }
}
