//! Job configuration types and parsing for config.yml

use crate::error::{CoreError, CoreResult};
use crate::serde_helpers::string_or_number;
use crate::table_id::TableId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name of the configuration file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Port used when `db.port` is absent.
///
/// This is the MySQL port, not an Informix one (listeners usually run on
/// 9088). Existing configurations may rely on it, so set `port` explicitly.
pub const DEFAULT_PORT: &str = "3306";

/// Database locale used when `db.locale` is absent
pub const DEFAULT_LOCALE: &str = "en_US.819";

/// Root of config.yml
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Extractor parameters
    pub parameters: Parameters,
}

/// The `parameters` section of config.yml
#[derive(Debug, Clone, Deserialize)]
pub struct Parameters {
    /// Connection parameters
    pub db: ConnectionParameters,

    /// Queries to export, in execution order
    #[serde(default)]
    pub queries: Vec<QuerySpec>,
}

/// Database driver selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// IBM Informix through ODBC (default)
    #[default]
    Informix,
    /// Embedded DuckDB; `database` is a file path or `:memory:`
    DuckDb,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Informix => write!(f, "informix"),
            Driver::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Raw connection parameters from `parameters.db`.
///
/// Fields the connector requires are still `Option` here; a missing one is
/// reported by the connector as a configuration error.
#[derive(Clone, Deserialize)]
pub struct ConnectionParameters {
    /// Backend driver
    #[serde(default)]
    pub driver: Driver,

    /// Database host
    #[serde(default)]
    pub host: Option<String>,

    /// Service port
    #[serde(default = "default_port", deserialize_with = "string_or_number")]
    pub port: String,

    /// Database name
    #[serde(default)]
    pub database: Option<String>,

    /// Informix server (instance) name
    #[serde(default)]
    pub server: Option<String>,

    /// User name
    #[serde(default)]
    pub user: Option<String>,

    /// Password
    #[serde(default, alias = "#password")]
    pub password: Option<String>,

    /// Database locale
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Number of query retries; kept raw so bad values surface as
    /// configuration errors at query time
    #[serde(default)]
    pub retries: Option<serde_yaml::Value>,
}

impl Default for ConnectionParameters {
    fn default() -> Self {
        Self {
            driver: Driver::default(),
            host: None,
            port: default_port(),
            database: None,
            server: None,
            user: None,
            password: None,
            locale: default_locale(),
            retries: None,
        }
    }
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("server", &self.server)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("locale", &self.locale)
            .field("retries", &self.retries)
            .finish()
    }
}

impl ConnectionParameters {
    /// Number of retries after the first failed attempt.
    ///
    /// Absent means 0. Accepts non-negative integers and strings of ASCII
    /// digits; anything else is [`CoreError::InvalidRetries`].
    pub fn retries(&self) -> CoreResult<u32> {
        let Some(value) = &self.retries else {
            return Ok(0);
        };

        let parsed = match value {
            serde_yaml::Value::Null => Some(0),
            serde_yaml::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            serde_yaml::Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                s.parse::<u32>().ok()
            }
            _ => None,
        };

        parsed.ok_or_else(|| CoreError::InvalidRetries {
            given: render_value(value),
        })
    }
}

/// One configured query
#[derive(Debug, Clone, Deserialize)]
pub struct QuerySpec {
    /// SQL text executed verbatim
    pub query: String,

    /// Destination table identifier
    #[serde(rename = "outputTable")]
    pub output_table: TableId,

    /// Incremental-load hint passed through to the manifest
    #[serde(default)]
    pub incremental: bool,

    /// Primary key passed through to the manifest
    #[serde(default, rename = "primaryKey")]
    pub primary_key: Option<PrimaryKey>,
}

impl QuerySpec {
    /// Create a query spec with default `incremental` and `primaryKey`
    pub fn new(query: impl Into<String>, output_table: TableId) -> Self {
        Self {
            query: query.into(),
            output_table,
            incremental: false,
            primary_key: None,
        }
    }
}

/// Primary key of an output table: one column or an ordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryKey {
    /// Single column
    Column(String),
    /// Composite key, in order
    Columns(Vec<String>),
}

impl PrimaryKey {
    /// Key columns in order
    pub fn columns(&self) -> Vec<&str> {
        match self {
            PrimaryKey::Column(c) => vec![c.as_str()],
            PrimaryKey::Columns(cs) => cs.iter().map(String::as_str).collect(),
        }
    }
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn render_value(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

impl JobConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let config: JobConfig =
            serde_yaml::from_str(content).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_yaml(&content)?;
        log::debug!(
            "Loaded {} with {} queries",
            path.display(),
            config.parameters.queries.len()
        );
        Ok(config)
    }

    /// Load `config.yml` from a data directory
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        Self::load(&dir.join(CONFIG_FILE_NAME))
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        for (index, spec) in self.parameters.queries.iter().enumerate() {
            if spec.query.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "queries[{}] ('{}') has an empty query",
                        index, spec.output_table
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
