//! Connection parameter validation and connection opening

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use crate::traits::Database;
use ixe_core::{ConnectionParameters, Driver};
use std::fmt;

/// Client locale baked into every Informix connection
pub const CLIENT_LOCALE: &str = "en_us.utf8";

/// Informix network protocol
pub const PROTOCOL: &str = "onsoctcp";

/// ODBC driver name registered by the IBM Informix client SDK
pub const ODBC_DRIVER_NAME: &str = "IBM INFORMIX ODBC DRIVER";

/// Message fragments (lower-case) that mean the driver itself is missing
const DRIVER_MISSING_PATTERNS: [&str; 4] = [
    "could not find driver",
    "driver not found",
    "can't open lib",
    "data source name not found",
];

/// Validated connection parameters.
#[derive(Clone)]
pub struct ConnectionDescriptor {
    pub driver: Driver,
    pub host: String,
    pub port: String,
    pub database: String,
    pub server: Option<String>,
    pub user: String,
    pub password: String,
    pub locale: String,
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("server", &self.server)
            .field("user", &self.user)
            .field("password", &"***")
            .field("locale", &self.locale)
            .finish()
    }
}

impl ConnectionDescriptor {
    /// Validate raw parameters.
    ///
    /// `host`, `database`, `user` and `password` must be present; port and
    /// locale were already defaulted while parsing.
    pub fn from_params(params: &ConnectionParameters) -> DbResult<Self> {
        Ok(Self {
            driver: params.driver,
            host: required("host", &params.host)?,
            database: required("database", &params.database)?,
            user: required("user", &params.user)?,
            password: required("password", &params.password)?,
            port: params.port.clone(),
            server: params.server.clone().filter(|s| !s.is_empty()),
            locale: params.locale.clone(),
        })
    }

    /// ODBC connection string for the Informix client SDK
    pub fn informix_dsn(&self) -> DbResult<String> {
        Ok(format!(
            "{};UID={};PWD={}",
            self.informix_dsn_base()?,
            self.user,
            self.password
        ))
    }

    /// Connection string with the password masked, for log lines
    pub fn redacted_dsn(&self) -> DbResult<String> {
        Ok(format!("{};UID={};PWD=***", self.informix_dsn_base()?, self.user))
    }

    fn informix_dsn_base(&self) -> DbResult<String> {
        let server = self
            .server
            .as_deref()
            .ok_or_else(|| DbError::Configuration("Parameter server is missing.".to_string()))?;
        Ok(format!(
            "Driver={{{}}};Host={};Service={};Database={};Server={};Protocol={};CLIENT_LOCALE={};DB_LOCALE={};EnableScrollableCursors=1",
            ODBC_DRIVER_NAME,
            self.host,
            self.port,
            self.database,
            server,
            PROTOCOL,
            CLIENT_LOCALE,
            self.locale
        ))
    }
}

fn required(name: &str, value: &Option<String>) -> DbResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.clone()),
        _ => Err(DbError::Configuration(format!("Parameter {} is missing.", name))),
    }
}

/// Classify a failure to open a connection.
///
/// The driver manager only reports a missing driver through its message,
/// so the message is matched against known fragments.
pub fn classify_open_error(driver: Driver, message: impl Into<String>) -> DbError {
    let message = message.into();
    let lower = message.to_lowercase();
    if DRIVER_MISSING_PATTERNS.iter().any(|p| lower.contains(p)) {
        DbError::DriverUnavailable {
            driver: driver.to_string(),
            message,
        }
    } else {
        DbError::ConnectionError(message)
    }
}

/// Validate `params` and open the single connection used by a run.
///
/// Connection failures are not retried here.
pub fn connect(params: &ConnectionParameters) -> DbResult<Box<dyn Database>> {
    let descriptor = ConnectionDescriptor::from_params(params)?;
    let driver = descriptor.driver;

    let db = open(&descriptor).map_err(|e| match e {
        DbError::ConnectionError(message) => classify_open_error(driver, message),
        other => other,
    })?;

    log::info!(
        "Connected to {} ({}) at {}:{}",
        descriptor.database,
        db.db_type(),
        descriptor.host,
        descriptor.port
    );
    Ok(db)
}

fn open(descriptor: &ConnectionDescriptor) -> DbResult<Box<dyn Database>> {
    match descriptor.driver {
        Driver::DuckDb => Ok(Box::new(DuckDbBackend::new(&descriptor.database)?)),
        Driver::Informix => open_informix(descriptor),
    }
}

#[cfg(feature = "odbc")]
fn open_informix(descriptor: &ConnectionDescriptor) -> DbResult<Box<dyn Database>> {
    log::debug!("Opening ODBC connection: {}", descriptor.redacted_dsn()?);
    Ok(Box::new(crate::informix::InformixBackend::connect(
        &descriptor.informix_dsn()?,
    )?))
}

#[cfg(not(feature = "odbc"))]
fn open_informix(descriptor: &ConnectionDescriptor) -> DbResult<Box<dyn Database>> {
    descriptor.informix_dsn_base()?;
    Err(DbError::ConnectionError(
        "could not find driver: this build has no ODBC support (rebuild with the `odbc` feature)"
            .to_string(),
    ))
}

#[cfg(test)]
#[path = "connector_test.rs"]
mod tests;
