//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Row, RowSink};
use chrono::{DateTime, NaiveTime};
use duckdb::types::{TimeUnit, Value};
use duckdb::Connection;
use std::path::Path;

const SECONDS_PER_DAY: i64 = 86_400;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Connection,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Execute multiple SQL statements
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }
}

impl Database for DuckDbBackend {
    fn db_type(&self) -> &'static str {
        "duckdb"
    }

    fn stream_query(&self, sql: &str, sink: &mut dyn RowSink) -> DbResult<u64> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        let mut rows = stmt
            .query([])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;

        let columns = rows
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();
        let mut values: Vec<Option<String>> = Vec::with_capacity(columns.len());
        let mut delivered = 0u64;

        while let Some(row) = rows
            .next()
            .map_err(|e| DbError::FetchError(e.to_string()))?
        {
            values.clear();
            for index in 0..columns.len() {
                let value: Value = row
                    .get(index)
                    .map_err(|e| DbError::FetchError(e.to_string()))?;
                values.push(render_value(value));
            }
            sink.accept(Row::new(&columns, &values))?;
            delivered += 1;
        }

        Ok(delivered)
    }
}

/// Textual form of a DuckDB value; NULL has none
fn render_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Text(v) => Some(v),
        other => Some(render_text(&other)),
    }
}

/// Text of a value the way DuckDB casts it to VARCHAR
fn render_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Boolean(v) => v.to_string(),
        Value::TinyInt(v) => v.to_string(),
        Value::SmallInt(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::BigInt(v) => v.to_string(),
        Value::HugeInt(v) => v.to_string(),
        Value::UTinyInt(v) => v.to_string(),
        Value::USmallInt(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::UBigInt(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::Decimal(v) => v.to_string(),
        Value::Text(v) | Value::Enum(v) => v.clone(),
        Value::Blob(v) => String::from_utf8_lossy(v).into_owned(),
        Value::Date32(days) => render_date(*days),
        Value::Time64(unit, v) => render_time(to_micros(unit, *v)),
        Value::Timestamp(unit, v) => render_timestamp(to_micros(unit, *v)),
        Value::Interval {
            months,
            days,
            nanos,
        } => render_interval(*months, *days, *nanos),
        Value::List(items) | Value::Array(items) => format!(
            "[{}]",
            items.iter().map(render_text).collect::<Vec<_>>().join(", ")
        ),
        Value::Struct(fields) => format!(
            "{{{}}}",
            fields
                .iter()
                .map(|(k, v)| format!("'{}': {}", k, render_text(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Value::Map(entries) => format!(
            "{{{}}}",
            entries
                .iter()
                .map(|(k, v)| format!("{}={}", render_text(k), render_text(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Value::Union(inner) => render_text(inner),
        #[allow(unreachable_patterns)]
        other => format!("{other:?}"),
    }
}

fn to_micros(unit: &TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

/// Days since 1970-01-01 as `YYYY-MM-DD`
fn render_date(days: i32) -> String {
    DateTime::from_timestamp(i64::from(days) * SECONDS_PER_DAY, 0)
        .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| days.to_string())
}

/// Microseconds since midnight as `HH:MM:SS[.ffffff]`
fn render_time(micros: i64) -> String {
    let secs = micros.div_euclid(1_000_000);
    let nanos = micros.rem_euclid(1_000_000) * 1_000;
    u32::try_from(secs)
        .ok()
        .zip(u32::try_from(nanos).ok())
        .and_then(|(s, n)| NaiveTime::from_num_seconds_from_midnight_opt(s, n))
        .map(|t| t.format("%H:%M:%S%.f").to_string())
        .unwrap_or_else(|| micros.to_string())
}

/// Microseconds since the epoch as `YYYY-MM-DD HH:MM:SS[.ffffff]`
fn render_timestamp(micros: i64) -> String {
    DateTime::from_timestamp_micros(micros)
        .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M:%S%.f").to_string())
        .unwrap_or_else(|| micros.to_string())
}

/// `1 year 2 months 3 days 04:05:06`, omitting zero parts
fn render_interval(months: i32, days: i32, nanos: i64) -> String {
    let mut parts = Vec::new();
    let (years, months) = (months / 12, months % 12);
    for (n, unit) in [(years, "year"), (months, "month"), (days, "day")] {
        if n != 0 {
            let plural = if n.abs() == 1 { "" } else { "s" };
            parts.push(format!("{n} {unit}{plural}"));
        }
    }

    if nanos != 0 || parts.is_empty() {
        let sign = if nanos < 0 { "-" } else { "" };
        let micros = (nanos / 1_000).unsigned_abs();
        let (secs, frac) = (micros / 1_000_000, micros % 1_000_000);
        let mut clock = format!(
            "{sign}{:02}:{:02}:{:02}",
            secs / 3_600,
            secs / 60 % 60,
            secs % 60
        );
        if frac != 0 {
            clock.push_str(format!(".{frac:06}").trim_end_matches('0'));
        }
        parts.push(clock);
    }
    parts.join(" ")
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
