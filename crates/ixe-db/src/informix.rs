//! Informix backend over ODBC

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Row, RowSink};
use odbc_api::{Connection, ConnectionOptions, Cursor, Environment, ResultSetMetadata};
use std::sync::OnceLock;

/// Process-wide ODBC environment; connections borrow from it.
fn environment() -> DbResult<&'static Environment> {
    static ENV: OnceLock<Environment> = OnceLock::new();
    if let Some(env) = ENV.get() {
        return Ok(env);
    }
    let env = Environment::new().map_err(|e| DbError::ConnectionError(e.to_string()))?;
    Ok(ENV.get_or_init(|| env))
}

/// Informix database backend
pub struct InformixBackend {
    conn: Connection<'static>,
}

impl InformixBackend {
    /// Open a connection from an ODBC connection string
    pub fn connect(dsn: &str) -> DbResult<Self> {
        let conn = environment()?
            .connect_with_connection_string(dsn, ConnectionOptions::default())
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }
}

impl Database for InformixBackend {
    fn db_type(&self) -> &'static str {
        "informix"
    }

    fn stream_query(&self, sql: &str, sink: &mut dyn RowSink) -> DbResult<u64> {
        let exec_err = |e: odbc_api::Error| DbError::ExecutionError(e.to_string());
        let fetch_err = |e: odbc_api::Error| DbError::FetchError(e.to_string());

        let mut prepared = self.conn.prepare(sql).map_err(exec_err)?;
        let Some(mut cursor) = prepared.execute(()).map_err(exec_err)? else {
            return Ok(0);
        };

        let column_count = cursor.num_result_cols().map_err(exec_err)?;
        let column_count = u16::try_from(column_count).unwrap_or(0);
        let mut columns = Vec::with_capacity(usize::from(column_count));
        for number in 1..=column_count {
            columns.push(cursor.col_name(number).map_err(exec_err)?);
        }

        let mut values: Vec<Option<String>> = vec![None; columns.len()];
        let mut buf = Vec::new();
        let mut delivered = 0u64;

        while let Some(mut row) = cursor.next_row().map_err(fetch_err)? {
            for (number, slot) in (1..=column_count).zip(values.iter_mut()) {
                buf.clear();
                let present = row.get_text(number, &mut buf).map_err(fetch_err)?;
                *slot = present.then(|| String::from_utf8_lossy(&buf).into_owned());
            }
            sink.accept(Row::new(&columns, &values))?;
            delivered += 1;
        }

        Ok(delivered)
    }
}
