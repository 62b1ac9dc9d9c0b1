//! Retrying execution of one query into its output files

use crate::error::{ExtractError, ExtractResult};
use crate::manifest::Manifest;
use crate::retry::{Pause, RetryPolicy, ThreadSleep};
use crate::sink::{CsvSink, ExportResult};
use ixe_core::{ConnectionParameters, OutputPaths, QuerySpec, TableId};
use ixe_db::{Database, DbError};
use std::path::PathBuf;

/// Final result of running one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Rows were written and the manifest was produced
    Exported {
        table: TableId,
        result: ExportResult,
        attempts: u32,
    },
    /// The query returned no rows; nothing to import
    Empty { table: TableId, attempts: u32 },
}

impl ExportOutcome {
    /// Output table of the query
    pub fn table(&self) -> &TableId {
        match self {
            ExportOutcome::Exported { table, .. } | ExportOutcome::Empty { table, .. } => table,
        }
    }

    /// Rows written
    pub fn rows(&self) -> u64 {
        match self {
            ExportOutcome::Exported { result, .. } => result.rows,
            ExportOutcome::Empty { .. } => 0,
        }
    }

    /// Attempts it took
    pub fn attempts(&self) -> u32 {
        match self {
            ExportOutcome::Exported { attempts, .. } | ExportOutcome::Empty { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Tagged result of a single attempt
enum AttemptOutcome {
    Exported(ExportResult),
    Empty,
    Failed(DbError),
}

/// Runs queries against one open connection, each with bounded retry.
pub struct QueryRunner<'a, D: Database + ?Sized> {
    db: &'a D,
    data_dir: PathBuf,
    policy: RetryPolicy,
    pause: Box<dyn Pause + 'a>,
}

impl<'a, D: Database + ?Sized> QueryRunner<'a, D> {
    /// Create a runner writing beneath `data_dir`
    pub fn new(db: &'a D, data_dir: impl Into<PathBuf>, policy: RetryPolicy) -> Self {
        Self {
            db,
            data_dir: data_dir.into(),
            policy,
            pause: Box::new(ThreadSleep),
        }
    }

    /// Create a runner whose retry budget comes from `params.retries`.
    ///
    /// Fails with [`ExtractError::Configuration`] before anything runs when
    /// `retries` is not a non-negative integer.
    pub fn from_params(
        db: &'a D,
        data_dir: impl Into<PathBuf>,
        params: &ConnectionParameters,
    ) -> ExtractResult<Self> {
        Ok(Self::new(db, data_dir, RetryPolicy::from_params(params)?))
    }

    /// Replace how backoff delays are waited out
    pub fn with_pause(mut self, pause: impl Pause + 'a) -> Self {
        self.pause = Box::new(pause);
        self
    }

    /// Run every query in order, stopping at the first fatal error
    pub fn run_all(&mut self, queries: &[QuerySpec]) -> ExtractResult<Vec<ExportOutcome>> {
        queries.iter().map(|spec| self.run(spec)).collect()
    }

    /// Run one query until it succeeds or the attempt budget is spent.
    ///
    /// Execution and fetch failures during an attempt, and output write
    /// failures after the first row, are logged and retried after a backoff;
    /// once `max_attempts` attempts have failed the last failure is returned
    /// as [`ExtractError::DbExecution`]. Failing to create the data file or
    /// to write the first row aborts immediately.
    pub fn run(&mut self, spec: &QuerySpec) -> ExtractResult<ExportOutcome> {
        let paths = OutputPaths::new(&self.data_dir, &spec.output_table);
        let max_attempts = self.policy.max_attempts();
        let mut attempts = 0;

        loop {
            log::debug!(
                "Exporting {} (attempt {}/{})",
                spec.output_table,
                attempts + 1,
                max_attempts
            );

            let outcome = self.attempt(spec, &paths)?;
            attempts += 1;

            match outcome {
                AttemptOutcome::Exported(result) => {
                    log::info!(
                        "Exported {} rows to {}",
                        result.rows,
                        paths.data.display()
                    );
                    return Ok(ExportOutcome::Exported {
                        table: spec.output_table.clone(),
                        result,
                        attempts,
                    });
                }
                AttemptOutcome::Empty => {
                    log::info!("Query returned empty result. Nothing was imported.");
                    return Ok(ExportOutcome::Empty {
                        table: spec.output_table.clone(),
                        attempts,
                    });
                }
                AttemptOutcome::Failed(cause) => {
                    log::warn!(
                        "Attempt {}/{} for {} failed: {}",
                        attempts,
                        max_attempts,
                        spec.output_table,
                        cause
                    );

                    if !self.policy.allows_another(attempts) {
                        return Err(ExtractError::DbExecution {
                            query: spec.query.clone(),
                            attempts,
                            reason: cause.to_string(),
                            source: cause,
                        });
                    }

                    let delay = self.policy.backoff(attempts - 1);
                    log::info!("Retrying in {:.3}s", delay.as_secs_f64());
                    self.pause.pause(delay);
                }
            }
        }
    }

    /// One full execution: fresh data file, streamed rows, manifest.
    fn attempt(&self, spec: &QuerySpec, paths: &OutputPaths) -> ExtractResult<AttemptOutcome> {
        Manifest::remove_stale(&paths.manifest)?;
        let mut sink = CsvSink::create(&paths.data)?;

        match self.db.stream_query(&spec.query, &mut sink) {
            Ok(_) if sink.rows() == 0 => {
                sink.finish()?;
                Ok(AttemptOutcome::Empty)
            }
            Ok(_) => {
                let result = sink.finish()?;
                Manifest::for_query(spec).save(&paths.manifest)?;
                log::debug!("Wrote manifest {}", paths.manifest.display());
                Ok(AttemptOutcome::Exported(result))
            }
            Err(e) if e.is_attempt_failure() => {
                sink.discard()?;
                Ok(AttemptOutcome::Failed(e))
            }
            // Once rows are flowing a write failure spoils the attempt like a fetch failure
            Err(e @ DbError::Sink(_)) if sink.rows() > 0 => {
                sink.discard()?;
                Ok(AttemptOutcome::Failed(e))
            }
            Err(DbError::Sink(e)) => {
                let path = sink.path().to_path_buf();
                sink.discard()?;
                Err(ExtractError::output(&path, e.into_inner()))
            }
            Err(e) => {
                sink.discard()?;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
