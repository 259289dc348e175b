use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;

use crate::client::{ApiError, SqlApiClient, SqlResponse};
use crate::config::Config;
use crate::sql::{prepare_statement, split_sql_statements};

pub const SQL_EXTENSION: &str = ".sql";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Client(#[from] ApiError),
    #[error("backend did not become ready after {attempts} attempts: {last_error}")]
    NotReady { attempts: u32, last_error: String },
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("statement {index} in {file} failed: {source}")]
    Statement {
        file: String,
        index: usize,
        #[source]
        source: ApiError,
    },
}

/// Outcome of running one SQL file.
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub path: PathBuf,
    /// The file was missing and nothing was sent.
    pub skipped: bool,
    pub results: Vec<SqlResponse>,
}

impl FileReport {
    pub fn statements_executed(&self) -> usize {
        self.results.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BootstrapSummary {
    pub files: Vec<FileReport>,
}

impl BootstrapSummary {
    pub fn statements_executed(&self) -> usize {
        self.files.iter().map(FileReport::statements_executed).sum()
    }
}

pub struct Bootstrapper {
    client: SqlApiClient,
    db_dir: PathBuf,
    max_retries: u32,
    retry_interval: Duration,
}

impl Bootstrapper {
    pub fn new(config: &Config) -> Result<Self, BootstrapError> {
        let client = SqlApiClient::new(&config.api_url, config.request_timeout)?;

        Ok(Self {
            client,
            db_dir: config.db_dir.clone(),
            max_retries: config.max_retries,
            retry_interval: config.retry_interval,
        })
    }

    pub async fn run(&self) -> Result<BootstrapSummary, BootstrapError> {
        self.wait_for_api().await?;

        let mut summary = BootstrapSummary::default();
        for path in discover_sql_files(&self.db_dir).await? {
            summary.files.push(self.execute_sql_file(&path).await?);
        }

        tracing::info!(
            files = summary.files.len(),
            statements = summary.statements_executed(),
            "Database initialization complete"
        );
        Ok(summary)
    }

    pub async fn wait_for_api(&self) -> Result<(), BootstrapError> {
        tracing::info!(url = %self.client.base_url(), "Waiting for backend");

        let mut last_error = String::from("no health check attempted");
        for attempt in 1..=self.max_retries {
            match self.client.check_health().await {
                Ok(()) => {
                    tracing::info!(attempt, "Backend is ready");
                    return Ok(());
                }
                Err(err) => {
                    tracing::debug!(attempt, error = %err, "Health check failed");
                    last_error = err.to_string();
                }
            }

            if attempt < self.max_retries {
                tracing::info!(
                    "Attempt {attempt}/{} - waiting {:?}",
                    self.max_retries,
                    self.retry_interval
                );
                sleep(self.retry_interval).await;
            }
        }

        tracing::warn!(
            attempts = self.max_retries,
            error = %last_error,
            "Backend never became ready"
        );
        Err(BootstrapError::NotReady {
            attempts: self.max_retries,
            last_error,
        })
    }

    pub async fn execute_sql_file(&self, path: &Path) -> Result<FileReport, BootstrapError> {
        let file = file_name(path);
        let mut report = FileReport {
            path: path.to_path_buf(),
            ..FileReport::default()
        };

        if !is_file(path).await {
            tracing::warn!(path = %path.display(), "File not found, skipping");
            report.skipped = true;
            return Ok(report);
        }

        tracing::info!(file = %file, "Executing SQL file");

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BootstrapError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        for (index, stmt) in split_sql_statements(&content).enumerate() {
            let Some(sql) = prepare_statement(stmt) else {
                tracing::debug!(file = %file, index, "Skipping empty statement");
                continue;
            };

            tracing::debug!(file = %file, index, sql = %sql, "Executing statement");
            let result = self
                .client
                .execute(&sql)
                .await
                .map_err(|source| BootstrapError::Statement {
                    file: file.clone(),
                    index,
                    source,
                })?;
            report.results.push(result);
        }

        tracing::info!(
            file = %file,
            statements = report.statements_executed(),
            "SQL file execution complete"
        );
        Ok(report)
    }
}

/// Lists the `.sql` files directly inside `dir`, sorted by file name.
///
/// A missing directory is not an error: it is logged and yields no files.
pub async fn discover_sql_files(dir: &Path) -> Result<Vec<PathBuf>, BootstrapError> {
    let is_dir = tokio::fs::metadata(dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !is_dir {
        tracing::warn!(dir = %dir.display(), "Directory not found, skipping initialization");
        return Ok(Vec::new());
    }

    let read_dir_err = |source: io::Error| BootstrapError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_dir_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
        let name = entry.file_name();
        if name.to_string_lossy().ends_with(SQL_EXTENSION) {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!(dir = %dir.display(), count = files.len(), "Discovered SQL files");
    Ok(files)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
