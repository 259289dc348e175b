pub mod bootstrap;
pub mod client;
pub mod config;
pub mod logging;
pub mod sql;

pub use bootstrap::{discover_sql_files, BootstrapError, BootstrapSummary, Bootstrapper, FileReport};
pub use client::{ApiError, SqlApiClient, SqlResponse};
pub use config::Config;
