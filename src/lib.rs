//! SIRS scoring engine
//!
//! Computes the Systemic Inflammatory Response Syndrome score of every ICU
//! stay that has a suspected-infection time, from pre-aggregated vitals,
//! labs and arterial blood gas readings.

pub mod core;
#[cfg(feature = "sqlite")]
pub mod db;
pub mod error;
pub mod models;
pub mod report;
pub mod sources;

pub use crate::core::{score_stays, CohortSummary, PipelineStats, SirsRun};
pub use error::{InputSource, SirsError};
pub use models::{Indicator, SirsResult};

/// Application configuration
pub mod config {
    use std::path::PathBuf;

    use clap::ValueEnum;
    use serde::Deserialize;

    use crate::report::OutputFormat;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Config {
        pub source: SourceConfig,
        pub output: OutputConfig,
        pub log: LogConfig,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
    #[serde(rename_all = "lowercase")]
    pub enum SourceBackend {
        Sqlite,
        Json,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SourceConfig {
        pub kind: SourceBackend,
        pub database_url: Option<String>,
        pub json_dir: Option<PathBuf>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct OutputConfig {
        pub format: OutputFormat,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct LogConfig {
        pub filter: String,
    }

    /// Load configuration from file
    pub fn load_config() -> Result<Config, config::ConfigError> {
        let env = std::env::var("SIRS_ENV").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            // Built-in defaults
            .set_default("source.kind", "json")?
            .set_default("source.json_dir", "data")?
            .set_default("output.format", "json")?
            .set_default("log.filter", "info")?
            // Start with default settings
            .add_source(config::File::with_name("config/default").required(false))
            // Override with environment-specific settings
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("SIRS").separator("__"))
            .build()?
            .try_deserialize()
    }

}
