//! Error types for the SIRS engine.
//!
//! Missing values never surface here; they are nulls carried through the
//! scoring logic. Errors describe sources that could not be read at all.

use std::fmt;
use std::io;

use serde::Serialize;
use thiserror::Error;

/// The four upstream sources the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InputSource {
    SuspectedInfection,
    BloodGas,
    VitalsAggregate,
    LabsAggregate,
}

impl InputSource {
    pub const ALL: [InputSource; 4] = [
        InputSource::SuspectedInfection,
        InputSource::BloodGas,
        InputSource::VitalsAggregate,
        InputSource::LabsAggregate,
    ];

    /// Table name used by the SQLite reader
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::SuspectedInfection => "suspected_infection",
            Self::BloodGas => "blood_gas",
            Self::VitalsAggregate => "vitals_aggregate",
            Self::LabsAggregate => "labs_aggregate",
        }
    }

    /// File name used by the JSON directory reader
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::SuspectedInfection => "suspected_infection.json",
            Self::BloodGas => "blood_gas.json",
            Self::VitalsAggregate => "vitals_aggregate.json",
            Self::LabsAggregate => "labs_aggregate.json",
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Error)]
pub enum SirsError {
    #[error("missing input source: {0}")]
    MissingSource(InputSource),
    #[error("invalid {input} source: {message}")]
    InvalidSource { input: InputSource, message: String },
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = SirsError> = std::result::Result<T, E>;
