//! Upstream source readers.
//!
//! A reader loads all four sources in one go. A source that cannot be found
//! fails with [`SirsError::MissingSource`]; an empty source is valid.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{InputSource, Result, SirsError};
use crate::models::{BloodGasReading, LabsAggregate, SuspectedInfection, VitalsAggregate};

pub mod json;

pub use json::JsonDirSource;

/// Rows of every upstream source, as read
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceTables {
    pub suspected_infection: Vec<SuspectedInfection>,
    pub blood_gas: Vec<BloodGasReading>,
    pub vitals: Vec<VitalsAggregate>,
    pub labs: Vec<LabsAggregate>,
}

impl SourceTables {
    pub fn row_count(&self, source: InputSource) -> usize {
        match source {
            InputSource::SuspectedInfection => self.suspected_infection.len(),
            InputSource::BloodGas => self.blood_gas.len(),
            InputSource::VitalsAggregate => self.vitals.len(),
            InputSource::LabsAggregate => self.labs.len(),
        }
    }
}

#[async_trait]
pub trait SourceReader: Send + Sync {
    async fn read_tables(&self) -> Result<SourceTables>;
}

/// Tables assembled piecewise; any source left unset is reported missing
#[derive(Debug, Default)]
pub struct PartialTables {
    pub suspected_infection: Option<Vec<SuspectedInfection>>,
    pub blood_gas: Option<Vec<BloodGasReading>>,
    pub vitals: Option<Vec<VitalsAggregate>>,
    pub labs: Option<Vec<LabsAggregate>>,
}

impl PartialTables {
    pub fn complete(self) -> Result<SourceTables> {
        Ok(SourceTables {
            suspected_infection: self
                .suspected_infection
                .ok_or(SirsError::MissingSource(InputSource::SuspectedInfection))?,
            blood_gas: self
                .blood_gas
                .ok_or(SirsError::MissingSource(InputSource::BloodGas))?,
            vitals: self
                .vitals
                .ok_or(SirsError::MissingSource(InputSource::VitalsAggregate))?,
            labs: self
                .labs
                .ok_or(SirsError::MissingSource(InputSource::LabsAggregate))?,
        })
    }
}
