use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{PartialTables, SourceReader, SourceTables};
use crate::error::{InputSource, Result, SirsError};

/// Reads each source from a JSON array file in one directory
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_rows<T: DeserializeOwned>(&self, input: InputSource) -> Result<Vec<T>> {
        let path = self.dir.join(input.file_name());
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(SirsError::MissingSource(input));
            }
            Err(err) => return Err(err.into()),
        };

        let rows: Vec<T> = serde_json::from_str(&raw).map_err(|err| SirsError::InvalidSource {
            input,
            message: format!("{}: {}", path.display(), err),
        })?;
        debug!(source = %input, rows = rows.len(), "loaded json source");
        Ok(rows)
    }
}

#[async_trait]
impl SourceReader for JsonDirSource {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn read_tables(&self) -> Result<SourceTables> {
        PartialTables {
            suspected_infection: Some(self.read_rows(InputSource::SuspectedInfection).await?),
            blood_gas: Some(self.read_rows(InputSource::BloodGas).await?),
            vitals: Some(self.read_rows(InputSource::VitalsAggregate).await?),
            labs: Some(self.read_rows(InputSource::LabsAggregate).await?),
        }
        .complete()
    }
}
