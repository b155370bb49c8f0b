//! SQLite source reader.
//!
//! Reads the four upstream tables from a SQLite database. A table that does
//! not exist is a missing source; an empty table is not.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, instrument};

use crate::error::{InputSource, Result};
use crate::models::{
    BloodGasReading, LabsAggregate, SuspectedInfection, VitalsAggregate, ARTERIAL_SPECIMEN,
};
use crate::sources::{PartialTables, SourceReader, SourceTables};

/// Database connection pool
pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// Create a new database connection
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(connection_string)
            .await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn table_exists(&self, input: InputSource) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?")
            .bind(input.table_name())
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(row.is_some())
    }

    async fn fetch<T>(
        &self,
        input: InputSource,
        sql: &str,
        map: fn(&SqliteRow) -> Result<T, sqlx::Error>,
    ) -> Result<Option<Vec<T>>> {
        if !self.table_exists(input).await? {
            return Ok(None);
        }

        let rows = sqlx::query(sql).fetch_all(self.pool.as_ref()).await?;
        let mapped = rows.iter().map(map).collect::<Result<Vec<T>, sqlx::Error>>()?;
        debug!(source = %input, rows = mapped.len(), "loaded sqlite source");
        Ok(Some(mapped))
    }

    pub async fn suspected_infection(&self) -> Result<Option<Vec<SuspectedInfection>>> {
        self.fetch(
            InputSource::SuspectedInfection,
            "SELECT icustay_id, suspected_infection_time FROM suspected_infection",
            |row| {
                Ok(SuspectedInfection {
                    icustay_id: row.try_get("icustay_id")?,
                    suspected_infection_time: row.try_get("suspected_infection_time")?,
                })
            },
        )
        .await
    }

    /// Arterial rows only; other specimens never reach the aggregator
    pub async fn arterial_blood_gas(&self) -> Result<Option<Vec<BloodGasReading>>> {
        if !self.table_exists(InputSource::BloodGas).await? {
            return Ok(None);
        }

        let rows = sqlx::query(
            "SELECT icustay_id, specimen_pred, paco2 FROM blood_gas WHERE specimen_pred = ?",
        )
        .bind(ARTERIAL_SPECIMEN)
        .fetch_all(self.pool.as_ref())
        .await?;

        let readings = rows
            .iter()
            .map(|row| {
                Ok(BloodGasReading {
                    icustay_id: row.try_get("icustay_id")?,
                    specimen_pred: row.try_get("specimen_pred")?,
                    paco2: row.try_get("paco2")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        debug!(rows = readings.len(), "loaded arterial blood gas readings");
        Ok(Some(readings))
    }

    pub async fn vitals(&self) -> Result<Option<Vec<VitalsAggregate>>> {
        self.fetch(
            InputSource::VitalsAggregate,
            "SELECT icustay_id, tempc_min, tempc_max, heartrate_max, resprate_max FROM vitals_aggregate",
            |row| {
                Ok(VitalsAggregate {
                    icustay_id: row.try_get("icustay_id")?,
                    tempc_min: row.try_get("tempc_min")?,
                    tempc_max: row.try_get("tempc_max")?,
                    heartrate_max: row.try_get("heartrate_max")?,
                    resprate_max: row.try_get("resprate_max")?,
                })
            },
        )
        .await
    }

    pub async fn labs(&self) -> Result<Option<Vec<LabsAggregate>>> {
        self.fetch(
            InputSource::LabsAggregate,
            "SELECT icustay_id, wbc_min, wbc_max, bands_max FROM labs_aggregate",
            |row| {
                Ok(LabsAggregate {
                    icustay_id: row.try_get("icustay_id")?,
                    wbc_min: row.try_get("wbc_min")?,
                    wbc_max: row.try_get("wbc_max")?,
                    bands_max: row.try_get("bands_max")?,
                })
            },
        )
        .await
    }
}

#[async_trait]
impl SourceReader for Database {
    #[instrument(skip(self))]
    async fn read_tables(&self) -> Result<SourceTables> {
        PartialTables {
            suspected_infection: self.suspected_infection().await?,
            blood_gas: self.arterial_blood_gas().await?,
            vitals: self.vitals().await?,
            labs: self.labs().await?,
        }
        .complete()
    }
}
