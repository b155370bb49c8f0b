//! Input aggregation: one row of inputs per stay.
//!
//! Every source is reduced to at most one entry per stay before the join,
//! so a stay can never fan out into several scored rows.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::models::{BloodGasReading, LabsAggregate, StayId, VitalsAggregate};
use crate::sources::SourceTables;

/// Everything the criterion evaluator looks at for one stay
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StayInputs {
    pub icustay_id: StayId,
    pub paco2_min: Option<f64>,
    pub tempc_min: Option<f64>,
    pub tempc_max: Option<f64>,
    pub heartrate_max: Option<f64>,
    pub resprate_max: Option<f64>,
    pub wbc_min: Option<f64>,
    pub wbc_max: Option<f64>,
    pub bands_max: Option<f64>,
}

impl StayInputs {
    /// A stay with no clinical data at all
    pub fn empty(icustay_id: StayId) -> Self {
        Self {
            icustay_id,
            ..Self::default()
        }
    }
}

fn min_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

fn max_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

/// Minimum PaCO2 per stay over arterial specimens only.
///
/// Non-arterial readings are dropped before the minimum is taken. Readings
/// without a PaCO2 value are ignored.
pub fn arterial_paco2_min(readings: &[BloodGasReading]) -> HashMap<StayId, f64> {
    let mut minimums: HashMap<StayId, f64> = HashMap::new();
    for reading in readings.iter().filter(|r| r.is_arterial()) {
        if let Some(paco2) = reading.paco2 {
            minimums
                .entry(reading.icustay_id)
                .and_modify(|min| *min = min.min(paco2))
                .or_insert(paco2);
        }
    }
    minimums
}

fn index_vitals(rows: &[VitalsAggregate]) -> HashMap<StayId, VitalsAggregate> {
    let mut index: HashMap<StayId, VitalsAggregate> = HashMap::with_capacity(rows.len());
    for row in rows {
        match index.get_mut(&row.icustay_id) {
            Some(existing) => {
                warn!(icustay_id = row.icustay_id, "duplicate vitals aggregate rows, folding");
                existing.tempc_min = min_opt(existing.tempc_min, row.tempc_min);
                existing.tempc_max = max_opt(existing.tempc_max, row.tempc_max);
                existing.heartrate_max = max_opt(existing.heartrate_max, row.heartrate_max);
                existing.resprate_max = max_opt(existing.resprate_max, row.resprate_max);
            }
            None => {
                index.insert(row.icustay_id, row.clone());
            }
        }
    }
    index
}

fn index_labs(rows: &[LabsAggregate]) -> HashMap<StayId, LabsAggregate> {
    let mut index: HashMap<StayId, LabsAggregate> = HashMap::with_capacity(rows.len());
    for row in rows {
        match index.get_mut(&row.icustay_id) {
            Some(existing) => {
                warn!(icustay_id = row.icustay_id, "duplicate labs aggregate rows, folding");
                existing.wbc_min = min_opt(existing.wbc_min, row.wbc_min);
                existing.wbc_max = max_opt(existing.wbc_max, row.wbc_max);
                existing.bands_max = max_opt(existing.bands_max, row.bands_max);
            }
            None => {
                index.insert(row.icustay_id, row.clone());
            }
        }
    }
    index
}

/// Per-stay lookup over the blood gas, vitals and labs sources
#[derive(Debug, Default)]
pub struct AggregateIndex {
    paco2_min: HashMap<StayId, f64>,
    vitals: HashMap<StayId, VitalsAggregate>,
    labs: HashMap<StayId, LabsAggregate>,
}

impl AggregateIndex {
    pub fn build(tables: &SourceTables) -> Self {
        Self {
            paco2_min: arterial_paco2_min(&tables.blood_gas),
            vitals: index_vitals(&tables.vitals),
            labs: index_labs(&tables.labs),
        }
    }

    /// Left join of every source onto `stay`; absent rows leave nulls
    pub fn inputs_for(&self, stay: StayId) -> StayInputs {
        let mut inputs = StayInputs::empty(stay);
        inputs.paco2_min = self.paco2_min.get(&stay).copied();

        if let Some(vitals) = self.vitals.get(&stay) {
            inputs.tempc_min = vitals.tempc_min;
            inputs.tempc_max = vitals.tempc_max;
            inputs.heartrate_max = vitals.heartrate_max;
            inputs.resprate_max = vitals.resprate_max;
        }

        if let Some(labs) = self.labs.get(&stay) {
            inputs.wbc_min = labs.wbc_min;
            inputs.wbc_max = labs.wbc_max;
            inputs.bands_max = labs.bands_max;
        }

        inputs
    }
}
