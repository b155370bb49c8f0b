//! Data models for stays, upstream aggregate rows and SIRS results.

pub mod score;
pub mod stay;

pub use score::{Criterion, CriterionScores, Indicator, SirsResult};
pub use stay::{
    BloodGasReading, LabsAggregate, StayId, SuspectedInfection, VitalsAggregate, ARTERIAL_SPECIMEN,
};
