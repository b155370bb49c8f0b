//! Scoring pipeline: aggregate, evaluate, combine, filter.

pub mod aggregate;
pub mod combine;
pub mod criteria;
pub mod filter;
pub mod pipeline;
pub mod summary;

pub use aggregate::{AggregateIndex, StayInputs};
pub use combine::combine;
pub use criteria::evaluate;
pub use filter::eligible_stays;
pub use pipeline::{score_stays, PipelineStats, SirsRun};
pub use summary::CohortSummary;
