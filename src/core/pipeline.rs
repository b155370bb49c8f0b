use serde::Serialize;
use tracing::{debug, info, instrument};

use super::aggregate::AggregateIndex;
use super::combine::combine;
use super::criteria::evaluate;
use super::filter::{eligible_stays, stay_population};
use crate::models::SirsResult;
use crate::sources::SourceTables;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub population: usize,
    pub included: usize,
    pub excluded: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SirsRun {
    pub results: Vec<SirsResult>,
    pub stats: PipelineStats,
}

/// Score every stay with a suspected-infection time.
///
/// Results come back ordered by stay id.
#[instrument(skip_all, fields(infection_rows = tables.suspected_infection.len()))]
pub fn score_stays(tables: &SourceTables) -> SirsRun {
    let population = stay_population(&tables.suspected_infection).len();
    let stays = eligible_stays(&tables.suspected_infection);
    let index = AggregateIndex::build(tables);

    let results: Vec<SirsResult> = stays
        .iter()
        .map(|&stay| {
            let inputs = index.inputs_for(stay);
            let result = combine(stay, evaluate(&inputs));
            debug!(icustay_id = stay, sirs = result.sirs, "scored stay");
            result
        })
        .collect();

    let stats = PipelineStats {
        population,
        included: results.len(),
        excluded: population - results.len(),
    };
    info!(
        population = stats.population,
        included = stats.included,
        excluded = stats.excluded,
        "sirs scoring complete"
    );

    SirsRun { results, stats }
}
