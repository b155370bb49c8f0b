use std::collections::BTreeSet;

use crate::models::{StayId, SuspectedInfection};

/// Stays with a recorded suspected-infection time, in ascending order.
///
/// Stays that only appear with a null time are left out before any scoring
/// happens. A stay listed more than once qualifies if any of its rows
/// carries a time.
pub fn eligible_stays(records: &[SuspectedInfection]) -> BTreeSet<StayId> {
    records
        .iter()
        .filter(|record| record.suspected_infection_time.is_some())
        .map(|record| record.icustay_id)
        .collect()
}

/// Distinct stays present in the infection source
pub fn stay_population(records: &[SuspectedInfection]) -> BTreeSet<StayId> {
    records.iter().map(|record| record.icustay_id).collect()
}
