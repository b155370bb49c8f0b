use crate::models::{CriterionScores, SirsResult, StayId};

/// Total the four criteria, counting unknown as zero.
///
/// The raw tri-state components are carried unchanged next to the total.
pub fn combine(icustay_id: StayId, scores: CriterionScores) -> SirsResult {
    let sirs = scores.temperature.points()
        + scores.heart_rate.points()
        + scores.respiration.points()
        + scores.wbc.points();

    SirsResult {
        icustay_id,
        sirs,
        temp_score: scores.temperature,
        heartrate_score: scores.heart_rate,
        resp_score: scores.respiration,
        wbc_score: scores.wbc,
    }
}
