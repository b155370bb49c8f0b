//! Criterion evaluation.
//!
//! Each criterion is an ordered chain of abnormal rules followed by a null
//! condition. The first rule that fires scores the criterion abnormal; the
//! null condition is only consulted once every rule has failed, so any one
//! abnormal signal wins over a missing correlated signal. Comparisons
//! against a missing value never fire.

use tracing::trace;

use super::aggregate::StayInputs;
use crate::models::{Criterion, CriterionScores, Indicator};

/// Fixed clinical thresholds
pub mod thresholds {
    pub const TEMP_LOW_C: f64 = 36.0;
    pub const TEMP_HIGH_C: f64 = 38.0;
    pub const HEART_RATE_HIGH: f64 = 90.0;
    pub const RESP_RATE_HIGH: f64 = 20.0;
    pub const PACO2_LOW: f64 = 32.0;
    pub const WBC_LOW: f64 = 4.0;
    pub const WBC_HIGH: f64 = 12.0;
    pub const BANDS_HIGH: f64 = 10.0;
}

use thresholds::*;

type Predicate = fn(&StayInputs) -> bool;

#[derive(Clone, Copy)]
pub struct Rule {
    pub label: &'static str,
    pub fires: Predicate,
}

#[derive(Clone, Copy)]
pub struct RuleChain {
    pub criterion: Criterion,
    pub rules: &'static [Rule],
    pub unknown_when: Predicate,
}

impl RuleChain {
    pub fn evaluate(&self, inputs: &StayInputs) -> Indicator {
        if let Some(rule) = self.rules.iter().find(|rule| (rule.fires)(inputs)) {
            trace!(
                icustay_id = inputs.icustay_id,
                criterion = %self.criterion,
                rule = rule.label,
                "criterion abnormal"
            );
            return Indicator::Abnormal;
        }

        if (self.unknown_when)(inputs) {
            Indicator::Unknown
        } else {
            Indicator::Normal
        }
    }
}

fn below(value: Option<f64>, limit: f64) -> bool {
    matches!(value, Some(v) if v < limit)
}

fn above(value: Option<f64>, limit: f64) -> bool {
    matches!(value, Some(v) if v > limit)
}

fn hypothermia(i: &StayInputs) -> bool {
    below(i.tempc_min, TEMP_LOW_C)
}

fn fever(i: &StayInputs) -> bool {
    above(i.tempc_max, TEMP_HIGH_C)
}

fn tachycardia(i: &StayInputs) -> bool {
    above(i.heartrate_max, HEART_RATE_HIGH)
}

fn tachypnea(i: &StayInputs) -> bool {
    above(i.resprate_max, RESP_RATE_HIGH)
}

fn hypocapnia(i: &StayInputs) -> bool {
    below(i.paco2_min, PACO2_LOW)
}

fn leukopenia(i: &StayInputs) -> bool {
    below(i.wbc_min, WBC_LOW)
}

fn leukocytosis(i: &StayInputs) -> bool {
    above(i.wbc_max, WBC_HIGH)
}

fn bandemia(i: &StayInputs) -> bool {
    above(i.bands_max, BANDS_HIGH)
}

// max alone does not make temperature known
fn temperature_unmeasured(i: &StayInputs) -> bool {
    i.tempc_min.is_none()
}

fn heart_rate_unmeasured(i: &StayInputs) -> bool {
    i.heartrate_max.is_none()
}

fn respiration_unmeasured(i: &StayInputs) -> bool {
    i.resprate_max.is_none() && i.paco2_min.is_none()
}

fn wbc_unmeasured(i: &StayInputs) -> bool {
    i.wbc_min.is_none() && i.bands_max.is_none()
}

pub const TEMPERATURE: RuleChain = RuleChain {
    criterion: Criterion::Temperature,
    rules: &[
        Rule { label: "tempc_min < 36.0", fires: hypothermia },
        Rule { label: "tempc_max > 38.0", fires: fever },
    ],
    unknown_when: temperature_unmeasured,
};

pub const HEART_RATE: RuleChain = RuleChain {
    criterion: Criterion::HeartRate,
    rules: &[Rule { label: "heartrate_max > 90.0", fires: tachycardia }],
    unknown_when: heart_rate_unmeasured,
};

pub const RESPIRATION: RuleChain = RuleChain {
    criterion: Criterion::Respiration,
    rules: &[
        Rule { label: "resprate_max > 20.0", fires: tachypnea },
        Rule { label: "paco2_min < 32.0", fires: hypocapnia },
    ],
    unknown_when: respiration_unmeasured,
};

pub const WBC: RuleChain = RuleChain {
    criterion: Criterion::Wbc,
    rules: &[
        Rule { label: "wbc_min < 4.0", fires: leukopenia },
        Rule { label: "wbc_max > 12.0", fires: leukocytosis },
        Rule { label: "bands_max > 10", fires: bandemia },
    ],
    unknown_when: wbc_unmeasured,
};

pub const CHAINS: [RuleChain; 4] = [TEMPERATURE, HEART_RATE, RESPIRATION, WBC];

/// Score all four criteria for one stay
pub fn evaluate(inputs: &StayInputs) -> CriterionScores {
    let [temperature, heart_rate, respiration, wbc] = CHAINS.map(|chain| chain.evaluate(inputs));
    CriterionScores {
        temperature,
        heart_rate,
        respiration,
        wbc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn temps(min: Option<f64>, max: Option<f64>) -> StayInputs {
        StayInputs {
            tempc_min: min,
            tempc_max: max,
            ..StayInputs::empty(1)
        }
    }

    #[test_case(Some(35.0), Some(37.0) => Indicator::Abnormal ; "low min")]
    #[test_case(Some(37.0), Some(38.5) => Indicator::Abnormal ; "high max")]
    #[test_case(Some(36.0), Some(38.0) => Indicator::Normal ; "thresholds are exclusive")]
    #[test_case(None, Some(39.0) => Indicator::Abnormal ; "fever with min missing")]
    #[test_case(None, Some(37.0) => Indicator::Unknown ; "normal max with min missing")]
    #[test_case(Some(37.0), None => Indicator::Normal ; "normal min with max missing")]
    #[test_case(None, None => Indicator::Unknown ; "nothing measured")]
    fn temperature(min: Option<f64>, max: Option<f64>) -> Indicator {
        TEMPERATURE.evaluate(&temps(min, max))
    }

    #[test_case(Some(95.0) => Indicator::Abnormal ; "tachycardia")]
    #[test_case(Some(90.0) => Indicator::Normal ; "at threshold")]
    #[test_case(None => Indicator::Unknown ; "unmeasured")]
    fn heart_rate(max: Option<f64>) -> Indicator {
        let inputs = StayInputs {
            heartrate_max: max,
            ..StayInputs::empty(1)
        };
        HEART_RATE.evaluate(&inputs)
    }

    #[test_case(Some(24.0), None => Indicator::Abnormal ; "tachypnea alone")]
    #[test_case(None, Some(30.0) => Indicator::Abnormal ; "paco2 fires with rate missing")]
    #[test_case(Some(18.0), Some(40.0) => Indicator::Normal ; "both normal")]
    #[test_case(Some(18.0), None => Indicator::Normal ; "rate normal paco2 missing")]
    #[test_case(None, Some(35.0) => Indicator::Normal ; "paco2 normal rate missing")]
    #[test_case(None, None => Indicator::Unknown ; "both missing")]
    #[test_case(Some(20.0), Some(32.0) => Indicator::Normal ; "thresholds are exclusive")]
    #[test_case(Some(20.0), None => Indicator::Normal ; "rate at threshold")]
    #[test_case(None, Some(32.0) => Indicator::Normal ; "paco2 at threshold")]
    fn respiration(rate: Option<f64>, paco2: Option<f64>) -> Indicator {
        let inputs = StayInputs {
            resprate_max: rate,
            paco2_min: paco2,
            ..StayInputs::empty(1)
        };
        RESPIRATION.evaluate(&inputs)
    }

    #[test_case(Some(3.5), Some(8.0), None => Indicator::Abnormal ; "leukopenia")]
    #[test_case(Some(5.0), Some(13.0), None => Indicator::Abnormal ; "leukocytosis")]
    #[test_case(None, None, Some(12.0) => Indicator::Abnormal ; "bandemia alone")]
    #[test_case(None, Some(15.0), None => Indicator::Abnormal ; "high max with min and bands missing")]
    #[test_case(None, Some(9.0), None => Indicator::Unknown ; "normal max only")]
    #[test_case(Some(5.0), Some(10.0), None => Indicator::Normal ; "normal with bands missing")]
    #[test_case(None, None, Some(4.0) => Indicator::Normal ; "normal bands only")]
    #[test_case(None, None, None => Indicator::Unknown ; "nothing measured")]
    #[test_case(Some(4.0), Some(12.0), Some(10.0) => Indicator::Normal ; "thresholds are exclusive")]
    #[test_case(Some(4.0), None, None => Indicator::Normal ; "min at threshold")]
    #[test_case(None, Some(12.0), Some(10.0) => Indicator::Normal ; "max and bands at threshold")]
    fn wbc(min: Option<f64>, max: Option<f64>, bands: Option<f64>) -> Indicator {
        let inputs = StayInputs {
            wbc_min: min,
            wbc_max: max,
            bands_max: bands,
            ..StayInputs::empty(1)
        };
        WBC.evaluate(&inputs)
    }

    #[test]
    fn criteria_are_evaluated_independently() {
        let inputs = StayInputs {
            tempc_min: Some(35.0),
            heartrate_max: None,
            ..StayInputs::empty(1)
        };
        let scores = evaluate(&inputs);
        assert_eq!(scores.temperature, Indicator::Abnormal);
        assert_eq!(scores.heart_rate, Indicator::Unknown);
    }

    #[test]
    fn chains_cover_every_criterion_once() {
        let criteria: Vec<_> = CHAINS.iter().map(|c| c.criterion).collect();
        assert_eq!(criteria, Criterion::ALL.to_vec());
    }
}
