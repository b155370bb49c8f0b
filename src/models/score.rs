use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::stay::StayId;

/// Tri-state outcome of a single SIRS criterion.
///
/// Serialized as `1`, `0` or `null` so downstream consumers can tell a
/// criterion scored normal apart from one that was never measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Normal,
    Abnormal,
    Unknown,
}

impl Indicator {
    /// Raw score, `None` when unmeasured
    pub const fn score(self) -> Option<u8> {
        match self {
            Self::Normal => Some(0),
            Self::Abnormal => Some(1),
            Self::Unknown => None,
        }
    }

    /// Contribution to the total, unknown counted as normal
    pub const fn points(self) -> u8 {
        match self.score() {
            Some(points) => points,
            None => 0,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score() {
            Some(score) => write!(f, "{}", score),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for Indicator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.score() {
            Some(score) => serializer.serialize_u8(score),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Indicator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<u8>::deserialize(deserializer)? {
            Some(0) => Ok(Self::Normal),
            Some(1) => Ok(Self::Abnormal),
            None => Ok(Self::Unknown),
            Some(other) => Err(de::Error::custom(format!(
                "criterion score must be 0, 1 or null, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Criterion {
    Temperature,
    HeartRate,
    Respiration,
    Wbc,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Temperature,
        Criterion::HeartRate,
        Criterion::Respiration,
        Criterion::Wbc,
    ];

    pub const fn column(self) -> &'static str {
        match self {
            Self::Temperature => "temp_score",
            Self::HeartRate => "heartrate_score",
            Self::Respiration => "resp_score",
            Self::Wbc => "wbc_score",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Temperature => "Temperature",
            Self::HeartRate => "Heart rate",
            Self::Respiration => "Respiration",
            Self::Wbc => "WBC",
        };
        f.write_str(name)
    }
}

/// The four criterion outcomes for one stay, before totalling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriterionScores {
    pub temperature: Indicator,
    pub heart_rate: Indicator,
    pub respiration: Indicator,
    pub wbc: Indicator,
}

impl CriterionScores {
    pub const fn get(&self, criterion: Criterion) -> Indicator {
        match criterion {
            Criterion::Temperature => self.temperature,
            Criterion::HeartRate => self.heart_rate,
            Criterion::Respiration => self.respiration,
            Criterion::Wbc => self.wbc,
        }
    }
}

/// One output row per scored stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SirsResult {
    pub icustay_id: StayId,
    pub sirs: u8,
    pub temp_score: Indicator,
    pub heartrate_score: Indicator,
    pub resp_score: Indicator,
    pub wbc_score: Indicator,
}

impl SirsResult {
    pub const fn components(&self) -> CriterionScores {
        CriterionScores {
            temperature: self.temp_score,
            heart_rate: self.heartrate_score,
            respiration: self.resp_score,
            wbc: self.wbc_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scores_null_but_counts_zero() {
        assert_eq!(Indicator::Unknown.score(), None);
        assert_eq!(Indicator::Unknown.points(), 0);
        assert_eq!(Indicator::Abnormal.points(), 1);
        assert_eq!(Indicator::Normal.score(), Some(0));
    }

    #[test]
    fn result_serializes_unknown_as_null() {
        let result = SirsResult {
            icustay_id: 200001,
            sirs: 1,
            temp_score: Indicator::Normal,
            heartrate_score: Indicator::Abnormal,
            resp_score: Indicator::Unknown,
            wbc_score: Indicator::Normal,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "icustay_id": 200001,
                "sirs": 1,
                "temp_score": 0,
                "heartrate_score": 1,
                "resp_score": null,
                "wbc_score": 0
            })
        );

        let back: SirsResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let parsed: Result<Indicator, _> = serde_json::from_str("2");
        assert!(parsed.is_err());
    }
}
