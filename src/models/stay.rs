use chrono::{DateTime, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// ICU stay identifier (`icustay_id`)
pub type StayId = i64;

/// Specimen classification marking an arterial blood-gas sample
pub const ARTERIAL_SPECIMEN: &str = "ART";

// `%.f` also matches a missing fraction
const INFECTION_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an infection timestamp written with a `T` or space separator, or
/// as RFC 3339 with an offset (converted to UTC).
pub fn parse_infection_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    INFECTION_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}

fn deserialize_infection_time<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_infection_time(&raw).map(Some).ok_or_else(|| {
            de::Error::custom(format!("unrecognised suspected_infection_time {:?}", raw))
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspectedInfection {
    pub icustay_id: StayId,
    #[serde(default, deserialize_with = "deserialize_infection_time")]
    pub suspected_infection_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodGasReading {
    pub icustay_id: StayId,
    #[serde(default)]
    pub specimen_pred: Option<String>, // e.g., "ART", "VEN", "MIX"
    #[serde(default)]
    pub paco2: Option<f64>,
}

impl BloodGasReading {
    pub fn is_arterial(&self) -> bool {
        self.specimen_pred.as_deref() == Some(ARTERIAL_SPECIMEN)
    }
}

/// Per-stay vital sign extremes, pre-aggregated upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsAggregate {
    pub icustay_id: StayId,
    #[serde(default)]
    pub tempc_min: Option<f64>,
    #[serde(default)]
    pub tempc_max: Option<f64>,
    #[serde(default)]
    pub heartrate_max: Option<f64>,
    #[serde(default)]
    pub resprate_max: Option<f64>,
}

/// Per-stay lab extremes, pre-aggregated upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabsAggregate {
    pub icustay_id: StayId,
    #[serde(default)]
    pub wbc_min: Option<f64>,
    #[serde(default)]
    pub wbc_max: Option<f64>,
    #[serde(default)]
    pub bands_max: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_art_is_arterial() {
        let mut reading = BloodGasReading {
            icustay_id: 1,
            specimen_pred: Some("ART".to_string()),
            paco2: Some(40.0),
        };
        assert!(reading.is_arterial());

        reading.specimen_pred = Some("VEN".to_string());
        assert!(!reading.is_arterial());

        reading.specimen_pred = None;
        assert!(!reading.is_arterial());
    }

    #[test]
    fn absent_json_fields_are_null() {
        let vitals: VitalsAggregate =
            serde_json::from_str(r#"{"icustay_id": 7, "heartrate_max": 101.0}"#).unwrap();
        assert_eq!(vitals.icustay_id, 7);
        assert_eq!(vitals.heartrate_max, Some(101.0));
        assert_eq!(vitals.tempc_min, None);
        assert_eq!(vitals.resprate_max, None);
    }

    #[test]
    fn infection_time_parses_or_stays_null() {
        let rows: Vec<SuspectedInfection> = serde_json::from_str(
            r#"[{"icustay_id": 1, "suspected_infection_time": "2130-02-04T10:15:00"},
                {"icustay_id": 2, "suspected_infection_time": null}]"#,
        )
        .unwrap();
        assert!(rows[0].suspected_infection_time.is_some());
        assert!(rows[1].suspected_infection_time.is_none());
    }

    #[test]
    fn infection_time_accepts_common_renderings() {
        let expected = chrono::NaiveDate::from_ymd_opt(2140, 1, 5)
            .and_then(|d| d.and_hms_opt(10, 0, 0));

        assert_eq!(parse_infection_time("2140-01-05T10:00:00"), expected);
        assert_eq!(parse_infection_time("2140-01-05 10:00:00"), expected);
        assert_eq!(parse_infection_time("2140-01-05T10:00:00Z"), expected);
        assert_eq!(parse_infection_time("2140-01-05T12:00:00+02:00"), expected);
        assert!(parse_infection_time("2140-01-05 10:00:00.250").is_some());
        assert_eq!(parse_infection_time("yesterday"), None);
    }

    #[test]
    fn space_separated_infection_time_deserializes() {
        let row: SuspectedInfection = serde_json::from_str(
            r#"{"icustay_id": 1, "suspected_infection_time": "2140-01-05 10:00:00"}"#,
        )
        .unwrap();
        assert!(row.suspected_infection_time.is_some());

        let missing: SuspectedInfection = serde_json::from_str(r#"{"icustay_id": 2}"#).unwrap();
        assert!(missing.suspected_infection_time.is_none());

        let garbage: Result<SuspectedInfection, _> = serde_json::from_str(
            r#"{"icustay_id": 3, "suspected_infection_time": "not a time"}"#,
        );
        assert!(garbage.is_err());
    }
}
