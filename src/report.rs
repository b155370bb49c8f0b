//! Rendering of scored stays.

use std::io::Write;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{Criterion, SirsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per stay, one per line
    Json,
    /// Aligned text columns
    Table,
}

fn column_width(criterion: Criterion) -> usize {
    criterion.column().len().max(4)
}

pub fn write_results<W: Write>(out: &mut W, results: &[SirsResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            for result in results {
                serde_json::to_writer(&mut *out, result)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Table => {
            write!(out, "{:>12} {:>5}", "icustay_id", "sirs")?;
            for criterion in Criterion::ALL {
                write!(out, " {:>w$}", criterion.column(), w = column_width(criterion))?;
            }
            writeln!(out)?;

            for r in results {
                write!(out, "{:>12} {:>5}", r.icustay_id, r.sirs)?;
                let components = r.components();
                for criterion in Criterion::ALL {
                    let score = components.get(criterion).to_string();
                    write!(out, " {:>w$}", score, w = column_width(criterion))?;
                }
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Indicator;

    fn sample() -> Vec<SirsResult> {
        vec![SirsResult {
            icustay_id: 7,
            sirs: 1,
            temp_score: Indicator::Normal,
            heartrate_score: Indicator::Abnormal,
            resp_score: Indicator::Unknown,
            wbc_score: Indicator::Normal,
        }]
    }

    #[test]
    fn json_lines() {
        let mut buf = Vec::new();
        write_results(&mut buf, &sample(), OutputFormat::Json).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "{\"icustay_id\":7,\"sirs\":1,\"temp_score\":0,\"heartrate_score\":1,\"resp_score\":null,\"wbc_score\":0}\n"
        );
    }

    #[test]
    fn table_shows_null_for_unknown() {
        let mut buf = Vec::new();
        write_results(&mut buf, &sample(), OutputFormat::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let header: Vec<_> = lines.next().unwrap().split_whitespace().collect();
        assert_eq!(
            header,
            vec!["icustay_id", "sirs", "temp_score", "heartrate_score", "resp_score", "wbc_score"]
        );

        let row: Vec<_> = lines.next().unwrap().split_whitespace().collect();
        assert_eq!(row, vec!["7", "1", "0", "1", "null", "0"]);
    }
}
