//! Transparency-dashboard payload decoding
//!
//! An export payload looks like
//! `{"data": {"timeseries": [{"from": ..., "to": ..., "values": [...]}]}}`.
//! Each series covers `[from, to)` with evenly spaced values; the decoded
//! samples of all series are concatenated and sorted by timestamp.

use crate::error::{CimError, Result};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One timestamped value; `None` for nulls in the export
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}

#[derive(Deserialize)]
struct Payload {
    data: PayloadData,
}

#[derive(Deserialize)]
struct PayloadData {
    timeseries: Vec<RawSeries>,
}

#[derive(Deserialize)]
struct RawSeries {
    from: String,
    to: String,
    values: Vec<Option<f64>>,
}

/// Naive layouts accepted besides RFC 3339; they are read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| CimError::Payload(format!("unrecognised timestamp {text:?}")))
}

impl RawSeries {
    fn into_samples(self, out: &mut Vec<Sample>) -> Result<()> {
        if self.values.is_empty() {
            return Ok(());
        }
        let start = parse_timestamp(&self.from)?;
        let end = parse_timestamp(&self.to)?;
        if end <= start {
            return Err(CimError::Payload(format!(
                "series ends ({}) before it starts ({})",
                self.to, self.from
            )));
        }
        let periods = i32::try_from(self.values.len())
            .map_err(|_| CimError::Payload(format!("series too long: {} values", self.values.len())))?;
        let step: Duration = (end - start) / periods;

        out.extend(self.values.into_iter().zip(0..periods).map(|(value, i)| Sample {
            timestamp: start + step * i,
            value,
        }));
        Ok(())
    }
}

/// Decode an export payload into samples sorted by timestamp
pub fn decode_payload(json: &str) -> Result<Vec<Sample>> {
    let payload: Payload =
        serde_json::from_str(json).map_err(|e| CimError::Payload(e.to_string()))?;

    let series_count = payload.data.timeseries.len();
    let mut samples = Vec::new();
    for series in payload.data.timeseries {
        series.into_samples(&mut samples)?;
    }
    samples.sort_by_key(|s| s.timestamp);

    debug!(series = series_count, samples = samples.len(), "decoded time-series payload");
    Ok(samples)
}

/// Read and decode an exported payload file
pub fn read_payload(path: &Path) -> Result<Vec<Sample>> {
    let json = std::fs::read_to_string(path)?;
    decode_payload(&json)
}
