//! Balancing time series
//!
//! Decoding of exported transparency-dashboard payloads and the aFRR
//! assessment computed over them. Retrieval is left to the caller.

pub mod metrics;
pub mod payload;

pub use metrics::{afrr_assessment, join_series, AfrrMetrics, BalancingSample, MetricRow};
pub use payload::{decode_payload, read_payload, Sample};
