//! aFRR assessment metrics
//!
//! Compares automatic frequency restoration reserve activation against the
//! system imbalance over a joined pair of series.

use super::payload::Sample;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Imbalance and aFRR activation at one timestamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalancingSample {
    pub timestamp: DateTime<Utc>,
    pub imbalance: f64,
    pub afrr_activation: f64,
}

/// Inner join of two series on timestamp
///
/// Samples with a null value on either side are dropped. Output follows the
/// order of `imbalance`; a timestamp repeated on both sides yields every
/// pairing.
pub fn join_series(imbalance: &[Sample], activation: &[Sample]) -> Vec<BalancingSample> {
    let mut by_time: HashMap<DateTime<Utc>, Vec<f64>> = HashMap::new();
    for sample in activation {
        if let Some(value) = sample.value {
            by_time.entry(sample.timestamp).or_default().push(value);
        }
    }

    let mut joined = Vec::new();
    for sample in imbalance {
        let (Some(imbalance), Some(activations)) = (sample.value, by_time.get(&sample.timestamp)) else {
            continue;
        };
        joined.extend(activations.iter().map(|&afrr_activation| BalancingSample {
            timestamp: sample.timestamp,
            imbalance,
            afrr_activation,
        }));
    }
    joined
}

/// The assessment table; undefined ratios are NaN
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AfrrMetrics {
    pub total_abs_imbalance: f64,
    pub total_afrr_activation: f64,
    pub coverage_ratio_total: f64,
    /// Share of samples with activation above zero
    pub activation_frequency: f64,
    /// Pearson correlation of |imbalance| and activation
    pub correlation: f64,
    pub active_period_coverage: f64,
    pub peak_abs_imbalance: f64,
    pub peak_afrr_activation: f64,
}

/// One `metric, value` row of the assessment table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: &'static str,
    pub value: f64,
}

impl AfrrMetrics {
    pub fn rows(&self) -> Vec<MetricRow> {
        [
            ("total_abs_imbalance_MWh", self.total_abs_imbalance),
            ("total_afrr_activation_MWh", self.total_afrr_activation),
            ("coverage_ratio_total", self.coverage_ratio_total),
            ("activation_frequency", self.activation_frequency),
            ("corr(|imbalance|, afrr)", self.correlation),
            ("active_period_coverage", self.active_period_coverage),
            ("peak_abs_imbalance_MWh", self.peak_abs_imbalance),
            ("peak_afrr_activation_MWh", self.peak_afrr_activation),
        ]
        .into_iter()
        .map(|(metric, value)| MetricRow { metric, value })
        .collect()
    }
}

#[inline]
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    ratio(cov, (var_x * var_y).sqrt())
}

/// Compute the assessment over joined samples
pub fn afrr_assessment(samples: &[BalancingSample]) -> AfrrMetrics {
    let abs_imbalance: Vec<f64> = samples.iter().map(|s| s.imbalance.abs()).collect();
    let activation: Vec<f64> = samples.iter().map(|s| s.afrr_activation).collect();

    let total_abs_imbalance: f64 = abs_imbalance.iter().sum();
    let total_afrr_activation: f64 = activation.iter().sum();

    let (mut active_count, mut active_afrr, mut active_imbalance) = (0usize, 0.0, 0.0);
    for (&imb, &afrr) in abs_imbalance.iter().zip(&activation) {
        if afrr > 0.0 {
            active_count += 1;
            active_afrr += afrr;
            active_imbalance += imb;
        }
    }

    AfrrMetrics {
        total_abs_imbalance,
        total_afrr_activation,
        coverage_ratio_total: ratio(total_afrr_activation, total_abs_imbalance),
        activation_frequency: ratio(active_count as f64, samples.len() as f64),
        correlation: pearson(&abs_imbalance, &activation),
        active_period_coverage: ratio(active_afrr, active_imbalance),
        peak_abs_imbalance: abs_imbalance.iter().copied().fold(f64::NAN, f64::max),
        peak_afrr_activation: activation.iter().copied().fold(f64::NAN, f64::max),
    }
}
