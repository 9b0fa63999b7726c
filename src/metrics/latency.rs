//! Response-time statistics
//!
//! Percentiles and summary statistics over latency samples.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Latency percentiles (p50, p90, p95, p99)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Percentiles {
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl Percentiles {
    /// Calculate percentiles from sorted latencies
    pub fn from_sorted(latencies: &[f64]) -> Self {
        if latencies.is_empty() {
            return Self::default();
        }

        Self {
            p50: percentile(latencies, 50.0),
            p90: percentile(latencies, 90.0),
            p95: percentile(latencies, 95.0),
            p99: percentile(latencies, 99.0),
        }
    }
}

/// Linear interpolation between closest ranks
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let idx = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    let fraction = idx - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Latency statistics, all values in seconds
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LatencyStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub percentiles: Percentiles,
    pub count: usize,
}

impl LatencyStats {
    /// Calculate statistics from samples in seconds
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

        let variance =
            sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / sorted.len() as f64;

        Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            percentiles: Percentiles::from_sorted(&sorted),
            count: sorted.len(),
        }
    }

    pub fn from_durations(samples: &[Duration]) -> Self {
        let secs: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
        Self::from_samples(&secs)
    }

    /// Format as summary string
    pub fn format_summary(&self) -> String {
        format!(
            "avg={:.3}s max={:.3}s min={:.3}s p95={:.3}s (n={})",
            self.mean, self.max, self.min, self.percentiles.p95, self.count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 50.0), 3.0);
        assert_eq!(percentile(&sorted, 100.0), 5.0);
        assert!((percentile(&sorted, 90.0) - 4.6).abs() < 1e-9);
        assert_eq!(percentile(&[7.0], 99.0), 7.0);
    }

    #[test]
    fn test_latency_stats() {
        let stats = LatencyStats::from_samples(&[0.3, 0.1, 0.2]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 0.1);
        assert_eq!(stats.max, 0.3);
        assert!((stats.mean - 0.2).abs() < 1e-9);
        assert!((stats.percentiles.p50 - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_samples() {
        let stats = LatencyStats::from_samples(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, 0.0);
    }

    #[test]
    fn test_from_durations() {
        let stats = LatencyStats::from_durations(&[
            Duration::from_millis(100),
            Duration::from_millis(300),
        ]);
        assert!((stats.mean - 0.2).abs() < 1e-9);
    }
}
