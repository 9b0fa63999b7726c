//! Performance metrics

mod latency;

pub use latency::LatencyStats;
