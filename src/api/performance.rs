//! Response time under sequential load
//!
//! TC-API-PERF: issue a fixed number of sequential requests, every one must
//! succeed, then bound the average and worst response time.

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

use crate::assert::check;
use crate::executor::Verdict;
use crate::http::ApiClient;
use crate::metrics::LatencyStats;
use crate::utils::Timer;

#[derive(Clone, Debug)]
pub struct LoadTest {
    pub endpoint: String,
    pub num_requests: u32,
    /// Ceiling for the mean response time
    pub max_avg: Duration,
    /// Ceiling for the slowest response
    pub max_single: Duration,
}

impl LoadTest {
    pub fn new() -> Self {
        Self {
            endpoint: "/products?page=1&limit=10".to_string(),
            num_requests: 50,
            max_avg: Duration::from_millis(500),
            max_single: Duration::from_secs(2),
        }
    }

    pub fn num_requests(mut self, n: u32) -> Self {
        self.num_requests = n;
        self
    }

    pub async fn run(&self, client: &ApiClient) -> Result<Verdict> {
        info!(
            "Running Response Time Under Load ({} requests to {})",
            self.num_requests, self.endpoint
        );

        let mut response_times = Vec::with_capacity(self.num_requests as usize);

        for _ in 0..self.num_requests {
            let timer = Timer::start(&self.endpoint);
            let response = client.get(&self.endpoint, &[]).await?;
            response_times.push(timer.stop());

            check!(
                response.status() == 200,
                "Request failed with status {}",
                response.status()
            );
        }

        let stats = LatencyStats::from_durations(&response_times);

        info!("Performance Metrics:");
        info!("Average Response Time: {:.3}s", stats.mean);
        info!("Max Response Time: {:.3}s", stats.max);
        info!("Min Response Time: {:.3}s", stats.min);
        debug!("{}", stats.format_summary());

        check!(
            stats.mean < self.max_avg.as_secs_f64(),
            "Average response time {:.3}s exceeds {}ms",
            stats.mean,
            self.max_avg.as_millis()
        );
        check!(
            stats.max < self.max_single.as_secs_f64(),
            "Max response time {:.3}s exceeds {}s",
            stats.max,
            self.max_single.as_secs_f64()
        );

        Ok(Verdict::Measured(serde_json::to_value(&stats)?))
    }
}

impl Default for LoadTest {
    fn default() -> Self {
        Self::new()
    }
}
