//! Scenario execution runner
//!
//! Runs the selected scenarios of one suite sequentially and turns each
//! outcome into a [`TestResult`].

use anyhow::Result;
use chrono::Utc;
use std::time::Instant;
use tracing::{error, info};

use crate::assert::AssertionFailure;
use crate::models::{Suite, SuiteSummary, TestCase, TestResult};

/// Successful scenario outcome
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
    Pass,
    /// Passed, with measurements to attach to the result
    Measured(serde_json::Value),
    /// Precondition not met on the target environment
    Skipped(String),
}

/// One parameter set of a data-driven scenario
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub index: usize,
    pub label: String,
}

/// A suite that can execute its own scenarios
#[allow(async_fn_in_trait)]
pub trait ScenarioSuite {
    fn suite(&self) -> Suite;

    /// Base URL the suite runs against
    fn target(&self) -> &str;

    /// Parameter sets for data-driven cases; empty for plain cases
    fn variants(&self, _case: TestCase) -> Vec<Variant> {
        Vec::new()
    }

    async fn run_case(&self, case: TestCase, variant: Option<&Variant>) -> Result<Verdict>;
}

/// Sequential runner over a fixed selection of cases
pub struct SuiteRunner {
    cases: Vec<TestCase>,
    skip: Vec<TestCase>,
}

impl SuiteRunner {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self {
            cases,
            skip: Vec::new(),
        }
    }

    /// Runner over every case of one suite
    pub fn for_suite(suite: Suite) -> Self {
        Self::new(TestCase::for_suite(suite))
    }

    pub fn skip(mut self, cases: Vec<TestCase>) -> Self {
        self.skip = cases;
        self
    }

    /// Run one case (or one variant of it) and classify the outcome
    pub async fn run_one<S: ScenarioSuite>(
        &self,
        suite: &S,
        case: TestCase,
        variant: Option<&Variant>,
    ) -> TestResult {
        let label = variant.map(|v| v.label.clone());

        if self.skip.contains(&case) {
            return TestResult::skip(case, "Skipped by configuration").with_variant(label);
        }

        match &variant {
            Some(v) => info!("Running {} [{}]", case, v.label),
            None => info!("Running {}", case),
        }

        let start = Instant::now();
        let outcome = suite.run_case(case, variant).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(Verdict::Pass) => TestResult::pass(case, duration_ms),
            Ok(Verdict::Measured(details)) => {
                TestResult::pass(case, duration_ms).with_details(details)
            }
            Ok(Verdict::Skipped(reason)) => TestResult::skip(case, reason),
            Err(e) if AssertionFailure::is_assertion(&e) => {
                TestResult::fail(case, duration_ms, e.to_string())
            }
            Err(e) => {
                error!("{} failed with error: {:#}", case, e);
                TestResult::error(case, duration_ms, format!("{e:#}"))
            }
        };

        result.with_variant(label)
    }

    /// Run all selected cases sequentially
    pub async fn run<S: ScenarioSuite>(&self, suite: &S) -> SuiteSummary {
        info!(
            "Starting {} suite against {} ({} cases)",
            suite.suite(),
            suite.target(),
            self.cases.len()
        );

        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::new();

        for &case in &self.cases {
            let variants = suite.variants(case);

            if variants.is_empty() {
                let result = self.run_one(suite, case, None).await;
                info!("  {}", result);
                results.push(result);
            } else {
                for variant in &variants {
                    let result = self.run_one(suite, case, Some(variant)).await;
                    info!("  {}", result);
                    results.push(result);
                }
            }
        }

        let summary = SuiteSummary::new(suite.suite(), suite.target(), started_at, results);

        info!(
            "{} suite completed in {}ms - Pass: {}/{} ({:.1}%)",
            summary.suite,
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }
}
