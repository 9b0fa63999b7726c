//! Test execution engine
//!
//! Provides sequential scenario execution for both suites.

mod runner;

pub use runner::{ScenarioSuite, SuiteRunner, Variant, Verdict};
