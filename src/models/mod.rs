//! Data models shared by both suites

mod test_result;

pub use test_result::{Suite, SuiteSummary, TestCase, TestResult, TestStatus};
