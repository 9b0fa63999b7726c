//! Test case catalogue and result models
//!
//! Defines test cases, results, and status types for both suites.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independent suites
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    Api,
    Ui,
}

impl Suite {
    pub fn name(&self) -> &'static str {
        match self {
            Suite::Api => "API",
            Suite::Ui => "UI",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "api" => Some(Suite::Api),
            "ui" | "web" | "browser" => Some(Suite::Ui),
            _ => None,
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every scripted scenario in the repository
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCase {
    // Users
    GetUserById,
    GetUserNotFound,
    CreateUser,
    CreateUserDuplicateEmail,
    CreateUserInvalidEmail,
    UpdateUser,
    DeleteUser,

    // Products
    ProductsPagination,

    // Authentication
    LoginSuccess,
    LoginInvalidCredentials,
    UnauthorizedAccess,

    // Rate limiting
    RateLimitExceeded,

    // Performance
    ResponseTimeUnderLoad,

    // Browser login flows
    ValidLogin,
    InvalidUsername,
    InvalidPassword,
    EmptyUsername,
    EmptyPassword,
    SqlInjectionUsername,
    XssAttackUsername,
    RememberMe,
    Logout,
    MultipleInvalidInputs,
}

impl TestCase {
    /// Catalogue code, e.g. `TC-API-001`
    pub fn code(&self) -> &'static str {
        match self {
            TestCase::GetUserById => "TC-API-001",
            TestCase::GetUserNotFound => "TC-API-002",
            TestCase::CreateUser => "TC-API-003",
            TestCase::CreateUserDuplicateEmail => "TC-API-004",
            TestCase::CreateUserInvalidEmail => "TC-API-005",
            TestCase::UpdateUser => "TC-API-006",
            TestCase::DeleteUser => "TC-API-007",
            TestCase::ProductsPagination => "TC-API-008",
            TestCase::LoginSuccess => "TC-API-009",
            TestCase::LoginInvalidCredentials => "TC-API-010",
            TestCase::UnauthorizedAccess => "TC-API-011",
            TestCase::RateLimitExceeded => "TC-API-012",
            TestCase::ResponseTimeUnderLoad => "TC-API-PERF",
            TestCase::ValidLogin => "TC-AUTH-001",
            TestCase::InvalidUsername => "TC-AUTH-002",
            TestCase::InvalidPassword => "TC-AUTH-003",
            TestCase::EmptyUsername => "TC-AUTH-004",
            TestCase::EmptyPassword => "TC-AUTH-005",
            TestCase::SqlInjectionUsername => "TC-AUTH-006",
            TestCase::XssAttackUsername => "TC-AUTH-007",
            TestCase::RememberMe => "TC-AUTH-008",
            TestCase::Logout => "TC-AUTH-010",
            TestCase::MultipleInvalidInputs => "TC-AUTH-DDT",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TestCase::GetUserById => "GET User By ID - Success",
            TestCase::GetUserNotFound => "GET User By ID - Not Found",
            TestCase::CreateUser => "POST Create User - Success",
            TestCase::CreateUserDuplicateEmail => "POST Create User - Duplicate Email",
            TestCase::CreateUserInvalidEmail => "POST Create User - Invalid Email Format",
            TestCase::UpdateUser => "PUT Update User - Success",
            TestCase::DeleteUser => "DELETE User - Success",
            TestCase::ProductsPagination => "GET Products List - Pagination",
            TestCase::LoginSuccess => "POST Login - Success",
            TestCase::LoginInvalidCredentials => "POST Login - Invalid Credentials",
            TestCase::UnauthorizedAccess => "Unauthorized Access - No Token",
            TestCase::RateLimitExceeded => "Rate Limiting - Too Many Requests",
            TestCase::ResponseTimeUnderLoad => "Response Time Under Load",
            TestCase::ValidLogin => "Valid User Login",
            TestCase::InvalidUsername => "Invalid Username Login Attempt",
            TestCase::InvalidPassword => "Invalid Password Login Attempt",
            TestCase::EmptyUsername => "Empty Username Field",
            TestCase::EmptyPassword => "Empty Password Field",
            TestCase::SqlInjectionUsername => "SQL Injection in Username Field",
            TestCase::XssAttackUsername => "XSS Attack in Username Field",
            TestCase::RememberMe => "Remember Me Functionality",
            TestCase::Logout => "Logout Functionality",
            TestCase::MultipleInvalidInputs => "Multiple Invalid Inputs",
        }
    }

    pub fn suite(&self) -> Suite {
        match self {
            TestCase::GetUserById
            | TestCase::GetUserNotFound
            | TestCase::CreateUser
            | TestCase::CreateUserDuplicateEmail
            | TestCase::CreateUserInvalidEmail
            | TestCase::UpdateUser
            | TestCase::DeleteUser
            | TestCase::ProductsPagination
            | TestCase::LoginSuccess
            | TestCase::LoginInvalidCredentials
            | TestCase::UnauthorizedAccess
            | TestCase::RateLimitExceeded
            | TestCase::ResponseTimeUnderLoad => Suite::Api,
            _ => Suite::Ui,
        }
    }

    /// Scenario group within the suite
    pub fn category(&self) -> &'static str {
        match self {
            TestCase::GetUserById
            | TestCase::GetUserNotFound
            | TestCase::CreateUser
            | TestCase::CreateUserDuplicateEmail
            | TestCase::CreateUserInvalidEmail
            | TestCase::UpdateUser
            | TestCase::DeleteUser => "Users",
            TestCase::ProductsPagination => "Products",
            TestCase::LoginSuccess
            | TestCase::LoginInvalidCredentials
            | TestCase::UnauthorizedAccess => "Auth",
            TestCase::RateLimitExceeded => "RateLimiting",
            TestCase::ResponseTimeUnderLoad => "Performance",
            TestCase::SqlInjectionUsername | TestCase::XssAttackUsername => "Security",
            TestCase::EmptyUsername
            | TestCase::EmptyPassword
            | TestCase::MultipleInvalidInputs => "Validation",
            _ => "Login",
        }
    }

    /// All cases in execution order
    pub fn all() -> Vec<TestCase> {
        vec![
            TestCase::GetUserById,
            TestCase::GetUserNotFound,
            TestCase::CreateUser,
            TestCase::CreateUserDuplicateEmail,
            TestCase::CreateUserInvalidEmail,
            TestCase::UpdateUser,
            TestCase::DeleteUser,
            TestCase::ProductsPagination,
            TestCase::LoginSuccess,
            TestCase::LoginInvalidCredentials,
            TestCase::UnauthorizedAccess,
            TestCase::RateLimitExceeded,
            TestCase::ResponseTimeUnderLoad,
            TestCase::ValidLogin,
            TestCase::InvalidUsername,
            TestCase::InvalidPassword,
            TestCase::EmptyUsername,
            TestCase::EmptyPassword,
            TestCase::SqlInjectionUsername,
            TestCase::XssAttackUsername,
            TestCase::RememberMe,
            TestCase::Logout,
            TestCase::MultipleInvalidInputs,
        ]
    }

    /// All cases belonging to one suite
    pub fn for_suite(suite: Suite) -> Vec<TestCase> {
        Self::all()
            .into_iter()
            .filter(|c| c.suite() == suite)
            .collect()
    }

    /// Parse from catalogue code (case-insensitive)
    pub fn from_code(code: &str) -> Option<TestCase> {
        let code = code.trim();
        Self::all()
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.name())
    }
}

/// Test execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
            TestStatus::Skip => "○",
            TestStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }

    /// Whether the status should fail the run
    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Fail | TestStatus::Error)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Skip => write!(f, "SKIP"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single scenario execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub test_case: TestCase,
    /// Parameter label for data-driven cases
    pub variant: Option<String>,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl TestResult {
    pub fn pass(test_case: TestCase, duration_ms: u64) -> Self {
        Self {
            test_case,
            variant: None,
            status: TestStatus::Pass,
            duration_ms,
            message: None,
            details: None,
        }
    }

    pub fn fail(test_case: TestCase, duration_ms: u64, message: impl Into<String>) -> Self {
        Self {
            test_case,
            variant: None,
            status: TestStatus::Fail,
            duration_ms,
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn skip(test_case: TestCase, reason: impl Into<String>) -> Self {
        Self {
            test_case,
            variant: None,
            status: TestStatus::Skip,
            duration_ms: 0,
            message: Some(reason.into()),
            details: None,
        }
    }

    pub fn error(test_case: TestCase, duration_ms: u64, error: impl Into<String>) -> Self {
        Self {
            test_case,
            variant: None,
            status: TestStatus::Error,
            duration_ms,
            message: Some(error.into()),
            details: None,
        }
    }

    pub fn with_variant(mut self, variant: Option<String>) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Display label including the variant, e.g. `TC-AUTH-DDT[test/short]`
    pub fn label(&self) -> String {
        match &self.variant {
            Some(v) => format!("{}[{}]", self.test_case.code(), v),
            None => self.test_case.code().to_string(),
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}ms]",
            self.status.symbol(),
            self.label(),
            self.test_case.name(),
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of one suite run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub id: String,
    pub suite: Suite,
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl SuiteSummary {
    pub fn new(
        suite: Suite,
        target: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<TestResult>,
    ) -> Self {
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();
        let passed = count(TestStatus::Pass);
        let failed = count(TestStatus::Fail);
        let skipped = count(TestStatus::Skip);
        let errors = count(TestStatus::Error);

        Self {
            id: generate_run_id(started_at),
            suite,
            target: target.into(),
            started_at,
            completed_at: Utc::now(),
            total: results.len(),
            passed,
            failed,
            skipped,
            errors,
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// No failed or errored results (skips are allowed)
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

impl fmt::Display for SuiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Suite - {}", self.suite, self.target)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}",
            self.total, self.passed, self.failed, self.skipped, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}

fn generate_run_id(started_at: DateTime<Utc>) -> String {
    let timestamp = started_at.format("%Y%m%d_%H%M%S");
    let random: u32 = rand::random::<u32>() % 10000;
    format!("{timestamp}_{random:04}")
}
