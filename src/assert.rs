//! Assertion helpers for scenarios
//!
//! `check!` and `check_eq!` return an [`AssertionFailure`] wrapped in
//! `anyhow::Error`, so the runner can tell an expected-vs-actual mismatch
//! apart from a transport or browser error.

use anyhow::Result;
use serde_json::Value;
use thiserror::Error;

use crate::http::HttpResponse;

/// Expected-vs-actual mismatch inside a scenario
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct AssertionFailure(pub String);

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Whether an error chain holds an assertion failure
    pub fn is_assertion(err: &anyhow::Error) -> bool {
        err.downcast_ref::<AssertionFailure>().is_some()
    }
}

macro_rules! check {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err(anyhow::Error::new($crate::assert::AssertionFailure(format!($($arg)+))));
        }
    };
    ($cond:expr) => {
        if !$cond {
            return Err(anyhow::Error::new($crate::assert::AssertionFailure(format!(
                "assertion failed: {}",
                stringify!($cond)
            ))));
        }
    };
}

macro_rules! check_eq {
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return Err(anyhow::Error::new($crate::assert::AssertionFailure(format!(
                        "{}: {:?} != {:?}",
                        format!($($arg)+),
                        left,
                        right
                    ))));
                }
            }
        }
    };
    ($left:expr, $right:expr) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return Err(anyhow::Error::new($crate::assert::AssertionFailure(format!(
                        "{} == {}: {:?} != {:?}",
                        stringify!($left),
                        stringify!($right),
                        left,
                        right
                    ))));
                }
            }
        }
    };
}

pub(crate) use check;
pub(crate) use check_eq;

/// Assert the response status, mirroring "Expected X, got Y"
pub fn expect_status(response: &HttpResponse, expected: u16) -> Result<()> {
    check!(
        response.status() == expected,
        "Expected {}, got {}",
        expected,
        response.status()
    );
    Ok(())
}

/// Whether a JSON object has `key`
pub fn has_key(value: &Value, key: &str) -> bool {
    value.get(key).is_some()
}

/// Read a required field; a missing key is an assertion failure
pub fn field<'a>(value: &'a Value, key: &str) -> Result<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| anyhow::Error::new(AssertionFailure(format!("missing field '{key}'"))))
}

/// Read a required string field
pub fn str_field<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    let raw = field(value, key)?;
    raw.as_str().ok_or_else(|| {
        anyhow::Error::new(AssertionFailure(format!(
            "field '{key}' is not a string: {raw}"
        )))
    })
}

/// Extract the `error` object of the JSON error envelope
pub fn error_envelope(response: &HttpResponse) -> Result<Value> {
    let mut body = response.json()?;
    match body.get_mut("error") {
        Some(error) => Ok(error.take()),
        None => Err(anyhow::Error::new(AssertionFailure(format!(
            "response has no error envelope: {}",
            response.body
        )))),
    }
}
