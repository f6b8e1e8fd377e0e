use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::errors::QueryNodeError;

/// Outcome classes surfaced to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    Success,
    NotFound,
    InvalidParameter,
    ServiceUnavailable,
    NotReady,
    Cancelled,
    UnexpectedError,
}

impl StatusCode {
    pub fn code(&self) -> i32 {
        match self {
            StatusCode::Success => 0,
            StatusCode::NotFound => 404,
            StatusCode::InvalidParameter => 1100,
            StatusCode::ServiceUnavailable => 2,
            StatusCode::NotReady => 1,
            StatusCode::Cancelled => 3,
            StatusCode::UnexpectedError => 5,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StatusCode::Success => "Success",
            StatusCode::NotFound => "Not Found",
            StatusCode::InvalidParameter => "Invalid Parameter",
            StatusCode::ServiceUnavailable => "Service Unavailable",
            StatusCode::NotReady => "Not Ready",
            StatusCode::Cancelled => "Cancelled",
            StatusCode::UnexpectedError => "Unexpected Error",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: StatusCode,
    pub reason: String,
}

impl Status {
    pub fn success() -> Self {
        Self {
            code: StatusCode::Success,
            reason: String::new(),
        }
    }

    pub fn from_error(err: &QueryNodeError) -> Self {
        Self {
            code: err.status_code(),
            reason: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == StatusCode::Success
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::success()
    }
}

impl From<&QueryNodeError> for Status {
    fn from(err: &QueryNodeError) -> Self {
        Status::from_error(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
