//! Error types for category and window validation
//!
//! The `Display` text of the user-facing variants is exactly what the
//! gateway writes into response bodies.

use thiserror::Error;

/// Category validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Event {0} is undefined")]
    Undefined(String),

    #[error("category name must not be empty")]
    Empty,

    #[error("category name '{0}' is reserved")]
    Reserved(String),
}

/// Look-back window errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookbackError {
    #[error("Parameter 'time' is incorrect")]
    NotAnInteger(String),
}

impl LookbackError {
    /// Name of the request parameter this error refers to.
    pub fn parameter(&self) -> &'static str {
        "time"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_bodies() {
        assert_eq!(
            CategoryError::Undefined("d".into()).to_string(),
            "Event d is undefined"
        );
        assert_eq!(
            LookbackError::NotAnInteger("Wrong".into()).to_string(),
            "Parameter 'time' is incorrect"
        );
    }
}
