use std::fmt::Display;

use anyhow::Error;
use thiserror::Error;

/// A general error, consisting of only a message.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct GeneralError {
    message: String,
}

impl GeneralError {
    /// Constructs a new general error.
    pub fn new<M>(message: M) -> Self
    where
        M: Display,
    {
        Self {
            message: message.to_string(),
        }
    }
}

/// A not found error.
#[derive(Error, Debug)]
#[error("{target} not found")]
pub struct NotFoundError {
    target: String,
}

impl NotFoundError {
    /// Constructs a new not found error.
    pub fn new<M>(target: M) -> Self
    where
        M: Display,
    {
        Self {
            target: target.to_string(),
        }
    }
}

/// A broken battle invariant, raised only when invariants are strictly enforced.
#[derive(Error, Debug)]
#[error("invariant violated: {message}")]
pub struct InvariantViolationError {
    message: String,
}

impl InvariantViolationError {
    /// Constructs a new invariant violation.
    pub fn new<M>(message: M) -> Self
    where
        M: Display,
    {
        Self {
            message: message.to_string(),
        }
    }
}

/// Helper for an [`struct@Error`] wrapping a [`GeneralError`].
pub fn general_error<M>(message: M) -> Error
where
    M: Display,
{
    Error::new(GeneralError::new(message))
}

/// Helper for an [`struct@Error`] wrapping a [`NotFoundError`].
pub fn not_found_error<M>(target: M) -> Error
where
    M: Display,
{
    Error::new(NotFoundError::new(target))
}

/// Helper for an [`struct@Error`] wrapping an [`InvariantViolationError`].
pub fn invariant_violation_error<M>(message: M) -> Error
where
    M: Display,
{
    Error::new(InvariantViolationError::new(message))
}

#[cfg(test)]
mod battle_error_test {
    use crate::error::{
        NotFoundError,
        general_error,
        not_found_error,
    };

    #[test]
    fn formats_messages() {
        assert_eq!(general_error("bad input").to_string(), "bad input");
        assert_eq!(
            not_found_error("move splash").to_string(),
            "move splash not found"
        );
    }

    #[test]
    fn downcasts_to_concrete_error() {
        let error = not_found_error("species missingno");
        assert!(error.downcast_ref::<NotFoundError>().is_some());
    }
}
