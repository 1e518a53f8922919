//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither a phone number nor an email was supplied.
    MissingContact,

    /// The provided record ID is empty.
    EmptyId,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContact => write!(f, "Please enter a phone number or email."),
            Self::EmptyId => write!(f, "Record ID cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}
