// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Location name is empty or invalid.
    InvalidName(String),
    /// A required address field is empty or invalid.
    InvalidAddress {
        /// The offending address field.
        field: &'static str,
        /// Description of the validation error.
        reason: String,
    },
    /// A latitude or longitude lies outside its valid range.
    InvalidCoordinate {
        /// Either `latitude` or `longitude`.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An opening or closing time string is blank.
    InvalidTimeOfDay {
        /// Either `open_time` or `close_time`.
        field: &'static str,
    },
    /// The delivery week window could not be computed.
    InvalidPeriodWindow {
        /// Description of the failure.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidAddress { field, reason } => {
                write!(f, "Invalid address field '{field}': {reason}")
            }
            Self::InvalidCoordinate { field, value } => {
                write!(f, "Invalid {field}: {value} is out of range")
            }
            Self::InvalidTimeOfDay { field } => {
                write!(f, "Invalid {field}: value cannot be blank")
            }
            Self::InvalidPeriodWindow { reason } => {
                write!(f, "Invalid delivery period window: {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
