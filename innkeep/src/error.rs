//! Error types for the innkeep library.
//!
//! This module provides the error hierarchy shared by the record store,
//! the query engine and the lifecycle operations, using `thiserror` for
//! ergonomic error handling.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::record::RecordKind;

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(7)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A single field or setting failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A record failed its business-rule checks and was reverted.
    #[error("invalid {kind} record: {}", errors.join("; "))]
    Invalid {
        /// The record type that failed validation.
        kind: RecordKind,
        /// Every message produced by validation, in evaluation order.
        errors: Vec<String>,
    },

    /// A query named a field the record type does not declare.
    #[error("{kind} records have no field '{field}'")]
    UnknownField {
        /// The record type being queried.
        kind: RecordKind,
        /// The unknown field name.
        field: String,
    },

    /// A stored record could not be decoded into its typed form.
    #[error("malformed {kind} record: field '{field}' {reason}")]
    MalformedRecord {
        /// The record type being decoded.
        kind: RecordKind,
        /// The offending field.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The requested record does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The record that was not found.
        resource: String,
    },

    /// No room is available for a new reservation.
    #[error("no vacant rooms{}", room_type.as_ref().map(|t| format!(" of type {t}")).unwrap_or_default())]
    NoVacancy {
        /// The requested room type, if the request was restricted to one.
        room_type: Option<String>,
    },

    /// A lifecycle transition is not permitted from the current state.
    #[error("cannot {action} {subject}: current status is {status}")]
    InvalidTransition {
        /// The attempted transition.
        action: &'static str,
        /// The record being transitioned.
        subject: String,
        /// The status that blocked the transition.
        status: String,
    },

    /// Check-in was attempted before the scheduled check-in time.
    #[error("reservation {code} can only be checked in after {not_before}")]
    CheckInTooEarly {
        /// The reservation code.
        code: String,
        /// The scheduled check-in time.
        not_before: NaiveDateTime,
    },

    /// Staged writes of a multi-record transition could not be committed.
    #[error("transition not committed; failed to write {}: {reason}", files.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    TransitionFailed {
        /// The files whose staged write failed.
        files: Vec<PathBuf>,
        /// The first underlying failure.
        reason: String,
    },
}

impl Error {
    /// Returns the validation messages carried by an [`Error::Invalid`].
    ///
    /// Every other variant yields an empty slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::Error;
    /// use innkeep::record::RecordKind;
    ///
    /// let err = Error::Invalid {
    ///     kind: RecordKind::Room,
    ///     errors: vec!["Invalid Room Floor.".to_string()],
    /// };
    /// assert_eq!(err.validation_messages(), ["Invalid Room Floor."]);
    /// ```
    #[must_use]
    pub fn validation_messages(&self) -> &[String] {
        match self {
            Self::Invalid { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Check if the error reports a business-rule failure rather than an
    /// environmental one (I/O, configuration).
    #[must_use]
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Self::Invalid { .. }
                | Self::NoVacancy { .. }
                | Self::InvalidTransition { .. }
                | Self::CheckInTooEarly { .. }
        )
    }
}
