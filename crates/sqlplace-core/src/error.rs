//! Unified error types for sqlplace.
//!
//! Every binding error aborts the whole call: the caller never sees a partially
//! substituted template. Errors that concern a template carry the original,
//! top-level template text, also when raised from inside a bracket sub-template.

use std::path::PathBuf;
use thiserror::Error;

use crate::scanner::PlaceholderKind;
use crate::value::ValueKind;

/// All errors that can occur while binding a template or loading configuration.
#[derive(Error, Debug)]
pub enum BindError {
    // --- Binding ---

    /// A placeholder was reached after every argument had been consumed.
    #[error("number of placeholders in query \"{template}\" does not match number of arguments passed")]
    ArgumentsExhausted { template: String },

    /// The argument's category is not accepted by the placeholder in the active mode.
    #[error(
        "attempt to specify a value of type \"{actual}\" for placeholder of type \"{expected}\" in query template \"{template}\""
    )]
    TypeMismatch {
        expected: PlaceholderKind,
        actual: ValueKind,
        template: String,
    },

    /// A bracket array placeholder lists a different number of sub-templates than the array holds.
    #[error(
        "mismatch in the number of arguments and placeholders in the array: {expected} placeholders, {actual} elements, query: \"{template}\""
    )]
    ArrayArityMismatch {
        expected: usize,
        actual: usize,
        template: String,
    },

    /// An array placeholder has neither an element type letter nor a bracket list.
    #[error("array placeholder without element data type in query \"{template}\"")]
    MissingArrayElementType { template: String },

    /// A dotted identifier contains more than one empty segment.
    #[error("two consecutive `.` characters in column or table name \"{identifier}\"")]
    MalformedIdentifier { identifier: String },

    /// A scalar value was supplied to an array placeholder.
    #[error("attempt to specify a value of type \"{actual}\" for an array placeholder in query template \"{template}\"")]
    NotAnArray { actual: ValueKind, template: String },

    /// NaN or an infinity was supplied to a float placeholder.
    #[error("non-finite float cannot be written as a SQL literal in query template \"{template}\"")]
    NonFiniteFloat { template: String },

    /// Arguments were left over after the last placeholder (only when configured to reject them).
    #[error("{remaining} argument(s) left unused by query template \"{template}\"")]
    ExcessArguments { remaining: usize, template: String },

    // --- Configuration ---

    /// The mode name is not one of: `strict`, `transform`.
    #[error("unknown mode: {0} (supported: strict, transform)")]
    UnknownMode(String),

    /// The configuration file was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, BindError>`.
pub type Result<T> = std::result::Result<T, BindError>;
