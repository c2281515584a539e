use std::collections::HashMap;

use serde::{ Deserialize, Serialize };
use thiserror::Error;

/// Return contract for every fallible operation in this crate. Exactly one of
/// the two cases is ever populated; the enum discriminant enforces it.
pub type StoreResult<T> = Result<T, StoreError>;

/// A machine-readable error payload: numeric code, string namespace, short
/// reason and an open detail map for anything else worth reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredError {
    pub message: String,
    pub code: i32,
    pub domain: String,
    pub reason: String,
    pub details: HashMap<String, serde_json::Value>,
}

/// Failure taxonomy for the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The driver failed to establish a connection.
    #[error("failed to connect to database: {0}")]
    Connection(String),

    /// An operation that needs a connection ran before a successful connect.
    #[error("no connection established")]
    NoConnection,

    /// A statement failed during execution; the implicit transaction was
    /// rolled back.
    #[error("error executing the query: {0}")]
    Execution(String),

    /// `close` was called with no open connection.
    #[error("connection is already closed or does not exist")]
    AlreadyClosed,

    /// A returned row could not be mapped into the record type.
    #[error("failed to decode row: {0}")]
    Decode(String),

    /// A query template named a placeholder that matches no record field.
    #[error("unknown placeholder `{0}` in query template")]
    UnknownPlaceholder(String),

    /// A statement that must return rows returned none. This signals a defect
    /// rather than an ordinary runtime failure.
    #[error("invariant violation: {}", .0.message)]
    InvariantViolation(StructuredError),
}
