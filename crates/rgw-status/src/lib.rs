// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canonical transport status model for the Resource Gateway RPC boundary.
//!
//! A [`TransportStatus`] is the immutable `{code, message}` pair the
//! transport serialises onto the wire. [`TransportError`] carries exactly
//! one status through an error chain, and [`extract_status`] recovers the
//! first status found in an arbitrarily wrapped chain without altering it.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// Boxed error alias used across the gateway's translation seams.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Maximum number of chain links [`extract_status`] follows.
///
/// A malformed wrapper that reports itself (or an ancestor) as its own
/// source would otherwise keep the walk alive forever.
pub const MAX_CHAIN_DEPTH: usize = 128;

// ---------------------------------------------------------------------------
// StatusCode
// ---------------------------------------------------------------------------

/// Canonical RPC status code.
///
/// The set and wire values follow the standard RPC code space. Each variant
/// serialises to a `SCREAMING_SNAKE_CASE` string that is stable across
/// releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    /// Not an error; returned on success.
    Ok,
    /// The operation was cancelled by the caller.
    Cancelled,
    /// Unknown error, e.g. an unrecognised error value from another space.
    Unknown,
    /// The client supplied an invalid argument.
    InvalidArgument,
    /// The deadline expired before the operation could complete.
    DeadlineExceeded,
    /// A requested entity was not found.
    NotFound,
    /// An entity the client attempted to create already exists.
    AlreadyExists,
    /// The caller does not have permission to execute the operation.
    PermissionDenied,
    /// A per-caller or system-wide quota has been exhausted.
    ResourceExhausted,
    /// The system is not in a state required for the operation.
    FailedPrecondition,
    /// The operation was aborted, typically due to a concurrency conflict.
    Aborted,
    /// The operation was attempted past the valid range.
    OutOfRange,
    /// The operation is not implemented or not supported.
    Unimplemented,
    /// An internal invariant was broken.
    Internal,
    /// The service is currently unavailable; retrying may help.
    Unavailable,
    /// Unrecoverable data loss or corruption.
    DataLoss,
    /// The request lacks valid authentication credentials.
    Unauthenticated,
}

impl StatusCode {
    /// Stable `&'static str` representation (e.g. `"PERMISSION_DENIED"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Aborted => "ABORTED",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
            Self::DataLoss => "DATA_LOSS",
            Self::Unauthenticated => "UNAUTHENTICATED",
        }
    }

    /// Numeric wire value of the code.
    pub fn value(&self) -> u32 {
        match self {
            Self::Ok => 0,
            Self::Cancelled => 1,
            Self::Unknown => 2,
            Self::InvalidArgument => 3,
            Self::DeadlineExceeded => 4,
            Self::NotFound => 5,
            Self::AlreadyExists => 6,
            Self::PermissionDenied => 7,
            Self::ResourceExhausted => 8,
            Self::FailedPrecondition => 9,
            Self::Aborted => 10,
            Self::OutOfRange => 11,
            Self::Unimplemented => 12,
            Self::Internal => 13,
            Self::Unavailable => 14,
            Self::DataLoss => 15,
            Self::Unauthenticated => 16,
        }
    }

    /// Look a code up by its numeric wire value.
    pub fn from_value(value: u32) -> Option<Self> {
        let code = match value {
            0 => Self::Ok,
            1 => Self::Cancelled,
            2 => Self::Unknown,
            3 => Self::InvalidArgument,
            4 => Self::DeadlineExceeded,
            5 => Self::NotFound,
            6 => Self::AlreadyExists,
            7 => Self::PermissionDenied,
            8 => Self::ResourceExhausted,
            9 => Self::FailedPrecondition,
            10 => Self::Aborted,
            11 => Self::OutOfRange,
            12 => Self::Unimplemented,
            13 => Self::Internal,
            14 => Self::Unavailable,
            15 => Self::DataLoss,
            16 => Self::Unauthenticated,
            _ => return None,
        };
        Some(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TransportStatus
// ---------------------------------------------------------------------------

/// Immutable `{code, message}` pair consumed by the transport layer.
///
/// Fields are private: once constructed a status is never rewritten, which
/// is what lets pass-through translation preserve it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportStatus {
    code: StatusCode,
    message: String,
}

impl TransportStatus {
    /// Create a status from a code and a human-readable message.
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The success status (code `OK`, empty message).
    pub fn ok() -> Self {
        Self::new(StatusCode::Ok, "")
    }

    /// Status code.
    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Wrap this status into an error value for the transport boundary.
    pub fn into_error(self) -> TransportError {
        TransportError::new(self)
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// An error value carrying exactly one [`TransportStatus`].
///
/// This is the terminal error shape handed to the transport layer, and the
/// anchor [`extract_status`] looks for when walking a wrapped chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status}")]
pub struct TransportError {
    status: TransportStatus,
}

impl TransportError {
    /// Wrap a status into an error value.
    pub fn new(status: TransportStatus) -> Self {
        Self { status }
    }

    /// Borrow the carried status.
    pub fn status(&self) -> &TransportStatus {
        &self.status
    }

    /// Unwrap back to the carried status, verbatim.
    pub fn into_status(self) -> TransportStatus {
        self.status
    }
}

impl From<TransportStatus> for TransportError {
    fn from(status: TransportStatus) -> Self {
        Self::new(status)
    }
}

// ---------------------------------------------------------------------------
// StatusDto
// ---------------------------------------------------------------------------

/// Serialisable snapshot of a [`TransportStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDto {
    /// Status code.
    pub code: StatusCode,
    /// Human-readable message.
    pub message: String,
}

impl From<&TransportStatus> for StatusDto {
    fn from(status: &TransportStatus) -> Self {
        Self {
            code: status.code,
            message: status.message.clone(),
        }
    }
}

impl From<StatusDto> for TransportStatus {
    fn from(dto: StatusDto) -> Self {
        Self {
            code: dto.code,
            message: dto.message,
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Recover the first [`TransportStatus`] carried anywhere in an error chain.
///
/// Walks the error itself, then each `source()` link in turn, and returns a
/// borrow of the first carried status. Returns `None` when the chain is
/// exhausted — an absent status is not an error. The walk visits at most
/// [`MAX_CHAIN_DEPTH`] links so malformed chains still terminate.
///
/// This is the sanctioned way for any layer (including tests) to ask
/// whether an error already carries a transport status: a producer
/// participates by placing a [`TransportError`] anywhere in its chain.
pub fn extract_status<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a TransportStatus> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    for _ in 0..MAX_CHAIN_DEPTH {
        let link = current?;
        if let Some(transport) = link.downcast_ref::<TransportError>() {
            return Some(transport.status());
        }
        current = link.source();
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
