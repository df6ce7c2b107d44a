// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resource API error family for the Resource Gateway.
//!
//! The control-plane resource API reports failures as an [`ApiError`]: a
//! structured [`ApiReason`], a preformatted human-readable message, and an
//! optional underlying cause. Exactly one reason applies per error; the
//! reason is what the translation layer classifies on, and the message is
//! what it must preserve verbatim.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

// ---------------------------------------------------------------------------
// ApiReason
// ---------------------------------------------------------------------------

/// Structured classification attached to a resource API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiReason {
    /// The caller is known but may not perform the operation.
    Forbidden,
    /// The caller presented no (or invalid) credentials.
    Unauthorized,
    /// The operation conflicts with the current state of the resource.
    Conflict,
    /// The caller is being throttled.
    TooManyRequests,
    /// The server could not complete the operation in time.
    ServerTimeout,
    /// The named resource does not exist.
    NotFound,
    /// Default bucket for errors with no specific classification.
    Other,
}

impl ApiReason {
    /// Stable `&'static str` representation (e.g. `"forbidden"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::Unauthorized => "unauthorized",
            Self::Conflict => "conflict",
            Self::TooManyRequests => "too_many_requests",
            Self::ServerTimeout => "server_timeout",
            Self::NotFound => "not_found",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ApiReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ResourceKind
// ---------------------------------------------------------------------------

/// Names a control-plane resource type, e.g. `deployments.apps`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKind {
    /// API group the kind belongs to; empty for the core group.
    pub group: String,
    /// Plural kind name, e.g. `deployments`.
    pub kind: String,
}

impl ResourceKind {
    /// Create a resource kind from a group and a plural kind name.
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Error raised by the control-plane resource API.
///
/// The message is formatted once at construction time and never rewritten,
/// so downstream consumers (translation included) can rely on it verbatim.
#[derive(Debug)]
pub struct ApiError {
    reason: ApiReason,
    message: String,
    retry_after_secs: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ApiError {
    /// The caller may not perform the operation on the named resource.
    pub fn forbidden(
        kind: &ResourceKind,
        name: &str,
        cause: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            reason: ApiReason::Forbidden,
            message: format!("{kind} \"{name}\" is forbidden: {cause}"),
            retry_after_secs: None,
            source: Some(Box::new(cause)),
        }
    }

    /// The caller presented no (or invalid) credentials.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            reason: ApiReason::Unauthorized,
            message: message.into(),
            retry_after_secs: None,
            source: None,
        }
    }

    /// The operation conflicts with the resource's current state.
    pub fn conflict(
        kind: &ResourceKind,
        name: &str,
        cause: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            reason: ApiReason::Conflict,
            message: format!("operation cannot be fulfilled on {kind} \"{name}\": {cause}"),
            retry_after_secs: None,
            source: Some(Box::new(cause)),
        }
    }

    /// The caller is being throttled and may retry later.
    pub fn too_many_requests(message: impl Into<String>, retry_after_secs: u64) -> Self {
        Self {
            reason: ApiReason::TooManyRequests,
            message: message.into(),
            retry_after_secs: Some(retry_after_secs),
            source: None,
        }
    }

    /// The server could not complete the operation in time.
    pub fn server_timeout(kind: &ResourceKind, operation: &str, retry_after_secs: u64) -> Self {
        Self {
            reason: ApiReason::ServerTimeout,
            message: format!(
                "the {operation} operation against {kind} could not be completed at this time, \
                 please try again"
            ),
            retry_after_secs: Some(retry_after_secs),
            source: None,
        }
    }

    /// The named resource does not exist.
    pub fn not_found(kind: &ResourceKind, name: &str) -> Self {
        Self {
            reason: ApiReason::NotFound,
            message: format!("{kind} \"{name}\" not found"),
            retry_after_secs: None,
            source: None,
        }
    }

    /// An error with no specific classification.
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            reason: ApiReason::Other,
            message: message.into(),
            retry_after_secs: None,
            source: None,
        }
    }

    /// The structured reason attached to this error.
    pub fn reason(&self) -> ApiReason {
        self.reason
    }

    /// Advisory retry delay, when the server supplied one.
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.retry_after_secs
    }

    /// `true` when the reason is [`ApiReason::Forbidden`].
    pub fn is_forbidden(&self) -> bool {
        self.reason == ApiReason::Forbidden
    }

    /// `true` when the reason is [`ApiReason::Unauthorized`].
    pub fn is_unauthorized(&self) -> bool {
        self.reason == ApiReason::Unauthorized
    }

    /// `true` when the reason is [`ApiReason::Conflict`].
    pub fn is_conflict(&self) -> bool {
        self.reason == ApiReason::Conflict
    }

    /// `true` when the reason is [`ApiReason::TooManyRequests`].
    pub fn is_too_many_requests(&self) -> bool {
        self.reason == ApiReason::TooManyRequests
    }

    /// `true` when the reason is [`ApiReason::ServerTimeout`].
    pub fn is_server_timeout(&self) -> bool {
        self.reason == ApiReason::ServerTimeout
    }

    /// `true` when the reason is [`ApiReason::NotFound`].
    pub fn is_not_found(&self) -> bool {
        self.reason == ApiReason::NotFound
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
