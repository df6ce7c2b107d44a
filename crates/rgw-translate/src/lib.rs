// SPDX-License-Identifier: MIT OR Apache-2.0
//! Status translation between backend errors and the RPC boundary.
//!
//! The gateway's business logic raises heterogeneous errors: structured
//! [`ApiError`]s from the resource API, revision-store errors that may
//! already be transport-shaped, and plain errors from everywhere else.
//! The transport boundary wants exactly one shape — a `{code, message}`
//! [`TransportStatus`]. This crate does the mapping:
//!
//! * [`translate_api_error`] classifies resource API errors via a fixed
//!   reason table and passes already-carried statuses through verbatim.
//! * [`translate_repo_error`] only does the pass-through; revision-store
//!   errors are pre-classified at their origin or left opaque.
//!
//! Errors that match neither case are returned unchanged. They carry no
//! extractable status, so the transport layer still sees them as opaque
//! failures — deliberately distinct from "classified as `UNKNOWN`".

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::error::Error as StdError;

use tracing::debug;

use rgw_api::{ApiError, ApiReason};
pub use rgw_api::ResourceKind;
pub use rgw_status::{
    extract_status, BoxError, StatusCode, TransportError, TransportStatus, MAX_CHAIN_DEPTH,
};

// ---------------------------------------------------------------------------
// Classification table
// ---------------------------------------------------------------------------

/// Fixed mapping from resource API reasons to transport status codes.
///
/// Pure static data; [`ApiReason::Other`] has no entry on purpose, so
/// unclassified API errors fall through [`translate_api_error`] unchanged.
const REASON_TO_CODE: &[(ApiReason, StatusCode)] = &[
    (ApiReason::Forbidden, StatusCode::PermissionDenied),
    (ApiReason::Unauthorized, StatusCode::Unauthenticated),
    (ApiReason::ServerTimeout, StatusCode::Unavailable),
    (ApiReason::Conflict, StatusCode::Aborted),
    (ApiReason::TooManyRequests, StatusCode::ResourceExhausted),
    (ApiReason::NotFound, StatusCode::NotFound),
];

/// Look up the transport status code for a resource API reason.
///
/// Returns `None` for reasons the table deliberately leaves unmapped.
pub fn classify_reason(reason: ApiReason) -> Option<StatusCode> {
    REASON_TO_CODE
        .iter()
        .find(|(r, _)| *r == reason)
        .map(|(_, code)| *code)
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// Translate a resource API error into a transport-shaped error.
///
/// Applied once, at the boundary between business logic and the transport
/// layer:
///
/// 1. An error whose chain already carries a [`TransportStatus`] becomes a
///    [`TransportError`] with that exact status — never reclassified,
///    never wrapped a second time.
/// 2. An error whose chain contains an [`ApiError`] with a mapped reason
///    becomes a [`TransportError`] whose code comes from the reason table
///    and whose message is the input error's full text, verbatim.
/// 3. Anything else is returned unchanged.
pub fn translate_api_error(err: BoxError) -> BoxError {
    if let Some(status) = extract_status(err.as_ref()) {
        let status = status.clone();
        debug!(code = %status.code(), "passing through existing transport status");
        return Box::new(TransportError::new(status));
    }
    match api_reason(err.as_ref()).and_then(classify_reason) {
        Some(code) => {
            debug!(%code, "classified resource API error");
            let status = TransportStatus::new(code, err.to_string());
            Box::new(TransportError::new(status))
        }
        None => err,
    }
}

/// Translate a revision-store error for the transport boundary.
///
/// The revision store raises transport-shaped errors at their origin when
/// it wants a specific code; no classification table applies here. A status
/// already carried anywhere in the chain is passed through verbatim, and
/// every other error is returned untouched.
pub fn translate_repo_error(err: BoxError) -> BoxError {
    match extract_status(err.as_ref()) {
        Some(status) => {
            let status = status.clone();
            debug!(code = %status.code(), "passing through existing transport status");
            Box::new(TransportError::new(status))
        }
        None => err,
    }
}

/// [`Result`] adapter for [`translate_api_error`]; `Ok` passes through
/// untouched, producing no error.
pub fn translate_api_result<T>(res: Result<T, BoxError>) -> Result<T, BoxError> {
    res.map_err(translate_api_error)
}

/// [`Result`] adapter for [`translate_repo_error`]; `Ok` passes through
/// untouched, producing no error.
pub fn translate_repo_result<T>(res: Result<T, BoxError>) -> Result<T, BoxError> {
    res.map_err(translate_repo_error)
}

/// Find the first [`ApiError`] in the chain and report its reason.
fn api_reason(err: &(dyn StdError + 'static)) -> Option<ApiReason> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    for _ in 0..MAX_CHAIN_DEPTH {
        let link = current?;
        if let Some(api) = link.downcast_ref::<ApiError>() {
            return Some(api.reason());
        }
        current = link.source();
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
