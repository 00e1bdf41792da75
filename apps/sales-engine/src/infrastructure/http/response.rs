//! HTTP response envelopes.
//!
//! Entity payloads serialize the application DTOs directly; these are the
//! envelopes the API adds around scalar results and failures.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Error payload: one plain descriptive message, aggregated when several
/// validation failures apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// A rep's pending notification count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnseenCountResponse {
    /// Unseen audit entries across the rep's orders.
    pub unseen: u64,
}

/// Result of a bulk mark-seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkedSeenResponse {
    /// How many entries were flipped.
    pub marked: u64,
}
