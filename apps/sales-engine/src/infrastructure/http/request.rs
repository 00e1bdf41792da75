//! HTTP request bodies.
//!
//! Bodies that exist only at the HTTP boundary; the entity-shaped payloads
//! (order creation, line updates, objective creation) deserialize straight
//! into the application request DTOs.

use serde::{Deserialize, Serialize};

/// Body of a rejection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectOrderBody {
    /// Reason shown to the sales rep.
    pub reason: String,
}

/// Body of a soft delete, naming the acting admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftDeleteBody {
    /// Admin performing the removal.
    pub acting_admin: String,
}
