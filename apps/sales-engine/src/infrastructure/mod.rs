//! Infrastructure Layer
//!
//! Adapters for the ports and repositories defined further in:
//!
//! - **Driven Adapters (Outbound)**:
//!   - `persistence/`: order and objective stores
//!   - `reference/`: catalog and directory collaborators
//!
//! - **Driver Adapters (Inbound)**:
//!   - `http/`: REST API controller

pub mod http;
pub mod persistence;
pub mod reference;
