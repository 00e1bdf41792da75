//! Objectives Bounded Context
//!
//! Sales targets per rep or fleet-wide, with attainment derived from
//! validated order totals at evaluation time.

pub mod errors;
pub mod objective;
pub mod repository;

pub use errors::ObjectiveError;
pub use objective::SalesObjective;
pub use repository::ObjectiveRepository;
