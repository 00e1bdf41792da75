//! Reference-data adapters for the catalog and directory collaborators.

mod in_memory;

pub use in_memory::{InMemoryCatalog, InMemoryDirectory};
