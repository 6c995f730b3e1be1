//! Integration test utilities for the library back end
//!
//! Runs the full service and HTTP stack over an in-memory store, so flows
//! can be exercised end to end without a database.

pub mod fixtures;
pub mod helpers;
pub mod memory;

pub use fixtures::*;
pub use helpers::*;
pub use memory::MemoryStore;
