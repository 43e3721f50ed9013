//! Pure domain logic for the mascot companion backend.
//!
//! Nothing in this crate touches the database. Repositories and handlers
//! load rows, hand plain values to these functions, and persist the results.

pub mod chat;
pub mod error;
pub mod evolution;
pub mod leveling;
pub mod missions;
pub mod roles;
pub mod stats;
pub mod types;
