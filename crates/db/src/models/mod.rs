//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and partial updates where the table
//!   is writable through the API

pub mod chat;
pub mod mascot;
pub mod mascot_settings;
pub mod mission;
pub mod mission_progress;
pub mod user;
