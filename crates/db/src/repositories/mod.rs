//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that must run inside a
//! caller-owned transaction take `&mut PgConnection` instead; callers pass
//! `&mut *tx`.
//!
//! Lock order inside a transaction is always mascot row first, then
//! progress rows.

pub mod chat_repo;
pub mod mascot_repo;
pub mod mascot_settings_repo;
pub mod mission_progress_repo;
pub mod mission_repo;
pub mod user_repo;

pub use chat_repo::ChatRepo;
pub use mascot_repo::MascotRepo;
pub use mascot_settings_repo::MascotSettingsRepo;
pub use mission_progress_repo::MissionProgressRepo;
pub use mission_repo::MissionRepo;
pub use user_repo::UserRepo;
