pub mod admin;
pub mod auth;
pub mod mascot;
pub mod missions;
