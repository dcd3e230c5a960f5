//! Domain types and validation shared by the data layer and the API server.
//!
//! This crate is pure: no I/O, no database, no HTTP. Everything here is
//! either a type, a constant, or a deterministic function.

pub mod contact;
pub mod error;
pub mod locale;
pub mod roles;
pub mod types;
pub mod uploads;
