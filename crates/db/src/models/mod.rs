//! Row models and create/update DTOs, one module per entity.

pub mod article;
pub mod contact;
pub mod expertise;
pub mod language;
pub mod profile;
pub mod project;
pub mod user;
