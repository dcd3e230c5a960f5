//! Well-known role name constants.
//!
//! Roles are stored as plain strings on the `users` table and compared
//! against these constants by the authorization extractors.

/// Full access: user management, languages, all content, contact inbox.
pub const ROLE_ADMIN: &str = "admin";

/// Triage access to the contact inbox; no content mutation.
pub const ROLE_EDITOR: &str = "editor";
