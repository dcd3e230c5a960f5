//! Contact message model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folio_core::types::{DbId, Timestamp};

/// A contact message row from the `contact_messages` table.
///
/// `status` stays a string at this layer; the API converts it through
/// [`folio_core::contact::ContactStatus`] at the boundary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for a public contact form submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
}
