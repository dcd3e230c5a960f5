//! Contact message status and submission validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Triage status of a contact message. Stored as TEXT with a CHECK
/// constraint; new submissions always start as [`ContactStatus::Unread`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Unread,
    Read,
    Replied,
    Archived,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Unread => "unread",
            ContactStatus::Read => "read",
            ContactStatus::Replied => "replied",
            ContactStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(ContactStatus::Unread),
            "read" => Ok(ContactStatus::Read),
            "replied" => Ok(ContactStatus::Replied),
            "archived" => Ok(ContactStatus::Archived),
            other => Err(CoreError::Validation(format!(
                "Unknown contact status '{other}'. Must be one of: unread, read, replied, archived"
            ))),
        }
    }
}

/// Maximum accepted length for the free-text message body.
pub const MAX_MESSAGE_LEN: usize = 10_000;

/// Maximum accepted length for name and subject fields.
pub const MAX_SHORT_FIELD_LEN: usize = 200;

/// Validate a public contact form submission.
///
/// Checks the email format and the presence/length of the text fields.
/// Returns the first violation found.
pub fn validate_submission(
    name: &str,
    email: &str,
    subject: Option<&str>,
    body: &str,
) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if name.len() > MAX_SHORT_FIELD_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_SHORT_FIELD_LEN} characters"
        )));
    }
    if !validator::ValidateEmail::validate_email(&email) {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    if let Some(subject) = subject {
        if subject.len() > MAX_SHORT_FIELD_LEN {
            return Err(CoreError::Validation(format!(
                "Subject must be at most {MAX_SHORT_FIELD_LEN} characters"
            )));
        }
    }
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Message must not be empty".into()));
    }
    if body.len() > MAX_MESSAGE_LEN {
        return Err(CoreError::Validation(format!(
            "Message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(())
}
