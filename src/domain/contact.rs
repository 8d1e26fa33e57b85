use std::fmt;

use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::MalformedInput;

pub const DEFAULT_SOURCE: &str = "website";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Responded,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
            ContactStatus::Responded => "responded",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ContactStatus {
    type Error = MalformedInput;

    fn try_from(status: &str) -> Result<Self, Self::Error> {
        match status {
            "new" => Ok(ContactStatus::New),
            "read" => Ok(ContactStatus::Read),
            "responded" => Ok(ContactStatus::Responded),
            other => Err(MalformedInput::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// A stored contact form submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub status: ContactStatus,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated contact form submission, not yet persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewContact {
    name: String,
    phone: String,
    email: String,
    message: String,
}

impl NewContact {
    /// Trims every field, lowercases the email and requires a non blank name
    /// and phone. Missing optional fields become empty strings.
    pub fn parse(
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<Self, MalformedInput> {
        let name = trimmed(name);
        let phone = trimmed(phone);
        if name.is_empty() || phone.is_empty() {
            return Err(MalformedInput::MissingField {
                message: "Name and phone are required".into(),
            });
        }
        Ok(NewContact {
            name,
            phone,
            email: trimmed(email).to_lowercase(),
            message: trimmed(message),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Builds the record as it is first stored.
    pub fn into_contact(self, now: DateTime<Utc>) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: self.name,
            phone: self.phone,
            email: self.email,
            message: self.message,
            status: ContactStatus::default(),
            source: DEFAULT_SOURCE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

fn trimmed(field: Option<String>) -> String {
    field.map(|f| f.trim().to_string()).unwrap_or_default()
}
