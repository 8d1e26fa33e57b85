use std::fmt;

use chrono::{
    DateTime,
    Utc,
};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::MalformedInput;
use crate::domain::SubscriberEmail;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    Active,
    Unsubscribed,
}

impl SubscriberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriberStatus::Active => "active",
            SubscriberStatus::Unsubscribed => "unsubscribed",
        }
    }
}

impl fmt::Display for SubscriberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SubscriberStatus {
    type Error = MalformedInput;

    fn try_from(status: &str) -> Result<Self, Self::Error> {
        match status {
            "active" => Ok(SubscriberStatus::Active),
            "unsubscribed" => Ok(SubscriberStatus::Unsubscribed),
            other => Err(MalformedInput::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub status: SubscriberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn new(email: SubscriberEmail, now: DateTime<Utc>) -> Self {
        Subscriber {
            id: Uuid::new_v4(),
            email: email.as_ref().to_string(),
            status: SubscriberStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriberStatus::Active
    }
}
