use serde::Serialize;

use crate::domain::Pagination;

/// The `{success, message, data, pagination}` body every route answers with.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            success: true,
            message: None,
            data: Some(data),
            pagination: None,
        }
    }

    pub fn page(data: T, pagination: Pagination) -> Self {
        Envelope {
            pagination: Some(pagination),
            ..Envelope::data(data)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Envelope {
            success: true,
            message: Some(message.into()),
            data: None,
            pagination: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Envelope {
            success: false,
            ..Envelope::message(message)
        }
    }
}
