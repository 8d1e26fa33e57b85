use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::errors::MalformedInput;

// local@domain.tld, no whitespace and a single `@`
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("the email pattern is a valid regex")
});

/// A newsletter address, trimmed and lowercased.
///
/// The accepted shape is deliberately loose: `local@domain.tld` where no part
/// contains whitespace or a second `@`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SubscriberEmail {
    type Error = MalformedInput;

    fn try_from(email: String) -> Result<Self, Self::Error> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(MalformedInput::MissingField {
                message: "Email is required".into(),
            });
        }
        if EMAIL_SHAPE.is_match(&email) {
            Ok(SubscriberEmail(email))
        } else {
            Err(MalformedInput::InvalidEmail {
                message: "Please enter a valid email address".into(),
            })
        }
    }
}
