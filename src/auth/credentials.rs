use crate::app::AuthSettings;

/// The one admin account, compared in plain text.
#[derive(Clone)]
pub struct AdminCredentials {
    email: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(email: String, password: String) -> Self {
        AdminCredentials { email, password }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl From<&AuthSettings> for AdminCredentials {
    fn from(settings: &AuthSettings) -> Self {
        AdminCredentials::new(settings.admin_email.clone(), settings.admin_password.clone())
    }
}
