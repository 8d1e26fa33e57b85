#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Access denied. No token provided.")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
