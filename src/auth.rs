pub use credentials::AdminCredentials;
pub use errors::AuthError;
pub use extractor::AdminToken;
pub use token::{
    Claims,
    TokenService,
    ADMIN_ROLE,
};

mod credentials;
mod errors;
mod extractor;
mod token;
