use actix_web::error::{
    JsonPayloadError,
    QueryPayloadError,
};
use actix_web::http::StatusCode;
use actix_web::{
    HttpRequest,
    HttpResponse,
    ResponseError,
};
use custom_error::custom_error;

use crate::auth::AuthError;
use crate::domain::MalformedInput;
use crate::routes::Envelope;
use crate::store::StoreError;

custom_error! {
///! Error inside route handler, rendered as a `{success: false, message}` envelope.
pub RouteError
    InvalidInput{source:MalformedInput} = "{source}",
    InvalidBody{message:String} = "{message}",
    Unauthorized{source:AuthError} = "{source}",
    DuplicateSubscription = "Email already subscribed",
    NotFound{message:String} = "{message}",
    TooManyRequests = "Too many requests, please try again later.",
    Storage{message:String} = "{message}",
    Internal{message:String} = "{message}",
}

impl ResponseError for RouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            RouteError::InvalidInput { .. }
            | RouteError::InvalidBody { .. }
            | RouteError::DuplicateSubscription => StatusCode::BAD_REQUEST,
            RouteError::Unauthorized {
                source: AuthError::Signing(_),
            } => StatusCode::INTERNAL_SERVER_ERROR,
            RouteError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RouteError::NotFound { .. } => StatusCode::NOT_FOUND,
            RouteError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            RouteError::Storage { .. } | RouteError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Envelope::failure(self.to_string()))
    }
}

/// Log a storage failure and replace it with the message the caller sees.
pub fn storage_failure(message: &'static str) -> impl FnOnce(StoreError) -> RouteError {
    move |e| {
        tracing::error!("{}: {}", message, e);
        RouteError::Storage {
            message: message.to_string(),
        }
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!("rejected request body: {}", err);
    RouteError::InvalidBody {
        message: "Invalid request body".into(),
    }
    .into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!("rejected query string: {}", err);
    RouteError::InvalidBody {
        message: "Invalid query parameters".into(),
    }
    .into()
}
