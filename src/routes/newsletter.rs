use actix_web::{
    web,
    HttpResponse,
};
use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::auth::AdminToken;
use crate::domain::{
    MalformedInput,
    Pagination,
    SubscriberEmail,
    SubscriberStatus,
};
use crate::routes::listing::ListQuery;
use crate::routes::{
    storage_failure,
    Envelope,
    RouteError,
};
use crate::store::Store;

const SUBSCRIBE_FAILED: &str = "Something went wrong. Please try again.";

#[derive(Deserialize)]
pub struct EmailForm {
    email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewSubscription {
    email: String,
    subscribed_at: DateTime<Utc>,
}

fn email_not_found() -> RouteError {
    RouteError::NotFound {
        message: "Email not found".into(),
    }
}

/// Subscribing is a read then a write: two concurrent requests for the same
/// new address can both insert.
#[tracing::instrument(name = "subscribing to the newsletter", skip(form, store))]
pub async fn subscribe(
    form: web::Json<EmailForm>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, RouteError> {
    let email = SubscriberEmail::try_from(form.into_inner().email.unwrap_or_default())
        .map_err(|e| {
            tracing::warn!("{}", e);
            e
        })?;

    let existing = store
        .find_subscriber(&email)
        .await
        .map_err(storage_failure(SUBSCRIBE_FAILED))?;
    match existing {
        Some(subscriber) if subscriber.is_active() => Err(RouteError::DuplicateSubscription),
        Some(_) => {
            store
                .update_subscriber_status(&email, SubscriberStatus::Active)
                .await
                .map_err(storage_failure(SUBSCRIBE_FAILED))?;
            tracing::info!("subscription reactivated");
            Ok(HttpResponse::Ok().json(Envelope::message("Welcome back! Subscription reactivated.")))
        }
        None => {
            let subscriber = store
                .insert_subscriber(email)
                .await
                .map_err(storage_failure(SUBSCRIBE_FAILED))?;
            tracing::info!(subscriber_id = %subscriber.id, "new subscriber saved");
            Ok(HttpResponse::Created().json(
                Envelope::data(NewSubscription {
                    email: subscriber.email,
                    subscribed_at: subscriber.created_at,
                })
                .with_message("Successfully subscribed to newsletter!"),
            ))
        }
    }
}

#[tracing::instrument(name = "listing subscribers", skip(_admin, store))]
pub async fn list_subscribers(
    _admin: AdminToken,
    query: web::Query<ListQuery>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, RouteError> {
    let page = query.page_request();
    let subscribers = store
        .list_subscribers(query.status(), page)
        .await
        .map_err(storage_failure("Error fetching subscribers"))?;
    let total = store
        .count_subscribers(query.status())
        .await
        .map_err(storage_failure("Error fetching subscribers"))?;

    let pagination = Pagination::new(page, total, subscribers.len());
    Ok(HttpResponse::Ok().json(Envelope::page(subscribers, pagination)))
}

#[tracing::instrument(name = "unsubscribing from the newsletter", skip(form, store))]
pub async fn unsubscribe(
    form: web::Json<EmailForm>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, RouteError> {
    let email = match SubscriberEmail::try_from(form.into_inner().email.unwrap_or_default()) {
        Ok(email) => email,
        // nothing malformed is ever stored
        Err(MalformedInput::InvalidEmail { .. }) => return Err(email_not_found()),
        Err(e) => return Err(e.into()),
    };

    store
        .update_subscriber_status(&email, SubscriberStatus::Unsubscribed)
        .await
        .map_err(storage_failure("Error unsubscribing"))?
        .ok_or_else(email_not_found)?;

    Ok(HttpResponse::Ok().json(Envelope::message("Successfully unsubscribed")))
}
