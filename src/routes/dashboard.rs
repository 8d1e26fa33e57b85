use actix_web::http::header::LOCATION;
use actix_web::{
    web,
    HttpResponse,
};
use serde::Serialize;

use crate::domain::{
    ContactStatus,
    SubscriberStatus,
};
use crate::routes::{
    storage_failure,
    Envelope,
    RouteError,
};
use crate::store::Store;

const STATS_FAILED: &str = "Error fetching stats";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    total_contacts: u64,
    new_contacts: u64,
    total_subscribers: u64,
}

/// The dashboard itself is served by the frontend.
pub async fn dashboard_redirect() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, "/dashboard"))
        .finish()
}

// Unauthenticated, unlike the listings it summarizes.
#[tracing::instrument(name = "computing dashboard stats", skip(store))]
pub async fn stats(store: web::Data<dyn Store>) -> Result<HttpResponse, RouteError> {
    let stats = Stats {
        total_contacts: store
            .count_contacts(None)
            .await
            .map_err(storage_failure(STATS_FAILED))?,
        new_contacts: store
            .count_contacts(Some(ContactStatus::New.as_str()))
            .await
            .map_err(storage_failure(STATS_FAILED))?,
        total_subscribers: store
            .count_subscribers(Some(SubscriberStatus::Active.as_str()))
            .await
            .map_err(storage_failure(STATS_FAILED))?,
    };
    Ok(HttpResponse::Ok().json(Envelope::data(stats)))
}
