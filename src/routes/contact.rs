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
use uuid::Uuid;

use crate::auth::AdminToken;
use crate::domain::{
    ContactStatus,
    MalformedInput,
    NewContact,
    Pagination,
};
use crate::routes::listing::ListQuery;
use crate::routes::{
    storage_failure,
    Envelope,
    RouteError,
};
use crate::store::Store;

#[derive(Deserialize)]
pub struct ContactForm {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmittedContact {
    id: Uuid,
    name: String,
    submitted_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    status: Option<String>,
}

#[tracing::instrument(name = "submitting contact form", skip(form, store))]
pub async fn submit_contact(
    form: web::Json<ContactForm>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, RouteError> {
    let ContactForm {
        name,
        phone,
        email,
        message,
    } = form.into_inner();
    let new_contact = NewContact::parse(name, phone, email, message).map_err(|e| {
        tracing::warn!("{}", e);
        e
    })?;

    let contact = store
        .insert_contact(new_contact)
        .await
        .map_err(storage_failure("Something went wrong. Please try again."))?;
    tracing::info!(contact_id = %contact.id, "contact form saved");

    Ok(HttpResponse::Created().json(
        Envelope::data(SubmittedContact {
            id: contact.id,
            name: contact.name,
            submitted_at: contact.created_at,
        })
        .with_message("Thank you! We will contact you soon."),
    ))
}

#[tracing::instrument(name = "listing contacts", skip(_admin, store))]
pub async fn list_contacts(
    _admin: AdminToken,
    query: web::Query<ListQuery>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, RouteError> {
    let page = query.page_request();
    let contacts = store
        .list_contacts(query.status(), page)
        .await
        .map_err(storage_failure("Error fetching contacts"))?;
    let total = store
        .count_contacts(query.status())
        .await
        .map_err(storage_failure("Error fetching contacts"))?;

    let pagination = Pagination::new(page, total, contacts.len());
    Ok(HttpResponse::Ok().json(Envelope::page(contacts, pagination)))
}

#[tracing::instrument(name = "updating contact status", skip(_admin, update, store))]
pub async fn update_contact_status(
    _admin: AdminToken,
    id: web::Path<String>,
    update: web::Json<StatusUpdate>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, RouteError> {
    let status = update
        .into_inner()
        .status
        .ok_or_else(|| MalformedInput::MissingField {
            message: "Status is required".into(),
        })?;
    let status = ContactStatus::try_from(status.as_str())?;

    // a malformed id cannot match any stored contact
    let contact = match Uuid::parse_str(&id) {
        Ok(id) => store
            .update_contact_status(id, status)
            .await
            .map_err(storage_failure("Error updating status"))?,
        Err(_) => None,
    };

    match contact {
        Some(contact) => Ok(HttpResponse::Ok()
            .json(Envelope::data(contact).with_message("Status updated successfully"))),
        None => Err(RouteError::NotFound {
            message: "Contact not found".into(),
        }),
    }
}
