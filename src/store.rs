//! The storage interface the route handlers are written against.
//!
//! `PgStore` is the production backend; `MemoryStore` keeps everything in
//! process and backs the test suite.

use async_trait::async_trait;
use uuid::Uuid;

pub use errors::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::domain::{
    Contact,
    ContactStatus,
    NewContact,
    PageRequest,
    Subscriber,
    SubscriberEmail,
    SubscriberStatus,
};

mod errors;
mod memory;
mod postgres;

/// Contact and newsletter collections.
///
/// Listing operations return records newest first. A `status` filter is an
/// exact match against the stored status, so an unknown value simply matches
/// nothing.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_contact(&self, contact: NewContact) -> Result<Contact, StoreError>;

    async fn list_contacts(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Contact>, StoreError>;

    async fn count_contacts(&self, status: Option<&str>) -> Result<u64, StoreError>;

    /// Returns `None` when no contact has this id.
    async fn update_contact_status(
        &self,
        id: Uuid,
        status: ContactStatus,
    ) -> Result<Option<Contact>, StoreError>;

    async fn find_subscriber(
        &self,
        email: &SubscriberEmail,
    ) -> Result<Option<Subscriber>, StoreError>;

    async fn insert_subscriber(&self, email: SubscriberEmail) -> Result<Subscriber, StoreError>;

    /// Returns `None` when no subscriber has this email.
    async fn update_subscriber_status(
        &self,
        email: &SubscriberEmail,
        status: SubscriberStatus,
    ) -> Result<Option<Subscriber>, StoreError>;

    async fn list_subscribers(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Subscriber>, StoreError>;

    async fn count_subscribers(&self, status: Option<&str>) -> Result<u64, StoreError>;
}
