use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    Contact,
    ContactStatus,
    NewContact,
    PageRequest,
    Subscriber,
    SubscriberEmail,
    SubscriberStatus,
};
use crate::store::{
    Store,
    StoreError,
};

/// Keeps both collections in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contacts: RwLock<Vec<Contact>>,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; records created at the same instant keep the most recently
/// inserted one first.
fn page_of<T: Clone>(
    records: &[T],
    matches: impl Fn(&T) -> bool,
    created_at: impl Fn(&T) -> chrono::DateTime<Utc>,
    page: PageRequest,
) -> Vec<T> {
    let mut matching: Vec<T> = records.iter().rev().filter(|r| matches(*r)).cloned().collect();
    matching.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    matching
        .into_iter()
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(page.limit).unwrap_or(usize::MAX))
        .collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_contact(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let contact = contact.into_contact(Utc::now());
        self.contacts.write().await.push(contact.clone());
        Ok(contact)
    }

    async fn list_contacts(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Contact>, StoreError> {
        let contacts = self.contacts.read().await;
        Ok(page_of(
            contacts.as_slice(),
            |c| status.map_or(true, |s| c.status.as_str() == s),
            |c| c.created_at,
            page,
        ))
    }

    async fn count_contacts(&self, status: Option<&str>) -> Result<u64, StoreError> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .iter()
            .filter(|c| status.map_or(true, |s| c.status.as_str() == s))
            .count() as u64)
    }

    async fn update_contact_status(
        &self,
        id: Uuid,
        status: ContactStatus,
    ) -> Result<Option<Contact>, StoreError> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts.iter_mut().find(|c| c.id == id).map(|contact| {
            contact.status = status;
            contact.updated_at = Utc::now();
            contact.clone()
        }))
    }

    async fn find_subscriber(
        &self,
        email: &SubscriberEmail,
    ) -> Result<Option<Subscriber>, StoreError> {
        let subscribers = self.subscribers.read().await;
        Ok(subscribers
            .iter()
            .find(|s| s.email == email.as_ref())
            .cloned())
    }

    async fn insert_subscriber(&self, email: SubscriberEmail) -> Result<Subscriber, StoreError> {
        let subscriber = Subscriber::new(email, Utc::now());
        self.subscribers.write().await.push(subscriber.clone());
        Ok(subscriber)
    }

    async fn update_subscriber_status(
        &self,
        email: &SubscriberEmail,
        status: SubscriberStatus,
    ) -> Result<Option<Subscriber>, StoreError> {
        let mut subscribers = self.subscribers.write().await;
        Ok(subscribers
            .iter_mut()
            .find(|s| s.email == email.as_ref())
            .map(|subscriber| {
                subscriber.status = status;
                subscriber.updated_at = Utc::now();
                subscriber.clone()
            }))
    }

    async fn list_subscribers(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Subscriber>, StoreError> {
        let subscribers = self.subscribers.read().await;
        Ok(page_of(
            subscribers.as_slice(),
            |s| status.map_or(true, |st| s.status.as_str() == st),
            |s| s.created_at,
            page,
        ))
    }

    async fn count_subscribers(&self, status: Option<&str>) -> Result<u64, StoreError> {
        let subscribers = self.subscribers.read().await;
        Ok(subscribers
            .iter()
            .filter(|s| status.map_or(true, |st| s.status.as_str() == st))
            .count() as u64)
    }
}
