use async_trait::async_trait;
use chrono::{
    DateTime,
    Utc,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::app::DatabaseSettings;
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

const CONTACT_COLUMNS: &str =
    "id, name, phone, email, message, status, source, created_at, updated_at";
const SUBSCRIBER_COLUMNS: &str = "id, email, status, created_at, updated_at";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_config: &DatabaseSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(
                database_config.connect_timeout_seconds,
            ))
            .max_connections(database_config.max_db_connections)
            .connect_with(database_config.database_connection_options())
            .await?;
        Ok(PgStore { pool })
    }

    #[tracing::instrument(name = "running database migrations", skip(self))]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    phone: String,
    email: String,
    message: String,
    status: String,
    source: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = StoreError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let status = ContactStatus::try_from(row.status.as_str()).map_err(|e| {
            StoreError::CorruptRecord {
                id: row.id,
                reason: e.to_string(),
            }
        })?;
        Ok(Contact {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            message: row.message,
            status,
            source: row.source,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: Uuid,
    email: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriberRow> for Subscriber {
    type Error = StoreError;

    fn try_from(row: SubscriberRow) -> Result<Self, Self::Error> {
        let status = SubscriberStatus::try_from(row.status.as_str()).map_err(|e| {
            StoreError::CorruptRecord {
                id: row.id,
                reason: e.to_string(),
            }
        })?;
        Ok(Subscriber {
            id: row.id,
            email: row.email,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Postgres only has signed integers; anything past `i64::MAX` is as good as
/// unbounded.
fn as_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn log_query_error(e: sqlx::Error) -> sqlx::Error {
    tracing::error!("Failed to execute query: {:?}", e);
    e
}

#[async_trait]
impl Store for PgStore {
    #[tracing::instrument(name = "inserting new contact in the database", skip(self, contact))]
    async fn insert_contact(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let contact = contact.into_contact(Utc::now());
        sqlx::query(
            r#"
            INSERT INTO contacts (id, name, phone, email, message, status, source, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(contact.id)
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(&contact.email)
        .bind(&contact.message)
        .bind(contact.status.as_str())
        .bind(&contact.source)
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await
        .map_err(log_query_error)?;
        Ok(contact)
    }

    #[tracing::instrument(name = "listing contacts", skip(self))]
    async fn list_contacts(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Contact>, StoreError> {
        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            SELECT {}
            FROM contacts
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            CONTACT_COLUMNS
        ))
        .bind(status)
        .bind(as_bigint(page.limit))
        .bind(as_bigint(page.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(log_query_error)?;
        rows.into_iter().map(Contact::try_from).collect()
    }

    #[tracing::instrument(name = "counting contacts", skip(self))]
    async fn count_contacts(&self, status: Option<&str>) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM contacts
            WHERE ($1::text IS NULL OR status = $1)
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(log_query_error)?;
        Ok(count as u64)
    }

    #[tracing::instrument(name = "updating contact status", skip(self))]
    async fn update_contact_status(
        &self,
        id: Uuid,
        status: ContactStatus,
    ) -> Result<Option<Contact>, StoreError> {
        let row = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            UPDATE contacts
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING {}
            "#,
            CONTACT_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(log_query_error)?;
        row.map(Contact::try_from).transpose()
    }

    #[tracing::instrument(name = "looking up subscriber", skip(self, email))]
    async fn find_subscriber(
        &self,
        email: &SubscriberEmail,
    ) -> Result<Option<Subscriber>, StoreError> {
        let row = sqlx::query_as::<_, SubscriberRow>(&format!(
            r#"
            SELECT {}
            FROM newsletter_subscribers
            WHERE email = $1
            ORDER BY created_at
            LIMIT 1
            "#,
            SUBSCRIBER_COLUMNS
        ))
        .bind(email.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(log_query_error)?;
        row.map(Subscriber::try_from).transpose()
    }

    #[tracing::instrument(name = "inserting new subscriber in the database", skip(self, email))]
    async fn insert_subscriber(&self, email: SubscriberEmail) -> Result<Subscriber, StoreError> {
        let subscriber = Subscriber::new(email, Utc::now());
        sqlx::query(
            r#"
            INSERT INTO newsletter_subscribers (id, email, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(subscriber.id)
        .bind(&subscriber.email)
        .bind(subscriber.status.as_str())
        .bind(subscriber.created_at)
        .bind(subscriber.updated_at)
        .execute(&self.pool)
        .await
        .map_err(log_query_error)?;
        Ok(subscriber)
    }

    #[tracing::instrument(name = "updating subscriber status", skip(self, email))]
    async fn update_subscriber_status(
        &self,
        email: &SubscriberEmail,
        status: SubscriberStatus,
    ) -> Result<Option<Subscriber>, StoreError> {
        let row = sqlx::query_as::<_, SubscriberRow>(&format!(
            r#"
            UPDATE newsletter_subscribers
            SET status = $2, updated_at = $3
            WHERE id = (
                SELECT id FROM newsletter_subscribers
                WHERE email = $1
                ORDER BY created_at
                LIMIT 1
            )
            RETURNING {}
            "#,
            SUBSCRIBER_COLUMNS
        ))
        .bind(email.as_ref())
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(log_query_error)?;
        row.map(Subscriber::try_from).transpose()
    }

    #[tracing::instrument(name = "listing subscribers", skip(self))]
    async fn list_subscribers(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Subscriber>, StoreError> {
        let rows = sqlx::query_as::<_, SubscriberRow>(&format!(
            r#"
            SELECT {}
            FROM newsletter_subscribers
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            SUBSCRIBER_COLUMNS
        ))
        .bind(status)
        .bind(as_bigint(page.limit))
        .bind(as_bigint(page.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(log_query_error)?;
        rows.into_iter().map(Subscriber::try_from).collect()
    }

    #[tracing::instrument(name = "counting subscribers", skip(self))]
    async fn count_subscribers(&self, status: Option<&str>) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM newsletter_subscribers
            WHERE ($1::text IS NULL OR status = $1)
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(log_query_error)?;
        Ok(count as u64)
    }
}
