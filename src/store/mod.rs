// ============================================================================
// Storage Port - Customer persistence
// ============================================================================
//
// `CustomerDao` is the capability set the service layer works against.
// Two interchangeable backends implement it:
// - `InMemoryCustomerDao`: owned map behind a single-writer lock
// - `PostgresCustomerDao`: sqlx pool against a `customer` table
//
// Contract shared by both:
// 1. insert assigns a unique id that was never handed out before
// 2. delete of an unknown id is a no-op
// 3. update replaces name/email/age of the record with the same id
// 4. exists_* are pure predicates
// 5. email uniqueness holds even when two writers race past the service check
//
// ============================================================================

mod memory;
mod postgres;

pub use memory::InMemoryCustomerDao;
pub use postgres::PostgresCustomerDao;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AppConfig, StorageBackend};
use crate::domain::customer::{Customer, CustomerId, NewCustomer};
use crate::health::ComponentHealth;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("email already stored: {0}")]
    DuplicateEmail(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerDao: Send + Sync {
    /// All customers, ordered by id
    async fn select_all_customers(&self) -> Result<Vec<Customer>, StorageError>;

    async fn select_customer_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StorageError>;

    /// Store a new customer and return it with its assigned id
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StorageError>;

    async fn delete_customer_by_id(&self, id: CustomerId) -> Result<(), StorageError>;

    async fn update_customer(&self, customer: &Customer) -> Result<(), StorageError>;

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, StorageError>;

    async fn exists_customer_with_id(&self, id: CustomerId) -> Result<bool, StorageError>;

    /// Probe used by the `/health` endpoint
    async fn check_health(&self) -> ComponentHealth;
}

/// Build the backend selected by `storage.backend`
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn CustomerDao>, StorageError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory customer store");
            Ok(Arc::new(InMemoryCustomerDao::new()))
        }
        StorageBackend::Postgres => {
            let dao = PostgresCustomerDao::connect(&config.database).await?;
            tracing::info!("Using PostgreSQL customer store");
            Ok(Arc::new(dao))
        }
    }
}
