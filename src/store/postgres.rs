use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{FromRow, Row};

use crate::config::DatabaseConfig;
use crate::domain::customer::{Customer, CustomerId, NewCustomer};
use crate::health::{ComponentHealth, HealthStatus};

use super::{CustomerDao, StorageError};

// ============================================================================
// PostgreSQL Customer Store
// ============================================================================
//
// Table layout:
//   customer(id BIGSERIAL PK, name TEXT, email TEXT UNIQUE, age INTEGER)
//
// The UNIQUE constraint on email is what actually guarantees uniqueness; a
// violation is reported as `StorageError::DuplicateEmail`.
//
// ============================================================================

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS customer (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        age INTEGER NOT NULL
    )";

impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Customer {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            age: row.try_get("age")?,
        })
    }
}

#[derive(Clone)]
pub struct PostgresCustomerDao {
    pool: PgPool,
}

impl PostgresCustomerDao {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration and make sure the table exists
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        tracing::info!(max_connections = config.max_connections, "Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        let dao = Self::new(pool);
        dao.ensure_schema().await?;
        Ok(dao)
    }

    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("customer table ready");
        Ok(())
    }
}

/// Turn a unique-constraint violation into the domain-level duplicate signal
fn map_write_error(error: sqlx::Error, email: &str) -> StorageError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            return StorageError::DuplicateEmail(email.to_string());
        }
    }
    StorageError::Database(error)
}

#[async_trait]
impl CustomerDao for PostgresCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, StorageError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, age FROM customer ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn select_customer_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StorageError> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, age FROM customer WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StorageError> {
        let inserted = sqlx::query_as::<_, Customer>(
            "INSERT INTO customer (name, email, age) VALUES ($1, $2, $3)
             RETURNING id, name, email, age",
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.age)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &customer.email))?;

        tracing::debug!(customer_id = inserted.id, "Inserted customer row");
        Ok(inserted)
    }

    async fn delete_customer_by_id(&self, id: CustomerId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(customer_id = id, rows = result.rows_affected(), "Deleted customer row");
        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE customer SET name = $1, email = $2, age = $3 WHERE id = $4")
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(customer.age)
            .bind(customer.id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &customer.email))?;

        tracing::debug!(
            customer_id = customer.id,
            rows = result.rows_affected(),
            "Updated customer row"
        );
        Ok(())
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, StorageError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customer WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_customer_with_id(&self, id: CustomerId) -> Result<bool, StorageError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customer WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn check_health(&self) -> ComponentHealth {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => ComponentHealth::new("storage", HealthStatus::Healthy)
                .with_details("postgres backend"),
            Err(e) => {
                tracing::warn!(error = %e, "PostgreSQL health probe failed");
                ComponentHealth::new("storage", HealthStatus::Unhealthy(e.to_string()))
                    .with_details("postgres backend")
            }
        }
    }
}

// ============================================================================
// Integration Tests
// ============================================================================
//
// These need a reachable PostgreSQL instance:
//   DATABASE_URL=postgres://... cargo test -- --ignored
//
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_dao() -> PostgresCustomerDao {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let config = DatabaseConfig {
            url,
            max_connections: 2,
            acquire_timeout_secs: 5,
        };
        PostgresCustomerDao::connect(&config).await.unwrap()
    }

    fn unique_email(prefix: &str) -> String {
        format!(
            "{}-{}@course.com",
            prefix,
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        )
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_insert_and_select() {
        let dao = test_dao().await;
        let email = unique_email("insert");

        let inserted = dao
            .insert_customer(NewCustomer::new("Ana", email.clone(), 20))
            .await
            .unwrap();

        let found = dao.select_customer_by_id(inserted.id).await.unwrap();
        assert_eq!(found, Some(Customer::new(inserted.id, "Ana", email, 20)));
        assert!(dao
            .select_all_customers()
            .await
            .unwrap()
            .iter()
            .any(|c| c.id == inserted.id));
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_duplicate_email_is_rejected_by_constraint() {
        let dao = test_dao().await;
        let email = unique_email("dup");

        dao.insert_customer(NewCustomer::new("Ana", email.clone(), 20))
            .await
            .unwrap();
        let result = dao.insert_customer(NewCustomer::new("Bo", email, 30)).await;

        assert!(matches!(result, Err(StorageError::DuplicateEmail(_))));
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_update_and_delete() {
        let dao = test_dao().await;
        let email = unique_email("update");

        let mut customer = dao
            .insert_customer(NewCustomer::new("Ana", email.clone(), 20))
            .await
            .unwrap();
        customer.age = 25;
        dao.update_customer(&customer).await.unwrap();

        assert_eq!(
            dao.select_customer_by_id(customer.id).await.unwrap().unwrap().age,
            25
        );
        assert!(dao.exists_customer_with_email(&email).await.unwrap());

        dao.delete_customer_by_id(customer.id).await.unwrap();
        assert!(!dao.exists_customer_with_id(customer.id).await.unwrap());
        // Deleting twice is a no-op
        dao.delete_customer_by_id(customer.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_health_probe() {
        let dao = test_dao().await;
        assert!(dao.check_health().await.status.is_healthy());
    }
}
