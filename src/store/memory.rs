use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::customer::{Customer, CustomerId, NewCustomer};
use crate::health::{ComponentHealth, HealthStatus};

use super::{CustomerDao, StorageError};

// ============================================================================
// In-Memory Customer Store
// ============================================================================
//
// Owned map plus an id counter behind one RwLock. Every write takes the lock
// for its whole check-and-mutate sequence, so email uniqueness cannot be
// raced. The counter only moves forward: ids of deleted customers are never
// handed out again.
//
// ============================================================================

#[derive(Debug)]
struct State {
    customers: BTreeMap<CustomerId, Customer>,
    next_id: CustomerId,
}

impl State {
    fn email_taken(&self, email: &str, except: Option<CustomerId>) -> bool {
        self.customers
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }
}

#[derive(Debug)]
pub struct InMemoryCustomerDao {
    state: RwLock<State>,
}

impl InMemoryCustomerDao {
    pub fn new() -> Self {
        Self::with_customers(Vec::new())
    }

    /// Pre-populate the store. New ids continue after the largest given id.
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let customers: BTreeMap<CustomerId, Customer> =
            customers.into_iter().map(|c| (c.id, c)).collect();
        let next_id = customers.keys().next_back().map_or(1, |id| id + 1);
        Self {
            state: RwLock::new(State { customers, next_id }),
        }
    }
}

impl Default for InMemoryCustomerDao {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerDao for InMemoryCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, StorageError> {
        let state = self.state.read().await;
        Ok(state.customers.values().cloned().collect())
    }

    async fn select_customer_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StorageError> {
        let state = self.state.read().await;
        Ok(state.customers.get(&id).cloned())
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StorageError> {
        let mut state = self.state.write().await;
        if state.email_taken(&customer.email, None) {
            return Err(StorageError::DuplicateEmail(customer.email));
        }

        let id = state.next_id;
        state.next_id += 1;
        let customer = customer.with_id(id);
        state.customers.insert(id, customer.clone());

        tracing::debug!(customer_id = id, "Inserted customer into memory store");
        Ok(customer)
    }

    async fn delete_customer_by_id(&self, id: CustomerId) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if state.customers.remove(&id).is_some() {
            tracing::debug!(customer_id = id, "Deleted customer from memory store");
        }
        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if state.email_taken(&customer.email, Some(customer.id)) {
            return Err(StorageError::DuplicateEmail(customer.email.clone()));
        }

        if let Some(stored) = state.customers.get_mut(&customer.id) {
            stored.name = customer.name.clone();
            stored.email = customer.email.clone();
            stored.age = customer.age;
            tracing::debug!(customer_id = customer.id, "Updated customer in memory store");
        }
        Ok(())
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, StorageError> {
        let state = self.state.read().await;
        Ok(state.email_taken(email, None))
    }

    async fn exists_customer_with_id(&self, id: CustomerId) -> Result<bool, StorageError> {
        let state = self.state.read().await;
        Ok(state.customers.contains_key(&id))
    }

    async fn check_health(&self) -> ComponentHealth {
        let count = self.state.read().await.customers.len();
        ComponentHealth::new("storage", HealthStatus::Healthy)
            .with_details(format!("memory backend, {} customers", count))
    }
}
