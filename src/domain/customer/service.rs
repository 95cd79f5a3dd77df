use std::sync::Arc;

use crate::store::CustomerDao;

use super::errors::CustomerError;
use super::model::{Customer, CustomerId, NewCustomer};
use super::requests::{CustomerRegistrationRequest, CustomerUpdateRequest};

// ============================================================================
// Customer Service
// ============================================================================
//
// Orchestrates: Request → existence / email checks → merge → Storage
//
// Storage is only mutated by a successful register, delete, or an update
// that actually changes something. A no-op update is rejected with
// `NoChange` before storage is touched.
//
// ============================================================================

#[derive(Clone)]
pub struct CustomerService {
    dao: Arc<dyn CustomerDao>,
}

impl CustomerService {
    pub fn new(dao: Arc<dyn CustomerDao>) -> Self {
        Self { dao }
    }

    pub fn dao(&self) -> &Arc<dyn CustomerDao> {
        &self.dao
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.dao.select_all_customers().await?)
    }

    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        self.dao
            .select_customer_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    pub async fn register_customer(
        &self,
        request: CustomerRegistrationRequest,
    ) -> Result<Customer, CustomerError> {
        if self.dao.exists_customer_with_email(&request.email).await? {
            tracing::debug!(email = %request.email, "Registration rejected, email in use");
            return Err(CustomerError::DuplicateEmail);
        }

        let customer = self.dao.insert_customer(NewCustomer::from(request)).await?;

        tracing::info!(customer_id = customer.id, "Customer registered");
        Ok(customer)
    }

    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), CustomerError> {
        if !self.dao.exists_customer_with_id(id).await? {
            return Err(CustomerError::NotFound(id));
        }

        self.dao.delete_customer_by_id(id).await?;

        tracing::info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    /// Apply the fields of `request` that differ from the stored customer
    pub async fn update_customer(
        &self,
        id: CustomerId,
        request: CustomerUpdateRequest,
    ) -> Result<Customer, CustomerError> {
        let mut customer = self.get_customer(id).await?;
        let mut changed = false;

        if let Some(name) = request.name {
            if name != customer.name {
                customer.name = name;
                changed = true;
            }
        }

        if let Some(email) = request.email {
            if email != customer.email {
                // The new email differs from ours, so any match is another customer.
                if self.dao.exists_customer_with_email(&email).await? {
                    tracing::debug!(customer_id = id, email = %email, "Update rejected, email in use");
                    return Err(CustomerError::DuplicateEmail);
                }
                customer.email = email;
                changed = true;
            }
        }

        if let Some(age) = request.age {
            if age != customer.age {
                customer.age = age;
                changed = true;
            }
        }

        if !changed {
            return Err(CustomerError::NoChange);
        }

        self.dao.update_customer(&customer).await?;

        tracing::info!(customer_id = id, "Customer updated");
        Ok(customer)
    }
}
