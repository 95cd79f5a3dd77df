use crate::store::StorageError;

use super::model::CustomerId;

// ============================================================================
// Customer Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("customer with id [{0}] not found")]
    NotFound(CustomerId),

    #[error("email already exists")]
    DuplicateEmail,

    #[error("no data changes found")]
    NoChange,

    #[error("storage error: {0}")]
    Storage(#[source] StorageError),
}

impl CustomerError {
    /// Stable label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            CustomerError::NotFound(_) => "not_found",
            CustomerError::DuplicateEmail => "duplicate_email",
            CustomerError::NoChange => "no_change",
            CustomerError::Storage(_) => "storage",
        }
    }
}

impl From<StorageError> for CustomerError {
    fn from(error: StorageError) -> Self {
        match error {
            // Raised when the storage-level uniqueness guarantee catches a
            // registration that raced past the service check.
            StorageError::DuplicateEmail(_) => CustomerError::DuplicateEmail,
            other => CustomerError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CustomerError::NotFound(10).to_string(),
            "customer with id [10] not found"
        );
        assert_eq!(CustomerError::DuplicateEmail.to_string(), "email already exists");
        assert_eq!(CustomerError::NoChange.to_string(), "no data changes found");
    }

    #[test]
    fn test_storage_duplicate_maps_to_domain_duplicate() {
        let error = CustomerError::from(StorageError::DuplicateEmail("ana@x.com".to_string()));
        assert!(matches!(error, CustomerError::DuplicateEmail));
    }

    #[test]
    fn test_storage_failure_is_wrapped() {
        let error = CustomerError::from(StorageError::Database(sqlx::Error::PoolTimedOut));
        assert!(matches!(error, CustomerError::Storage(_)));
        assert_eq!(error.kind(), "storage");
    }
}
