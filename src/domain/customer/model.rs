use serde::{Deserialize, Serialize};

// ============================================================================
// Customer Model
// ============================================================================

/// Storage-assigned customer identifier
pub type CustomerId = i64;

/// A stored customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}

/// A customer that has not been stored yet; storage assigns the id on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Attach the id assigned by storage
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}
