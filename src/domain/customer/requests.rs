use serde::{Deserialize, Serialize};

use super::model::NewCustomer;

// ============================================================================
// Customer Requests
// ============================================================================

/// Payload for creating a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistrationRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl CustomerRegistrationRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}

impl From<CustomerRegistrationRequest> for NewCustomer {
    fn from(request: CustomerRegistrationRequest) -> Self {
        NewCustomer::new(request.name, request.email, request.age)
    }
}

/// Partial update payload.
///
/// `None` means the field was absent (or `null`) and stays as it is. A present
/// empty string is a real value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl CustomerUpdateRequest {
    pub fn new(name: Option<String>, email: Option<String>, age: Option<i32>) -> Self {
        Self { name, email, age }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_absent_and_null_fields() {
        let request: CustomerUpdateRequest =
            serde_json::from_str(r#"{ "email": null, "age": 25 }"#).unwrap();
        assert_eq!(request, CustomerUpdateRequest::default().age(25));
    }

    #[test]
    fn test_update_request_keeps_empty_string() {
        let request: CustomerUpdateRequest = serde_json::from_str(r#"{ "name": "" }"#).unwrap();
        assert_eq!(request.name.as_deref(), Some(""));
        assert!(request.email.is_none());
        assert!(request.age.is_none());
    }

    #[test]
    fn test_registration_into_new_customer() {
        let request = CustomerRegistrationRequest::new("Ana", "ana@x.com", 20);
        let customer = NewCustomer::from(request);
        assert_eq!(customer, NewCustomer::new("Ana", "ana@x.com", 20));
    }

    #[test]
    fn test_registration_requires_all_fields() {
        let result =
            serde_json::from_str::<CustomerRegistrationRequest>(r#"{ "name": "Ana", "age": 20 }"#);
        assert!(result.is_err());
    }
}
