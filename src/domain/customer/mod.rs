// ============================================================================
// Customer Domain
// ============================================================================
//
// All Customer-specific code:
// - Model (Customer, NewCustomer)
// - Requests (CustomerRegistrationRequest, CustomerUpdateRequest)
// - Errors (CustomerError enum)
// - Service (CustomerService with the insert/update/delete rules)
//
// ============================================================================

pub mod model;
pub mod requests;
pub mod errors;
pub mod service;

pub use model::*;
pub use requests::*;
pub use errors::*;
pub use service::*;
