// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Model (entity and id-less insert form)
// - Requests (registration and partial update payloads)
// - Errors
// - Service (orchestration on top of the storage port)
//
// This layer only talks to storage through the `CustomerDao` trait.
//
// ============================================================================

pub mod customer;
