//! Service layer providing business-oriented operations on top of models.
//! - Separates business rules (ownership, duplicates, aggregate upkeep) from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Every mutation runs inside a single database transaction.

pub mod errors;
pub mod review_service;
pub mod bookmark_service;
pub mod user_service;
#[cfg(test)]
pub mod test_support;
