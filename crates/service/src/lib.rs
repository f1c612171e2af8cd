//! Service layer for the course catalog and the enrollment ledger.
//! - Separates business rules from data access (repository traits).
//! - Reuses validation and entity definitions in the `models` crate.
//! - Ships a SeaORM backend and an in-memory backend with identical semantics.

pub mod errors;
pub mod course;
pub mod enrollment;
pub mod mock;
#[cfg(test)]
pub mod test_support;
