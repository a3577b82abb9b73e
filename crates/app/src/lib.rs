//! Catalog domain, persistence and application wiring.

pub mod context;
pub mod database;
pub mod products;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test;
