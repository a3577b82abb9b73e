//! Shared test infrastructure.

mod db;

#[cfg(test)]
pub(crate) use context::TestContext;
pub use db::TestDb;
