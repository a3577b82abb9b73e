//! Products

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
mod models;
pub(crate) mod update;
