//! Core infrastructure for managing and accessing the location database.
pub mod database;
pub mod error;
pub mod loadable;
pub mod query;
