//! This is a library that provides objects and functionality to keep track of
//! named geographic point locations inside of a database.

pub mod coordinate;
pub mod core;
pub mod location;

pub use core::database::Database;
pub use core::error::Error;
pub use core::error::Result;
