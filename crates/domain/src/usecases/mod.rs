//! Application use cases / business logic

pub mod driver;

pub use driver::{Driver, DriverConfig};
