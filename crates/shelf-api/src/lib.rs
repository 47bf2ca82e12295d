// shelf-api: Async Rust client for REST product catalog services

pub mod catalog;
pub mod error;
pub mod transport;

pub use catalog::{CatalogClient, Product, Rating};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
