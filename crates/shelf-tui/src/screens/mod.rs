pub mod catalog;

pub use catalog::CatalogScreen;
