pub mod cache;
pub mod catalogs;
pub mod categories;
pub mod error;
pub mod health;
pub mod items;
pub mod params;
pub mod properties;
pub mod search;

pub use error::AppError;
