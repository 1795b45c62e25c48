pub mod dao;
pub mod models;
pub mod schema;
mod store;

pub use store::Store;
