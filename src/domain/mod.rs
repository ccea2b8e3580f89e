pub mod dependency;
pub mod error;
pub mod page;
pub mod secret_store;
