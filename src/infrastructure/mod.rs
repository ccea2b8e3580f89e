pub mod bootstrap;
#[path = "config/mod.rs"]
pub mod config_mod;
pub use config_mod as config;
#[cfg(feature = "drive")]
pub mod drive;
pub mod secrets;
pub mod security;
