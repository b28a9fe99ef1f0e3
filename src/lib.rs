pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod state;

pub use klanotes_core::{db, models, Database};
