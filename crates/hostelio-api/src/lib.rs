// hostelio-api: Async Rust client for the Hostelio marketplace REST API

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::Role;
pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
