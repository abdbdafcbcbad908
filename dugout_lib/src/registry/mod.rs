//! Player directory client (Chadwick-register-style service).

mod client;
mod error;
mod types;

pub use client::RegistryClient;
pub use error::RegistryError;
pub use types::RegistryPlayer;
