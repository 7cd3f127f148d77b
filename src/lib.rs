pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod shutdown;
pub mod types;

pub use error::RosterError;
pub use types::outcome::Outcome;
