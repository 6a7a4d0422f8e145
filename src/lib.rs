pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod lookup;

pub use config::LookupConfig;
pub use error::{ConfigError, LookupError, TransportError};
pub use lookup::{NetIdentity, PersonLookup, PersonRecord};
