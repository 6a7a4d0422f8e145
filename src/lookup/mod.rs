//! Directory person lookups: request building, response normalization,
//! and the client tying them to the HTTP transport.

mod client;
mod record;
mod request;
mod response;

pub use client::{FindPerson, PersonLookup, find_person_until};
pub use record::{NetIdentity, PersonRecord};
pub use request::{
    Endpoint, LookupRequest, SUBSCRIPTION_KEY_HEADER, build, sanitize_lookup_key,
};
pub use response::normalize;

#[cfg(test)]
pub use client::MockFindPerson;
