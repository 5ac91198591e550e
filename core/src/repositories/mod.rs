pub mod revocation;

pub use revocation::{InMemoryRevocationRepository, RevocationRepository};
