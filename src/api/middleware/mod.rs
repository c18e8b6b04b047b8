//! API middleware components

pub mod client_identity;
pub mod logging;

pub use client_identity::ClientIdentity;
pub use logging::{REQUEST_ID_HEADER, logging_middleware};
