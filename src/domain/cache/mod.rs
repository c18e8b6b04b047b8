//! Cache domain
//!
//! Key derivation lives here; the bounded store itself is in
//! `infrastructure::cache`.

mod key;

pub use key::ClarifyCacheKey;
