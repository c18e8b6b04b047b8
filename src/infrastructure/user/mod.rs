//! User infrastructure module
//!
//! Password hashing with Argon2, the in-memory and JSON-file user stores, and
//! the user service tying them to fingerprint matching.

mod file_store;
mod in_memory;
mod password;
mod service;

pub use file_store::FileUserStore;
pub use in_memory::InMemoryUserStore;
pub use password::{Argon2Hasher, PasswordHasher};
pub use service::UserService;
