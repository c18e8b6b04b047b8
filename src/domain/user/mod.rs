//! User domain
//!
//! Account records, the `UserStore` seam and input validation.

mod entity;
mod repository;
mod validation;

pub use entity::{EmergencyContact, UserRecord};
pub use repository::UserStore;
pub use validation::{
    UserValidationError, validate_fingerprint, validate_password, validate_username,
};

#[cfg(test)]
pub use repository::mock::MockUserStore;
