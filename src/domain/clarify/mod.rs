//! Policy text clarification domain

mod error;
mod request;

pub use error::ClarifyError;
pub use request::{ClarifyOutcome, ClarifyRequest, Language, Mode};
