//! Device fingerprint matching

mod matcher;
mod similarity;

pub use matcher::{DEFAULT_MATCH_THRESHOLD, FingerprintMatch, FingerprintMatcher};
pub use similarity::similarity_ratio;
