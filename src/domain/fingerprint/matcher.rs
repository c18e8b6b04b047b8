//! Fingerprint resolution against stored users

use super::similarity::similarity_ratio;
use crate::domain::user::UserRecord;

/// Minimum similarity for a fingerprint to be accepted
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.95;

/// Best-scoring user for a candidate fingerprint
#[derive(Debug, Clone, Copy)]
pub struct FingerprintMatch<'a> {
    pub user: &'a UserRecord,
    pub score: f64,
}

/// Resolves device fingerprints to users by similarity
#[derive(Debug, Clone, Copy)]
pub struct FingerprintMatcher {
    threshold: f64,
}

impl Default for FingerprintMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD)
    }
}

impl FingerprintMatcher {
    /// Threshold is clamped to `[0, 1]`
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Highest-scoring user with a stored fingerprint, whatever the score.
    /// The first user reaching the maximum is kept.
    pub fn best_match<'a>(
        &self,
        candidate: &str,
        users: &'a [UserRecord],
    ) -> Option<FingerprintMatch<'a>> {
        let mut best: Option<FingerprintMatch<'a>> = None;

        for user in users {
            let Some(stored) = user.fingerprint().filter(|f| !f.is_empty()) else {
                continue;
            };

            let score = similarity_ratio(stored, candidate);
            if best.is_none_or(|b| score > b.score) {
                best = Some(FingerprintMatch { user, score });
            }
        }

        best
    }

    /// User whose fingerprint best matches `candidate`, if it clears the threshold
    pub fn resolve<'a>(&self, candidate: &str, users: &'a [UserRecord]) -> Option<&'a UserRecord> {
        if candidate.is_empty() {
            return None;
        }

        self.best_match(candidate, users)
            .filter(|m| m.score >= self.threshold)
            .map(|m| m.user)
    }

    /// Whether `candidate` is close enough to the fingerprint stored on `user`
    pub fn verify(&self, user: &UserRecord, candidate: &str) -> bool {
        match user.fingerprint() {
            Some(stored) if !stored.is_empty() && !candidate.is_empty() => {
                self.matches(stored, candidate)
            }
            _ => false,
        }
    }

    pub fn matches(&self, stored: &str, candidate: &str) -> bool {
        similarity_ratio(stored, candidate) >= self.threshold
    }
}
