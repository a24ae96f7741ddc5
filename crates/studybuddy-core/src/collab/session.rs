//! Session guards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SessionGuard;

/// A bearer session with an optional expiry. No expiry means signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSession {
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenSession {
    pub fn new(expires_at: DateTime<Utc>) -> Self {
        Self {
            expires_at: Some(expires_at),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry > now)
    }
}

impl SessionGuard for TokenSession {
    fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

/// Guard that admits everyone. Used by the replay tool and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl SessionGuard for AlwaysValid {
    fn is_valid(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let session = TokenSession::new(now + Duration::hours(1));
        assert!(session.is_valid_at(now));
        assert!(!session.is_valid_at(now + Duration::hours(2)));
        assert!(!TokenSession::signed_out().is_valid());
        assert!(AlwaysValid.is_valid());
    }
}
