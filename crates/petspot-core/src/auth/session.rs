use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, error, warn};

use super::token::{decode_claims, Claims, DecodeError};
use crate::storage::{KeyValueStore, TOKEN_KEY};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No session token stored")]
    Missing,

    #[error("Session token is malformed: {0}")]
    Malformed(#[from] DecodeError),

    #[error("Session token expired at {expired_at}")]
    Expired { expired_at: DateTime<Utc> },
}

/// A validated session, as seen at the moment it was checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionInfo {
    pub claims: Claims,
}

impl SessionInfo {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }

    pub fn time_until_expiry(&self, now: DateTime<Utc>) -> Duration {
        self.expires_at() - now
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        self.time_until_expiry(now).num_minutes().max(0)
    }
}

/// Get the stored session token, if any
pub fn get_token<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    store.get(TOKEN_KEY)
}

/// Drop the stored session token
pub fn logout<S: KeyValueStore + ?Sized>(store: &mut S) -> anyhow::Result<()> {
    store.remove(TOKEN_KEY)
}

/// Validate the stored session at `now`.
///
/// A token that fails to decode or has expired is removed from `store`
/// before the error is returned. A valid session leaves `store` untouched.
pub fn check_session<S: KeyValueStore + ?Sized>(
    store: &mut S,
    now: DateTime<Utc>,
) -> Result<SessionInfo, SessionError> {
    let token = get_token(&*store).ok_or(SessionError::Missing)?;

    let outcome = match decode_claims(&token) {
        Ok(claims) if claims.is_expired_at(now) => Err(SessionError::Expired {
            expired_at: claims.expires_at(),
        }),
        Ok(claims) => return Ok(SessionInfo { claims }),
        Err(e) => Err(SessionError::Malformed(e)),
    };

    if let Err(e) = logout(store) {
        error!(error = %e, "Failed to purge invalid session token");
    }
    outcome
}

/// Boolean form of [`check_session`].
pub fn is_authenticated_at<S: KeyValueStore + ?Sized>(store: &mut S, now: DateTime<Utc>) -> bool {
    match check_session(store, now) {
        Ok(_) => true,
        Err(SessionError::Missing) => {
            debug!("No session token");
            false
        }
        Err(e @ SessionError::Expired { .. }) => {
            warn!(error = %e, "Session expired, token cleared");
            false
        }
        Err(e) => {
            error!(error = %e, "Failed to decode or verify session token, token cleared");
            false
        }
    }
}

/// Check if the stored session is present and unexpired right now
pub fn is_authenticated<S: KeyValueStore + ?Sized>(store: &mut S) -> bool {
    is_authenticated_at(store, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::test_support::{token_expiring_at, token_with_claims};
    use crate::storage::MemoryStore;

    fn store_with(token: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(TOKEN_KEY, token).unwrap();
        store
    }

    fn now_secs() -> i64 {
        Utc::now().timestamp()
    }

    #[test]
    fn test_absent_token() {
        let mut store = MemoryStore::new();
        assert!(!is_authenticated(&mut store));
        assert!(store.is_empty());
        assert!(matches!(
            check_session(&mut store, Utc::now()),
            Err(SessionError::Missing)
        ));
    }

    #[test]
    fn test_future_token_is_valid_and_kept() {
        let token = token_expiring_at(now_secs() + 60);
        let mut store = store_with(&token);

        assert!(is_authenticated(&mut store));
        assert_eq!(get_token(&store), Some(token));
    }

    #[test]
    fn test_far_future_token() {
        let mut store = store_with(&token_expiring_at(now_secs() + 3600));
        assert!(is_authenticated(&mut store));
        assert!(get_token(&store).is_some());
    }

    #[test]
    fn test_expired_token_is_purged() {
        let mut store = store_with(&token_expiring_at(now_secs() - 60));

        assert!(!is_authenticated(&mut store));
        assert!(store.is_empty());
    }

    #[test]
    fn test_just_expired_token() {
        let mut store = store_with(&token_expiring_at(now_secs() - 1));
        assert!(!is_authenticated(&mut store));
        assert!(get_token(&store).is_none());
    }

    #[test]
    fn test_expired_reports_expiry() {
        let now = Utc::now();
        let exp = now.timestamp() - 10;
        let mut store = store_with(&token_expiring_at(exp));

        match check_session(&mut store, now) {
            Err(SessionError::Expired { expired_at }) => assert_eq!(expired_at.timestamp(), exp),
            other => panic!("expected Expired, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_exp_is_valid_and_kept() {
        let exp = now_secs() as f64 + 3600.5;
        let token = token_with_claims(&serde_json::json!({ "exp": exp }));
        let mut store = store_with(&token);

        assert!(is_authenticated(&mut store));
        assert_eq!(get_token(&store), Some(token));
    }

    #[test]
    fn test_fractional_exp_expires_mid_second() {
        let mut store = store_with(&token_with_claims(&serde_json::json!({ "exp": 2_000.25 })));
        let before = DateTime::from_timestamp_millis(2_000_249).unwrap();
        let after = DateTime::from_timestamp_millis(2_000_250).unwrap();

        assert!(is_authenticated_at(&mut store, before));
        assert!(!is_authenticated_at(&mut store, after));
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_tokens_are_purged() {
        for token in ["garbage", "header.%%%.sig", "header.aGVsbG8.sig", ""] {
            let mut store = store_with(token);
            assert!(!is_authenticated(&mut store), "token {:?} accepted", token);
            assert!(store.is_empty(), "token {:?} not purged", token);
        }
    }

    #[test]
    fn test_purge_keeps_other_keys() {
        let mut store = store_with("garbage");
        store.set("theme", "dark").unwrap();

        assert!(!is_authenticated(&mut store));
        assert!(get_token(&store).is_none());
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_is_authenticated_at_explicit_clock() {
        let mut store = store_with(&token_expiring_at(2_000));
        let before = DateTime::from_timestamp(1_999, 0).unwrap();
        let after = DateTime::from_timestamp(2_000, 0).unwrap();

        assert!(is_authenticated_at(&mut store, before));
        assert!(!is_authenticated_at(&mut store, after));
        assert!(store.is_empty());
    }

    #[test]
    fn test_minutes_until_expiry() {
        let now = Utc::now();
        let info = SessionInfo {
            claims: Claims { exp: (now.timestamp() + 30 * 60 + 5) as f64 },
        };
        assert_eq!(info.minutes_until_expiry(now), 30);

        let stale = SessionInfo {
            claims: Claims { exp: (now.timestamp() - 600) as f64 },
        };
        assert_eq!(stale.minutes_until_expiry(now), 0);
    }

    #[test]
    fn test_logout_removes_token() {
        let mut store = store_with(&token_expiring_at(now_secs() + 3600));
        logout(&mut store).unwrap();
        assert!(!is_authenticated(&mut store));
    }
}
