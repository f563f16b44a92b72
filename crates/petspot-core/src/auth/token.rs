//! Decoding of the claims embedded in a session token.
//!
//! Tokens are three dot-separated segments (`header.payload.signature`).
//! Only the payload is read, and the signature is never verified on the client.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepts payloads with or without `=` padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Token has no payload segment")]
    MissingPayload,

    #[error("Token payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Token payload is not a valid claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims carried in the token payload. Only `exp` is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration, in seconds since the Unix epoch. JWT NumericDate, so it
    /// may carry a fractional part.
    pub exp: f64,
}

impl Claims {
    fn exp_millis(&self) -> f64 {
        self.exp * 1000.0
    }

    /// Expiry instant, clamped to the representable range.
    pub fn expires_at(&self) -> DateTime<Utc> {
        // `as` saturates at the i64 bounds
        DateTime::from_timestamp_millis(self.exp_millis() as i64).unwrap_or(if self.exp < 0.0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
    }

    /// The token is expired from the instant `exp * 1000` milliseconds onward.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() as f64 >= self.exp_millis()
    }
}

/// Decode the payload segment of `token` into [`Claims`].
///
/// Both the standard and URL-safe base64 alphabets are accepted.
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let payload = token.split('.').nth(1).ok_or(DecodeError::MissingPayload)?;

    let normalized: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = PAYLOAD_ENGINE.decode(normalized)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
pub(crate) mod test_support {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use serde_json::Value;

    /// Build an unsigned token whose payload is `claims`.
    pub fn token_with_claims(claims: &Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.sig", header, payload)
    }

    pub fn token_expiring_at(exp: i64) -> String {
        token_with_claims(&serde_json::json!({ "exp": exp, "sub": "owner-1" }))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use chrono::Duration;

    #[test]
    fn test_decode_url_safe_payload() {
        let token = token_expiring_at(1_700_000_000);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 1_700_000_000.0);
    }

    #[test]
    fn test_decode_padded_standard_payload() {
        // "{\"exp\":42}" encodes with padding in the standard alphabet
        let payload = STANDARD.encode(r#"{"exp":42}"#);
        assert!(payload.ends_with('='));
        let token = format!("header.{}.sig", payload);
        assert_eq!(decode_claims(&token).unwrap().exp, 42.0);
    }

    #[test]
    fn test_decode_two_segments() {
        let payload = STANDARD.encode(r#"{"exp":7}"#);
        assert_eq!(decode_claims(&format!("header.{}", payload)).unwrap().exp, 7.0);
    }

    #[test]
    fn test_decode_no_separator() {
        assert!(matches!(
            decode_claims("notatoken"),
            Err(DecodeError::MissingPayload)
        ));
    }

    #[test]
    fn test_decode_bad_base64() {
        assert!(matches!(
            decode_claims("header.!!!!.sig"),
            Err(DecodeError::Base64(_))
        ));
    }

    #[test]
    fn test_decode_not_json() {
        let token = format!("header.{}.sig", STANDARD.encode("hello"));
        assert!(matches!(decode_claims(&token), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_missing_exp() {
        let token = token_with_claims(&serde_json::json!({ "sub": "owner-1" }));
        assert!(matches!(decode_claims(&token), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_non_numeric_exp() {
        let token = token_with_claims(&serde_json::json!({ "exp": "tomorrow" }));
        assert!(matches!(decode_claims(&token), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_fractional_exp() {
        let token = token_with_claims(&serde_json::json!({ "exp": 1_700_000_000.5 }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 1_700_000_000.5);

        let at_exp = DateTime::from_timestamp_millis(1_700_000_000_500).unwrap();
        assert_eq!(claims.expires_at(), at_exp);
        assert!(!claims.is_expired_at(at_exp - Duration::milliseconds(1)));
        assert!(claims.is_expired_at(at_exp));
    }

    #[test]
    fn test_is_expired_at_boundary() {
        let claims = Claims { exp: 1_000.0 };
        let at_exp = DateTime::from_timestamp(1_000, 0).unwrap();

        assert!(claims.is_expired_at(at_exp));
        assert!(claims.is_expired_at(at_exp + Duration::milliseconds(1)));
        assert!(!claims.is_expired_at(at_exp - Duration::milliseconds(1)));
    }

    #[test]
    fn test_huge_exp_never_expires() {
        let claims = Claims { exp: 1e300 };
        assert!(!claims.is_expired_at(Utc::now()));
        assert_eq!(claims.expires_at(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_very_negative_exp_clamps_to_min() {
        let claims = Claims { exp: -1e300 };
        assert!(claims.is_expired_at(Utc::now()));
        assert_eq!(claims.expires_at(), DateTime::<Utc>::MIN_UTC);
    }
}
