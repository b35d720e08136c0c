//! `TokenService` adapter signing HS256 JSON Web Tokens.
//!
//! Tokens carry `sub` (the user id) and `iat`. An `exp` claim is only added
//! when a time-to-live is configured; tokens without one never expire.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessToken, TokenClaims, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    sub: String,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// HS256 implementation of the `TokenService` port.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a signer for `secret`.
    ///
    /// `ttl` controls the `exp` claim; `None` issues tokens without expiry.
    pub fn new(secret: &[u8], ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::from(["sub".to_owned()]);
        // `exp` is optional and compared against the injected clock instead.
        validation.validate_exp = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    fn now(&self) -> i64 {
        self.clock.utc().timestamp()
    }
}

fn ttl_seconds(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &UserId) -> Result<AccessToken, TokenError> {
        let issued_at = self.now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            iat: issued_at,
            exp: self
                .ttl
                .map(|ttl| issued_at.saturating_add(ttl_seconds(ttl))),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<JwtClaims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        let claims = data.claims;

        if claims.exp.is_some_and(|exp| exp <= self.now()) {
            return Err(TokenError::expired());
        }
        let subject = UserId::new(&claims.sub)
            .map_err(|err| TokenError::invalid(format!("subject is not a user id: {err}")))?;

        Ok(TokenClaims {
            subject,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use mockable::MockClock;
    use rstest::rstest;

    const SECRET: &[u8] = b"test-secret-with-enough-entropy";

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0)
            .single()
            .expect("valid timestamp")
    }

    fn clock_at(seconds: i64) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(at(seconds));
        Arc::new(clock)
    }

    #[rstest]
    fn issued_tokens_resolve_to_their_subject() {
        let service = JwtTokenService::new(SECRET, None, clock_at(1_700_000_000));
        let subject = UserId::random();

        let token = service.issue(&subject).expect("issue");
        let claims = service.verify(token.as_str()).expect("verify");

        assert_eq!(claims.subject, subject);
        assert_eq!(claims.issued_at, 1_700_000_000);
        assert_eq!(claims.expires_at, None);
    }

    #[rstest]
    fn ttl_adds_an_expiry_claim() {
        let service = JwtTokenService::new(
            SECRET,
            Some(Duration::from_secs(3600)),
            clock_at(1_700_000_000),
        );

        let token = service.issue(&UserId::random()).expect("issue");
        let claims = service.verify(token.as_str()).expect("verify");

        assert_eq!(claims.expires_at, Some(1_700_003_600));
    }

    #[rstest]
    fn expired_tokens_are_rejected() {
        let issuer = JwtTokenService::new(SECRET, Some(Duration::from_secs(60)), clock_at(1_000));
        let token = issuer.issue(&UserId::random()).expect("issue");

        let later = JwtTokenService::new(SECRET, Some(Duration::from_secs(60)), clock_at(2_000));

        assert_eq!(later.verify(token.as_str()), Err(TokenError::expired()));
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_invalid() {
        let issuer = JwtTokenService::new(b"other-secret", None, clock_at(1_000));
        let token = issuer.issue(&UserId::random()).expect("issue");

        let verifier = JwtTokenService::new(SECRET, None, clock_at(1_000));

        assert!(matches!(
            verifier.verify(token.as_str()),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    #[case("Bearer abc")]
    fn garbage_is_invalid(#[case] token: &str) {
        let service = JwtTokenService::new(SECRET, None, clock_at(1_000));

        assert!(matches!(
            service.verify(token),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn non_uuid_subjects_are_invalid() {
        let claims = JwtClaims {
            sub: "admin".to_owned(),
            iat: 1_000,
            exp: None,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("encode");
        let service = JwtTokenService::new(SECRET, None, clock_at(1_000));

        assert!(matches!(
            service.verify(&token),
            Err(TokenError::Invalid { .. })
        ));
    }
}
