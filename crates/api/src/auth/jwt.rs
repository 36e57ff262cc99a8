//! Validation of IdP-issued access tokens.
//!
//! Users authenticate against a third-party identity provider; this
//! service never mints user tokens. It only verifies the HS256 signature
//! with the provider's shared secret, checks expiry (and issuer/audience
//! when configured), and reads the subject claim.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims read from an IdP access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdpClaims {
    /// Subject -- the provider's user id (a UUID in string form).
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Email, when the provider includes it.
    #[serde(default)]
    pub email: Option<String>,
}

/// Configuration for IdP token validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub jwt_secret: String,
    /// Expected `iss` claim; unchecked when `None`.
    pub issuer: Option<String>,
    /// Expected `aud` claim; unchecked when `None`.
    pub audience: Option<String>,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `AUTH_JWT_SECRET` | **yes**  | --      |
    /// | `AUTH_ISSUER`     | no       | unset   |
    /// | `AUTH_AUDIENCE`   | no       | unset   |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!jwt_secret.is_empty(), "AUTH_JWT_SECRET must not be empty");

        Self {
            jwt_secret,
            issuer: std::env::var("AUTH_ISSUER").ok().filter(|s| !s.is_empty()),
            audience: std::env::var("AUTH_AUDIENCE").ok().filter(|s| !s.is_empty()),
        }
    }
}

/// Validate and decode an access token, returning the embedded
/// [`IdpClaims`].
///
/// Validates the signature and expiration always, and the issuer/audience
/// claims when the configuration pins them.
pub fn validate_token(
    token: &str,
    config: &AuthConfig,
) -> Result<IdpClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    let token_data = decode::<IdpClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
