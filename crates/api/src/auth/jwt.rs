//! JWT generation and validation for the two bearer-token namespaces.
//!
//! User session tokens are HS256-signed JWTs carrying a [`Claims`] payload
//! (user id + email). Service tokens are a second, independent namespace
//! with its own secret and an embedded security-token claim compared against
//! a server-held constant; they protect the sign-in and connection endpoints
//! from anonymous traffic without carrying any user identity.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ledgerd_core::types::DbId;

/// JWT claims embedded in every user access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's email at issue time.
    pub email: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Claims embedded in a service-to-service token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceClaims {
    /// Shared-secret claim compared against the configured constant.
    pub security_token: String,
    pub exp: i64,
    pub iat: i64,
}

/// Configuration for user access-token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify user tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Configuration for the service-token namespace.
#[derive(Debug, Clone)]
pub struct ServiceTokenConfig {
    /// HMAC-SHA256 secret for service tokens (distinct from the user secret).
    pub secret: String,
    /// The constant the embedded `security_token` claim must equal.
    pub security_token: String,
}

/// Default user access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

/// Service tokens are long-lived shared-secret credentials (30 days).
const SERVICE_TOKEN_EXPIRY_DAYS: i64 = 30;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

impl ServiceTokenConfig {
    /// Load service-token configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `SERVICE_TOKEN_SECRET` or `SERVICE_SECURITY_TOKEN` is unset.
    pub fn from_env() -> Self {
        let secret = std::env::var("SERVICE_TOKEN_SECRET")
            .expect("SERVICE_TOKEN_SECRET must be set in the environment");
        let security_token = std::env::var("SERVICE_SECURITY_TOKEN")
            .expect("SERVICE_SECURITY_TOKEN must be set in the environment");
        Self {
            secret,
            security_token,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a user access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Generate a service token carrying the configured security-token claim.
/// Used by operational tooling and tests; production consumers are issued
/// theirs out of band.
pub fn generate_service_token(
    config: &ServiceTokenConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = ServiceClaims {
        security_token: config.security_token.clone(),
        exp: now + SERVICE_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a service token: signature, expiry, and the embedded
/// security-token claim. Returns `false` on any mismatch.
pub fn validate_service_token(token: &str, config: &ServiceTokenConfig) -> bool {
    let decoded = decode::<ServiceClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    );
    match decoded {
        Ok(data) => data.claims.security_token == config.security_token,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        }
    }

    fn test_service_config() -> ServiceTokenConfig {
        ServiceTokenConfig {
            secret: "service-secret-alpha".to_string(),
            security_token: "expected-security-token".to_string(),
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let token = generate_access_token(42, "user@test.com", &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "user@test.com");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            email: "user@test.com".to_string(),
            exp: now - 300, // expired 5 minutes ago (well past leeway)
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let result = validate_token(&token, &config);
        assert_matches!(result, Err(_), "expired token must fail validation");
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            access_token_expiry_mins: 60,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            access_token_expiry_mins: 60,
        };

        let token = generate_access_token(1, "user@test.com", &config_a)
            .expect("token generation should succeed");

        let result = validate_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_service_token_round_trip() {
        let config = test_service_config();
        let token = generate_service_token(&config).expect("generation should succeed");
        assert!(validate_service_token(&token, &config));
    }

    #[test]
    fn test_service_token_wrong_claim_fails() {
        let config = test_service_config();
        let other = ServiceTokenConfig {
            secret: config.secret.clone(),
            security_token: "some-other-token".to_string(),
        };
        // Same secret, different expected claim: signature passes, claim fails.
        let token = generate_service_token(&other).expect("generation should succeed");
        assert!(!validate_service_token(&token, &config));
    }

    #[test]
    fn test_user_token_is_not_a_service_token() {
        let jwt = test_config();
        let service = test_service_config();
        let token = generate_access_token(1, "user@test.com", &jwt).unwrap();
        assert!(
            !validate_service_token(&token, &service),
            "tokens from the user namespace must not pass the service gate"
        );
    }
}
