use crate::{AuthError, Claims, Result as AuthErrorResult, SigningAlgorithm, TokenCodecConfig};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Issues and verifies signed bearer tokens.
///
/// Pure with respect to its input: the only state is the configured key
/// material and validation rules, so one instance is shared by every request.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: SigningAlgorithm,
    audience: Option<String>,
    development_secret: bool,
}

impl TokenCodec {
    #[track_caller]
    pub fn new(config: TokenCodecConfig) -> AuthErrorResult<Self> {
        let secret = config.secret.as_bytes();
        if secret.is_empty() {
            return Err(AuthError::Config {
                message: "signing secret cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut validation = Validation::new(config.algorithm.into());
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = config.leeway_secs;
        match config.audience.as_deref() {
            Some(audience) => {
                validation.set_required_spec_claims(&["exp", "sub", "aud"]);
                validation.set_audience(&[audience]);
            }
            None => {
                validation.set_required_spec_claims(&["exp", "sub"]);
                validation.validate_aud = false;
            }
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            algorithm: config.algorithm,
            audience: config.audience,
            development_secret: config.secret.is_development(),
        })
    }

    /// Issue a token valid for `ttl` from now
    #[track_caller]
    pub fn encode(
        &self,
        subject: &str,
        tenant: &str,
        role: &str,
        ttl: Duration,
    ) -> AuthErrorResult<String> {
        self.encode_at(subject, tenant, role, ttl, chrono::Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `issued_at` (unix seconds)
    #[track_caller]
    pub fn encode_at(
        &self,
        subject: &str,
        tenant: &str,
        role: &str,
        ttl: Duration,
        issued_at: i64,
    ) -> AuthErrorResult<String> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        if ttl_secs < 1 {
            return Err(AuthError::InvalidClaim {
                claim: "exp".to_string(),
                message: "token lifetime must be at least one second".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let claims = Claims {
            subject: subject.to_string(),
            tenant: tenant.to_string(),
            role: role.to_string(),
            issued_at,
            expires_at: issued_at.saturating_add(ttl_secs),
            aud: self.audience.clone(),
        };
        claims.validate()?;

        encode(
            &Header::new(self.algorithm.into()),
            &claims,
            &self.encoding_key,
        )
        .map_err(|source| AuthError::JwtEncode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Verify signature and expiry, then apply the tenant soft-binding.
    ///
    /// When `expected_tenant` is non-empty and the token carries a non-empty
    /// `tid`, the two must match case-insensitively. Tokens with an empty
    /// `tid` are accepted for any tenant.
    #[track_caller]
    pub fn decode(&self, token: &str, expected_tenant: Option<&str>) -> AuthErrorResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                    location: ErrorLocation::from(Location::caller()),
                },
                kind => AuthError::InvalidToken {
                    reason: describe(kind),
                    location: ErrorLocation::from(Location::caller()),
                },
            },
        )?;

        let claims = token_data.claims;
        claims.validate()?;
        claims.ensure_tenant(expected_tenant)?;

        Ok(claims)
    }

    /// Get the algorithm being used (for logging/debugging)
    pub fn algorithm(&self) -> &'static str {
        self.algorithm.as_str()
    }

    pub fn leeway_secs(&self) -> u64 {
        self.validation.leeway
    }

    /// True when running on the built-in development secret
    pub fn uses_development_secret(&self) -> bool {
        self.development_secret
    }
}

fn describe(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::InvalidSignature => "signature verification failed".to_string(),
        ErrorKind::InvalidAudience => "audience mismatch".to_string(),
        ErrorKind::InvalidAlgorithm => "algorithm not allowed".to_string(),
        ErrorKind::MissingRequiredClaim(claim) => format!("missing claim: {claim}"),
        ErrorKind::Json(e) => format!("malformed claims: {e}"),
        _ => "malformed token".to_string(),
    }
}
