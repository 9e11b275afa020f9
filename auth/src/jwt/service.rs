use std::fmt;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Lifetime of an issued token unless configured otherwise.
pub const DEFAULT_TOKEN_VALIDITY_DAYS: i64 = 30;

/// Symmetric key used to sign and verify tokens.
///
/// Never printed: the `Debug` output is redacted.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap raw key bytes. An empty key is rejected.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            None
        } else {
            Some(Self(bytes))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(..)")
    }
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues and validates HS256 identity tokens.
///
/// The secret is handed in at construction. Without one the service fails
/// closed: every `issue` and `validate` call returns
/// [`TokenError::SecretUnavailable`].
pub struct TokenService {
    keys: Option<Keys>,
    algorithm: Algorithm,
    validity: Duration,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Signing key, or `None` when no key is configured
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: Option<SigningSecret>) -> Self {
        let keys = secret.map(|secret| Keys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });

        Self {
            keys,
            algorithm: Algorithm::HS256,
            validity: Duration::days(DEFAULT_TOKEN_VALIDITY_DAYS),
        }
    }

    /// Override how long issued tokens stay valid.
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Whether a signing secret is configured.
    pub fn is_configured(&self) -> bool {
        self.keys.is_some()
    }

    /// Issue a token for `user_id`, valid from now for the configured window.
    ///
    /// # Errors
    /// * `SecretUnavailable` - No signing secret configured
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        let claims = Claims::for_subject(user_id, self.validity);
        self.sign(&claims)
    }

    /// Sign an arbitrary claims set.
    ///
    /// # Errors
    /// * `SecretUnavailable` - No signing secret configured
    /// * `SigningFailed` - Token encoding failed
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let keys = self.keys()?;
        let header = Header::new(self.algorithm);

        encode(&header, claims, &keys.encoding).map_err(|e| {
            tracing::error!(error = %e, "Token signing failed");
            TokenError::SigningFailed(e.to_string())
        })
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// Tokens without an `exp` claim are rejected. No leeway is applied.
    ///
    /// # Errors
    /// * `SecretUnavailable` - No signing secret configured
    /// * `InvalidSignature` - Token was not signed with this service's secret
    /// * `Expired` - Token's `exp` is in the past
    /// * `Malformed` - Anything else that stops the token from decoding
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let keys = self.keys()?;

        let mut validation = Validation::new(self.algorithm);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;

        decode::<Claims>(token, &keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                };
                tracing::debug!(error = %error, "Token rejected");
                error
            })
    }

    fn keys(&self) -> Result<&Keys, TokenError> {
        self.keys.as_ref().ok_or_else(|| {
            tracing::warn!("Token operation attempted without a signing secret");
            TokenError::SecretUnavailable
        })
    }
}
