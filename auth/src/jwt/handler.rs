use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::TokenError;

/// JWT encoder/decoder bound to one symmetric key.
///
/// Only HS256 is accepted on decode. A token whose header names any other
/// algorithm is rejected before the signature is looked at, which closes
/// algorithm-substitution attacks.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret (should be at least 32 bytes)
    /// * `issuer` - Issuer every decoded token must carry
    /// * `audience` - Audience checked when a token carries an `aud` claim
    pub fn new(secret: &[u8], issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        // Expiry is reported through the claims, not as a decode failure.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign claims into a compact JWT.
    ///
    /// # Errors
    /// * `SigningFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(&Header::new(Self::ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify signature, algorithm, issuer and audience, then decode claims.
    ///
    /// Expired tokens decode successfully.
    ///
    /// # Errors
    /// * `Invalid` - Malformed token, bad signature, algorithm mismatch,
    ///   wrong issuer/audience or missing required claim
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}
