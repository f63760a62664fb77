//! JWT implementation of the token port.
//!
//! Tokens are HS256-signed and carry `{username, id}` claims. They have no
//! expiry and there is no revocation, so verification is a pure signature
//! check plus claim decoding.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::TokenService;
use crate::domain::{Error, User, UserId};

const TOKEN_INVALID: &str = "token missing or invalid";

/// Claims embedded in issued tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Login name at issue time; informational only.
    username: String,
    /// The subject's user identifier; the authorisation checks key off this.
    id: String,
}

/// HS256 token codec holding the signing secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenService {
    /// Build a codec from the signing secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no expiry; without this the decoder would reject
        // every token for the missing `exp` claim.
        validation.required_spec_claims = std::collections::HashSet::new();
        validation.validate_exp = false;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<String, Error> {
        let claims = Claims {
            username: user.username().to_string(),
            id: user.id().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| Error::internal(format!("failed to sign token: {err}")))
    }

    fn verify(&self, raw: &str) -> Result<UserId, Error> {
        let data = decode::<Claims>(raw, &self.decoding, &self.validation)
            .map_err(|_| Error::unauthorized(TOKEN_INVALID))?;
        UserId::new(&data.claims.id).map_err(|_| Error::unauthorized(TOKEN_INVALID))
    }
}
