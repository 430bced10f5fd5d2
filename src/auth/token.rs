use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("subject is not a user id: {0:?}")]
    Subject(String),
}

pub fn issue_token(
    user_id: Uuid,
    key: &EncodingKey,
    ttl: time::Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat,
        exp: iat + ttl.whole_seconds(),
    };

    encode(&Header::new(Algorithm::HS256), &claims, key)
}

/// Checks signature and expiry and returns the subject's user id.
pub fn verify_token(token: &str, key: &DecodingKey) -> Result<Uuid, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<Claims>(token, key, &validation)?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Subject(data.claims.sub))
}
