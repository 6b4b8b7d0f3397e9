use crate::config::Config;
use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Claims issued by the identity provider. `sub` is the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

fn configured_algorithm(config: &Config) -> AppResult<Algorithm> {
    let algorithm = Algorithm::from_str(&config.security.algorithm).map_err(|_| {
        AppError::Internal(format!(
            "Unsupported JWT algorithm {}",
            config.security.algorithm
        ))
    })?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => Err(AppError::Internal(format!(
            "JWT algorithm {} needs a shared secret",
            config.security.algorithm
        ))),
    }
}

/// Mint a token the way the identity provider would. Used by `--issue-token`
/// for local development and by tests.
pub fn create_access_token(
    user_id: &str,
    email: Option<&str>,
    expires_in: Duration,
    config: &Config,
) -> AppResult<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + expires_in).timestamp(),
        email: email.map(str::to_string),
        iss: config.security.issuer.clone(),
        aud: config.security.audience.clone(),
    };

    let token = encode(
        &Header::new(configured_algorithm(config)?),
        &claims,
        &EncodingKey::from_secret(config.security.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn decode_access_token(token: &str, config: &Config) -> AppResult<Claims> {
    let mut validation = Validation::new(configured_algorithm(config)?);

    let mut required = vec!["exp", "sub"];
    if config.security.issuer.is_some() {
        required.push("iss");
    }
    if config.security.audience.is_some() {
        required.push("aud");
    }
    validation.set_required_spec_claims(&required);

    match &config.security.issuer {
        Some(issuer) => validation.set_issuer(&[issuer]),
        None => validation.iss = None,
    }

    match &config.security.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.security.jwt_secret.as_bytes()),
        &validation,
    )?;

    if data.claims.sub.is_empty() {
        return Err(AppError::Authentication("Token has no subject".to_string()));
    }

    Ok(data.claims)
}
