//! Request authentication: static API key or service-account bearer tokens

use crate::constants::OAUTH_SCOPE;
use crate::error::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Mint a fresh token when the cached one is this close to expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// How requests to the Sheets API are authenticated.
pub enum Credentials {
    /// `key=` query parameter; read access to public sheets.
    ApiKey(String),
    /// OAuth bearer tokens minted from a service-account key file.
    ServiceAccount(TokenProvider),
}

/// The fields of a Google service-account JSON key file this client uses.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    /// Unix seconds.
    expires_at: i64,
}

/// Mints and caches access tokens for a service account.
pub struct TokenProvider {
    key: ServiceAccountKey,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            cached: Mutex::new(None),
        }
    }

    /// Current bearer token, exchanging a signed JWT assertion at the token
    /// endpoint when the cached token is missing or about to expire.
    pub async fn access_token(&self, http: &reqwest::Client) -> Result<String> {
        let now = Utc::now().timestamp();
        if let Some(token) = self.cached_token(now) {
            return Ok(token);
        }

        let assertion = self.signed_assertion(now)?;
        debug!(token_uri = %self.key.token_uri, account = %self.key.client_email, "Requesting access token");
        let resp = http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Auth(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let token: TokenResponse = resp.json().await?;
        info!(expires_in = token.expires_in, "Access token issued");

        let mut cached = self.cached.lock().unwrap();
        *cached = Some(CachedToken {
            token: token.access_token.clone(),
            expires_at: now + token.expires_in,
        });
        Ok(token.access_token)
    }

    fn cached_token(&self, now: i64) -> Option<String> {
        let cached = self.cached.lock().unwrap();
        cached
            .as_ref()
            .filter(|t| t.expires_at - EXPIRY_MARGIN_SECS > now)
            .map(|t| t.token.clone())
    }

    fn signed_assertion(&self, now: i64) -> Result<String> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: OAUTH_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_key() -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "roster@project.iam.gserviceaccount.com".to_string(),
            private_key: "not a real key".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        }
    }

    #[test]
    fn token_uri_defaults_when_absent_from_key_file() {
        let key: ServiceAccountKey =
            serde_json::from_str(r#"{"client_email":"a@b","private_key":"k"}"#).unwrap();
        assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn cached_token_is_reused_until_the_expiry_margin() {
        let provider = TokenProvider::new(dummy_key());
        *provider.cached.lock().unwrap() = Some(CachedToken {
            token: "tok".to_string(),
            expires_at: 1_000,
        });

        assert_eq!(provider.cached_token(500), Some("tok".to_string()));
        // Inside the 60-second refresh margin.
        assert_eq!(provider.cached_token(950), None);
        assert_eq!(provider.cached_token(2_000), None);
    }

    #[test]
    fn assertion_claims_carry_scope_and_lifetime() {
        let claims = Claims {
            iss: "a@b",
            scope: OAUTH_SCOPE,
            aud: "https://oauth2.googleapis.com/token",
            iat: 100,
            exp: 100 + TOKEN_LIFETIME_SECS,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["scope"], OAUTH_SCOPE);
        assert_eq!(json["exp"].as_i64().unwrap() - json["iat"].as_i64().unwrap(), 3600);
    }
}
