/// Authentication service - JWT, password hashing and credential checks
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tuneline_core::{TunelineError, UserRecord};
use tuneline_storage::UserStore;

/// bcrypt work factor used for newly registered users
pub const DEFAULT_HASH_COST: u32 = 10;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<UserStore>,
    secret: String,
    access_token_expiration: Duration,
    refresh_token_expiration: Duration,
    hash_cost: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Tokens handed out on login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthService {
    pub fn new(
        users: Arc<UserStore>,
        secret: String,
        access_expiration_hours: u64,
        refresh_expiration_days: u64,
    ) -> Self {
        Self {
            users,
            secret,
            access_token_expiration: Duration::hours(access_expiration_hours as i64),
            refresh_token_expiration: Duration::days(refresh_expiration_days as i64),
            hash_cost: DEFAULT_HASH_COST,
        }
    }

    /// Override the bcrypt cost (tests use the minimum)
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.hash_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Hash the password and store a new user
    ///
    /// # Errors
    /// `Validation` for empty input, `UserAlreadyExists` for a taken name.
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(TunelineError::validation("Username and password are required.").into());
        }
        if self.users.contains(username).await {
            return Err(TunelineError::UserAlreadyExists(username.to_string()).into());
        }

        let password_hash = self.hash_password(password)?;
        self.users
            .insert(username, UserRecord::new(password_hash))
            .await?;
        Ok(())
    }

    /// Check a username/password pair
    ///
    /// Unknown users and wrong passwords fail the same way.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(TunelineError::validation("Username and password are required.").into());
        }

        let record = self
            .users
            .get(username)
            .await
            .ok_or(TunelineError::InvalidCredentials)?;

        if !self.verify_password(password, &record.password_hash)? {
            return Err(TunelineError::InvalidCredentials.into());
        }
        Ok(())
    }

    /// Verify credentials and issue an access/refresh token pair
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        self.verify_credentials(username, password).await?;
        tracing::info!("User '{}' logged in", username);

        Ok(TokenPair {
            access_token: self.create_access_token(username)?,
            refresh_token: self.create_refresh_token(username)?,
        })
    }

    /// Create an access token
    pub fn create_access_token(&self, username: &str) -> Result<String> {
        self.create_token(username, TokenType::Access, self.access_token_expiration)
    }

    /// Create a refresh token
    pub fn create_refresh_token(&self, username: &str) -> Result<String> {
        self.create_token(username, TokenType::Refresh, self.refresh_token_expiration)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify that a token is an access token, returning its username
    pub fn verify_access_token(&self, token: &str) -> Result<String> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(claims.sub)
    }

    /// Verify that a token is a refresh token, returning its username
    pub fn verify_refresh_token(&self, token: &str) -> Result<String> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(claims.sub)
    }

    fn create_token(
        &self,
        username: &str,
        token_type: TokenType,
        expiration: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + expiration;

        let claims = Claims {
            sub: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}
