//! Admin identity: password check, token issue and the bearer-token
//! extractor guarding admin routes.

use anyhow::anyhow;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::constants::{API_NAME, TOKEN_TTL_HOURS};
use crate::error::AppError;
use crate::models::{AdminClaims, LoginResponse};
use crate::repository::AdminRepository;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Clone)]
pub struct AuthService {
    admins: AdminRepository,
    encoding: EncodingKey,
    decoding: DecodingKey,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(admins: AdminRepository, secret: &str, hash_cost: u32) -> Self {
        Self {
            admins,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            hash_cost,
        }
    }

    /// Creates the bootstrap admin account unless the username already exists.
    pub async fn ensure_default_admin(&self, username: &str, password: &str) -> Result<(), AppError> {
        if self.admins.find_by_username(username).await?.is_some() {
            return Ok(());
        }

        let hash = hash_password(password, self.hash_cost).await?;
        if self.admins.create_if_absent(username, &hash).await? {
            tracing::info!("{} Default admin created: username={}", API_NAME, username);
        }
        Ok(())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let admin = self
            .admins
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(password, &admin.password).await? {
            tracing::warn!("{} Failed login for {}", API_NAME, username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.issue_token(admin.id, &admin.username)?;
        tracing::info!("{} Admin logged in: {}", API_NAME, admin.username);
        Ok(LoginResponse {
            token,
            username: admin.username,
        })
    }

    pub fn issue_token(&self, admin_id: i64, username: &str) -> Result<String, AppError> {
        let claims = AdminClaims {
            sub: admin_id,
            username: username.to_string(),
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow!("failed to sign token: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<AdminClaims, AppError> {
        decode::<AdminClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("{} Token rejected: {}", API_NAME, e);
                AppError::Forbidden("Invalid token.".to_string())
            })
    }
}

async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(anyhow!(e)))?
        .map_err(|e| AppError::Internal(anyhow!("failed to hash password: {}", e)))
}

async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let (password, hash) = (password.to_string(), hash.to_string());
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow!(e)))?
        .map_err(|e| AppError::Internal(anyhow!("failed to verify password: {}", e)))
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminClaims
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".to_string()))?;

        AuthService::from_ref(state).verify_token(token)
    }
}
