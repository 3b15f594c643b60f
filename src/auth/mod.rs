pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenError, TokenManager};
pub use password::PasswordVerifier;

use chrono::Duration;
use tracing::{error, warn};

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::models::User;
use crate::store::Store;

/// Проверка учетных данных и выпуск сессионных токенов.
#[derive(Clone)]
pub struct Authenticator {
    tokens: TokenManager,
    passwords: PasswordVerifier,
}

impl Authenticator {
    pub fn new(config: &AuthConfig) -> Result<Self, bcrypt::BcryptError> {
        Ok(Self {
            tokens: TokenManager::new(&config.jwt_secret, Duration::hours(config.expires_in_hours)),
            passwords: PasswordVerifier::new(config.bcrypt_cost)?,
        })
    }

    /// Неизвестный email и неверный пароль неразличимы для вызывающего.
    pub async fn login(
        &self,
        store: &dyn Store,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        let user = store
            .find_user_by_email(email)
            .await
            .map_err(AppError::storage("Server error"))?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());
        let verified = self.passwords.verify(password, stored_hash).await;

        let user = match user {
            Some(user) if verified => user,
            _ => {
                warn!("Rejected login attempt");
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(&user).map_err(|e| {
            error!("Failed to issue token for user {}: {}", user.id, e);
            AppError::Internal("Server error")
        })?;

        Ok((user, token))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.tokens.verify(token)
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }
}
