use std::sync::Arc;
use tracing::{error, warn};

/// Проверка паролей bcrypt вне async-потоков.
#[derive(Clone)]
pub struct PasswordVerifier {
    // Хеш-приманка для несуществующих email: время ответа не выдает, есть ли аккаунт
    decoy_hash: Arc<str>,
}

impl PasswordVerifier {
    pub fn new(cost: u32) -> Result<Self, bcrypt::BcryptError> {
        let decoy = uuid::Uuid::new_v4().to_string();
        let decoy_hash = bcrypt::hash(decoy, cost)?;
        Ok(Self { decoy_hash: decoy_hash.into() })
    }

    /// `stored_hash == None` означает, что пользователь не найден: результат всегда `false`.
    pub async fn verify(&self, password: &str, stored_hash: Option<&str>) -> bool {
        let known_user = stored_hash.is_some();
        let hash = stored_hash.map(str::to_string).unwrap_or_else(|| self.decoy_hash.to_string());
        let password = password.to_string();

        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await;

        match outcome {
            Ok(Ok(matches)) => known_user && matches,
            Ok(Err(e)) => {
                warn!("Stored password hash could not be verified: {}", e);
                false
            }
            Err(e) => {
                error!("Password verification task failed: {:?}", e);
                false
            }
        }
    }
}
