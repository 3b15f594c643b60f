use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Локальные origin'ы фронтенда, разрешенные по умолчанию.
pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:5500",
    "http://127.0.0.1:5500",
    "http://localhost:2001",
    "http://127.0.0.1:2001",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

// Настройки приложения
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

// Настройки базы данных
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Настройки JWT и проверки паролей
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub expires_in_hours: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            cors: CorsConfig::from_env(),
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(AppConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 8081)?,
            rust_log: env::var("RUST_LOG")
                .unwrap_or_else(|_| "event_planner=debug,tower_http=debug".to_string()),
        })
    }
}

impl DatabaseConfig {
    /// Импортер использует только эту секцию, ключ подписи ему не нужен.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(DatabaseConfig {
            url: required("DATABASE_URL")?,
            pool_size: parse_or("DB_POOL_SIZE", 10)?,
        })
    }
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let expires_in_hours = parse_or("JWT_EXPIRES_IN_HOURS", 24)?;
        if expires_in_hours <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRES_IN_HOURS",
                value: expires_in_hours.to_string(),
            });
        }

        Ok(AuthConfig {
            jwt_secret: required("JWT_SECRET")?,
            expires_in_hours,
            bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => Vec::new(),
        };

        if allowed_origins.is_empty() {
            return CorsConfig::default();
        }
        CorsConfig { allowed_origins }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

// Пустое значение считаем отсутствующим: секреты без значения недопустимы
fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
