use actix_web::cookie::Key;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/surveys.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_APP_NAME: &str = "Surveys";
const DEFAULT_PASSWORD: &str = "11111111";
const MIN_SESSION_KEY_LEN: usize = 64;
const DEFAULT_REMEMBER_DAYS: i64 = 30;

/// Runtime configuration, read once at startup from the environment
/// (after loading an optional `.env` file).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub app_name: String,
    pub session_key: Option<String>,
    pub cookie_secure: bool,
    /// Session cookie lifetime, which is how long "remember me" lasts.
    pub remember_days: i64,
    pub admin_password: String,
    pub user_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {e}");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let admin_password = non_empty("ADMIN_PASSWORD").unwrap_or_else(|| {
            log::warn!("No ADMIN_PASSWORD set, using the built-in default");
            DEFAULT_PASSWORD.to_string()
        });
        let user_password = non_empty("USER_PASSWORD").unwrap_or_else(|| {
            log::warn!("No USER_PASSWORD set, using the built-in default");
            DEFAULT_PASSWORD.to_string()
        });

        Self {
            database_url: non_empty("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            app_name: non_empty("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            session_key: non_empty("SESSION_KEY"),
            cookie_secure: matches!(
                non_empty("COOKIE_SECURE").as_deref().map(str::to_ascii_lowercase).as_deref(),
                Some("1" | "true" | "yes")
            ),
            remember_days: match non_empty("REMEMBER_DAYS").map(|v| v.trim().parse::<i64>()) {
                Some(Ok(days)) if days > 0 => days,
                Some(_) => {
                    log::warn!("REMEMBER_DAYS must be a positive number of days, using {DEFAULT_REMEMBER_DAYS}");
                    DEFAULT_REMEMBER_DAYS
                }
                None => DEFAULT_REMEMBER_DAYS,
            },
            admin_password,
            user_password,
        }
    }

    /// Session encryption key: the configured one when long enough, otherwise a
    /// random key (sessions are then lost on restart).
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}
