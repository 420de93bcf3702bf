//! Configuration module for the dashboard.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database host
    pub db_host: String,
    /// Database user
    pub db_user: String,
    /// Database password
    pub db_password: String,
    /// Database name
    pub db_name: String,
    /// Full connection URL override (takes precedence over the parts above)
    pub database_url: Option<String>,
    /// Discord OAuth application client id
    pub client_id: String,
    /// Discord OAuth application client secret
    pub client_secret: String,
    /// Discord bot token, used for the post-login DM
    pub bot_token: String,
    /// OAuth redirect URI registered with Discord
    pub redirect_uri: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_host = env::var("MODBOARD_DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_user = env::var("MODBOARD_DB_USER").unwrap_or_else(|_| "modboard".to_string());
        let db_password = env::var("MODBOARD_DB_PASSWORD").unwrap_or_default();
        let db_name = env::var("MODBOARD_DB_NAME").unwrap_or_else(|_| "modboard".to_string());
        let database_url = env::var("MODBOARD_DATABASE_URL").ok();

        let client_id = env::var("MODBOARD_CLIENT_ID").unwrap_or_default();
        let client_secret = env::var("MODBOARD_CLIENT_SECRET").unwrap_or_default();
        let bot_token = env::var("MODBOARD_BOT_TOKEN").unwrap_or_default();

        let redirect_uri = env::var("MODBOARD_REDIRECT_URI")
            .unwrap_or_else(|_| "http://127.0.0.1:8080/callback/".to_string());

        let bind_addr = env::var("MODBOARD_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid MODBOARD_BIND_ADDR format");

        let log_level = env::var("MODBOARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_host,
            db_user,
            db_password,
            db_name,
            database_url,
            client_id,
            client_secret,
            bot_token,
            redirect_uri,
            bind_addr,
            log_level,
        }
    }

    /// Connection URL for the database, assembled from the host/user/password/
    /// name options unless an explicit URL override is set.
    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }
        format!(
            "mysql://{}:{}@{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_name
        )
    }
}
