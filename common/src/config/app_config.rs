use ::config::{Config, ConfigError, Environment, File};
use log::LevelFilter;
use serde::Deserialize;
use std::str::FromStr;

/// Application configuration, loaded from a TOML file and overridden by
/// `APP__SECTION__KEY` environment variables.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub sys: Option<SysConfig>,
    pub auth: Option<AuthConfig>,
    pub meeting: Option<MeetingConfig>,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    pub fn new(file: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(file).required(true))
            .add_source(Environment::with_prefix("APP").prefix_separator("__").separator("__"))
            .build()?;
        config.try_deserialize::<AppConfig>()
    }

    pub fn get_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
    pub fn get_database(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_default()
    }
    pub fn get_sys(&self) -> SysConfig {
        self.sys.clone().unwrap_or_default()
    }
    pub fn get_auth(&self) -> AuthConfig {
        self.auth.clone().unwrap_or_default()
    }
    pub fn get_meeting(&self) -> MeetingConfig {
        self.meeting.clone().unwrap_or_default()
    }
    pub fn get_mail(&self) -> MailConfig {
        self.mail.clone().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Mongo,
    /// In-process store, contents are lost on restart.
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
    pub db_name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::Mongo,
            url: "mongodb://localhost:27017".to_string(),
            db_name: "intern_hub".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SysConfig {
    // global log level
    pub log_level: String,
    // root directory of uploaded files
    pub upload_path: String,
    // public prefix uploaded files are served under
    pub file_url_prefix: String,
}

impl Default for SysConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            upload_path: "./upload".to_string(),
            file_url_prefix: "/files".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub session_ttl_secs: u64,
    pub max_sessions: u64,
    /// Admin account created at startup when no user has this email.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_name: String,
    pub admin_phone: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: 60 * 60 * 24,
            max_sessions: 100_000,
            admin_email: None,
            admin_password: None,
            admin_name: "admin".to_string(),
            admin_phone: "010-0000-0000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MeetingConfig {
    pub enabled: bool,
    pub account_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub oauth_url: String,
    pub api_base: String,
    pub host_user: String,
    pub timezone: String,
    pub duration_minutes: u32,
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            account_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            oauth_url: "https://zoom.us/oauth/token".to_string(),
            api_base: "https://api.zoom.us/v2".to_string(),
            host_user: "me".to_string(),
            timezone: "Asia/Seoul".to_string(),
            duration_minutes: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MailConfig {
    pub sender: String,
    pub service_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self { sender: "noreply@intern-hub.local".to_string(), service_name: "Intern Hub".to_string() }
    }
}

/// Installs the `env_logger` backend. `RUST_LOG` still takes precedence.
pub fn init_log(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or(LevelFilter::Info);
    let _ = env_logger::Builder::new().filter_level(filter).parse_default_env().try_init();
}
