/// Server configuration
use crate::error::{Result, ServerError};
use kudo_catalog::UpstreamConfig;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_otp")]
    pub otp: OtpSettings,

    #[serde(default)]
    pub mail: MailSettings,

    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpSettings {
    #[serde(default = "default_otp_ttl_minutes")]
    pub ttl_minutes: u64,

    /// Echo the issued code in the send-otp response (`devOtp`)
    #[serde(default = "default_return_code_in_response")]
    pub return_code_in_response: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    /// Resend API key; codes are not mailed without one
    #[serde(default)]
    pub resend_api_key: Option<String>,

    #[serde(default = "default_mail_api_url")]
    pub api_url: String,

    #[serde(default = "default_mail_from")]
    pub from: String,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `./config.toml` when given
    pub fn load_from(path: Option<&str>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = PathBuf::from(path.unwrap_or("config.toml"));
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        // KUDO_AUTH__JWT_SECRET -> auth.jwt_secret
        settings = settings.add_source(
            config::Environment::with_prefix("KUDO")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("upstream.piped_instances")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set KUDO_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.otp.ttl_minutes == 0 {
            return Err(ServerError::Config(
                "OTP lifetime must be at least one minute".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/kudo.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_otp() -> OtpSettings {
    OtpSettings {
        ttl_minutes: default_otp_ttl_minutes(),
        return_code_in_response: default_return_code_in_response(),
    }
}

fn default_otp_ttl_minutes() -> u64 {
    10
}

fn default_return_code_in_response() -> bool {
    true
}

fn default_mail_api_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_mail_from() -> String {
    "Kudo Music <onboarding@resend.dev>".to_string()
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            api_url: default_mail_api_url(),
            from: default_mail_from(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            otp: default_otp(),
            mail: MailSettings::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.otp.ttl_minutes, 10);
        assert!(config.otp.return_code_in_response);
        assert!(config.mail.resend_api_key.is_none());
        assert_eq!(config.upstream.timeout_secs, 8);
    }

    #[test]
    fn test_validate_requires_secret() {
        let mut config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        config.auth.jwt_secret = "s3cret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = ServerConfig::load_from(Some("/nonexistent/kudo.toml"));
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[test]
    fn test_file_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kudo.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9000

[auth]
jwt_secret = "from-file"

[otp]
return_code_in_response = false

[upstream]
lrclib_url = "http://lyrics.local"
"#,
        )
        .unwrap();

        let config = ServerConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert!(!config.otp.return_code_in_response);
        assert_eq!(config.upstream.lrclib_url, "http://lyrics.local");
        assert_eq!(config.upstream.freefy_url, "https://freefy.app");
    }
}
