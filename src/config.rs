//! Configuration types.
//!
//! Everything is read once at startup into an immutable [`ReminderConfig`]
//! that is passed explicitly to each component.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::source::auth::ServiceAccountKey;

/// Default timeout for source HTTP requests and the SMTP session.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Full job configuration.
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    pub smtp: SmtpConfig,
    pub source: SourceConfig,
    /// Append log lines to this file in addition to stderr.
    pub log_file: Option<PathBuf>,
}

/// Outbound mail settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// From address; also the SMTP login name.
    pub sender: String,
    pub password: SecretString,
    pub timeout: Duration,
}

/// Where issue rows come from.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    Sheets(SheetsConfig),
    Csv { path: PathBuf },
}

/// Google Sheets source settings.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub credentials: ServiceAccountKey,
    /// Document name, resolved through Drive.
    pub spreadsheet_name: String,
    /// Known document ID; skips the Drive lookup when set.
    pub spreadsheet_id: Option<String>,
    pub http_timeout: Duration,
}

impl ReminderConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key/value lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require =
            |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let smtp = SmtpConfig {
            host: require("EMAIL_SMTP_SERVER")?,
            port: parse_value("EMAIL_SMTP_PORT", &require("EMAIL_SMTP_PORT")?)?,
            sender: require("EMAIL_SENDER")?,
            password: SecretString::from(require("EMAIL_PASSWORD")?),
            timeout: timeout_from(get("REMINDER_SMTP_TIMEOUT_SECS"), "REMINDER_SMTP_TIMEOUT_SECS")?,
        };

        let source = match get("ISSUES_CSV") {
            Some(path) => SourceConfig::Csv {
                path: PathBuf::from(path),
            },
            None => {
                let credentials = ServiceAccountKey::load(&require("CREDENTIALS_FILE")?)?;
                SourceConfig::Sheets(SheetsConfig {
                    credentials,
                    spreadsheet_name: require("SPREADSHEET_NAME")?,
                    spreadsheet_id: get("SPREADSHEET_ID"),
                    http_timeout: timeout_from(
                        get("REMINDER_HTTP_TIMEOUT_SECS"),
                        "REMINDER_HTTP_TIMEOUT_SECS",
                    )?,
                })
            }
        };

        Ok(Self {
            smtp,
            source,
            log_file: get("REMINDER_LOG_FILE").map(PathBuf::from),
        })
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        })
}

fn timeout_from(raw: Option<String>, key: &str) -> Result<Duration, ConfigError> {
    let secs = match raw {
        Some(raw) => parse_value::<u64>(key, &raw)?,
        None => DEFAULT_TIMEOUT_SECS,
    };
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "timeout must be at least one second".into(),
        });
    }
    Ok(Duration::from_secs(secs))
}
