//! Shared configuration for Hostelio tools.
//!
//! TOML profiles, session resolution (env + keyring + plaintext), and
//! translation to `hostelio_core::ClientConfig`. The CLI adds
//! `GlobalOpts`-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use hostelio_core::{
    ClientConfig, CoreError, EntityId, PollSettings, Role, Session, SessionStore, StoredSession,
    TlsVerification,
};

const KEYRING_SERVICE: &str = "hostelio";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("not logged in for profile '{profile}'")]
    NoSession { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("stored session is unreadable: {0}")]
    SessionFormat(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        CoreError::Config {
            message: err.to_string(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_payment_poll_interval")]
    pub payment_poll_interval_secs: u64,

    #[serde(default = "default_payment_timeout")]
    pub payment_timeout_secs: u64,

    #[serde(default = "default_chat_poll_interval")]
    pub chat_poll_interval_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            payment_poll_interval_secs: default_payment_poll_interval(),
            payment_timeout_secs: default_payment_timeout(),
            chat_poll_interval_secs: default_chat_poll_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_payment_poll_interval() -> u64 {
    5
}
fn default_payment_timeout() -> u64 {
    180
}
fn default_chat_poll_interval() -> u64 {
    5
}

/// A named backend profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://hostelio.example/api/").
    pub api_url: String,

    /// Account kind used for login.
    #[serde(default)]
    pub role: Role,

    /// Login email.
    pub email: Option<String>,

    /// Backend user id paired with a plaintext token.
    pub user_id: Option<String>,

    /// Bearer token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// Override request timeout.
    pub timeout: Option<u64>,

    pub payment_poll_interval_secs: Option<u64>,
    pub payment_timeout_secs: Option<u64>,
    pub chat_poll_interval_secs: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "hostelio", "hostelio").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hostelio");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, still layering `HOSTELIO_*` env overrides.
///
/// Nested keys use a double underscore: `HOSTELIO_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HOSTELIO_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Session storage ─────────────────────────────────────────────────

/// Sessions kept in the system keyring under `hostelio` /
/// `<profile>/session`, serialized as JSON.
pub struct KeyringSessionStore {
    profile: String,
}

impl KeyringSessionStore {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, ConfigError> {
        Ok(keyring::Entry::new(
            KEYRING_SERVICE,
            &format!("{}/session", self.profile),
        )?)
    }

    fn load_inner(&self) -> Result<Option<Session>, ConfigError> {
        match self.entry()?.get_password() {
            Ok(json) => {
                let stored: StoredSession = serde_json::from_str(&json)?;
                Ok(Some(stored.into()))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_inner(&self, session: &Session) -> Result<(), ConfigError> {
        let json = serde_json::to_string(&StoredSession::from(session))?;
        self.entry()?.set_password(&json)?;
        Ok(())
    }

    fn clear_inner(&self) -> Result<(), ConfigError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStore for KeyringSessionStore {
    fn load(&self) -> Result<Option<Session>, CoreError> {
        Ok(self.load_inner()?)
    }

    fn save(&self, session: &Session) -> Result<(), CoreError> {
        Ok(self.save_inner(session)?)
    }

    fn clear(&self) -> Result<(), CoreError> {
        Ok(self.clear_inner()?)
    }
}

// ── Session resolution (without CLI flags) ──────────────────────────

/// Session built from a bare token (env var or plaintext profile field).
fn token_session(profile: &Profile, token: SecretString, user_id: Option<String>) -> Session {
    Session {
        role: profile.role,
        user_id: EntityId::from(user_id.unwrap_or_default()),
        uid: None,
        email: profile.email.clone(),
        name: None,
        access: token,
        refresh: None,
    }
}

/// Resolve the session for a profile.
///
/// 1. `HOSTELIO_TOKEN` (+ `HOSTELIO_USER_ID`)
/// 2. System keyring
/// 3. Plaintext `token` in the profile
pub fn resolve_session(profile: &Profile, profile_name: &str) -> Result<Session, ConfigError> {
    if let Ok(token) = std::env::var("HOSTELIO_TOKEN") {
        let user_id = std::env::var("HOSTELIO_USER_ID")
            .ok()
            .or_else(|| profile.user_id.clone());
        return Ok(token_session(profile, SecretString::from(token), user_id));
    }

    match KeyringSessionStore::new(profile_name).load_inner() {
        Ok(Some(session)) => return Ok(session),
        Ok(None) => {}
        Err(e) => debug!(error = %e, "keyring unavailable"),
    }

    if let Some(ref token) = profile.token {
        return Ok(token_session(
            profile,
            SecretString::from(token.clone()),
            profile.user_id.clone(),
        ));
    }

    Err(ConfigError::NoSession {
        profile: profile_name.into(),
    })
}

/// Whether a session's token is non-empty and paired with a user id.
pub fn session_is_usable(session: &Session) -> bool {
    !session.access.expose_secret().is_empty() && !session.user_id.to_string().is_empty()
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ClientConfig` from a profile and the global defaults.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let api_url: url::Url = profile
        .api_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", profile.api_url),
        })?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let secs = |v: Option<u64>, d: u64, field: &str| -> Result<Duration, ConfigError> {
        match v.unwrap_or(d) {
            0 => Err(ConfigError::Validation {
                field: field.into(),
                reason: "must be greater than zero".into(),
            }),
            n => Ok(Duration::from_secs(n)),
        }
    };

    let mut config = ClientConfig::new(api_url);
    config.tls = tls;
    config.timeout = secs(profile.timeout, defaults.timeout, "timeout")?;
    config.payment_poll = PollSettings::new(
        secs(
            profile.payment_poll_interval_secs,
            defaults.payment_poll_interval_secs,
            "payment_poll_interval_secs",
        )?,
        secs(
            profile.payment_timeout_secs,
            defaults.payment_timeout_secs,
            "payment_timeout_secs",
        )?,
    );
    config.chat_poll_interval = secs(
        profile.chat_poll_interval_secs,
        defaults.chat_poll_interval_secs,
        "chat_poll_interval_secs",
    )?;
    Ok(config)
}
