//! CLI configuration: a thin wrapper around `hostelio_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --token, etc.).

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use hostelio_core::{ClientConfig, EntityId, Session, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use hostelio_config::{
    Config, KeyringSessionStore, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ClientConfig` from the config file, active profile, and flags.
///
/// CLI flag overrides take priority over profile values. Without a profile
/// the API URL must come from `--api-url` / `HOSTELIO_API_URL`.
pub fn resolve_client_config(
    cfg: &Config,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut profile = match cfg.profiles.get(profile_name) {
        Some(p) => p.clone(),
        None => {
            let url = global.api_url.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            Profile {
                api_url: url,
                ..Profile::default()
            }
        }
    };

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }

    let mut config = hostelio_config::profile_to_client_config(&profile, &cfg.defaults)?;

    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }

    match global.timeout {
        Some(0) => {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Some(secs) => config.timeout = Duration::from_secs(secs),
        None => {}
    }

    Ok(config)
}

/// Resolve the session to resume, if any.
///
/// 1. `--token` / `HOSTELIO_TOKEN` (+ `--user-id` / `HOSTELIO_USER_ID`)
/// 2. Stored session for the active profile (keyring, then plaintext)
pub fn resolve_session(cfg: &Config, profile_name: &str, global: &GlobalOpts) -> Option<Session> {
    let profile = cfg.profiles.get(profile_name);

    if let Some(ref token) = global.token {
        let user_id = global
            .user_id
            .clone()
            .or_else(|| profile.and_then(|p| p.user_id.clone()))
            .unwrap_or_default();
        return Some(Session {
            role: profile.map(|p| p.role).unwrap_or_default(),
            user_id: EntityId::from(user_id),
            uid: None,
            email: profile.and_then(|p| p.email.clone()),
            name: None,
            access: SecretString::from(token.clone()),
            refresh: None,
        });
    }

    let profile = profile?;
    match hostelio_config::resolve_session(profile, profile_name) {
        Ok(session) if hostelio_config::session_is_usable(&session) => Some(session),
        Ok(_) => {
            debug!(profile = profile_name, "stored session is incomplete, ignoring");
            None
        }
        Err(e) => {
            debug!(profile = profile_name, error = %e, "no stored session");
            None
        }
    }
}
