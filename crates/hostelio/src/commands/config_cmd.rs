//! Config subcommand handlers.

use dialoguer::{Input, Select};

use hostelio_core::Role;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const DEFAULT_API_URL: &str = "http://localhost:8000/api/";
const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with secrets masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some(REDACTED.into());
        }
    }
    cfg
}

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let d = &cfg.defaults;
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", d.output);
    let _ = writeln!(out, "color = \"{}\"", d.color);
    let _ = writeln!(out, "timeout = {}", d.timeout);
    let _ = writeln!(out, "payment_poll_interval_secs = {}", d.payment_poll_interval_secs);
    let _ = writeln!(out, "payment_timeout_secs = {}", d.payment_timeout_secs);
    let _ = writeln!(out, "chat_poll_interval_secs = {}", d.chat_poll_interval_secs);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "api_url = \"{}\"", p.api_url);
        let _ = writeln!(out, "role = \"{}\"", p.role);
        if let Some(ref email) = p.email {
            let _ = writeln!(out, "email = \"{email}\"");
        }
        if let Some(ref id) = p.user_id {
            let _ = writeln!(out, "user_id = \"{id}\"");
        }
        if p.token.is_some() {
            let _ = writeln!(out, "token = \"{REDACTED}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        for (key, value) in [
            ("payment_poll_interval_secs", p.payment_poll_interval_secs),
            ("payment_timeout_secs", p.payment_timeout_secs),
            ("chat_poll_interval_secs", p.chat_poll_interval_secs),
        ] {
            if let Some(v) = value {
                let _ = writeln!(out, "{key} = {v}");
            }
        }
    }

    out
}

fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: key.into(),
        reason: format!("must be {expected}"),
    })
}

fn positive_secs(key: &str, value: &str) -> Result<u64, CliError> {
    match parse_value::<u64>(key, value, "a number of seconds")? {
        0 => Err(CliError::Validation {
            field: key.into(),
            reason: "must be greater than zero".into(),
        }),
        n => Ok(n),
    }
}

/// Apply one `config set` assignment to a profile.
fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "api_url" | "api-url" => {
            parse_value::<url::Url>(key, &value, "an absolute URL")?;
            profile.api_url = value;
        }
        "role" => {
            profile.role = value.parse::<Role>().map_err(|reason| CliError::Validation {
                field: "role".into(),
                reason,
            })?;
        }
        "email" => profile.email = Some(value),
        "user_id" | "user-id" => profile.user_id = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => profile.insecure = Some(parse_value(key, &value, "'true' or 'false'")?),
        "timeout" => profile.timeout = Some(positive_secs(key, &value)?),
        "payment_poll_interval_secs" => {
            profile.payment_poll_interval_secs = Some(positive_secs(key, &value)?);
        }
        "payment_timeout_secs" => {
            profile.payment_timeout_secs = Some(positive_secs(key, &value)?);
        }
        "chat_poll_interval_secs" => {
            profile.chat_poll_interval_secs = Some(positive_secs(key, &value)?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: api_url, role, email, user_id, \
                     ca_cert, insecure, timeout, payment_poll_interval_secs, \
                     payment_timeout_secs, chat_poll_interval_secs"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("Hostelio CLI configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("Marketplace API URL")
                .default(DEFAULT_API_URL.into())
                .interact_text()
                .map_err(prompt_err)?;
            parse_value::<url::Url>("api_url", &api_url, "an absolute URL")?;

            let roles = [Role::Seeker, Role::Owner, Role::Admin];
            let role_labels = ["Seeker (find a stay)", "Owner (list properties)", "Admin"];
            let role = Select::new()
                .with_prompt("Account type")
                .items(&role_labels)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let email: String = Input::new()
                .with_prompt("Email (optional)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let profile = Profile {
                api_url,
                role: roles.get(role).copied().unwrap_or_default(),
                email: (!email.is_empty()).then_some(email),
                ..Profile::default()
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Next: hostelio login");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(|| Profile {
                    api_url: DEFAULT_API_URL.into(),
                    ..Profile::default()
                });
            set_profile_key(profile, &key, value)?;
            save_config(&cfg)?;
            eprintln!("Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: hostelio config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
                available.sort();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("Default profile set to '{name}'");
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_updates_poll_settings() {
        let mut p = Profile::default();
        set_profile_key(&mut p, "payment_timeout_secs", "240".into()).unwrap();
        set_profile_key(&mut p, "role", "owner".into()).unwrap();
        assert_eq!(p.payment_timeout_secs, Some(240));
        assert_eq!(p.role, Role::Owner);
    }

    #[test]
    fn set_rejects_zero_intervals_and_unknown_keys() {
        let mut p = Profile::default();
        assert!(set_profile_key(&mut p, "chat_poll_interval_secs", "0".into()).is_err());
        assert!(set_profile_key(&mut p, "api_url", "not a url".into()).is_err());
        assert!(set_profile_key(&mut p, "colour", "red".into()).is_err());
    }

    #[test]
    fn show_masks_tokens() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                api_url: DEFAULT_API_URL.into(),
                token: Some("secret-token".into()),
                ..Profile::default()
            },
        );
        let text = format_config_redacted(&cfg);
        assert!(text.contains("token = \"****\""));
        assert!(!text.contains("secret-token"));
        let json = serde_json::to_string(&redacted(&cfg)).unwrap();
        assert!(!json.contains("secret-token"));
    }
}
