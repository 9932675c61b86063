//! Sign-in, sign-out, and identity.

use std::io::BufRead;

use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, warn};

use hostelio_core::{Marketplace, Role, Session, SessionStore, SignupForm};

use crate::cli::{GlobalOpts, LoginArgs, SignupArgs};
use crate::config::{self, KeyringSessionStore};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct SessionView {
    role: Role,
    user_id: String,
    email: Option<String>,
    name: Option<String>,
    phone: Option<String>,
}

impl From<&Session> for SessionView {
    fn from(s: &Session) -> Self {
        Self {
            role: s.role,
            user_id: s.user_id.to_string(),
            email: s.email.clone(),
            name: s.name.clone(),
            phone: None,
        }
    }
}

fn detail(v: &SessionView) -> String {
    output::detail_lines(&[
        ("Role", v.role.to_string()),
        ("User ID", v.user_id.clone()),
        ("Email", output::opt(v.email.as_deref())),
        ("Name", output::opt(v.name.as_deref())),
        ("Phone", output::opt(v.phone.as_deref())),
    ])
}

fn prompt_err(e: dialoguer::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

fn read_password(from_stdin: bool) -> Result<SecretString, CliError> {
    prompt_password(from_stdin, "Password: ")
}

fn prompt_password(from_stdin: bool, prompt: &str) -> Result<SecretString, CliError> {
    let raw = if from_stdin {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        line.trim_end_matches(['\r', '\n']).to_owned()
    } else {
        rpassword::prompt_password(prompt)?
    };
    if raw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(SecretString::from(raw))
}

/// Register a new account. Signing in stays a separate step.
pub async fn signup(
    market: &Marketplace,
    args: SignupArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = read_password(args.password_stdin)?;
    // Piped passwords are not typed, so there is nothing to repeat.
    let confirmation = if args.password_stdin {
        password.clone()
    } else {
        prompt_password(false, "Repeat password: ")?
    };
    let role = util::role(args.role);
    let form = SignupForm {
        email: args.email,
        phone: args.phone,
        name: args.name,
        role,
        password,
        confirmation,
    };

    let user_id = market.signup(&form).await?;
    if !global.quiet {
        let email = form.email.trim();
        eprintln!("Account created for {email} ({role}). Run `hostelio login -e {email}` to sign in.");
    }
    if let Some(id) = user_id {
        output::print_output(&id.to_string(), global.quiet);
    }
    Ok(())
}

pub async fn login(
    market: &Marketplace,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    let email = match args.email.or_else(|| profile.and_then(|p| p.email.clone())) {
        Some(e) => e,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(prompt_err)?,
    };
    let role = args
        .role
        .map(util::role)
        .or_else(|| profile.map(|p| p.role))
        .unwrap_or_default();
    let password = read_password(args.password_stdin)?;

    let session = market.login(role, &email, &password).await?;

    match KeyringSessionStore::new(&profile_name).save(&session) {
        Ok(()) => debug!(profile = %profile_name, "session stored in keyring"),
        Err(e) => {
            warn!(error = %e, "could not store the session in the system keyring");
            if !global.quiet {
                eprintln!(
                    "Session not saved. Later commands can pass it with --token / HOSTELIO_TOKEN."
                );
            }
        }
    }

    if !global.quiet {
        eprintln!("Logged in as {email} ({role})");
    }
    let view = SessionView::from(session.as_ref());
    let out = output::render_single(&global.output, &view, detail, |v| v.user_id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn logout(market: &Marketplace, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    KeyringSessionStore::new(&profile_name).clear()?;
    market.logout();
    if !global.quiet {
        eprintln!("Logged out of profile '{profile_name}'");
    }
    Ok(())
}

pub async fn whoami(market: &Marketplace, global: &GlobalOpts) -> Result<(), CliError> {
    let session = market.require_session()?;
    let mut view = SessionView::from(session.as_ref());

    if session.role != Role::Admin {
        match market.profile().await {
            Ok(account) => {
                view.name = Some(account.name);
                view.email = Some(account.email);
                view.phone = account.phone;
            }
            Err(e) => debug!(error = %e, "profile lookup failed, showing stored session"),
        }
    }

    let out = output::render_single(&global.output, &view, detail, |v| v.user_id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
