//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;

use hostelio_core::{Bhk, DateSelection, DurationPreset, HostelType, Role, RoomSharing};

use crate::cli::{BhkArg, DurationArg, HostelTypeArg, RoleArg, SharingArg, StayArgs};
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal on stdin there is nobody to ask, so `--yes` is required.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    confirm_on(message, yes_flag, std::io::stdin().is_terminal())
}

fn confirm_on(message: &str, yes_flag: bool, interactive: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !interactive {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parse a `YYYY-MM-DD` flag value.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected a date like 2024-01-31, got '{value}'"),
    })
}

pub fn parse_amount(field: &str, value: &str) -> Result<Decimal, CliError> {
    match value.trim().parse::<Decimal>() {
        Ok(d) if d >= Decimal::ZERO => Ok(d),
        _ => Err(CliError::Validation {
            field: field.into(),
            reason: format!("expected a non-negative amount, got '{value}'"),
        }),
    }
}

/// Build a date selection the way the booking form fills it in: a preset
/// fills the check-out date from check-in, an explicit `--end` wins.
pub fn selection_from(stay: &StayArgs) -> Result<DateSelection, CliError> {
    let start = stay
        .start
        .as_deref()
        .map(|s| parse_date("start", s))
        .transpose()?;
    let end = stay
        .end
        .as_deref()
        .map(|s| parse_date("end", s))
        .transpose()?;

    let mut selection = DateSelection::new();
    selection.set_start(start);
    selection.set_preset(stay.duration.map(preset));
    if end.is_some() {
        selection.set_end(end);
    }

    if selection.start().is_none() {
        return Err(CliError::Validation {
            field: "start".into(),
            reason: "a check-in date is required".into(),
        });
    }
    if selection.end().is_none() {
        return Err(CliError::Validation {
            field: "end".into(),
            reason: "give a check-out date or a --duration preset".into(),
        });
    }
    Ok(selection)
}

/// Spinner on stderr for long waits.
pub fn spinner(message: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

// ── Flag enum mapping ───────────────────────────────────────────────

pub fn preset(arg: DurationArg) -> DurationPreset {
    match arg {
        DurationArg::ShortTerm => DurationPreset::ShortTerm,
        DurationArg::LongTerm => DurationPreset::LongTerm,
    }
}

pub fn role(arg: RoleArg) -> Role {
    match arg {
        RoleArg::Seeker => Role::Seeker,
        RoleArg::Owner => Role::Owner,
        RoleArg::Admin => Role::Admin,
    }
}

pub fn sharing(arg: SharingArg) -> RoomSharing {
    match arg {
        SharingArg::Private => RoomSharing::Private,
        SharingArg::Shared => RoomSharing::Shared,
    }
}

pub fn hostel_type(arg: HostelTypeArg) -> HostelType {
    match arg {
        HostelTypeArg::Boys => HostelType::Boys,
        HostelTypeArg::Girls => HostelType::Girls,
    }
}

pub fn bhk(arg: BhkArg) -> Bhk {
    match arg {
        BhkArg::One => Bhk::One,
        BhkArg::Two => Bhk::Two,
        BhkArg::Three => Bhk::Three,
    }
}
