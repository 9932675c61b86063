//! Booking history, detail, and confirmation handlers.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use hostelio_core::{Booking, BookingConfirmation, EntityId, Marketplace};

use crate::cli::{BookingsArgs, BookingsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Views ───────────────────────────────────────────────────────────

/// A booking with its payment deadline resolved against the clock.
#[derive(Serialize)]
struct BookingView {
    #[serde(flatten)]
    booking: Booking,
    payment_deadline: DateTime<Utc>,
    days_remaining: i64,
}

impl BookingView {
    fn new(booking: Booking, now: DateTime<Utc>) -> Self {
        let expiry = booking.expiry();
        Self {
            payment_deadline: expiry.deadline,
            days_remaining: expiry.days_remaining(now),
            booking,
        }
    }

    fn listing(&self) -> String {
        self.booking
            .apartment_title
            .clone()
            .or_else(|| self.booking.apartment_id.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| "-".into())
    }
}

#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Listing")]
    listing: String,
    #[tabled(rename = "Check-in")]
    check_in: String,
    #[tabled(rename = "Check-out")]
    check_out: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Pay within")]
    pay_within: String,
}

impl From<&BookingView> for BookingRow {
    fn from(v: &BookingView) -> Self {
        let b = &v.booking;
        Self {
            id: b.id.to_string(),
            listing: v.listing(),
            check_in: output::date(Some(b.start_date.date_naive())),
            check_out: output::date(b.end_date.map(|d| d.date_naive())),
            status: b.status.to_string(),
            amount: output::opt_amount(b.amount),
            pay_within: output::days_left(v.days_remaining),
        }
    }
}

fn detail(v: &BookingView, color: bool) -> String {
    let b = &v.booking;
    let mut lines = vec![
        ("ID", b.id.to_string()),
        ("Listing", v.listing()),
        ("Status", output::paint_status(b.status, color)),
        ("Check-in", output::timestamp(b.start_date)),
        ("Check-out", b.end_date.map_or_else(|| "-".into(), output::timestamp)),
        ("Amount", output::opt_amount(b.amount)),
        ("Payment ID", output::opt(b.payment_id.as_deref())),
        ("Method", output::opt(b.payment_method)),
        ("Pay by", output::timestamp(v.payment_deadline)),
        ("Pay within", output::days_left(v.days_remaining)),
    ];
    if let Some(ref guest) = b.guest {
        lines.push(("Guest", format!("{} <{}>", guest.name, guest.email)));
    }
    output::detail_lines(&lines)
}

fn print_list(bookings: Vec<Booking>, global: &GlobalOpts) {
    let now = Utc::now();
    let views: Vec<BookingView> = bookings
        .into_iter()
        .map(|b| BookingView::new(b, now))
        .collect();
    let out = output::render_list(
        &global.output,
        &views,
        |v| BookingRow::from(v),
        |v| v.booking.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

fn write_confirmation(
    confirmation: &BookingConfirmation,
    dir: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    let dir = match dir {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(confirmation.file_name());
    std::fs::write(&path, confirmation.to_text())?;
    Ok(path)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    market: &Marketplace,
    args: BookingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BookingsCommand::List => {
            print_list(market.booking_history().await?, global);
            Ok(())
        }

        BookingsCommand::ForApartment { apartment } => {
            let bookings = market
                .apartment_bookings(&EntityId::from(apartment))
                .await?;
            print_list(bookings, global);
            Ok(())
        }

        BookingsCommand::Show { id } => {
            let booking = market.booking(&EntityId::from(id)).await?;
            let view = BookingView::new(booking, Utc::now());
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &view,
                |v| detail(v, color),
                |v| v.booking.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookingsCommand::Receipt { id, dir, stdout } => {
            let booking = market.booking(&EntityId::from(id)).await?;
            let confirmation = BookingConfirmation::from_booking(&booking);
            if stdout {
                output::print_output(&confirmation.to_text(), global.quiet);
                return Ok(());
            }
            let path = write_confirmation(&confirmation, dir)?;
            if !global.quiet {
                eprintln!("Saved {}", path.display());
            }
            Ok(())
        }
    }
}
