//! Quoting and booking a stay.
//!
//! `book` creates the booking, prints the gateway link, then follows the
//! order until it is paid, times out, or the user interrupts.

use serde::Serialize;
use tracing::debug;

use hostelio_core::{Checkout, EntityId, Marketplace, PaymentState, PaymentTracker, Quote};

use crate::cli::{BookArgs, GlobalOpts, StayArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct QuoteView {
    apartment_id: String,
    title: String,
    #[serde(flatten)]
    quote: Quote,
}

fn quote_detail(v: &QuoteView) -> String {
    output::detail_lines(&[
        ("Listing", format!("{} ({})", v.title, v.apartment_id)),
        ("Check-in", output::date(v.quote.start)),
        ("Check-out", output::date(v.quote.end)),
        ("Nights", v.quote.nights.to_string()),
        ("Rent/night", output::amount(v.quote.rent)),
        ("Total", output::amount(v.quote.amount)),
    ])
}

fn checkout_detail(c: &Checkout) -> String {
    output::detail_lines(&[
        ("Booking", c.booking_id.to_string()),
        ("Order", c.order.razorpay_order_id.clone()),
        ("Nights", c.quote.nights.to_string()),
        ("Total", output::amount(c.order.amount)),
        ("Pay at", c.order.payment_url.to_string()),
    ])
}

pub async fn quote(
    market: &Marketplace,
    args: &StayArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let selection = util::selection_from(args)?;
    let apartment = market.apartment(&EntityId::from(args.apartment.clone())).await?;
    let quote = selection.quote(apartment.rent);
    if quote.nights == 0 {
        return Err(CliError::Validation {
            field: "end".into(),
            reason: "check-out must not be before check-in".into(),
        });
    }

    let view = QuoteView {
        apartment_id: apartment.id.to_string(),
        title: apartment.title,
        quote,
    };
    let out = output::render_single(&global.output, &view, quote_detail, |v| {
        v.quote.amount.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn book(market: &Marketplace, args: BookArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let selection = util::selection_from(&args.stay)?;
    let apartment_id = EntityId::from(args.stay.apartment);

    let checkout = market.checkout(&apartment_id, selection).await?;
    let out = output::render_single(&global.output, &checkout, checkout_detail, |c| {
        c.order.payment_url.to_string()
    });
    output::print_output(&out, global.quiet);

    if args.no_wait {
        return Ok(());
    }

    let order_id = checkout.order.razorpay_order_id.clone();
    let timeout_secs = market.config().payment_poll.timeout.as_secs();
    let pb = util::spinner("Waiting for payment confirmation", global.quiet);
    let (paid_pb, failed_pb) = (pb.clone(), pb.clone());

    let mut tracker = PaymentTracker::new(market.payment_poller());
    tracker
        .track(
            checkout.order,
            move || paid_pb.finish_with_message("Payment confirmed"),
            move || failed_pb.abandon_with_message("Payment not confirmed"),
        )
        .await;

    let outcome = tokio::select! {
        state = tracker.wait() => state,
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(PaymentState::Paid) => {
            if !global.quiet {
                eprintln!("Booking {} is paid", checkout.booking_id);
            }
            Ok(())
        }
        Some(PaymentState::Failed) => Err(CliError::PaymentTimedOut {
            order_id,
            seconds: timeout_secs,
        }),
        Some(PaymentState::Pending | PaymentState::Cancelled) | None => {
            debug!(%order_id, "stopped following payment");
            tracker.clear().await;
            pb.abandon_with_message("Stopped waiting");
            if !global.quiet {
                eprintln!("Check the payment later with: hostelio payments status {order_id}");
            }
            Ok(())
        }
    }
}
