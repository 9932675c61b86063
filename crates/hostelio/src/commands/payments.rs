//! Payment order handlers.

use serde::Serialize;

use hostelio_core::{Marketplace, PaymentState};

use crate::cli::{GlobalOpts, PaymentsArgs, PaymentsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct StatusView {
    order_id: String,
    status: String,
    paid: bool,
}

pub async fn handle(
    market: &Marketplace,
    args: PaymentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PaymentsCommand::Status { order_id } => {
            let status = market.payment_status(&order_id).await?;
            let view = StatusView {
                order_id,
                paid: status.is_paid(),
                status: status.to_string(),
            };
            let out = output::render_single(
                &global.output,
                &view,
                |v| output::detail_lines(&[("Order", v.order_id.clone()), ("Status", v.status.clone())]),
                |v| v.status.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PaymentsCommand::Watch { order_id } => watch(market, order_id, global).await,
    }
}

async fn watch(market: &Marketplace, order_id: String, global: &GlobalOpts) -> Result<(), CliError> {
    let poller = market.payment_poller();
    let settings = poller.settings();
    let pb = util::spinner(format!("Waiting for order {order_id}"), global.quiet);
    let (paid_pb, failed_pb) = (pb.clone(), pb.clone());

    let handle = poller.spawn(
        order_id.clone(),
        move || paid_pb.finish_with_message("Payment confirmed"),
        move || failed_pb.abandon_with_message("Payment not confirmed"),
    );

    let state = tokio::select! {
        state = handle.wait() => state,
        _ = tokio::signal::ctrl_c() => PaymentState::Cancelled,
    };

    match state {
        PaymentState::Paid => {
            output::print_output("paid", global.quiet);
            Ok(())
        }
        PaymentState::Failed => Err(CliError::PaymentTimedOut {
            order_id,
            seconds: settings.timeout.as_secs(),
        }),
        PaymentState::Pending | PaymentState::Cancelled => {
            handle.stop().await;
            pb.abandon_with_message("Stopped waiting");
            Ok(())
        }
    }
}
