//! Command dispatch: bridges CLI args -> marketplace calls -> output formatting.

pub mod admin;
pub mod apartments;
pub mod bookings;
pub mod checkout;
pub mod config_cmd;
pub mod messages;
pub mod owner;
pub mod payments;
pub mod profile;
pub mod session;
pub mod util;
pub mod wishlist;

use hostelio_core::Marketplace;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    market: &Marketplace,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Signup(args) => session::signup(market, args, global).await,
        Command::Login(args) => session::login(market, args, global).await,
        Command::Logout => session::logout(market, global),
        Command::Whoami => session::whoami(market, global).await,
        Command::Profile(args) => profile::handle(market, args, global).await,
        Command::Apartments(args) => apartments::handle(market, args, global).await,
        Command::Quote(args) => checkout::quote(market, &args, global).await,
        Command::Book(args) => checkout::book(market, args, global).await,
        Command::Payments(args) => payments::handle(market, args, global).await,
        Command::Bookings(args) => bookings::handle(market, args, global).await,
        Command::Messages(args) => messages::handle(market, args, global).await,
        Command::Wishlist(args) => wishlist::handle(market, args, global).await,
        Command::Owner(args) => owner::handle(market, args, global).await,
        Command::Admin(args) => admin::handle(market, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
