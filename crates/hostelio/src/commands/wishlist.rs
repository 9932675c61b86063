//! Wishlist handlers.

use tabled::Tabled;

use hostelio_core::{EntityId, Marketplace, WishlistItem};

use crate::cli::{GlobalOpts, WishlistArgs, WishlistCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct WishlistRow {
    #[tabled(rename = "Listing")]
    apartment: String,
    #[tabled(rename = "Saved")]
    added: String,
}

impl From<&WishlistItem> for WishlistRow {
    fn from(w: &WishlistItem) -> Self {
        Self {
            apartment: w.apartment_id.to_string(),
            added: w.added_at.map_or_else(|| "-".into(), output::timestamp),
        }
    }
}

pub async fn handle(
    market: &Marketplace,
    args: WishlistArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        WishlistCommand::List => {
            let items = market.wishlist().await?;
            let out = output::render_list(
                &global.output,
                &items,
                |w| WishlistRow::from(w),
                |w| w.apartment_id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WishlistCommand::Add { apartment } => {
            market.add_to_wishlist(&EntityId::from(apartment.as_str())).await?;
            if !global.quiet {
                eprintln!("Saved {apartment}");
            }
            Ok(())
        }

        WishlistCommand::Remove { apartment } => {
            market
                .remove_from_wishlist(&EntityId::from(apartment.as_str()))
                .await?;
            if !global.quiet {
                eprintln!("Removed {apartment}");
            }
            Ok(())
        }
    }
}
