//! Listing approval and user administration.

use tabled::Tabled;

use hostelio_core::{Apartment, EntityId, Marketplace, UserAccount};

use crate::cli::{AdminArgs, AdminCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PendingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Rent/night")]
    rent: String,
}

impl From<&Apartment> for PendingRow {
    fn from(a: &Apartment) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title.clone(),
            location: a.location.clone(),
            owner: output::opt(a.owner_id.as_ref()),
            rent: output::amount(a.rent),
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&UserAccount> for UserRow {
    fn from(u: &UserAccount) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            phone: output::opt(u.phone.as_deref()),
            role: output::opt(u.role),
            active: if u.active { "yes" } else { "no" }.into(),
        }
    }
}

pub async fn handle(
    market: &Marketplace,
    args: AdminArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AdminCommand::Pending => {
            let pending = market.pending_apartments().await?;
            let out = output::render_list(
                &global.output,
                &pending,
                |a| PendingRow::from(a),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminCommand::Approve { apartment } => {
            if !util::confirm(&format!("Approve listing '{apartment}'?"), global.yes)? {
                return Ok(());
            }
            let approval = market
                .approve_apartment(&EntityId::from(apartment.as_str()))
                .await?;
            let out = output::render_single(
                &global.output,
                &approval,
                |a| {
                    output::detail_lines(&[
                        ("Listing", a.apartment_id.to_string()),
                        ("Status", a.status.to_string()),
                        ("Comments", output::opt(a.comments.as_deref())),
                    ])
                },
                |a| a.status.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminCommand::Users => {
            let users = market.users().await?;
            let out = output::render_list(
                &global.output,
                &users,
                |u| UserRow::from(u),
                |u| u.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
