//! Owner dashboard handlers.

use tabled::Tabled;

use hostelio_core::{Apartment, Booking, Marketplace, OwnerDashboard, UserAccount};

use crate::cli::{GlobalOpts, OwnerArgs, OwnerCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ListingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Rent/night")]
    rent: String,
    #[tabled(rename = "Beds free")]
    beds: String,
}

impl From<&Apartment> for ListingRow {
    fn from(a: &Apartment) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title.clone(),
            location: a.location.clone(),
            rent: output::amount(a.rent),
            beds: output::opt(a.available_beds),
        }
    }
}

#[derive(Tabled)]
struct ReceivedRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tenant")]
    tenant: String,
    #[tabled(rename = "Listing")]
    listing: String,
    #[tabled(rename = "Check-in")]
    check_in: String,
    #[tabled(rename = "Check-out")]
    check_out: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl ReceivedRow {
    fn new(b: &Booking, tenant: Option<String>, listing: Option<&str>) -> Self {
        Self {
            id: b.id.to_string(),
            tenant: tenant.unwrap_or_else(|| "-".into()),
            listing: listing.map_or_else(|| output::opt(b.apartment_id.as_ref()), String::from),
            check_in: output::date(Some(b.start_date.date_naive())),
            check_out: output::date(b.end_date.map(|d| d.date_naive())),
            status: b.status.to_string(),
        }
    }
}

#[derive(Tabled)]
struct TenantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

impl From<&UserAccount> for TenantRow {
    fn from(u: &UserAccount) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            phone: output::opt(u.phone.as_deref()),
        }
    }
}

fn dashboard_detail(d: &OwnerDashboard) -> String {
    let summary = output::detail_lines(&[
        ("Listed", d.listed.len().to_string()),
        ("Awaiting approval", d.pending.len().to_string()),
        ("Bookings received", d.bookings.len().to_string()),
        ("Tenants", d.tenants.len().to_string()),
    ]);
    if d.bookings.is_empty() {
        return summary;
    }
    let rows: Vec<ReceivedRow> = d
        .bookings
        .iter()
        .map(|b| ReceivedRow::new(b, d.tenant_name(b), d.listing_title(b)))
        .collect();
    format!("{summary}\n\n{}", output::render_table(&rows))
}

pub async fn handle(
    market: &Marketplace,
    args: OwnerArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        OwnerCommand::Dashboard => {
            let dashboard = market.owner_dashboard().await?;
            let out = output::render_single(&global.output, &dashboard, dashboard_detail, |d| {
                d.bookings
                    .iter()
                    .map(|b| b.id.to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OwnerCommand::Bookings => {
            let bookings = market.received_bookings().await?;
            let out = output::render_list(
                &global.output,
                &bookings,
                |b| ReceivedRow::new(b, b.user_id.as_ref().map(ToString::to_string), None),
                |b| b.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OwnerCommand::Pending => {
            let pending = market.owner_pending_apartments().await?;
            let out = output::render_list(
                &global.output,
                &pending,
                |a| ListingRow::from(a),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OwnerCommand::Tenants => {
            let tenants = market.tenants().await?;
            let out = output::render_list(
                &global.output,
                &tenants,
                |u| TenantRow::from(u),
                |u| u.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
