//! Listing command handlers.

use tabled::Tabled;

use hostelio_core::{Apartment, EntityId, Marketplace, SearchFilter};

use crate::cli::{ApartmentsArgs, ApartmentsCommand, GlobalOpts, SearchArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ApartmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Rent/night")]
    rent: String,
    #[tabled(rename = "Stay")]
    duration: String,
    #[tabled(rename = "Sharing")]
    sharing: String,
    #[tabled(rename = "Beds free")]
    beds: String,
    #[tabled(rename = "Parking")]
    parking: String,
}

impl From<&Apartment> for ApartmentRow {
    fn from(a: &Apartment) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title.clone(),
            location: a.location.clone(),
            rent: output::amount(a.rent),
            duration: output::opt(a.duration),
            sharing: output::opt(a.room_sharing),
            beds: match (a.available_beds, a.total_beds) {
                (Some(free), Some(total)) => format!("{free}/{total}"),
                (Some(free), None) => free.to_string(),
                _ => "-".into(),
            },
            parking: if a.parking_available { "yes" } else { "no" }.into(),
        }
    }
}

fn detail(a: &Apartment) -> String {
    let mut lines = vec![
        ("ID", a.id.to_string()),
        ("Title", a.title.clone()),
        ("Location", a.location.clone()),
        ("Rent/night", output::amount(a.rent)),
        ("Stay", output::opt(a.duration)),
        ("Sharing", output::opt(a.room_sharing)),
        ("BHK", output::opt(a.bhk)),
        ("Hostel type", output::opt(a.hostel_type)),
        ("Parking", if a.parking_available { "yes" } else { "no" }.into()),
        ("Vacancy", if a.has_vacancy() { "yes" } else { "full" }.into()),
        ("Rating", output::opt(a.rating)),
        ("Owner", output::opt(a.owner_id.as_ref())),
    ];
    if let (Some(free), Some(total)) = (a.available_beds, a.total_beds) {
        lines.push(("Beds", format!("{free} free of {total}")));
    }
    if let Some(ref geo) = a.coordinates {
        lines.push(("Coordinates", format!("{}, {}", geo.latitude, geo.longitude)));
    }
    if let Some(ref desc) = a.description {
        lines.push(("Description", desc.clone()));
    }
    output::detail_lines(&lines)
}

fn filter_from(args: &SearchArgs) -> Result<SearchFilter, CliError> {
    Ok(SearchFilter {
        text: args.text.clone(),
        rent_min: args
            .rent_min
            .as_deref()
            .map(|v| util::parse_amount("rent-min", v))
            .transpose()?,
        rent_max: args
            .rent_max
            .as_deref()
            .map(|v| util::parse_amount("rent-max", v))
            .transpose()?,
        duration: args.duration.map(util::preset),
        room_sharing: args.sharing.map(util::sharing),
        parking: args.parking.then_some(true),
        hostel_type: args.hostel_type.map(util::hostel_type),
        bhk: args.bhk.map(util::bhk),
    })
}

fn print_list(apartments: &[Apartment], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        apartments,
        |a| ApartmentRow::from(a),
        |a| a.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    market: &Marketplace,
    args: ApartmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ApartmentsCommand::List(search) => {
            let filter = filter_from(&search)?;
            let all = if search.all {
                market.all_apartments().await?
            } else {
                market.approved_apartments().await?
            };
            let shown: Vec<Apartment> = filter.apply(&all).into_iter().cloned().collect();
            print_list(&shown, global);
            Ok(())
        }

        ApartmentsCommand::Get { id } => {
            let apartment = market.apartment(&EntityId::from(id)).await?;
            let out = output::render_single(&global.output, &apartment, detail, |a| {
                a.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ApartmentsCommand::Mine { owner } => {
            let owner = owner.map(EntityId::from);
            let apartments = market.owner_apartments(owner.as_ref()).await?;
            print_list(&apartments, global);
            Ok(())
        }
    }
}
