//! Profile edits for the signed-in account.

use chrono::Local;

use hostelio_core::{Marketplace, ProfileChanges, UserAccount};

use crate::cli::{GlobalOpts, ProfileArgs, ProfileCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(u: &UserAccount) -> String {
    output::detail_lines(&[
        ("ID", u.id.to_string()),
        ("Name", u.name.clone()),
        ("Email", u.email.clone()),
        ("Bio", output::opt(u.bio.as_deref())),
        ("Date of birth", output::date(u.date_of_birth)),
        ("UPI ID", output::opt(u.upi_id.as_deref())),
    ])
}

pub async fn handle(
    market: &Marketplace,
    args: ProfileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProfileCommand::Update { bio, dob, upi } => {
            let changes = ProfileChanges {
                bio,
                date_of_birth: dob.as_deref().map(|d| util::parse_date("dob", d)).transpose()?,
                upi_id: upi,
            };
            let updated = market
                .update_profile(&changes, Local::now().date_naive())
                .await?;
            if !global.quiet {
                eprintln!("Profile updated");
            }
            let out = output::render_single(&global.output, &updated, detail, |u| u.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
