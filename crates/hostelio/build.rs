use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

// The command tree is clap-only, so it builds here without the rest of the crate.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir: PathBuf = std::env::var_os("OUT_DIR")
        .expect("cargo sets OUT_DIR for build scripts")
        .into();
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("create man page directory");

    write_man_pages(cli::Cli::command(), &man_dir);
}

/// One page per visible command: `hostelio.1`, `hostelio-bookings.1`,
/// `hostelio-bookings-receipt.1`, ...
fn write_man_pages(root: clap::Command, dir: &Path) {
    let mut pending = vec![root];
    while let Some(cmd) = pending.pop() {
        let page = cmd.get_name().to_owned();

        let mut rendered = Vec::new();
        clap_mangen::Man::new(cmd.clone())
            .render(&mut rendered)
            .unwrap_or_else(|e| panic!("render man page {page}: {e}"));
        let target = dir.join(format!("{page}.1"));
        fs::write(&target, rendered)
            .unwrap_or_else(|e| panic!("write {}: {e}", target.display()));

        pending.extend(
            cmd.get_subcommands()
                .filter(|sub| !sub.is_hide_set())
                .map(|sub| sub.clone().name(format!("{page}-{}", sub.get_name()))),
        );
    }
}
