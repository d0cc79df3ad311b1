// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::{cli, commands, config, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    if matches.subcommand().is_none() {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    }

    let (cfg, mut conn) = config::load(&matches)?;
    let owner = cfg.owner.as_str();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("category", sub)) => commands::categories::handle(&mut conn, owner, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, owner, sub)?,
        Some(("receivable", sub)) => commands::receivables::handle(&conn, owner, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, owner, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, owner, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, owner)?,
        Some(("config", sub)) => commands::config::handle(&conn, &cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
