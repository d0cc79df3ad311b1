// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, OWNER_KEY, non_empty};
use crate::utils::{maybe_print_json, set_setting};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), cfg)? {
                println!("database: {}", cfg.db_path.display());
                println!("owner:    {}", cfg.owner);
            }
        }
        Some(("set-owner", sub)) => {
            let owner = non_empty(sub.get_one::<String>("name").cloned())
                .ok_or_else(|| anyhow!("Owner must not be empty"))?;
            set_setting(conn, OWNER_KEY, &owner)?;
            println!("Default owner set to '{}'", owner);
        }
        _ => {}
    }
    Ok(())
}
