// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{kind_arg, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = kind_arg(sub)?;
            let name = sub.get_one::<String>("name").unwrap();
            let c = store::add_category(conn, owner, kind, name)?;
            println!("Added {} {} '{}'", kind, kind.category_noun(), c.name);
        }
        Some(("list", sub)) => {
            let kind = kind_arg(sub)?;
            let cats = store::list_categories(conn, owner, kind)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats.into_iter().map(|c| vec![c.name, c.id]).collect();
                println!("{}", pretty_table(&["Name", "ID"], data));
            }
        }
        Some(("rename", sub)) => {
            let kind = kind_arg(sub)?;
            let name = sub.get_one::<String>("name").unwrap();
            let to = sub.get_one::<String>("to").unwrap();
            let c = store::find_category_by_name(conn, owner, kind, name)?;
            store::rename_category(conn, owner, kind, &c.id, to)?;
            println!("Renamed {} {} '{}' to '{}'", kind, kind.category_noun(), c.name, to.trim());
        }
        Some(("rm", sub)) => {
            let kind = kind_arg(sub)?;
            let name = sub.get_one::<String>("name").unwrap();
            let c = store::find_category_by_name(conn, owner, kind, name)?;
            let removed = store::delete_category(conn, owner, kind, &c.id)?;
            println!(
                "Removed {} {} '{}' and {} {} entr{}",
                kind,
                kind.category_noun(),
                c.name,
                removed,
                kind,
                if removed == 1 { "y" } else { "ies" }
            );
        }
        _ => {}
    }
    Ok(())
}
