// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Which database to open and whose data to show.
//!
//! Precedence, highest first: command-line flag, environment variable,
//! stored setting (owner only), built-in default.

use std::path::PathBuf;

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

use crate::db;
use crate::utils::get_setting;

pub const DB_ENV: &str = "FINTRACK_DB";
pub const OWNER_ENV: &str = "FINTRACK_OWNER";
pub const OWNER_KEY: &str = "owner";
pub const DEFAULT_OWNER: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub db_path: PathBuf,
    pub owner: String,
}

pub(crate) fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Database path from `--db`, then `FINTRACK_DB`, then the platform data dir.
pub fn resolve_db_path(flag: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = non_empty(flag.map(str::to_string)) {
        return Ok(PathBuf::from(p));
    }
    if let Some(p) = non_empty(std::env::var(DB_ENV).ok()) {
        return Ok(PathBuf::from(p));
    }
    db::default_db_path()
}

/// Owner from `--owner`, then `FINTRACK_OWNER`, then the stored setting,
/// then `default`.
pub fn resolve_owner(conn: &Connection, flag: Option<&str>) -> Result<String> {
    if let Some(o) = non_empty(flag.map(str::to_string)) {
        return Ok(o);
    }
    if let Some(o) = non_empty(std::env::var(OWNER_ENV).ok()) {
        return Ok(o);
    }
    if let Some(o) = non_empty(get_setting(conn, OWNER_KEY)?) {
        return Ok(o);
    }
    Ok(DEFAULT_OWNER.to_string())
}

/// Resolves the database path and opens it, then resolves the owner
/// against that database.
pub fn load(m: &clap::ArgMatches) -> Result<(Config, Connection)> {
    let db_path = resolve_db_path(m.get_one::<String>("db").map(String::as_str))?;
    let conn = db::open_or_init(&db_path)?;
    let owner = resolve_owner(&conn, m.get_one::<String>("owner").map(String::as_str))?;
    debug!(db = %db_path.display(), owner = %owner, "configuration resolved");
    Ok((Config { db_path, owner }, conn))
}
