// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - read or update a setting in the config file

use crate::config::{self, Config};
use anyhow::Result;
use std::path::Path;

/// Get `key`, or set it to `value` and write the config file
pub fn run(config_path: Option<&Path>, current: &Config, key: &str, value: Option<String>) -> Result<()> {
    match value {
        Some(v) => {
            let path = config_path.map_or_else(config::default_path, Path::to_path_buf);
            // environment overrides stay out of the file
            let mut updated = config::load_file(Some(&path))?;
            updated.set(key, &v)?;
            updated.save(&path)?;
            tracing::info!("Setting {} = {}", key, v);
            println!("{} = {}", key, v);
        }
        None => {
            println!("{}", current.get(key)?);
        }
    }
    Ok(())
}
