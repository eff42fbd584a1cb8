/*
 * Respack - Minecraft resource pack tools
 * Copyright (C) 2025 Josh Kropf <josh@slashdev.ca>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use anyhow::bail;
use console::style;
use std::path::Path;

use crate::ProgressHandler;
use respack::{find_packs, rewrite_pack, rewrite_packs, PackLocation, RewriteConfig, RewriteOutcome};
use super::prompt_confirm;

pub fn modify_packs(
    path: &Path,
    pack_format: u32,
    recurse: bool,
    keep_backup: bool,
    yes: bool
) -> anyhow::Result<()> {
    let config = RewriteConfig::new(path, pack_format)?
        .with_backup(keep_backup)
        .with_recurse(recurse);

    if config.recurse() {
        modify_tree(&config, yes)
    } else {
        modify_single(&config)
    }
}

fn modify_single(config: &RewriteConfig) -> anyhow::Result<()> {
    let Some(pack) = PackLocation::locate(config.path()) else {
        bail!("{} is not a resource pack zip or directory", config.path().display());
    };

    match rewrite_pack(&pack, config)? {
        RewriteOutcome::Patched { backup: Some(backup) } => {
            println!("{} {pack}", style("Modified").green());
            println!("  original saved as {}", backup.display());
        },
        RewriteOutcome::Patched { backup: None } => {
            println!("{} {pack}", style("Modified").green());
        },
        RewriteOutcome::Unchanged => {
            println!("{} {pack}", style("Unchanged").dim());
        },
        RewriteOutcome::Skipped => {
            println!("{} {pack} has no pack.mcmeta", style("Skipped").yellow());
        }
    }

    Ok(())
}

fn modify_tree(config: &RewriteConfig, yes: bool) -> anyhow::Result<()> {
    let packs = find_packs(config.path());
    let count = packs.len();

    if count == 0 {
        println!("No resource packs found in {}", config.path().display());
        return Ok(());
    }

    let prompt = format!(
        "Set pack_format to {} in {count} resource pack(s) below {}?",
        config.pack_format(),
        config.path().display()
    );

    if !yes && !prompt_confirm(prompt)? {
        return Ok(());
    }

    let mut progress = ProgressHandler::new();
    let report = rewrite_packs(&packs, config, &mut progress);

    for path in &report.patched {
        println!("{} {}", style("Modified").green(), path.display());
    }

    println!(
        "{} modified, {} unchanged, {} skipped, {} failed",
        report.patched.len(),
        report.unchanged,
        report.skipped,
        report.failed.len()
    );

    if !report.failed.is_empty() {
        bail!("{} of {} resource packs could not be modified", report.failed.len(), report.total());
    }

    Ok(())
}
