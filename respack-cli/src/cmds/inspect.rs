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

use respack::{inspect_pack as read_pack_info, PackLocation};

pub fn inspect_pack(path: &Path) -> anyhow::Result<()> {
    let Some(pack) = PackLocation::locate(path) else {
        bail!("{} is not a resource pack zip or directory", path.display());
    };

    let Some(info) = read_pack_info(&pack)? else {
        println!("{pack} has no pack.mcmeta");
        return Ok(());
    };

    let pack_format = info.descriptor.pack_format()
        .map_or_else(|| style("missing".to_string()).red(), |f| style(f.to_string()).bold());

    println!("{}", style(&pack).bold());
    println!("  pack_format: {pack_format}");
    println!("  description: {}", info.descriptor.description().unwrap_or("-"));
    println!("     encoding: {}", info.encoding);

    if !info.descriptor.is_valid() {
        println!("{}", style("pack.mcmeta is missing required fields").yellow());
    }

    Ok(())
}
