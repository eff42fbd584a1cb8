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

pub use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print more detail about each pack, repeat for debug output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set pack_format in pack.mcmeta of a resource pack zip or directory
    Modify {
        /// Resource pack, or a directory of packs with --recurse
        path: PathBuf,

        /// New value for pack.pack_format
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        pack_format: u32,

        /// Find and modify every pack below PATH
        #[arg(short, long)]
        recurse: bool,

        /// Delete the <name>.bak copy of each modified zip
        #[arg(long)]
        no_backup: bool,

        /// Don't ask before modifying multiple packs
        #[arg(short, long)]
        yes: bool
    },

    /// Print the pack.mcmeta details of a resource pack
    Inspect {
        /// Resource pack zip or directory
        path: PathBuf
    }
}
