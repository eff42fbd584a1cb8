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

use std::{fmt, path::{Path, PathBuf}};

/// Name of the pack metadata file, at the root of a pack directory or zip
pub const DESCRIPTOR_FILE: &str = "pack.mcmeta";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PackLocation {
    /// Directory with a `pack.mcmeta` file directly inside it
    Directory(PathBuf),

    /// Zip file, may or may not contain a `pack.mcmeta` entry
    Archive(PathBuf)
}

impl PackLocation {
    /// Returns `None` when `path` can't be a resource pack
    pub fn locate(path: &Path) -> Option<Self> {
        if path.is_dir() {
            path.join(DESCRIPTOR_FILE)
                .is_file()
                .then(|| PackLocation::Directory(path.to_owned()))
        } else if path.is_file() && is_zip_file_name(path) {
            Some(PackLocation::Archive(path.to_owned()))
        } else {
            None
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path
        }
    }
}

impl fmt::Display for PackLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

fn is_zip_file_name(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("zip"))
}
