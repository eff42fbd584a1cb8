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

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Settings for a rewrite run
#[derive(Clone, Debug)]
pub struct RewriteConfig {
    /// Pack, or directory of packs when `recurse` is set
    path: PathBuf,

    /// Value written to `pack.pack_format`
    pack_format: u32,

    /// Keep `<name>.bak` next to rewritten archives
    keep_backup: bool,

    recurse: bool
}

impl RewriteConfig {
    pub fn new<P: Into<PathBuf>>(path: P, pack_format: u32) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Err(Error::InvalidConfig(format!("{} does not exist", path.display())));
        }

        if pack_format == 0 {
            return Err(Error::InvalidConfig("pack format must be a positive integer".to_string()));
        }

        Ok(RewriteConfig {
            path,
            pack_format,
            keep_backup: true,
            recurse: false
        })
    }

    pub fn with_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pack_format(&self) -> u32 {
        self.pack_format
    }

    pub fn keep_backup(&self) -> bool {
        self.keep_backup
    }

    pub fn recurse(&self) -> bool {
        self.recurse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RewriteConfig::new(dir.path(), 15).unwrap();

        assert_eq!(config.pack_format(), 15);
        assert!(config.keep_backup());
        assert!(!config.recurse());
    }

    #[test]
    fn rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = RewriteConfig::new(dir.path().join("nope.zip"), 15);

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_pack_format() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(RewriteConfig::new(dir.path(), 0), Err(Error::InvalidConfig(_))));
    }
}
