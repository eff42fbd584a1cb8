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

mod config;
mod encoding;
mod fs;
mod json;
mod pending_edit;
mod resource_pack;
mod rewriter;
mod zip;

use std::{io, path::PathBuf};

pub use {
    config::RewriteConfig,
    encoding::{decode, detect_encoding, encode, escape_unencodable, TextEncoding},
    fs::find_packs,
    json::{parse_permissive, PackDescriptor},
    pending_edit::PendingEdit,
    resource_pack::{PackLocation, DESCRIPTOR_FILE},
    rewriter::{inspect_pack, rewrite_pack, rewrite_packs, rewrite_tree, BatchReport, PackInfo, RewriteOutcome}
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("File at the path {entry} in {} has not been read: {reason}", pack.display())]
    FileNotRead { pack: PathBuf, entry: String, reason: String },

    #[error("Unable to parse {entry} in {}: {source}", pack.display())]
    Parse {
        pack: PathBuf,
        entry: String,
        #[source]
        source: serde_json::Error
    },

    #[error("Unable to encode {entry} in {} as {encoding}", pack.display())]
    Encode { pack: PathBuf, entry: String, encoding: String },

    #[error("Refusing to write invalid edit for '{entry}': {reason}")]
    InvalidPendingEdit { entry: String, reason: &'static str },

    #[error("Backup {} already exists, move it out of the way first", .0.display())]
    BackupExists(PathBuf),

    #[error("Failed to replace {} (original kept at {}): {source}", pack.display(), backup.display())]
    Commit {
        pack: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Zip(#[from] ::zip::result::ZipError)
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait Progress {
    fn begin(&mut self, message: &'static str, total: usize);
    fn end(&mut self);
    fn advance(&mut self, current: usize);
}
