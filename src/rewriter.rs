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

use std::{
    fs::{self, File}, io::{BufReader, BufWriter, Read, Seek},
    path::{Path, PathBuf}
};
use tempfile::NamedTempFile;
use zip::ZipArchive;

use crate::{
    config::RewriteConfig,
    encoding::{self, TextEncoding},
    fs::find_packs,
    json::{parse_permissive, set_pack_format, to_pretty_json, PackDescriptor},
    pending_edit::PendingEdit,
    resource_pack::{PackLocation, DESCRIPTOR_FILE},
    zip::{copy_with_replacement, read_entry},
    Error, Progress, Result
};

#[derive(Debug, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// No `pack.mcmeta` to rewrite
    Skipped,

    /// Already at the target pack format, or the descriptor has none
    Unchanged,

    /// Descriptor was rewritten, `backup` is the renamed original archive
    Patched { backup: Option<PathBuf> }
}

/// Summary of a recursive rewrite
#[derive(Debug, Default)]
pub struct BatchReport {
    pub patched: Vec<PathBuf>,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: Vec<(PathBuf, Error)>
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.patched.len() + self.unchanged + self.skipped + self.failed.len()
    }
}

/// Descriptor of a pack as read from disk
#[derive(Debug)]
pub struct PackInfo {
    pub descriptor: PackDescriptor,
    pub encoding: TextEncoding
}

/// Set `pack.pack_format` of a single pack to the configured value
pub fn rewrite_pack(pack: &PackLocation, config: &RewriteConfig) -> Result<RewriteOutcome> {
    let outcome = match pack {
        PackLocation::Directory(dir) => rewrite_directory(dir, config.pack_format())?,
        PackLocation::Archive(path) => rewrite_archive(path, config.pack_format(), config.keep_backup())?
    };

    match &outcome {
        RewriteOutcome::Patched { .. } => log::info!("{pack}: pack_format set to {}", config.pack_format()),
        RewriteOutcome::Unchanged => log::debug!("{pack}: unchanged"),
        RewriteOutcome::Skipped => log::debug!("{pack}: no {DESCRIPTOR_FILE}, skipped")
    }

    Ok(outcome)
}

/// Rewrite every pack found under the configured path, one at a time.
///
/// A pack that fails is logged and recorded in the report, the walk carries on
/// with the next one.
pub fn rewrite_tree(config: &RewriteConfig, progress: &mut dyn Progress) -> BatchReport {
    rewrite_packs(&find_packs(config.path()), config, progress)
}

/// Rewrite an already collected list of packs, see [`rewrite_tree`]
pub fn rewrite_packs(
    packs: &[PackLocation],
    config: &RewriteConfig,
    progress: &mut dyn Progress
) -> BatchReport {
    let mut report = BatchReport::default();

    progress.begin("Rewriting resource packs", packs.len());

    for (i, pack) in packs.iter().enumerate() {
        match rewrite_pack(pack, config) {
            Ok(RewriteOutcome::Patched { .. }) => report.patched.push(pack.path().to_owned()),
            Ok(RewriteOutcome::Unchanged) => report.unchanged += 1,
            Ok(RewriteOutcome::Skipped) => report.skipped += 1,
            Err(err) => {
                log::error!("{pack}: {err}");
                report.failed.push((pack.path().to_owned(), err));
            }
        }

        progress.advance(i + 1);
    }

    progress.end();

    report
}

/// Read the descriptor of a pack without changing anything
pub fn inspect_pack(pack: &PackLocation) -> Result<Option<PackInfo>> {
    let bytes = match pack {
        PackLocation::Directory(dir) => read_descriptor_file(dir)?,
        PackLocation::Archive(path) => {
            let mut archive = open_archive(path)?;
            read_descriptor_entry(&mut archive, path)?
        }
    };

    let Some(bytes) = bytes else {
        return Ok(None);
    };

    let (text, encoding) = decode_descriptor(&bytes, pack.path())?;
    let object = parse_descriptor(&text, pack.path())?;

    Ok(Some(PackInfo {
        descriptor: PackDescriptor::from_json(&object),
        encoding
    }))
}

fn rewrite_directory(dir: &Path, pack_format: u32) -> Result<RewriteOutcome> {
    let Some(bytes) = read_descriptor_file(dir)? else {
        return Ok(RewriteOutcome::Skipped);
    };

    let Some(edit) = patch_descriptor(&bytes, pack_format, dir)? else {
        return Ok(RewriteOutcome::Unchanged);
    };

    let data = encode_edit(&edit, dir)?;

    // directories are written in place, there is no backup
    fs::write(dir.join(&edit.entry_name), data)?;

    Ok(RewriteOutcome::Patched { backup: None })
}

fn rewrite_archive(path: &Path, pack_format: u32, keep_backup: bool) -> Result<RewriteOutcome> {
    let mut archive = open_archive(path)?;

    let Some(bytes) = read_descriptor_entry(&mut archive, path)? else {
        return Ok(RewriteOutcome::Skipped);
    };

    let Some(edit) = patch_descriptor(&bytes, pack_format, path)? else {
        return Ok(RewriteOutcome::Unchanged);
    };

    let data = encode_edit(&edit, path)?;
    let staged = stage_archive(&mut archive, path, &edit.entry_name, &data)?;

    // source handle must be closed before the original can be renamed
    drop(archive);

    let backup = backup_original(path)?;
    promote(staged, path, &backup)?;

    if keep_backup {
        return Ok(RewriteOutcome::Patched { backup: Some(backup) });
    }

    if let Err(err) = fs::remove_file(&backup) {
        log::warn!("Unable to remove backup {}: {err}", backup.display());
        return Ok(RewriteOutcome::Patched { backup: Some(backup) });
    }

    Ok(RewriteOutcome::Patched { backup: None })
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    Ok(ZipArchive::new(BufReader::new(File::open(path)?))?)
}

fn read_descriptor_file(dir: &Path) -> Result<Option<Vec<u8>>> {
    let path = dir.join(DESCRIPTOR_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    fs::read(&path)
        .map(Some)
        .map_err(|err| file_not_read(dir, err.to_string()))
}

fn read_descriptor_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &Path) -> Result<Option<Vec<u8>>> {
    read_entry(archive, DESCRIPTOR_FILE)
        .map_err(|err| file_not_read(path, err.to_string()))
}

fn decode_descriptor(bytes: &[u8], pack: &Path) -> Result<(String, TextEncoding)> {
    encoding::decode(bytes)
        .ok_or_else(|| file_not_read(pack, "text encoding could not be determined".to_string()))
}

fn parse_descriptor(text: &str, pack: &Path) -> Result<serde_json::Map<String, serde_json::Value>> {
    parse_permissive(text).map_err(|source| Error::Parse {
        pack: pack.to_owned(),
        entry: DESCRIPTOR_FILE.to_string(),
        source
    })
}

/// Decode and parse `bytes`, returning the edit needed to bring the descriptor
/// to `pack_format`, or `None` when there is nothing to change
fn patch_descriptor(bytes: &[u8], pack_format: u32, pack: &Path) -> Result<Option<PendingEdit>> {
    let (text, encoding) = decode_descriptor(bytes, pack)?;
    let mut object = parse_descriptor(&text, pack)?;

    if !set_pack_format(&mut object, pack_format) {
        return Ok(None);
    }

    let text = to_pretty_json(&object).map_err(|source| Error::Parse {
        pack: pack.to_owned(),
        entry: DESCRIPTOR_FILE.to_string(),
        source
    })?;

    Ok(Some(PendingEdit::new(DESCRIPTOR_FILE, text, encoding)))
}

/// Encode the edit in the descriptor's own encoding. Characters that encoding
/// lacks are written as JSON escapes instead.
fn encode_edit(edit: &PendingEdit, pack: &Path) -> Result<Vec<u8>> {
    if let Some(data) = edit.to_bytes()? {
        return Ok(data);
    }

    log::debug!("{}: escaping characters {} can't represent", pack.display(), edit.encoding);

    let escaped = PendingEdit::new(
        &edit.entry_name,
        encoding::escape_unencodable(&edit.text, edit.encoding),
        edit.encoding
    );

    escaped.to_bytes()?.ok_or_else(|| Error::Encode {
        pack: pack.to_owned(),
        entry: edit.entry_name.clone(),
        encoding: edit.encoding.to_string()
    })
}

/// Write the replacement archive to a temp file next to `path`.
/// The temp file is deleted if anything fails before it is persisted.
fn stage_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &Path,
    entry: &str,
    data: &[u8]
) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new(".")
    };

    let mut staged = tempfile::Builder::new()
        .prefix(".respack-")
        .suffix(".tmp")
        .tempfile_in(dir)?;

    let writer = copy_with_replacement(archive, BufWriter::new(staged.as_file_mut()), entry, data)?;
    writer.into_inner().map_err(|err| err.into_error())?;

    staged.as_file().sync_all()?;

    Ok(staged)
}

/// Rename the original archive to `<name>.bak`
fn backup_original(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    if backup.exists() {
        return Err(Error::BackupExists(backup));
    }

    fs::rename(path, &backup)?;

    Ok(backup)
}

/// Move the staged archive into the original's place. If that fails the backup
/// is renamed back, and if even that fails the error points at the backup.
fn promote(staged: NamedTempFile, path: &Path, backup: &Path) -> Result<()> {
    let err = match staged.persist(path) {
        Ok(_) => return Ok(()),
        Err(err) => err
    };

    // deletes the temp file
    drop(err.file);

    match fs::rename(backup, path) {
        Ok(()) => Err(Error::Io(err.error)),
        Err(_) => Err(Error::Commit {
            pack: path.to_owned(),
            backup: backup.to_owned(),
            source: err.error
        })
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

fn file_not_read(pack: &Path, reason: String) -> Error {
    Error::FileNotRead {
        pack: pack.to_owned(),
        entry: DESCRIPTOR_FILE.to_string(),
        reason
    }
}
