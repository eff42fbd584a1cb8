use std::path::Path;
use walkdir::WalkDir;

use crate::PackLocation;

/// Walk `root` and collect every resource pack, in file name order.
///
/// Directory packs are not descended into, so a zip sitting inside a pack
/// directory is treated as one of its assets rather than another pack.
pub fn find_packs(root: &Path) -> Vec<PackLocation> {
    let mut packs = Vec::new();
    let mut it = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(entry) = it.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable path: {err}");
                continue;
            }
        };

        if let Some(pack) = PackLocation::locate(entry.path()) {
            if entry.file_type().is_dir() {
                it.skip_current_dir();
            }
            packs.push(pack);
        }
    }

    packs
}
