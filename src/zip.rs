use std::io::{Read, Seek, Write};
use zip::{
    result::{ZipError, ZipResult}, write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter
};

// header sizes can't be trusted, don't reserve more than this up front
const MAX_INITIAL_CAPACITY: u64 = 1 << 20;

// replacing a single file adapted from the zip crate's update example
// https://github.com/zip-rs/zip2/blob/master/examples/update_file_in_archive.rs

/// Read the full contents of the entry `name`, or `None` when the archive doesn't have it
pub fn read_entry<R>(archive: &mut ZipArchive<R>, name: &str) -> ZipResult<Option<Vec<u8>>>
    where R: Read + Seek
{
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => return Err(err)
    };

    let mut buffer = Vec::with_capacity(initial_capacity(file.size()));
    file.read_to_end(&mut buffer)?;

    Ok(Some(buffer))
}

fn initial_capacity(declared_size: u64) -> usize {
    declared_size.min(MAX_INITIAL_CAPACITY) as usize
}

/// Copy every entry of `archive` into `writer` unchanged, except `name`
/// which gets `data` as its new contents
pub fn copy_with_replacement<R, W>(
    archive: &mut ZipArchive<R>,
    writer: W,
    name: &str,
    data: &[u8]
) -> ZipResult<W>
    where R: Read + Seek, W: Write + Seek
{
    let mut zip = ZipWriter::new(writer);

    for i in 0..archive.len() {
        let file = archive.by_index_raw(i)?;

        if file.name() != name {
            // compressed bytes are copied as is, no need to inflate them
            zip.raw_copy_file(file)?;
            continue;
        }

        let mut options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(true);

        if let Some(modified) = file.last_modified() {
            options = options.last_modified_time(modified);
        }

        if let Some(mode) = file.unix_mode() {
            options = options.unix_permissions(mode);
        }

        zip.start_file(name, options)?;
        zip.write_all(data)?;
    }

    zip.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn make_zip(entries: &[(&str, &[u8], CompressionMethod)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data, method) in entries {
            zip.start_file(*name, SimpleFileOptions::default().compression_method(*method)).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn read_entry_missing() {
        let bytes = make_zip(&[("assets/pack.mcmeta", b"{}" as &[u8], CompressionMethod::Stored)]);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(read_entry(&mut archive, "pack.mcmeta").unwrap(), None);
        assert_eq!(read_entry(&mut archive, "assets/pack.mcmeta").unwrap(), Some(b"{}".to_vec()));
    }

    #[test]
    fn capacity_ignores_huge_declared_size() {
        assert_eq!(initial_capacity(120), 120);
        assert_eq!(initial_capacity(0xFFFF_FFFE), MAX_INITIAL_CAPACITY as usize);
    }

    #[test]
    fn replaced_entry_has_zip64_extra_field() {
        let bytes = make_zip(&[
            ("pack.png", b"\x89PNG not really" as &[u8], CompressionMethod::Stored),
            ("pack.mcmeta", b"{}", CompressionMethod::Stored)
        ]);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let output = copy_with_replacement(&mut archive, Cursor::new(Vec::new()), "pack.mcmeta", b"{ }")
            .unwrap()
            .into_inner();

        // first occurrence of the name is in its local header
        let name = b"pack.mcmeta";
        let name_at = output.windows(name.len()).position(|w| w == name).unwrap();
        let header = name_at - 30;
        assert_eq!(&output[header..header + 4], b"PK\x03\x04");

        let extra_len = u16::from_le_bytes([output[header + 28], output[header + 29]]) as usize;
        let mut extra = &output[name_at + name.len()..name_at + name.len() + extra_len];
        let mut ids = Vec::new();
        while extra.len() >= 4 {
            let id = u16::from_le_bytes([extra[0], extra[1]]);
            let len = u16::from_le_bytes([extra[2], extra[3]]) as usize;
            ids.push(id);
            extra = &extra[(4 + len).min(extra.len())..];
        }
        assert!(ids.contains(&0x0001), "extra field ids {ids:04x?}");

        let mut updated = ZipArchive::new(Cursor::new(output)).unwrap();
        assert_eq!(read_entry(&mut updated, "pack.mcmeta").unwrap(), Some(b"{ }".to_vec()));
    }

    #[test]
    fn replace_one_entry() {
        let bytes = make_zip(&[
            ("pack.png", b"\x89PNG not really" as &[u8], CompressionMethod::Stored),
            ("pack.mcmeta", b"{\"pack\":{\"pack_format\":1}}", CompressionMethod::Stored),
            ("assets/minecraft/lang/en_us.json", b"{\"menu.play\":\"Go\"}", CompressionMethod::Deflated)
        ]);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let output = copy_with_replacement(&mut archive, Cursor::new(Vec::new()), "pack.mcmeta", b"new")
            .unwrap()
            .into_inner();

        let mut updated = ZipArchive::new(Cursor::new(output)).unwrap();
        let names: Vec<_> = updated.file_names().map(String::from).collect();
        assert_eq!(names.len(), 3);

        assert_eq!(read_entry(&mut updated, "pack.mcmeta").unwrap(), Some(b"new".to_vec()));
        assert_eq!(updated.by_name("pack.mcmeta").unwrap().compression(), CompressionMethod::Deflated);

        assert_eq!(read_entry(&mut updated, "pack.png").unwrap(), Some(b"\x89PNG not really".to_vec()));
        assert_eq!(updated.by_name("pack.png").unwrap().compression(), CompressionMethod::Stored);

        assert_eq!(
            read_entry(&mut updated, "assets/minecraft/lang/en_us.json").unwrap(),
            Some(b"{\"menu.play\":\"Go\"}".to_vec())
        );
    }
}
