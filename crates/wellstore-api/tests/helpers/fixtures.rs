//! Archive fixtures built in memory.

use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};

pub const MANIFEST_HEADER: &str = "title,category,vendor,price,description,keywords,stock,image\n";

/// Smallest valid JPEG-looking payload; content is never decoded.
pub const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0xFF, 0xD9];

pub fn zip_of(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        for (name, data) in files {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

pub fn manifest(rows: &[&str]) -> Vec<u8> {
    let mut csv = MANIFEST_HEADER.to_string();
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv.into_bytes()
}
