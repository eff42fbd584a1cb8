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

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::fmt;

/// Text encoding detected for a single buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextEncoding {
    encoding: &'static Encoding,

    /// Buffer started with a byte order mark
    bom: bool
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    fn bom_bytes(&self) -> &'static [u8] {
        if !self.bom {
            return b"";
        }

        if self.encoding == UTF_8 {
            b"\xEF\xBB\xBF"
        } else if self.encoding == UTF_16LE {
            b"\xFF\xFE"
        } else if self.encoding == UTF_16BE {
            b"\xFE\xFF"
        } else {
            b""
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.bom {
            true => write!(f, "{} (BOM)", self.name()),
            false => write!(f, "{}", self.name())
        }
    }
}

/// Guess the encoding of `bytes`, or `None` when the buffer is empty or binary
pub fn detect_encoding(bytes: &[u8]) -> Option<TextEncoding> {
    if bytes.is_empty() {
        return None;
    }

    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Some(TextEncoding { encoding, bom: true });
    }

    // NUL bytes without a UTF-16 BOM means this isn't text we can safely rewrite
    if bytes.contains(&0) {
        return None;
    }

    if std::str::from_utf8(bytes).is_ok() {
        return Some(TextEncoding { encoding: UTF_8, bom: false });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);

    Some(TextEncoding {
        encoding: detector.guess(None, false),
        bom: false
    })
}

/// Detect and strictly decode `bytes`, malformed input yields `None`
pub fn decode(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    let detected = detect_encoding(bytes)?;
    let body = &bytes[detected.bom_bytes().len()..];

    let text = detected.encoding
        .decode_without_bom_handling_and_without_replacement(body)?;

    Some((text.into_owned(), detected))
}

/// Encode `text` back into `encoding`, `None` when a character can't be represented
pub fn encode(text: &str, encoding: TextEncoding) -> Option<Vec<u8>> {
    let mut output = encoding.bom_bytes().to_vec();

    // encoding_rs only encodes UTF-16 as UTF-8, so do these by hand
    if encoding.encoding == UTF_16LE {
        output.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    } else if encoding.encoding == UTF_16BE {
        output.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    } else {
        let (bytes, used, had_errors) = encoding.encoding.encode(text);
        if had_errors || used != encoding.encoding {
            return None;
        }
        output.extend_from_slice(&bytes);
    }

    Some(output)
}

/// Replace every character `encoding` can't represent with a JSON `\uXXXX`
/// escape, using a surrogate pair outside the basic multilingual plane.
///
/// Only valid for JSON text, where non-ASCII can only appear inside strings.
pub fn escape_unencodable(text: &str, encoding: TextEncoding) -> String {
    let mut output = String::with_capacity(text.len());

    for c in text.chars() {
        if c.is_ascii() || can_encode(c, encoding) {
            output.push(c);
            continue;
        }

        let mut units = [0u16; 2];
        for unit in c.encode_utf16(&mut units) {
            output.push_str(&format!("\\u{:04x}", unit));
        }
    }

    output
}

fn can_encode(c: char, encoding: TextEncoding) -> bool {
    if encoding.encoding == UTF_8 || encoding.encoding == UTF_16LE || encoding.encoding == UTF_16BE {
        return true;
    }

    let mut buffer = [0u8; 4];
    let (_, used, had_errors) = encoding.encoding.encode(c.encode_utf8(&mut buffer));

    !had_errors && used == encoding.encoding
}
