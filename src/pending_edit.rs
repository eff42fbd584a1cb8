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

use crate::{encoding::{self, TextEncoding}, Error, Result};

/// Replacement text for one file of a resource pack, waiting to be written
#[derive(Debug)]
pub struct PendingEdit {
    pub entry_name: String,
    pub text: String,
    pub encoding: TextEncoding
}

impl PendingEdit {
    pub fn new(entry_name: &str, text: String, encoding: TextEncoding) -> Self {
        PendingEdit {
            entry_name: entry_name.to_string(),
            text,
            encoding
        }
    }

    pub fn validate(&self) -> Result<()> {
        let reason = if self.entry_name.is_empty() {
            "entry name is empty"
        } else if self.text.is_empty() {
            "text is empty"
        } else if self.encoding.name().is_empty() {
            "encoding is unknown"
        } else {
            return Ok(());
        };

        Err(Error::InvalidPendingEdit {
            entry: self.entry_name.clone(),
            reason
        })
    }

    /// Validate, then encode the text with the encoding it was read in.
    /// Returns `None` when the text can't be represented in that encoding.
    pub fn to_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.validate()?;
        Ok(encoding::encode(&self.text, self.encoding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::decode;

    fn utf8() -> TextEncoding {
        decode(b"{}").unwrap().1
    }

    #[test]
    fn valid_edit_encodes() {
        let edit = PendingEdit::new("pack.mcmeta", "{}".to_string(), utf8());
        assert_eq!(edit.to_bytes().unwrap(), Some(b"{}".to_vec()));
    }

    #[test]
    fn empty_name_rejected() {
        let edit = PendingEdit::new("", "{}".to_string(), utf8());
        assert!(matches!(
            edit.validate(),
            Err(Error::InvalidPendingEdit { reason: "entry name is empty", .. })
        ));
    }

    #[test]
    fn empty_text_rejected() {
        let edit = PendingEdit::new("pack.mcmeta", String::new(), utf8());
        assert!(matches!(edit.to_bytes(), Err(Error::InvalidPendingEdit { .. })));
    }
}
