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

use serde::{ser::Error as _, Serialize};
use serde_json::{ser::PrettyFormatter, Map, Serializer, Value};

/// Fields of the `pack` object in a `pack.mcmeta` file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackDescriptor {
    pack_format: Option<u32>,
    description: Option<String>
}

impl PackDescriptor {
    /// Read the recognized fields, ignoring anything missing or of the wrong type
    pub fn from_json(object: &Map<String, Value>) -> Self {
        let pack = object.get("pack").and_then(Value::as_object);

        let pack_format = pack
            .and_then(|p| p.get("pack_format"))
            .and_then(Value::as_u64)
            .filter(|v| *v > 0)
            .and_then(|v| u32::try_from(v).ok());

        let description = pack
            .and_then(|p| p.get("description"))
            .and_then(Value::as_str)
            .map(String::from);

        PackDescriptor { pack_format, description }
    }

    pub fn pack_format(&self) -> Option<u32> {
        self.pack_format
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// At least one recognized field was present and well typed
    pub fn is_valid(&self) -> bool {
        self.pack_format.is_some() || self.description.is_some()
    }
}

/// Overwrite `pack.pack_format` with `pack_format`.
///
/// Returns `false` and leaves `object` alone when the descriptor has no usable
/// `pack_format` or it already has the requested value.
pub(crate) fn set_pack_format(object: &mut Map<String, Value>, pack_format: u32) -> bool {
    if PackDescriptor::from_json(object).pack_format().map_or(true, |v| v == pack_format) {
        return false;
    }

    match object.get_mut("pack").and_then(Value::as_object_mut) {
        Some(pack) => {
            pack.insert("pack_format".to_string(), Value::from(pack_format));
            true
        },
        None => false
    }
}

/// Serialize with four space indentation, matching how pack authors format these files
pub(crate) fn to_pretty_json(object: &Map<String, Value>) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    object.serialize(&mut ser)?;

    String::from_utf8(buffer).map_err(serde_json::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn descriptor_fields() {
        let meta = PackDescriptor::from_json(&object(json!({
            "pack": { "pack_format": 15, "description": "Faithful 32x" }
        })));

        assert_eq!(meta.pack_format(), Some(15));
        assert_eq!(meta.description(), Some("Faithful 32x"));
        assert!(meta.is_valid());
    }

    #[test]
    fn descriptor_ignores_wrong_types() {
        let meta = PackDescriptor::from_json(&object(json!({
            "pack": { "pack_format": "3", "description": { "text": "component" } }
        })));

        assert_eq!(meta.pack_format(), None);
        assert_eq!(meta.description(), None);
        assert!(!meta.is_valid());

        for bad in [json!(0), json!(-2), json!(1.5)] {
            let meta = PackDescriptor::from_json(&object(json!({ "pack": { "pack_format": bad } })));
            assert_eq!(meta.pack_format(), None);
        }
    }

    #[test]
    fn descriptor_without_pack_object() {
        let meta = PackDescriptor::from_json(&object(json!({ "language": {} })));
        assert!(!meta.is_valid());
    }

    #[test]
    fn set_pack_format_keeps_other_keys() {
        let mut meta = object(json!({
            "pack": { "pack_format": 3, "description": "old" },
            "language": { "en_pt": { "name": "Pirate" } }
        }));

        assert!(set_pack_format(&mut meta, 9));
        assert_eq!(Value::Object(meta), json!({
            "pack": { "pack_format": 9, "description": "old" },
            "language": { "en_pt": { "name": "Pirate" } }
        }));
    }

    #[test]
    fn set_pack_format_noop() {
        let mut same = object(json!({ "pack": { "pack_format": 9 } }));
        assert!(!set_pack_format(&mut same, 9));

        let mut missing = object(json!({ "pack": { "description": "no format" } }));
        assert!(!set_pack_format(&mut missing, 9));
        assert_eq!(Value::Object(missing), json!({ "pack": { "description": "no format" } }));
    }

    #[test]
    fn pretty_json_uses_four_spaces() {
        let text = to_pretty_json(&object(json!({ "pack": { "pack_format": 9 } }))).unwrap();
        assert_eq!(text, "{\n    \"pack\": {\n        \"pack_format\": 9\n    }\n}");
    }

    #[test]
    fn pretty_json_keeps_non_ascii_literal() {
        let text = to_pretty_json(&object(json!({
            "pack": { "description": "For\u{ea}t \u{2603} \u{1F600}" }
        }))).unwrap();

        assert!(text.contains("\"For\u{ea}t \u{2603} \u{1F600}\""));
        assert!(!text.contains('\u{FFFD}'));
    }
}
