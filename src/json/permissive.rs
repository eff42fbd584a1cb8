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

use serde::Deserialize;
use serde_json::{Deserializer, Map, Value};

/// Parse a JSON object the way hand edited `pack.mcmeta` files need it.
///
/// Raw newlines and tabs inside string values are escaped before parsing.
/// When the object itself is valid but followed by junk (comments, notes from
/// the pack author), the text is cut off before the line the junk starts on
/// and parsed again. Every other error is returned as is.
pub fn parse_permissive(text: &str) -> serde_json::Result<Map<String, Value>> {
    let normalized = escape_string_controls(&text.replace("\r\n", "\n"));

    let mut de = Deserializer::from_str(&normalized);
    let object = Map::deserialize(&mut de)?;

    match de.end() {
        Ok(()) => Ok(object),
        Err(err) => {
            let kept: String = normalized
                .split_inclusive('\n')
                .take(err.line().saturating_sub(1))
                .collect();

            serde_json::from_str(&kept)
        }
    }
}

fn escape_string_controls(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if !in_string {
            in_string = c == '"';
            output.push(c);
            continue;
        }

        if escaped {
            escaped = false;
            match c {
                '\n' => output.push('n'),
                '\r' => output.push('r'),
                '\t' => output.push('t'),
                _ => output.push(c)
            }
            continue;
        }

        match c {
            '\\' => {
                escaped = true;
                output.push(c);
            },
            '"' => {
                in_string = false;
                output.push(c);
            },
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            _ => output.push(c)
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{error::Category, json};

    #[test]
    fn strict_json_keeps_key_order() {
        let object = parse_permissive(r#"{"pack":{"pack_format":7},"language":{},"filter":[]}"#).unwrap();

        let keys: Vec<_> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["pack", "language", "filter"]);
    }

    #[test]
    fn raw_newline_in_description() {
        let text = "{\r\n    \"pack\": {\r\n        \"pack_format\": 4,\r\n        \
            \"description\": \"first line\r\n\tsecond line\"\r\n    }\r\n}\r\n";

        let object = parse_permissive(text).unwrap();
        assert_eq!(object["pack"]["description"], json!("first line\n\tsecond line"));
        assert_eq!(object["pack"]["pack_format"], json!(4));
    }

    #[test]
    fn escaped_quotes_stay_inside_string() {
        let object = parse_permissive("{\"pack\": {\"description\": \"say \\\"hi\\\"\n!\"}}").unwrap();
        assert_eq!(object["pack"]["description"], json!("say \"hi\"\n!"));
    }

    #[test]
    fn trailing_data_on_later_line_is_dropped() {
        let text = "{\n    \"pack\": {\n        \"pack_format\": 6\n    }\n}\n\
            Made by someone, do not redistribute\n{ more junk";

        let object = parse_permissive(text).unwrap();
        assert_eq!(object["pack"]["pack_format"], json!(6));
    }

    #[test]
    fn trailing_data_on_same_line_is_an_error() {
        assert!(parse_permissive(r#"{"pack":{"pack_format":6}} junk"#).is_err());
    }

    #[test]
    fn missing_comma_is_not_fixed() {
        let text = "{\n    \"pack\": {\n        \"pack_format\": 6\n        \"description\": \"x\"\n    }\n}";

        let err = parse_permissive(text).unwrap_err();
        assert_eq!(err.classify(), Category::Syntax);
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn top_level_must_be_object() {
        let err = parse_permissive("[1, 2, 3]").unwrap_err();
        assert_eq!(err.classify(), Category::Data);
    }
}
