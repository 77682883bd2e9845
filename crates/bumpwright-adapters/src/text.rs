//! Regex, JSON and TOML rewrite helpers shared by the ecosystems

use std::path::Path;

use regex::{NoExpand, Regex};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use toml_edit::Item;

use bumpwright_core::error::AdapterError;

/// Replace the first match of `pattern`, failing when nothing matches
pub(crate) fn replace_first(
    pattern: &Regex,
    content: &str,
    replacement: &str,
    path: &Path,
) -> Result<String, AdapterError> {
    if !pattern.is_match(content) {
        return Err(AdapterError::VersionFieldMissing(path.to_path_buf()));
    }
    Ok(pattern.replacen(content, 1, NoExpand(replacement)).into_owned())
}

/// Parse a JSON document whose top level must be an object
pub(crate) fn parse_object(content: &str, path: &Path) -> Result<Map<String, Value>, AdapterError> {
    match serde_json::from_str(content).map_err(|e| AdapterError::parse(path, e))? {
        Value::Object(map) => Ok(map),
        _ => Err(AdapterError::parse(path, "top level is not an object")),
    }
}

/// Serialize with the given indent width and a trailing newline
pub(crate) fn to_json(value: &Map<String, Value>, indent: usize, path: &Path) -> Result<String, AdapterError> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| AdapterError::update(path, e))?;

    let mut out = String::from_utf8(buf).map_err(|e| AdapterError::update(path, e))?;
    out.push('\n');
    Ok(out)
}

/// Set a TOML string value, keeping the surrounding whitespace and comments
pub(crate) fn set_toml_string(item: &mut Item, version: &str) {
    match item.as_value_mut() {
        Some(current) => {
            let decor = current.decor().clone();
            *current = version.into();
            *current.decor_mut() = decor;
        }
        None => *item = toml_edit::value(version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_first_only() {
        let re = Regex::new(r#"v="[^"]+""#).unwrap();
        let out = replace_first(&re, r#"v="1" v="2""#, r#"v="3""#, Path::new("f")).unwrap();
        assert_eq!(out, r#"v="3" v="2""#);
    }

    #[test]
    fn test_replace_first_no_match() {
        let re = Regex::new("nope").unwrap();
        assert!(matches!(
            replace_first(&re, "content", "x", Path::new("f")),
            Err(AdapterError::VersionFieldMissing(_))
        ));
    }

    #[test]
    fn test_replacement_is_literal() {
        let re = Regex::new("X").unwrap();
        assert_eq!(replace_first(&re, "X", "$1", Path::new("f")).unwrap(), "$1");
    }

    #[test]
    fn test_to_json_indent() {
        let map = parse_object(r#"{"b":1,"a":{"c":2}}"#, Path::new("f")).unwrap();
        assert_eq!(
            to_json(&map, 4, Path::new("f")).unwrap(),
            "{\n    \"b\": 1,\n    \"a\": {\n        \"c\": 2\n    }\n}\n"
        );
    }

    #[test]
    fn test_set_toml_string_keeps_comment() {
        let mut doc: toml_edit::DocumentMut = "version = \"1.0.0\"  # bump me\n".parse().unwrap();
        set_toml_string(&mut doc["version"], "2.0.0");
        assert_eq!(doc.to_string(), "version = \"2.0.0\"  # bump me\n");
    }

    #[test]
    fn test_parse_object_rejects_array() {
        assert!(parse_object("[]", Path::new("f")).is_err());
        assert!(parse_object("{", Path::new("f")).is_err());
    }
}
