//! Property-list tree decoding.
//!
//! Safari stores bookmarks as a binary (older systems: XML) property list.
//! The decoded file is turned into a [`PlistNode`] tree in one pass; any
//! decode failure, including a value type we do not model, is reported as
//! `ParseError` and no partial tree escapes.

use super::error::AccessError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;
use std::time::SystemTime;

/// Decoded property-list value.
#[derive(Debug, Clone, PartialEq)]
pub enum PlistNode {
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    Data(Vec<u8>),
    Array(Vec<PlistNode>),
    Dictionary(BTreeMap<String, PlistNode>),
}

impl PlistNode {
    pub fn as_dictionary(&self) -> Option<&BTreeMap<String, PlistNode>> {
        match self {
            PlistNode::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistNode]> {
        match self {
            PlistNode::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlistNode::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PlistNode::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Timestamps are normally `<date>` values; RFC 3339 strings are accepted
    /// for hand-written XML files.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            PlistNode::Date(d) => Some(*d),
            PlistNode::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// Look up a key when this node is a dictionary.
    pub fn get(&self, key: &str) -> Option<&PlistNode> {
        self.as_dictionary().and_then(|map| map.get(key))
    }

    /// Whether the node can contain further nodes.
    pub fn is_container(&self) -> bool {
        matches!(self, PlistNode::Array(_) | PlistNode::Dictionary(_))
    }
}

impl TryFrom<plist::Value> for PlistNode {
    type Error = AccessError;

    fn try_from(value: plist::Value) -> Result<Self, Self::Error> {
        let node = match value {
            plist::Value::String(s) => PlistNode::String(s),
            plist::Value::Boolean(b) => PlistNode::Boolean(b),
            plist::Value::Real(r) => PlistNode::Real(r),
            plist::Value::Integer(i) => match i.as_signed() {
                Some(signed) => PlistNode::Integer(signed),
                None => match i.as_unsigned() {
                    Some(unsigned) => PlistNode::Real(unsigned as f64),
                    None => return Err(AccessError::parse_error()),
                },
            },
            plist::Value::Date(d) => PlistNode::Date(DateTime::<Utc>::from(SystemTime::from(d))),
            plist::Value::Data(bytes) => PlistNode::Data(bytes),
            plist::Value::Array(items) => PlistNode::Array(
                items
                    .into_iter()
                    .map(PlistNode::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            plist::Value::Dictionary(dict) => {
                let mut map = BTreeMap::new();
                for (key, value) in dict {
                    map.insert(key, PlistNode::try_from(value)?);
                }
                PlistNode::Dictionary(map)
            }
            _ => return Err(AccessError::parse_error()),
        };
        Ok(node)
    }
}

/// Decode property-list bytes (binary or XML).
pub fn parse_bytes(bytes: &[u8]) -> Result<PlistNode, AccessError> {
    let value =
        plist::Value::from_reader(Cursor::new(bytes)).map_err(|_| AccessError::parse_error())?;
    PlistNode::try_from(value)
}

/// Read and decode a property-list file.
///
/// A read failure on a file we just copied is treated as an unusable
/// structure, not as a missing source.
pub fn parse_file(path: &Path) -> Result<PlistNode, AccessError> {
    let bytes = std::fs::read(path).map_err(|_| AccessError::parse_error())?;
    parse_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safari::AccessErrorKind;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Title</key>
    <string>com.apple.ReadingList</string>
    <key>Count</key>
    <integer>2</integer>
    <key>Synced</key>
    <true/>
    <key>Added</key>
    <date>2024-03-01T12:00:00Z</date>
    <key>Children</key>
    <array>
        <dict>
            <key>URLString</key>
            <string>https://example.com</string>
        </dict>
    </array>
</dict>
</plist>"#;

    #[test]
    fn decodes_xml_into_tagged_nodes() {
        let root = parse_bytes(XML.as_bytes()).unwrap();
        assert_eq!(
            root.get("Title").and_then(PlistNode::as_str),
            Some("com.apple.ReadingList")
        );
        assert_eq!(root.get("Count").and_then(PlistNode::as_integer), Some(2));
        assert_eq!(root.get("Synced").and_then(PlistNode::as_bool), Some(true));
        let added = root.get("Added").and_then(PlistNode::as_date).unwrap();
        assert_eq!(added.to_rfc3339(), "2024-03-01T12:00:00+00:00");
        let children = root.get("Children").and_then(PlistNode::as_array).unwrap();
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn decodes_binary_plist() {
        let mut dict = plist::Dictionary::new();
        dict.insert("URLString".to_string(), plist::Value::from("https://a.com"));
        let mut buf = Vec::new();
        plist::Value::Dictionary(dict)
            .to_writer_binary(&mut buf)
            .unwrap();

        let root = parse_bytes(&buf).unwrap();
        assert_eq!(
            root.get("URLString").and_then(PlistNode::as_str),
            Some("https://a.com")
        );
    }

    #[test]
    fn garbage_is_parse_error() {
        let err = parse_bytes(b"definitely not a plist").unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::ParseError);
    }

    #[test]
    fn truncated_xml_is_parse_error() {
        let truncated = &XML.as_bytes()[..XML.len() / 2];
        let err = parse_bytes(truncated).unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::ParseError);
    }

    #[test]
    fn rfc3339_strings_read_as_dates() {
        let node = PlistNode::String("2024-01-02T03:04:05Z".to_string());
        assert!(node.as_date().is_some());
        assert!(PlistNode::String("yesterday".to_string()).as_date().is_none());
    }
}
