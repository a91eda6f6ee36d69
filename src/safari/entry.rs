//! Normalized Safari reading-list record.

use super::tree::PlistNode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single reading-list item taken from the bookmark tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingListEntry {
    pub title: String,
    pub url: String,
    pub uuid: Option<String>,
    pub date_added: DateTime<Utc>,
    pub date_last_fetched: Option<DateTime<Utc>>,
    pub site_name: Option<String>,
    pub preview_text: Option<String>,
    pub image_url: Option<String>,
    pub server_id: Option<String>,
    pub bookmark_type: Option<String>,
    pub fetch_result: Option<i64>,
    pub added_locally: Option<bool>,
}

const URL_KEY: &str = "URLString";
const READING_LIST_KEY: &str = "ReadingList";
const READING_LIST_NON_SYNC_KEY: &str = "ReadingListNonSync";

/// Child dictionary plus its nested reading-list metadata dictionaries.
struct Fields<'a> {
    node: &'a PlistNode,
    meta: [Option<&'a PlistNode>; 2],
}

impl<'a> Fields<'a> {
    fn get(&self, key: &str) -> Option<&'a PlistNode> {
        self.node.get(key).or_else(|| {
            self.meta
                .iter()
                .copied()
                .flatten()
                .find_map(|m| m.get(key))
        })
    }

    fn string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(PlistNode::as_str).map(str::to_string)
    }
}

impl ReadingListEntry {
    /// Build an entry from a container child.
    ///
    /// Returns `None` when the child has no URL or no usable `DateAdded`.
    /// Safari keeps per-item metadata in nested `ReadingList` and
    /// `ReadingListNonSync` dictionaries; fields are read from the child
    /// first, then from those.
    pub fn from_node(node: &PlistNode) -> Option<Self> {
        let url = node.get(URL_KEY)?.as_str()?.to_string();
        let fields = Fields {
            node,
            meta: [node.get(READING_LIST_KEY), node.get(READING_LIST_NON_SYNC_KEY)],
        };

        let date_added = fields.get("DateAdded").and_then(PlistNode::as_date)?;
        let title = node
            .get("URIDictionary")
            .and_then(|d| d.get("title"))
            .and_then(PlistNode::as_str)
            .or_else(|| node.get("Title").and_then(PlistNode::as_str))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| url.clone());

        Some(Self {
            title,
            uuid: fields.string("WebBookmarkUUID"),
            date_added,
            date_last_fetched: fields.get("DateLastFetched").and_then(PlistNode::as_date),
            site_name: fields.string("siteName"),
            preview_text: fields.string("PreviewText"),
            image_url: fields.string("imageURL"),
            server_id: fields.string("ServerID"),
            bookmark_type: fields.string("WebBookmarkType"),
            fetch_result: fields.get("FetchResult").and_then(PlistNode::as_integer),
            added_locally: fields.get("AddedLocally").and_then(PlistNode::as_bool),
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn dict(pairs: Vec<(&str, PlistNode)>) -> PlistNode {
        PlistNode::Dictionary(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn s(value: &str) -> PlistNode {
        PlistNode::String(value.to_string())
    }

    fn added() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn title_falls_back_to_url() {
        let node = dict(vec![
            ("URLString", s("http://a.com")),
            ("DateAdded", PlistNode::Date(added())),
        ]);
        let entry = ReadingListEntry::from_node(&node).unwrap();
        assert_eq!(entry.title, "http://a.com");
        assert_eq!(entry.url, "http://a.com");
    }

    #[test]
    fn uri_dictionary_title_wins() {
        let node = dict(vec![
            ("URLString", s("http://a.com")),
            ("Title", s("plain title")),
            ("URIDictionary", dict(vec![("title", s("Article"))])),
            ("DateAdded", PlistNode::Date(added())),
        ]);
        assert_eq!(ReadingListEntry::from_node(&node).unwrap().title, "Article");
    }

    #[test]
    fn missing_url_is_dropped() {
        let node = dict(vec![
            ("Title", s("no-url")),
            ("DateAdded", PlistNode::Date(added())),
        ]);
        assert!(ReadingListEntry::from_node(&node).is_none());
    }

    #[test]
    fn missing_date_is_dropped() {
        let node = dict(vec![("URLString", s("http://a.com"))]);
        assert!(ReadingListEntry::from_node(&node).is_none());
    }

    #[test]
    fn nested_reading_list_metadata_is_read() {
        let fetched = Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap();
        let node = dict(vec![
            ("URLString", s("https://blog.example/post")),
            ("WebBookmarkUUID", s("A1B2")),
            ("WebBookmarkType", s("WebBookmarkTypeLeaf")),
            (
                "ReadingList",
                dict(vec![
                    ("DateAdded", PlistNode::Date(added())),
                    ("DateLastFetched", PlistNode::Date(fetched)),
                    ("PreviewText", s("An opening line")),
                ]),
            ),
            (
                "ReadingListNonSync",
                dict(vec![("AddedLocally", PlistNode::Boolean(true))]),
            ),
            ("imageURL", s("https://blog.example/cover.png")),
            ("FetchResult", PlistNode::Integer(1)),
        ]);
        let entry = ReadingListEntry::from_node(&node).unwrap();
        assert_eq!(entry.date_added, added());
        assert_eq!(entry.date_last_fetched, Some(fetched));
        assert_eq!(entry.preview_text.as_deref(), Some("An opening line"));
        assert_eq!(entry.uuid.as_deref(), Some("A1B2"));
        assert_eq!(entry.bookmark_type.as_deref(), Some("WebBookmarkTypeLeaf"));
        assert_eq!(entry.image_url.as_deref(), Some("https://blog.example/cover.png"));
        assert_eq!(entry.fetch_result, Some(1));
        assert_eq!(entry.added_locally, Some(true));
        assert_eq!(entry.site_name, None);
    }
}
