//! Reading-list extraction from the bookmark tree.
//!
//! Where the reading list sits inside `Bookmarks.plist` has moved between OS
//! releases, so containers are searched for anywhere in the tree instead of
//! along a fixed key path.

use super::entry::ReadingListEntry;
use super::tree::PlistNode;
use std::collections::BTreeMap;

/// Keys whose presence marks a dictionary as a reading-list container.
pub const READING_LIST_MARKERS: [&str; 2] = ["ReadingList", "ReadingListNonSync"];

const CHILDREN_KEY: &str = "Children";

/// Whether a dictionary is a reading-list container.
pub fn is_reading_list_container(map: &BTreeMap<String, PlistNode>) -> bool {
    READING_LIST_MARKERS.iter().any(|marker| map.contains_key(*marker))
}

/// Every container in the tree, in depth-first order.
pub fn find_containers(root: &PlistNode) -> Vec<&PlistNode> {
    let mut found = Vec::new();
    visit(root, &mut found);
    found
}

fn visit<'a>(node: &'a PlistNode, found: &mut Vec<&'a PlistNode>) {
    match node {
        PlistNode::Dictionary(map) => {
            if is_reading_list_container(map) {
                found.push(node);
            }

            let children = map.get(CHILDREN_KEY).and_then(PlistNode::as_array);
            for child in children.unwrap_or_default() {
                visit(child, found);
            }

            // Markers can sit under any key, not only along the Children spine.
            for (key, value) in map {
                if key == CHILDREN_KEY && children.is_some() {
                    continue;
                }
                if value.is_container() {
                    visit(value, found);
                }
            }
        }
        PlistNode::Array(items) => {
            for item in items {
                visit(item, found);
            }
        }
        _ => {}
    }
}

/// Normalize the immediate children of every container into entries.
pub fn extract_entries(root: &PlistNode) -> Vec<ReadingListEntry> {
    find_containers(root)
        .into_iter()
        .filter_map(|container| container.get(CHILDREN_KEY).and_then(PlistNode::as_array))
        .flatten()
        .filter_map(ReadingListEntry::from_node)
        .collect()
}
