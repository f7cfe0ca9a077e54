//! Mind-Map Catalog Entities
//!
//! Entries of the map list and of the map timeline.

use serde::{Deserialize, Serialize};

use super::id::NodeId;
use super::text::{label_or, lenient_string, lenient_text};

/// Label used when a map has neither catalog nor project name
pub const UNTITLED_MAP: &str = "Untitled Map";

/// A mind map in the user's catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireMap")]
pub struct MindMap {
    pub id: NodeId,
    pub name: String,
    /// Creation time as the backend formats it
    pub created_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMap {
    id: NodeId,
    #[serde(default)]
    map_catalog_name: Option<String>,
    #[serde(default)]
    pro_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    create_time: Option<String>,
}

impl From<WireMap> for MindMap {
    fn from(wire: WireMap) -> Self {
        Self {
            id: wire.id,
            name: label_or([wire.map_catalog_name, wire.pro_name], UNTITLED_MAP),
            created_at: wire.create_time,
        }
    }
}

impl MindMap {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: None,
        }
    }
}

/// One line of the map timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLogEntry {
    #[serde(default, rename = "operatorName", deserialize_with = "lenient_string")]
    pub operator: String,
    #[serde(default, rename = "createTime", deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
}

/// Page wrapper of `mind/node/getMindMapLog`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MapLogPage {
    #[serde(default)]
    pub list: Option<Vec<MapLogEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_name_fallbacks() {
        let maps: Vec<MindMap> = serde_json::from_value(json!([
            { "id": 1, "mapCatalogName": "Launch", "createTime": "2024-03-01 10:00" },
            { "id": 2, "proName": "Website" },
            { "id": "3" }
        ]))
        .unwrap();

        assert_eq!(maps[0].name, "Launch");
        assert_eq!(maps[0].created_at.as_deref(), Some("2024-03-01 10:00"));
        assert_eq!(maps[1].name, "Website");
        assert_eq!(maps[1].created_at, None);
        assert_eq!(maps[2].name, UNTITLED_MAP);
    }

    #[test]
    fn test_log_page_decodes() {
        let page: MapLogPage = serde_json::from_value(json!({
            "list": [{ "operatorName": "Ana", "createTime": 1709280000000i64, "content": "Added node" }],
            "total": 1
        }))
        .unwrap();

        let list = page.list.unwrap();
        assert_eq!(list[0].operator, "Ana");
        assert_eq!(list[0].created_at.as_deref(), Some("1709280000000"));
        assert_eq!(list[0].content, "Added node");
    }

    #[test]
    fn test_null_log_fields_keep_the_page() {
        let page: MapLogPage = serde_json::from_value(json!({
            "list": [
                { "operatorName": "Ana", "createTime": "t0", "content": "Renamed map" },
                { "operatorName": null, "createTime": "t1", "content": "Added node" },
                { "createTime": null, "content": null }
            ]
        }))
        .unwrap();

        let list = page.list.unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].operator, "Ana");
        assert_eq!(list[1].operator, "");
        assert_eq!(list[1].content, "Added node");
        assert_eq!(list[2].created_at, None);
        assert_eq!(list[2].content, "");
    }
}
