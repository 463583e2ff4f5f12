//! Creative discovery surface: panels of featured islands.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fields::{Fields, parse_timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreativeDiscovery {
    pub panels: Vec<CreativeDiscoveryPanel>,
}

impl CreativeDiscovery {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "CreativeDiscovery")?;
        let panels = f.list("panels", CreativeDiscoveryPanel::from_value)?;
        debug!(panels = panels.len(), "Parsed creative discovery");
        Ok(Self { panels })
    }

    pub fn panel(&self, name: &str) -> Option<&CreativeDiscoveryPanel> {
        self.panels.iter().find(|panel| panel.name == name)
    }
}

/// A named row; results from all of its pages are flattened in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreativeDiscoveryPanel {
    pub name: String,
    pub pages: Vec<CreativeDiscoveryPage>,
}

impl CreativeDiscoveryPanel {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "CreativeDiscoveryPanel")?;
        let mut pages = Vec::new();
        for page in f.req::<&[Value]>("pages")? {
            let page = Fields::new(page, "CreativeDiscoveryPanelPage")?;
            pages.extend(page.list("results", CreativeDiscoveryPage::from_value)?);
        }
        Ok(Self {
            name: f.req("panelName")?,
            pages,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreativeDiscoveryPage {
    pub last_visited: Option<DateTime<Utc>>,
    pub link_code: String,
    pub is_favorite: bool,
    pub global_player_count: i64,
}

impl CreativeDiscoveryPage {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "CreativeDiscoveryPage")?;

        // Key is required but may be null or empty.
        let last_visited = match f.req::<&Value>("lastVisited")? {
            Value::Null => None,
            Value::String(value) if value.is_empty() => None,
            Value::String(value) => {
                Some(parse_timestamp(value).ok_or_else(|| Error::InvalidTimestamp {
                    context: f.context(),
                    field: "lastVisited".to_string(),
                    value: value.clone(),
                })?)
            }
            _ => {
                return Err(Error::WrongType {
                    context: f.context(),
                    field: "lastVisited".to_string(),
                    expected: "a string or null",
                });
            }
        };

        Ok(Self {
            last_visited,
            link_code: f.req("linkCode")?,
            is_favorite: f.req("isFavorite")?,
            global_player_count: f.req("globalCCU")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(link_code: &str, last_visited: Value) -> Value {
        json!({
            "lastVisited": last_visited,
            "linkCode": link_code,
            "isFavorite": false,
            "globalCCU": 1234
        })
    }

    #[test]
    fn flattens_page_results() {
        let raw = json!({
            "panels": [{
                "panelName": "Featured",
                "pages": [
                    {"results": [result("1111-2222-3333", Value::Null)]},
                    {"results": [
                        result("set_br_playlists", json!("2024-02-03T04:05:06.000Z")),
                        result("playlist_defaultsolo", json!(""))
                    ]}
                ]
            }]
        });
        let discovery = CreativeDiscovery::from_value(&raw).unwrap();
        let panel = discovery.panel("Featured").unwrap();
        assert_eq!(panel.pages.len(), 3);
        assert!(panel.pages[0].last_visited.is_none());
        assert!(panel.pages[1].last_visited.is_some());
        assert!(panel.pages[2].last_visited.is_none());
        assert_eq!(panel.pages[0].global_player_count, 1234);
        assert!(discovery.panel("Missing").is_none());
    }

    #[test]
    fn last_visited_key_is_required() {
        let mut page = result("1111-2222-3333", Value::Null);
        page.as_object_mut().unwrap().remove("lastVisited");
        assert!(matches!(
            CreativeDiscoveryPage::from_value(&page),
            Err(Error::MissingField { .. })
        ));
    }

    #[test]
    fn non_string_last_visited_is_wrong_type() {
        let page = result("1111-2222-3333", json!(1_700_000_000));
        assert!(matches!(
            CreativeDiscoveryPage::from_value(&page),
            Err(Error::WrongType { field, .. }) if field == "lastVisited"
        ));
    }
}
