//! Inventory entries and loot results.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::{split_type_id, Fields};

/// One owned inventory entry, keyed by its template id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemProfile {
    pub template_id: String,
    /// Template prefix before the first colon, e.g. `AthenaCharacter`.
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    /// Free-form attributes, kept verbatim.
    pub attributes: Map<String, Value>,
    pub quantity: i64,
}

impl ItemProfile {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "ItemProfile")?;
        let template_id: String = f.req("templateId")?;
        let (kind, id) = split_type_id(&template_id, f.context())?;
        Ok(Self {
            template_id,
            kind,
            id,
            attributes: f.req("attributes")?,
            quantity: f.req("quantity")?,
        })
    }

    pub fn is(&self, kind: &str, id: &str) -> bool {
        self.kind == kind && self.id == id
    }
}

/// One loot-result entry of a purchase or reward record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub guid: Option<String>,
    pub profile: Option<String>,
    pub quantity: i64,
}

impl Item {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "Item")?;
        let (kind, id) = split_type_id(f.req("itemType")?, f.context())?;
        Ok(Self {
            kind,
            id,
            guid: f.opt("itemGuid")?,
            profile: f.opt("itemProfile")?,
            quantity: f.req("quantity")?,
        })
    }
}

/// Reward entry of a notification; unlike [`Item`] every key is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub guid: String,
    pub profile: String,
    pub quantity: i64,
}

impl NotificationItem {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "NotificationItem")?;
        let (kind, id) = split_type_id(f.req("itemType")?, f.context())?;
        Ok(Self {
            kind,
            id,
            guid: f.req("itemGuid")?,
            profile: f.req("itemProfile")?,
            quantity: f.req("quantity")?,
        })
    }
}
