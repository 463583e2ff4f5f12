//! Cosmetic loadout stored in a profile's `CosmeticLocker` item.

use serde::Serialize;
use serde_json::{Map, Value};

use super::item::ItemProfile;
use crate::error::Result;
use crate::fields::Fields;

/// A cosmetic loadout with one slot per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Locker {
    pub outfit: LockerSlot,
    pub backpack: LockerSlot,
    pub harvesting_tool: LockerSlot,
    pub glider: LockerSlot,
    pub contrail: LockerSlot,
    pub emote: LockerSlot,
    pub music: LockerSlot,
    pub wrap: LockerSlot,
    pub loading_screen: LockerSlot,
    pub name: Option<String>,
    pub banner_icon_id: Option<String>,
    pub banner_color_id: Option<String>,
    pub use_count: Option<i64>,
}

/// Assignment of one cosmetic category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LockerSlot {
    pub name: Option<String>,
    pub use_count: i64,
    pub item: Option<ItemProfile>,
    /// Equipped template ids, e.g. one per emote wheel position.
    pub equipped: Vec<String>,
}

impl Locker {
    pub fn from_value(raw: &Value) -> Result<Self> {
        Self::from_fields(Fields::new(raw, "Locker")?)
    }

    /// Build from the attributes mapping of a `CosmeticLocker` item.
    pub fn from_attributes(attributes: &Map<String, Value>) -> Result<Self> {
        Self::from_fields(Fields::from_map(attributes, "Locker"))
    }

    fn from_fields(f: Fields<'_>) -> Result<Self> {
        let slots = f
            .object("locker_slots_data", "LockerSlotsData")?
            .object("slots", "LockerSlots")?;
        let slot = |key: &str| LockerSlot::from_value(slots.req(key)?);

        Ok(Self {
            outfit: slot("Character")?,
            backpack: slot("Backpack")?,
            harvesting_tool: slot("Pickaxe")?,
            glider: slot("Glider")?,
            contrail: slot("SkyDiveContrail")?,
            emote: slot("Dance")?,
            music: slot("MusicPack")?,
            wrap: slot("ItemWrap")?,
            loading_screen: slot("LoadingScreen")?,
            name: f.opt("locker_name")?,
            banner_icon_id: f.opt("banner_icon_template")?,
            banner_color_id: f.opt("banner_color_template")?,
            use_count: f.opt("useCount")?,
        })
    }
}

impl LockerSlot {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "LockerSlot")?;
        let equipped = f
            .or::<Vec<String>>("items", Vec::new())?
            .into_iter()
            .filter(|id| !id.is_empty())
            .collect();

        Ok(Self {
            name: f.opt("locker_slot_name")?,
            use_count: f.req("useCount")?,
            item: f.get("item").map(ItemProfile::from_value).transpose()?,
            equipped,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn locker_json() -> Value {
        let slot = |items: Value| json!({"items": items, "useCount": 0});
        json!({
            "locker_slots_data": {
                "slots": {
                    "Character": {
                        "items": ["AthenaCharacter:cid_028_athena_commando_f"],
                        "useCount": 3,
                        "locker_slot_name": "Outfit"
                    },
                    "Backpack": slot(json!([""])),
                    "Pickaxe": slot(json!(["AthenaPickaxe:defaultpickaxe"])),
                    "Glider": slot(json!(["AthenaGlider:defaultglider"])),
                    "SkyDiveContrail": slot(json!([""])),
                    "Dance": slot(json!(["AthenaDance:eid_dancemoves", "", "", "", "", ""])),
                    "MusicPack": slot(json!([""])),
                    "ItemWrap": slot(json!(["", "", "", "", "", "", ""])),
                    "LoadingScreen": slot(json!([""]))
                }
            },
            "locker_name": "Default",
            "banner_icon_template": "brseason01",
            "banner_color_template": "defaultcolor1",
            "use_count": 0
        })
    }

    #[test]
    fn parses_nine_slots() {
        let locker = Locker::from_value(&locker_json()).unwrap();
        assert_eq!(locker.outfit.use_count, 3);
        assert_eq!(locker.outfit.name.as_deref(), Some("Outfit"));
        assert_eq!(
            locker.outfit.equipped,
            vec!["AthenaCharacter:cid_028_athena_commando_f".to_string()]
        );
        assert_eq!(locker.emote.equipped.len(), 1);
        assert!(locker.wrap.equipped.is_empty());
        assert_eq!(locker.name.as_deref(), Some("Default"));
        assert_eq!(locker.banner_icon_id.as_deref(), Some("brseason01"));
        assert_eq!(locker.use_count, None);
        assert_eq!(locker.glider.item, None);
    }

    #[test]
    fn missing_slot_key_fails() {
        let mut raw = locker_json();
        raw["locker_slots_data"]["slots"]
            .as_object_mut()
            .unwrap()
            .remove("LoadingScreen");
        assert!(matches!(
            Locker::from_value(&raw),
            Err(Error::MissingField { field, .. }) if field == "LoadingScreen"
        ));
    }

    #[test]
    fn slot_requires_use_count() {
        assert!(LockerSlot::from_value(&json!({"locker_slot_name": "x"})).is_err());
    }

    #[test]
    fn slot_item_parsed_as_item_profile() {
        let slot = LockerSlot::from_value(&json!({
            "useCount": 1,
            "item": {
                "templateId": "AthenaGlider:defaultglider",
                "attributes": {},
                "quantity": 1
            }
        }))
        .unwrap();
        assert_eq!(slot.item.unwrap().id, "defaultglider");
        assert!(slot.equipped.is_empty());
    }

    #[test]
    fn slot_with_non_string_items_is_rejected() {
        let result = LockerSlot::from_value(&json!({"useCount": 0, "items": [42, {"x": 1}]}));
        assert!(matches!(
            result,
            Err(Error::WrongType { field, .. }) if field == "items"
        ));
    }
}
