//! Parsers for MCP profile documents.
//!
//! Each profile constructor parses every entry of the `items` mapping into an
//! [`ItemProfile`], flattens `stats.attributes` into typed fields and keeps the
//! source document as `raw_data`.

mod athena;
mod campaign;
mod common_core;
mod history;
mod item;
mod locker;

use serde_json::Value;

pub use athena::{
    BattleRoyaleInventory, BattleRoyaleProfile, PastSeasonStats, PurchasedBattlePassOffer,
    VictoryCrownOverview,
};
pub use campaign::{DailyRewardNotification, DailyRewards, SaveTheWorldProfile};
pub use common_core::{CommonCoreProfile, PromotionStatus, UndoCooldown};
pub use history::{
    BanHistory, BanStatus, DAILY_GIFT_LIMIT, Gift, GiftHistory, GiftUser, MoneyPurchase,
    MoneyPurchaseHistory, VBucksPurchase, VBucksPurchaseHistory,
};
pub use item::{Item, ItemProfile, NotificationItem};
pub use locker::{Locker, LockerSlot};

use crate::enums::CosmeticType;
use crate::error::{Error, Result};
use crate::fields::Fields;

/// Item queries shared by every profile that owns an inventory.
pub trait ProfileItems {
    fn items(&self) -> &[ItemProfile];

    /// Items whose type matches any of `types`; an empty slice matches every cosmetic type.
    fn cosmetics(&self, types: &[CosmeticType]) -> Vec<&ItemProfile> {
        let types = if types.is_empty() {
            CosmeticType::ALL
        } else {
            types
        };
        self.items()
            .iter()
            .filter(|item| types.iter().any(|t| t.as_str() == item.kind))
            .collect()
    }

    /// Items of type `Accolades`.
    fn legacies(&self) -> Vec<&ItemProfile> {
        self.items_of_type("Accolades")
    }

    /// Loadout of the first `CosmeticLocker` item.
    fn locker(&self) -> Result<Locker> {
        let item = self
            .items()
            .iter()
            .find(|item| item.kind == "CosmeticLocker")
            .ok_or(Error::ItemNotFound("CosmeticLocker"))?;
        Locker::from_attributes(&item.attributes)
    }

    fn items_of_type(&self, kind: &str) -> Vec<&ItemProfile> {
        self.items().iter().filter(|item| item.kind == kind).collect()
    }
}

/// Parse the `items` mapping of a profile document, ignoring its keys.
fn parse_items(profile: Fields<'_>) -> Result<Vec<ItemProfile>> {
    profile
        .object("items", "ProfileItems")?
        .as_map()
        .values()
        .map(ItemProfile::from_value)
        .collect()
}

/// Unwrap a QueryProfile response down to its profile document.
///
/// Returns `raw` unchanged when it is already a bare profile.
pub fn profile_document(raw: &Value) -> &Value {
    raw.get("profileChanges")
        .and_then(|changes| changes.get(0))
        .and_then(|change| change.get("profile"))
        .unwrap_or(raw)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Inventory(Vec<ItemProfile>);

    impl ProfileItems for Inventory {
        fn items(&self) -> &[ItemProfile] {
            &self.0
        }
    }

    fn item(template_id: &str) -> ItemProfile {
        ItemProfile::from_value(&json!({
            "templateId": template_id,
            "attributes": {},
            "quantity": 1
        }))
        .unwrap()
    }

    #[test]
    fn cosmetics_filter_by_type() {
        let inv = Inventory(vec![
            item("AthenaCharacter:cid_1"),
            item("AthenaDance:eid_1"),
            item("Token:athenaseasonxpboost"),
            item("Accolades:accoladeid_1"),
        ]);
        assert_eq!(inv.cosmetics(&[]).len(), 2);
        let emotes = inv.cosmetics(&[CosmeticType::Emote]);
        assert_eq!(emotes.len(), 1);
        assert_eq!(emotes[0].id, "eid_1");
        assert_eq!(inv.legacies().len(), 1);
    }

    #[test]
    fn locker_without_cosmetic_locker_item_fails() {
        let inv = Inventory(vec![item("AthenaCharacter:cid_1")]);
        assert!(matches!(
            inv.locker(),
            Err(Error::ItemNotFound("CosmeticLocker"))
        ));
    }

    #[test]
    fn profile_document_unwraps_query_profile_response() {
        let profile = json!({"profileId": "athena", "items": {}});
        let response = json!({"profileChanges": [{"changeType": "fullProfileUpdate", "profile": profile.clone()}]});
        assert_eq!(profile_document(&response), &profile);
        assert_eq!(profile_document(&profile), &profile);
    }
}
