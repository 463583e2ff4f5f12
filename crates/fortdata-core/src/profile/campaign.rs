use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::item::{ItemProfile, NotificationItem};
use super::{ProfileItems, parse_items};
use crate::error::Result;
use crate::fields::Fields;

/// Save the World ("campaign") profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveTheWorldProfile {
    pub items: Vec<ItemProfile>,
    pub xp: i64,
    pub level: i64,
    pub mfa_reward_claimed: bool,
    pub daily_rewards: Option<DailyRewards>,
    #[serde(skip)]
    pub raw_data: Value,
}

impl SaveTheWorldProfile {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let doc = Fields::new(raw, "SaveTheWorldProfile")?;
        let items = parse_items(doc)?;
        let stats = doc
            .object("stats", "ProfileStats")?
            .object("attributes", "CampaignStats")?;

        let profile = Self {
            xp: stats.or("xp", 0)?,
            level: stats.req("level")?,
            mfa_reward_claimed: stats.or("mfa_reward_claimed", false)?,
            daily_rewards: stats
                .get("daily_rewards")
                .map(DailyRewards::from_value)
                .transpose()?,
            items,
            raw_data: raw.clone(),
        };

        debug!(
            items = profile.items.len(),
            level = profile.level,
            "Parsed campaign profile"
        );
        Ok(profile)
    }
}

impl ProfileItems for SaveTheWorldProfile {
    fn items(&self) -> &[ItemProfile] {
        &self.items
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRewards {
    pub next_default_reward: i64,
    pub total_days_logged_in: i64,
    pub last_claimed_at: DateTime<Utc>,
}

impl DailyRewards {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "DailyRewards")?;
        Ok(Self {
            next_default_reward: f.req("nextDefaultReward")?,
            total_days_logged_in: f.req("totalDaysLoggedIn")?,
            last_claimed_at: f.timestamp("lastClaimDate")?,
        })
    }
}

/// Login reward notification attached to a `ClaimLoginReward` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRewardNotification {
    pub days_logged_in: i64,
    pub items: Vec<NotificationItem>,
}

impl DailyRewardNotification {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "DailyRewardNotification")?;
        Ok(Self {
            days_logged_in: f.req("daysLoggedIn")?,
            items: f.list("items", NotificationItem::from_value)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enums::CosmeticType;
    use crate::error::Error;
    use chrono::TimeZone;
    use serde_json::json;

    fn campaign_json() -> Value {
        json!({
            "profileId": "campaign",
            "items": {
                "a": {"templateId": "AthenaCharacter:cid_stw", "attributes": {}, "quantity": 1},
                "b": {"templateId": "Hero:hid_commando", "attributes": {"level": 10}, "quantity": 1}
            },
            "stats": {"attributes": {
                "level": 42,
                "daily_rewards": {
                    "nextDefaultReward": 12,
                    "totalDaysLoggedIn": 11,
                    "lastClaimDate": "2023-06-01T10:00:00.000Z"
                }
            }}
        })
    }

    #[test]
    fn parses_with_defaults() {
        let p = SaveTheWorldProfile::from_value(&campaign_json()).unwrap();
        assert_eq!(p.level, 42);
        assert_eq!(p.xp, 0);
        assert!(!p.mfa_reward_claimed);
        assert_eq!(p.items.len(), 2);
        let rewards = p.daily_rewards.unwrap();
        assert_eq!(rewards.total_days_logged_in, 11);
        assert_eq!(
            rewards.last_claimed_at,
            Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn level_is_required() {
        let mut raw = campaign_json();
        raw["stats"]["attributes"].as_object_mut().unwrap().remove("level");
        assert!(matches!(
            SaveTheWorldProfile::from_value(&raw),
            Err(Error::MissingField { field, .. }) if field == "level"
        ));
    }

    #[test]
    fn shares_item_queries() {
        let p = SaveTheWorldProfile::from_value(&campaign_json()).unwrap();
        assert_eq!(p.cosmetics(&[CosmeticType::Outfit]).len(), 1);
        assert_eq!(p.items_of_type("Hero").len(), 1);
        assert!(p.locker().is_err());
    }

    #[test]
    fn reward_notification() {
        let raw = json!({
            "daysLoggedIn": 3,
            "items": [{
                "itemType": "CardPack:cardpack_bronze",
                "itemGuid": "guid-1",
                "itemProfile": "campaign",
                "quantity": 2
            }]
        });
        let n = DailyRewardNotification::from_value(&raw).unwrap();
        assert_eq!(n.days_logged_in, 3);
        assert_eq!(n.items[0].kind, "CardPack");
        assert_eq!(n.items[0].id, "cardpack_bronze");
    }
}
