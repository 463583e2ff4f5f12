//! Purchase, gifting and ban records of the common-core profile.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;

use super::item::Item;
use crate::error::Result;
use crate::fields::Fields;

/// Gifts an account may send in any trailing 24 hour window.
pub const DAILY_GIFT_LIMIT: i64 = 5;

/// V-Bucks purchases and refund ticket state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VBucksPurchaseHistory {
    pub refunds_used: i64,
    pub refund_credits: i64,
    /// One year after the refund token reference time.
    pub next_refund_grant_at: Option<DateTime<Utc>>,
    pub purchases: Vec<VBucksPurchase>,
}

impl VBucksPurchaseHistory {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "VBucksPurchaseHistory")?;
        let next_refund_grant_at = match f.opt::<&str>("tokenRefreshReferenceTime")? {
            Some(s) if !s.is_empty() => {
                Some(f.timestamp("tokenRefreshReferenceTime")? + Duration::days(365))
            }
            _ => None,
        };
        Ok(Self {
            refunds_used: f.req("refundsUsed")?,
            refund_credits: f.req("refundCredits")?,
            next_refund_grant_at,
            purchases: f.list("purchases", VBucksPurchase::from_value)?,
        })
    }

    pub fn refunded(&self) -> impl Iterator<Item = &VBucksPurchase> {
        self.purchases.iter().filter(|p| p.refunded_at.is_some())
    }
}

/// An item-shop purchase paid in V-Bucks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VBucksPurchase {
    pub id: String,
    pub offer_id: String,
    pub purchased_at: DateTime<Utc>,
    pub undoable_until: Option<DateTime<Utc>>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub free_refund_eligible: bool,
    pub fulfillments: Vec<Value>,
    pub price: i64,
    pub creator_code: Option<String>,
    pub creator_code_owner_id: Option<String>,
    pub game_context: Option<String>,
    pub items: Vec<Item>,
}

impl VBucksPurchase {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "VBucksPurchase")?;
        let metadata = f.opt_object("metadata", "VBucksPurchaseMetadata")?;
        let (creator_code, creator_code_owner_id) = match metadata {
            Some(m) => (m.opt("mtx_affiliate")?, m.opt("mtx_affiliate_id")?),
            None => (None, None),
        };

        Ok(Self {
            id: f.req("purchaseId")?,
            offer_id: f.req("offerId")?,
            purchased_at: f.timestamp("purchaseDate")?,
            undoable_until: f.opt_timestamp("undoTimeout")?,
            refunded_at: f.opt_timestamp("refundDate")?,
            free_refund_eligible: f.or("freeRefundEligible", false)?,
            fulfillments: f.req::<&[Value]>("fulfillments")?.to_vec(),
            price: f.req("totalMtxPaid")?,
            creator_code,
            creator_code_owner_id,
            game_context: f.opt("gameContext")?,
            items: f.list("lootResult", Item::from_value)?,
        })
    }
}

/// Real-money purchases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyPurchaseHistory {
    pub purchases: Vec<MoneyPurchase>,
}

impl MoneyPurchaseHistory {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "MoneyPurchaseHistory")?;
        Ok(Self {
            purchases: f.list("purchases", MoneyPurchase::from_value)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyPurchase {
    pub fulfillment_id: String,
    pub purchased_at: DateTime<Utc>,
    pub items: Vec<Item>,
}

impl MoneyPurchase {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "MoneyPurchase")?;
        Ok(Self {
            fulfillment_id: f.req("fulfillmentId")?,
            purchased_at: f.timestamp("purchaseDate")?,
            items: f.list("lootResult", Item::from_value)?,
        })
    }
}

/// A counterpart account with the time of the last gift exchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftUser {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gift {
    pub sent_at: DateTime<Utc>,
    pub offer_id: String,
    pub recipient_user_id: String,
}

impl Gift {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "Gift")?;
        Ok(Self {
            sent_at: f.timestamp("date")?,
            offer_id: f.req("offerId")?,
            recipient_user_id: f.req("toAccountId")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftHistory {
    pub sent_count: i64,
    pub received_count: i64,
    pub sent_to: Vec<GiftUser>,
    pub received_from: Vec<GiftUser>,
    pub gifts: Vec<Gift>,
}

impl GiftHistory {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "GiftHistory")?;
        Ok(Self {
            sent_count: f.req("num_sent")?,
            received_count: f.req("num_received")?,
            sent_to: gift_users(f.object("sentTo", "GiftHistory.sentTo")?)?,
            received_from: gift_users(f.object("receivedFrom", "GiftHistory.receivedFrom")?)?,
            gifts: f.list("gifts", Gift::from_value)?,
        })
    }

    /// Gifts left in the trailing 24 hours. Not clamped at zero.
    pub fn daily_remaining(&self) -> i64 {
        self.daily_remaining_at(Utc::now())
    }

    pub fn daily_remaining_at(&self, now: DateTime<Utc>) -> i64 {
        let window_start = now - Duration::days(1);
        let sent = self.gifts.iter().filter(|g| g.sent_at > window_start).count();
        DAILY_GIFT_LIMIT - i64::try_from(sent).unwrap_or(i64::MAX)
    }
}

fn gift_users(users: Fields<'_>) -> Result<Vec<GiftUser>> {
    users
        .as_map()
        .keys()
        .map(|user_id| -> Result<GiftUser> {
            Ok(GiftUser {
                user_id: user_id.clone(),
                timestamp: users.timestamp(user_id)?,
            })
        })
        .collect()
}

/// Current penalty applied to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BanStatus {
    pub required_user_acknowledgement: bool,
    pub reasons: Vec<String>,
    pub has_started: bool,
    pub started_at: DateTime<Utc>,
    pub duration_days: i64,
    pub exploit_program_name: Option<String>,
    pub additional_info: Option<String>,
    pub competitive_ban_reason: Option<String>,
}

impl BanStatus {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "BanStatus")?;
        Ok(Self {
            required_user_acknowledgement: f.req("bRequiresUserAck")?,
            reasons: f.req("banReasons")?,
            has_started: f.req("bBanHasStarted")?,
            started_at: f.timestamp("banStartTimeUtc")?,
            duration_days: f.req("banDurationDays")?,
            exploit_program_name: f.opt("exploitProgramName")?,
            additional_info: f.opt("additionalInfo")?,
            competitive_ban_reason: f.opt("competitiveBanReason")?,
        })
    }

    /// End of the ban; `None` when the duration overflows the calendar.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        Duration::try_days(self.duration_days)
            .and_then(|duration| self.started_at.checked_add_signed(duration))
    }
}

/// Ban counts and tiers keyed by ban category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BanHistory {
    pub ban_count: HashMap<String, i64>,
    pub ban_tier: HashMap<String, i64>,
}

impl BanHistory {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "BanHistory")?;
        Ok(Self {
            ban_count: f.req("banCount")?,
            ban_tier: f.req("banTier")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn gift_history(dates: &[DateTime<Utc>]) -> GiftHistory {
        let gifts: Vec<Value> = dates
            .iter()
            .map(|d| json!({"date": d.to_rfc3339(), "offerId": "v2:/offer", "toAccountId": "friend"}))
            .collect();
        GiftHistory::from_value(&json!({
            "num_sent": gifts.len(),
            "num_received": 0,
            "sentTo": {"friend": "2024-05-31T00:00:00.000Z"},
            "receivedFrom": {},
            "gifts": gifts
        }))
        .unwrap()
    }

    #[test]
    fn daily_remaining_is_five_without_gifts() {
        assert_eq!(gift_history(&[]).daily_remaining_at(now()), 5);
    }

    #[test]
    fn daily_remaining_counts_only_trailing_day() {
        let history = gift_history(&[
            now() - Duration::hours(1),
            now() - Duration::hours(23),
            now() - Duration::hours(25),
        ]);
        assert_eq!(history.daily_remaining_at(now()), 3);
        assert_eq!(history.sent_to[0].user_id, "friend");
    }

    #[test]
    fn daily_remaining_window_start_is_exclusive() {
        let history = gift_history(&[now() - Duration::days(1)]);
        assert_eq!(history.daily_remaining_at(now()), 5);
    }

    #[test]
    fn daily_remaining_goes_negative() {
        let dates: Vec<_> = (1..=7).map(|h| now() - Duration::hours(h)).collect();
        assert_eq!(gift_history(&dates).daily_remaining_at(now()), -2);
    }

    #[test]
    fn vbucks_purchase_history_refund_grant() {
        let history = VBucksPurchaseHistory::from_value(&json!({
            "refundsUsed": 1,
            "refundCredits": 2,
            "tokenRefreshReferenceTime": "2023-01-01T00:00:00.000Z",
            "purchases": [{
                "purchaseId": "p1",
                "offerId": "v2:/offer",
                "purchaseDate": "2023-02-01T10:00:00.000Z",
                "refundDate": "2023-02-02T10:00:00.000Z",
                "fulfillments": [],
                "totalMtxPaid": 800,
                "metadata": {"mtx_affiliate": "creator"},
                "lootResult": [{"itemType": "AthenaCharacter:cid_1", "itemGuid": "g", "itemProfile": "athena", "quantity": 1}]
            }]
        }))
        .unwrap();
        assert_eq!(
            history.next_refund_grant_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        let purchase = &history.purchases[0];
        assert_eq!(purchase.price, 800);
        assert!(!purchase.free_refund_eligible);
        assert_eq!(purchase.creator_code.as_deref(), Some("creator"));
        assert_eq!(purchase.creator_code_owner_id, None);
        assert_eq!(purchase.items[0].id, "cid_1");
        assert_eq!(history.refunded().count(), 1);
    }

    #[test]
    fn empty_refresh_reference_means_no_grant() {
        let history = VBucksPurchaseHistory::from_value(&json!({
            "refundsUsed": 0,
            "refundCredits": 3,
            "tokenRefreshReferenceTime": "",
            "purchases": []
        }))
        .unwrap();
        assert_eq!(history.next_refund_grant_at, None);
    }

    #[test]
    fn ban_status_and_history() {
        let status = BanStatus::from_value(&json!({
            "bRequiresUserAck": true,
            "banReasons": ["Exploiting"],
            "bBanHasStarted": true,
            "banStartTimeUtc": "2024-01-01T00:00:00Z",
            "banDurationDays": 14
        }))
        .unwrap();
        assert_eq!(
            status.ends_at(),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(status.competitive_ban_reason, None);

        let history = BanHistory::from_value(&json!({
            "banCount": {"Exploiting": 1},
            "banTier": {"Exploiting": 2}
        }))
        .unwrap();
        assert_eq!(history.ban_tier["Exploiting"], 2);
    }

    #[test]
    fn ban_end_out_of_range_is_none() {
        let status = BanStatus::from_value(&json!({
            "bRequiresUserAck": false,
            "banReasons": [],
            "bBanHasStarted": true,
            "banStartTimeUtc": "2024-01-01T00:00:00Z",
            "banDurationDays": 100_000_000
        }))
        .unwrap();
        assert_eq!(status.ends_at(), None);
    }

    #[test]
    fn money_purchase_requires_fulfillment_id() {
        let raw = json!({"purchases": [{"purchaseDate": "2024-01-01T00:00:00Z", "lootResult": []}]});
        assert!(matches!(
            MoneyPurchaseHistory::from_value(&raw),
            Err(Error::MissingField { context: "MoneyPurchase", .. })
        ));
    }
}
