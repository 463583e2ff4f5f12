//! Common-core profile: currency balances, purchase history, gifting and bans.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::history::{BanHistory, BanStatus, GiftHistory, MoneyPurchaseHistory, VBucksPurchaseHistory};
use super::item::ItemProfile;
use super::{ProfileItems, parse_items};
use crate::enums::{SaveTheWorldFounderPack, VBucksPlatform};
use crate::error::{Error, Result};
use crate::fields::Fields;

/// Days a support-a-creator code stays attached after being set.
pub const CREATOR_CODE_VALID_DAYS: i64 = 14;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonCoreProfile {
    pub items: Vec<ItemProfile>,

    pub promotion_status: Option<PromotionStatus>,
    pub survey_data: Option<Value>,
    pub intro_game_played: bool,

    pub vbucks_purchase_history: Option<VBucksPurchaseHistory>,
    pub money_purchase_history: Option<MoneyPurchaseHistory>,
    pub gift_history: Option<GiftHistory>,
    pub undo_cooldowns: Vec<UndoCooldown>,

    pub creator_code: Option<String>,
    pub creator_code_owner_id: Option<String>,
    pub creator_code_set_on: Option<DateTime<Utc>>,

    pub current_vbucks_platform: VBucksPlatform,
    pub receipt_ids: Vec<String>,

    pub allowed_sending_gifts: bool,
    pub allowed_receiving_gifts: bool,

    pub enabled_2fa: bool,

    pub ban_status: Option<BanStatus>,
    pub ban_history: Option<BanHistory>,

    #[serde(skip)]
    pub raw_data: Value,
}

impl CommonCoreProfile {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let doc = Fields::new(raw, "CommonCoreProfile")?;
        let items = parse_items(doc)?;
        let stats = doc
            .object("stats", "ProfileStats")?
            .object("attributes", "CommonCoreStats")?;

        let receipt_ids = match stats.opt_object("in_app_purchases", "InAppPurchases")? {
            Some(purchases) => purchases.or("receipts", Vec::new())?,
            None => Vec::new(),
        };

        let profile = Self {
            promotion_status: stats
                .get("promotion")
                .map(PromotionStatus::from_value)
                .transpose()?,
            survey_data: stats.opt("survey_data")?,
            intro_game_played: stats.or("intro_game_played", false)?,

            vbucks_purchase_history: stats
                .get("mtx_purchase_history")
                .map(VBucksPurchaseHistory::from_value)
                .transpose()?,
            money_purchase_history: stats
                .get("rmt_purchase_history")
                .map(MoneyPurchaseHistory::from_value)
                .transpose()?,
            gift_history: stats
                .get("gift_history")
                .map(GiftHistory::from_value)
                .transpose()?,
            undo_cooldowns: stats.list_or_empty("undo_cooldowns", UndoCooldown::from_value)?,

            creator_code: stats.opt("mtx_affiliate")?,
            creator_code_owner_id: stats.opt("mtx_affiliate_id")?,
            creator_code_set_on: stats.opt_timestamp("mtx_affiliate_set_time")?,

            current_vbucks_platform: stats.req::<&str>("current_mtx_platform")?.parse()?,
            receipt_ids,

            allowed_sending_gifts: stats.req("allowed_to_send_gifts")?,
            allowed_receiving_gifts: stats.req("allowed_to_receive_gifts")?,

            enabled_2fa: stats.or("mfa_enabled", false)?,

            ban_status: stats.get("ban_status").map(BanStatus::from_value).transpose()?,
            ban_history: stats
                .get("ban_history")
                .map(BanHistory::from_value)
                .transpose()?,

            items,
            raw_data: raw.clone(),
        };

        debug!(
            items = profile.items.len(),
            platform = %profile.current_vbucks_platform,
            "Parsed common_core profile"
        );
        Ok(profile)
    }

    pub fn has_custom_games_access(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.id == "athenacancreatecustomgames_token")
    }

    pub fn has_save_the_world_access(&self) -> bool {
        self.items.iter().any(|item| item.id == "campaignaccess")
    }

    /// Highest founder pack owned, from `Token:founderspack_<tier>` items.
    pub fn save_the_world_founder_pack(&self) -> Result<Option<SaveTheWorldFounderPack>> {
        let mut best: Option<i64> = None;
        for item in &self.items {
            if item.kind != "Token" || !item.id.starts_with("founderspack_") {
                continue;
            }
            let suffix = item.id.split('_').nth(1).unwrap_or_default();
            let tier: i64 = suffix.parse().map_err(|_| Error::MalformedComposite {
                context: "FounderPackToken",
                value: item.id.clone(),
            })?;
            best = best.max(Some(tier));
        }
        best.map(SaveTheWorldFounderPack::try_from).transpose()
    }

    pub fn has_valid_creator_code(&self) -> bool {
        self.has_valid_creator_code_at(Utc::now())
    }

    /// A code (or its owner id) is set and was set fewer than 14 whole days before `now`.
    pub fn has_valid_creator_code_at(&self, now: DateTime<Utc>) -> bool {
        if self.creator_code.is_none() && self.creator_code_owner_id.is_none() {
            return false;
        }
        self.creator_code_set_on
            .is_some_and(|set_on| (now - set_on).num_days() < CREATOR_CODE_VALID_DAYS)
    }

    /// STW + purchased + free V-Bucks, minus debt. Sums saturate at the `i64` bounds.
    pub fn overall_vbucks_count(
        &self,
        platform: Option<VBucksPlatform>,
        strict: bool,
    ) -> Result<i64> {
        Ok(self
            .save_the_world_vbucks()
            .saturating_add(self.purchased_vbucks(platform, strict)?)
            .saturating_add(self.free_obtained_vbucks())
            .saturating_sub(self.vbucks_debt()))
    }

    pub fn save_the_world_vbucks(&self) -> i64 {
        self.sum_quantity(|item| item.is("Currency", "MtxComplimentary"))
    }

    /// Purchased and bonus V-Bucks.
    ///
    /// With `platform` unset every platform counts. Otherwise, unless `strict`,
    /// any non-Nintendo platform expands to all non-Nintendo platforms while
    /// Nintendo stays on its own; Nintendo balances must be asked for explicitly.
    pub fn purchased_vbucks(&self, platform: Option<VBucksPlatform>, strict: bool) -> Result<i64> {
        let platforms: Vec<VBucksPlatform> = match platform {
            None => Vec::new(),
            Some(p) if strict || p == VBucksPlatform::Nintendo => vec![p],
            Some(_) => VBucksPlatform::ALL
                .iter()
                .copied()
                .filter(|p| *p != VBucksPlatform::Nintendo)
                .collect(),
        };

        let mut total: i64 = 0;
        for item in &self.items {
            if !(item.is("Currency", "MtxPurchased") || item.is("Currency", "MtxPurchaseBonus")) {
                continue;
            }
            if platform.is_some() {
                let item_platform = item
                    .attributes
                    .get("platform")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::MissingField {
                        context: "CurrencyItem",
                        field: "platform".to_string(),
                    })?;
                if !platforms.iter().any(|p| p.as_str() == item_platform) {
                    continue;
                }
            }
            total = total.saturating_add(item.quantity);
        }
        Ok(total)
    }

    pub fn free_obtained_vbucks(&self) -> i64 {
        self.sum_quantity(|item| item.id == "MtxGiveaway")
    }

    pub fn vbucks_debt(&self) -> i64 {
        self.sum_quantity(|item| item.id == "MtxDebt")
    }

    pub fn banners(&self) -> Vec<&ItemProfile> {
        self.items_of_type("HomebaseBannerIcon")
    }

    pub fn banner_colors(&self) -> Vec<&ItemProfile> {
        self.items_of_type("HomebaseBannerColor")
    }

    fn sum_quantity(&self, pred: impl Fn(&ItemProfile) -> bool) -> i64 {
        self.items
            .iter()
            .filter(|item| pred(item))
            .fold(0, |total, item| total.saturating_add(item.quantity))
    }
}

impl ProfileItems for CommonCoreProfile {
    fn items(&self) -> &[ItemProfile] {
        &self.items
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionStatus {
    pub name: String,
    pub eligible: bool,
    pub redeemed: bool,
    pub notified: bool,
}

impl PromotionStatus {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "PromotionStatus")?;
        Ok(Self {
            name: f.req("promoName")?,
            eligible: f.req("eligible")?,
            redeemed: f.req("redeemed")?,
            notified: f.req("notified")?,
        })
    }
}

/// Cooldown before an offer can be undone again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndoCooldown {
    pub offer_id: String,
    pub expires_at: DateTime<Utc>,
}

impl UndoCooldown {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "UndoCooldown")?;
        Ok(Self {
            offer_id: f.req("offerId")?,
            expires_at: f.timestamp("cooldownExpires")?,
        })
    }
}
