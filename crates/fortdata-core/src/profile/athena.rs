//! Battle Royale (`athena`) profile.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::item::{Item, ItemProfile};
use super::{ProfileItems, parse_items};
use crate::error::Result;
use crate::fields::Fields;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleRoyaleProfile {
    pub items: Vec<ItemProfile>,

    pub account_level: i64,
    pub season: i64,
    pub season_level: i64,
    pub season_levels_purchased: i64,
    pub season_wins: i64,
    pub last_match_ended_at: Option<DateTime<Utc>>,

    pub total_season_battlestars: i64,
    pub battle_stars: i64,
    pub purchased_battlepass_offers: Vec<PurchasedBattlePassOffer>,

    pub total_season_style_points: i64,
    pub style_points: i64,

    pub lifetime_wins: i64,
    pub past_season_stats: Vec<PastSeasonStats>,

    pub saved_loadout_ids: Vec<String>,
    pub use_random_loadout: bool,
    pub last_applied_loadout_id: Option<String>,

    pub season_match_boost: i64,
    pub season_friend_match_boost: i64,

    pub has_claimed_2fa_reward: bool,
    pub has_ranked_access: bool,

    pub party_assist_quest: Option<String>,

    pub xp: i64,
    pub last_xp_interaction: Option<DateTime<Utc>>,
    pub supercharged_xp: i64,
    pub supercharged_xp_multiplier: Option<f64>,
    pub supercharged_xp_overflow: i64,
    pub supercharged_xp_exchange: Option<f64>,
    pub supercharged_xp_golden_path_granted: i64,
    pub supercharged_xp_cumulative: i64,
    pub supercharged_xp_consumed_cumulative: i64,

    pub has_purchased_battlepass: bool,
    pub battlepass_level: i64,
    pub battlepass_xp: Option<i64>,

    pub creative_dynamic_xp: Option<Value>,
    pub vote_data: Option<Value>,

    #[serde(skip)]
    pub raw_data: Value,
}

impl BattleRoyaleProfile {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let doc = Fields::new(raw, "BattleRoyaleProfile")?;
        let items = parse_items(doc)?;
        let stats = doc
            .object("stats", "ProfileStats")?
            .object("attributes", "BattleRoyaleStats")?;

        let season_wins = match stats.opt_object("season", "SeasonStats")? {
            Some(season) => season.or("numWins", 0)?,
            None => 0,
        };

        let profile = Self {
            account_level: stats.req("accountLevel")?,
            season: stats.req("season_num")?,
            season_level: stats.req("level")?,
            season_levels_purchased: stats.or("season_levels_purchased", 0)?,
            season_wins,
            last_match_ended_at: stats.opt_timestamp("last_match_end_datetime")?,

            total_season_battlestars: stats.or("battlestars_season_total", 0)?,
            battle_stars: stats.or("battlestars", 0)?,
            purchased_battlepass_offers: stats
                .list_or_empty("purchased_bp_offers", PurchasedBattlePassOffer::from_value)?,

            total_season_style_points: stats.or("style_points_season_total", 0)?,
            style_points: stats.or("style_points", 0)?,

            lifetime_wins: stats.or("lifetime_wins", 0)?,
            past_season_stats: stats.list_or_empty("past_seasons", PastSeasonStats::from_value)?,

            saved_loadout_ids: stats.req("loadouts")?,
            use_random_loadout: stats.or("use_random_loadout", false)?,
            last_applied_loadout_id: stats.opt("last_applied_loadout")?,

            season_match_boost: stats.or("season_match_boost", 0)?,
            season_friend_match_boost: stats.or("season_friend_match_boost", 0)?,

            has_claimed_2fa_reward: stats.or("mfa_reward_claimed", false)?,
            has_ranked_access: stats.or("habanero_unlocked", false)?,

            party_assist_quest: stats.opt("party_assist_quest")?,

            xp: stats.or("xp", 0)?,
            last_xp_interaction: stats.opt_timestamp("last_xp_interaction")?,
            supercharged_xp: stats.or("rested_xp", 0)?,
            supercharged_xp_multiplier: stats.opt("rested_xp_mult")?,
            supercharged_xp_overflow: stats.or("rested_xp_overflow", 0)?,
            supercharged_xp_exchange: stats.opt("rested_xp_exchange")?,
            supercharged_xp_golden_path_granted: stats.or("rested_xp_golden_path_granted", 0)?,
            supercharged_xp_cumulative: stats.or("rested_xp_cumulative", 0)?,
            supercharged_xp_consumed_cumulative: stats.or("rested_xp_consumed_cumulative", 0)?,

            has_purchased_battlepass: stats.or("book_purchased", false)?,
            battlepass_level: stats.req("book_level")?,
            battlepass_xp: stats.opt("book_xp")?,

            creative_dynamic_xp: stats.opt("creative_dynamic_xp")?,
            vote_data: stats.opt("vote_data")?,

            items,
            raw_data: raw.clone(),
        };

        debug!(
            items = profile.items.len(),
            season = profile.season,
            "Parsed athena profile"
        );
        Ok(profile)
    }

    /// Crown stats of the `VictoryCrown:defaultvictorycrown` item, if tracked.
    pub fn victory_crown_overview(&self) -> Result<Option<VictoryCrownOverview>> {
        let Some(item) = self
            .items
            .iter()
            .find(|item| item.is("VictoryCrown", "defaultvictorycrown"))
        else {
            return Ok(None);
        };
        item.attributes
            .get("victory_crown_account_data")
            .filter(|data| !data.is_null())
            .map(VictoryCrownOverview::from_value)
            .transpose()
    }
}

impl ProfileItems for BattleRoyaleProfile {
    fn items(&self) -> &[ItemProfile] {
        &self.items
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VictoryCrownOverview {
    pub has_crown: bool,
    pub crowns_bestowed: i64,
    pub crown_wins: i64,
}

impl VictoryCrownOverview {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "VictoryCrownOverview")?;
        Ok(Self {
            has_crown: f.req("has_victory_crown")?,
            crowns_bestowed: f.req("total_victory_crowns_bestowed_count")?,
            crown_wins: f.req("total_royal_royales_achieved_count")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PastSeasonStats {
    pub season: i64,
    pub wins: i64,
    pub xp: i64,
    pub level: i64,
    pub battlepass_xp: i64,
    pub battlepass_level: i64,
    pub has_purchased_battle_pass: bool,
    pub crown_wins: i64,
    #[serde(skip)]
    pub raw_data: Value,
}

impl PastSeasonStats {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "PastSeasonStats")?;
        Ok(Self {
            season: f.req("seasonNumber")?,
            wins: f.req("numWins")?,
            xp: f.req("seasonXp")?,
            level: f.req("seasonLevel")?,
            battlepass_xp: f.req("bookXp")?,
            battlepass_level: f.req("bookLevel")?,
            has_purchased_battle_pass: f.req("purchasedVIP")?,
            crown_wins: f.req("numRoyalRoyales")?,
            raw_data: raw.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchasedBattlePassOffer {
    pub offer_id: String,
    pub free_reward: bool,
    pub purchase_date: DateTime<Utc>,
    pub items: Vec<Item>,
    pub currency: String,
    pub currency_paid: i64,
    pub attributes: Option<Value>,
    #[serde(skip)]
    pub raw_data: Value,
}

impl PurchasedBattlePassOffer {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "PurchasedBattlePassOffer")?;
        Ok(Self {
            offer_id: f.req("offerId")?,
            free_reward: f.req("bIsFreePassReward")?,
            purchase_date: f.timestamp("purchaseDate")?,
            items: f.list("lootResult", Item::from_value)?,
            currency: f.req("currencyType")?,
            currency_paid: f.req("totalCurrencyPaid")?,
            attributes: f.opt("attributes")?,
            raw_data: raw.clone(),
        })
    }
}

/// Battle Royale stash; only the global gold bars balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BattleRoyaleInventory {
    pub global_gold: i64,
}

impl BattleRoyaleInventory {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "BattleRoyaleInventory")?;
        Ok(Self {
            global_gold: f.object("stash", "BattleRoyaleStash")?.req("globalcash")?,
        })
    }
}
