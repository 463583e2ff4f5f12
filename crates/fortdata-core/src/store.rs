//! Item shop catalog.
//!
//! A catalog response lists named storefronts, each holding `catalogEntries`.
//! [`Store`] picks the sections it knows by name; a section missing from the
//! response is logged and left empty.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fields::{Fields, split_type_id};

#[allow(clippy::expect_used)]
static PANEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Panel(\d+)").expect("static regex is valid"));

#[allow(clippy::expect_used)]
static BUNDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[VIRTUAL\][0-9]+ x (.*) for [0-9]+ .*$").expect("static regex is valid")
});

#[allow(clippy::expect_used)]
static BUNDLE_SEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", [0-9]+ x ").expect("static regex is valid"));

#[allow(clippy::expect_used)]
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][^A-Z]*").expect("static regex is valid"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Store {
    pub daily_purchase_hours: i64,
    pub refresh_interval_hours: i64,
    pub expires_at: DateTime<Utc>,
    pub featured_items: Vec<StoreItem>,
    pub daily_items: Vec<StoreItem>,
    pub special_featured_items: Vec<StoreItem>,
    pub special_daily_items: Vec<StoreItem>,
    pub stw_rotational_items: Vec<StoreItem>,
    pub stw_event_items: Vec<StoreItem>,
    pub special_offer_items: Vec<StoreItem>,
}

#[derive(Clone, Copy)]
enum Section {
    Featured,
    Daily,
    Offer,
}

impl Store {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "Store")?;
        let storefronts: &[Value] = f.req("storefronts")?;

        let section = |name: &str, kind: Section| -> Result<Vec<StoreItem>> {
            let Some(front) = find_storefront(storefronts, name) else {
                warn!(storefront = name, "Storefront missing from catalog");
                return Ok(Vec::new());
            };
            let front = Fields::new(front, "Storefront")?;
            front.list("catalogEntries", |entry| StoreItem::from_value(entry, kind))
        };

        let store = Self {
            daily_purchase_hours: f.req("dailyPurchaseHrs")?,
            refresh_interval_hours: f.req("refreshIntervalHrs")?,
            expires_at: f.timestamp("expiration")?,
            featured_items: section("BRWeeklyStorefront", Section::Featured)?,
            daily_items: section("BRDailyStorefront", Section::Daily)?,
            special_featured_items: section("BRSpecialFeatured", Section::Featured)?,
            special_daily_items: section("BRSpecialDaily", Section::Daily)?,
            stw_rotational_items: section("STWRotationalEventStorefront", Section::Daily)?,
            stw_event_items: section("STWSpecialEventStorefront", Section::Daily)?,
            special_offer_items: section("BRStarterKits", Section::Offer)?,
        };

        debug!(
            featured = store.featured_items.len(),
            daily = store.daily_items.len(),
            expires_at = %store.expires_at,
            "Parsed store catalog"
        );
        Ok(store)
    }

    /// Start of the current shop day.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.expires_at - Duration::days(1)
    }
}

fn find_storefront<'a>(storefronts: &'a [Value], name: &str) -> Option<&'a Value> {
    storefronts
        .iter()
        .find(|front| front.get("name").and_then(Value::as_str) == Some(name))
}

/// Section-specific data of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreItemKind {
    /// Featured entry; `panel` is its position from the left.
    Featured { panel: u32 },
    Daily,
    /// Starter pack or other real-money offer.
    Offer {
        title: String,
        description: String,
        app_store_id: String,
        sort_priority: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreItem {
    pub dev_name: String,
    pub asset_path: Option<String>,
    pub gifts_enabled: bool,
    /// `-1` means unlimited, as for the weekly and monthly limits.
    pub daily_limit: i64,
    pub weekly_limit: i64,
    pub monthly_limit: i64,
    pub offer_id: String,
    pub offer_type: String,
    pub price: i64,
    pub refundable: bool,
    pub item_grants: Vec<Value>,
    pub meta_info: Vec<Value>,
    pub meta: Map<String, Value>,
    pub kind: StoreItemKind,
}

/// An item granted by purchasing a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemGrant {
    #[serde(rename = "type")]
    pub kind: String,
    pub asset: String,
    pub quantity: i64,
}

impl StoreItem {
    fn from_value(raw: &Value, section: Section) -> Result<Self> {
        let f = Fields::new(raw, "StoreItem")?;

        let gifts_enabled = match f.opt_object("giftInfo", "GiftInfo")? {
            Some(info) => info.req("bIsEnabled")?,
            None => false,
        };
        let price = f
            .get("prices")
            .and_then(|prices| prices.get(0))
            .and_then(|price| price.get("finalPrice"))
            .and_then(Value::as_i64)
            .unwrap_or(0);

        let kind = match section {
            Section::Featured => StoreItemKind::Featured {
                panel: panel_number(f)?,
            },
            Section::Daily => StoreItemKind::Daily,
            Section::Offer => {
                let ids: &[Value] = f.req("appStoreId")?;
                let app_store_id = ids
                    .get(1)
                    .and_then(Value::as_str)
                    .ok_or_else(|| f.missing("appStoreId[1]"))?;
                StoreItemKind::Offer {
                    title: f.req("title")?,
                    description: f.req("description")?,
                    app_store_id: app_store_id.to_string(),
                    sort_priority: f.req("sortPriority")?,
                }
            }
        };

        Ok(Self {
            dev_name: f.req("devName")?,
            asset_path: f.opt("displayAssetPath")?,
            gifts_enabled,
            daily_limit: f.req("dailyLimit")?,
            weekly_limit: f.req("weeklyLimit")?,
            monthly_limit: f.req("monthlyLimit")?,
            offer_id: f.req("offerId")?,
            offer_type: f.req("offerType")?,
            price,
            refundable: f.req("refundable")?,
            item_grants: f.req::<&[Value]>("itemGrants")?.to_vec(),
            meta_info: f.or::<&[Value]>("metaInfo", &[])?.to_vec(),
            meta: f.or("meta", Map::new())?,
            kind,
        })
    }

    /// Asset name from the display asset path, usually a CID or similar.
    pub fn asset(&self) -> Option<&str> {
        self.asset_path
            .as_deref()
            .and_then(|path| path.split_once('.'))
            .map(|(_, asset)| asset)
            .filter(|asset| !asset.is_empty())
    }

    /// Display names encoded in a bundle dev name such as
    /// `[VIRTUAL]1 x Renegade Raider, 1 x Rose Glider for 1200 MtxCurrency`.
    pub fn display_names(&self) -> Vec<&str> {
        BUNDLE_RE
            .captures(&self.dev_name)
            .and_then(|caps| caps.get(1))
            .map(|names| BUNDLE_SEP_RE.split(names.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn encryption_key(&self) -> Option<&str> {
        self.meta_info
            .iter()
            .find(|meta| meta.get("key").and_then(Value::as_str) == Some("EncryptionKey"))
            .and_then(|meta| meta.get("value"))
            .and_then(Value::as_str)
    }

    /// Whether the entry is in the shop for the first time.
    pub fn is_new(&self) -> bool {
        self.meta_info.iter().any(|meta| {
            meta.get("value")
                .and_then(Value::as_str)
                .is_some_and(|value| value.eq_ignore_ascii_case("new"))
        })
    }

    /// Banner text shown on the tile, e.g. `CollectTheSet` becomes `Collect The Set`.
    pub fn violator(&self) -> Option<String> {
        let raw = self.meta.get("BannerOverride").and_then(Value::as_str)?;
        if raw.is_empty() {
            return None;
        }
        let words: Vec<&str> = WORD_RE.find_iter(raw).map(|m| m.as_str()).collect();
        Some(words.join(" "))
    }

    pub fn grants(&self) -> Result<Vec<ItemGrant>> {
        self.item_grants
            .iter()
            .map(|grant| {
                let f = Fields::new(grant, "ItemGrant")?;
                let (kind, asset) = split_type_id(f.req("templateId")?, f.context())?;
                Ok(ItemGrant {
                    kind,
                    asset,
                    quantity: f.req("quantity")?,
                })
            })
            .collect()
    }
}

fn panel_number(f: Fields<'_>) -> Result<u32> {
    let categories: &[Value] = f.req("categories")?;
    let category = categories
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| f.missing("categories[0]"))?;
    PANEL_RE
        .captures(category)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .ok_or_else(|| Error::MalformedComposite {
            context: "StoreItem",
            value: category.to_string(),
        })
}
