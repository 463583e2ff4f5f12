//! `fortdata profile`: parse an MCP profile and print a summary.
//!
//! Summaries hold counts and derived flags; `--full` prints the whole typed profile.
//! Both are written as JSON through [`write_json`].

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;

use fortdata_core::profile::{
    BattleRoyaleProfile, CommonCoreProfile, ProfileItems, SaveTheWorldProfile, VictoryCrownOverview,
    profile_document,
};
use fortdata_core::{SaveTheWorldFounderPack, VBucksPlatform};

use crate::output::{read_document, write_json};

/// Which profile a document holds.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileKind {
    Athena,
    CommonCore,
    Campaign,
}

#[derive(Debug, Serialize)]
pub struct AthenaSummary {
    pub account_level: i64,
    pub season: i64,
    pub season_level: i64,
    pub season_wins: i64,
    pub lifetime_wins: i64,
    pub battlepass_level: i64,
    pub has_purchased_battlepass: bool,
    pub items: usize,
    pub cosmetics: usize,
    pub legacies: usize,
    pub victory_crowns: Option<VictoryCrownOverview>,
}

impl AthenaSummary {
    pub fn new(profile: &BattleRoyaleProfile) -> anyhow::Result<Self> {
        Ok(Self {
            account_level: profile.account_level,
            season: profile.season,
            season_level: profile.season_level,
            season_wins: profile.season_wins,
            lifetime_wins: profile.lifetime_wins,
            battlepass_level: profile.battlepass_level,
            has_purchased_battlepass: profile.has_purchased_battlepass,
            items: profile.items.len(),
            cosmetics: profile.cosmetics(&[]).len(),
            legacies: profile.legacies().len(),
            victory_crowns: profile.victory_crown_overview()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CommonCoreSummary {
    pub current_vbucks_platform: VBucksPlatform,
    pub overall_vbucks: i64,
    pub creator_code: Option<String>,
    pub has_valid_creator_code: bool,
    pub has_save_the_world_access: bool,
    pub has_custom_games_access: bool,
    pub founder_pack: Option<SaveTheWorldFounderPack>,
    pub gifts_remaining_today: Option<i64>,
    pub receipts: usize,
    pub banned: bool,
}

impl CommonCoreSummary {
    pub fn new(profile: &CommonCoreProfile) -> anyhow::Result<Self> {
        Ok(Self {
            current_vbucks_platform: profile.current_vbucks_platform,
            overall_vbucks: profile.overall_vbucks_count(None, false)?,
            creator_code: profile.creator_code.clone(),
            has_valid_creator_code: profile.has_valid_creator_code(),
            has_save_the_world_access: profile.has_save_the_world_access(),
            has_custom_games_access: profile.has_custom_games_access(),
            founder_pack: profile.save_the_world_founder_pack()?,
            gifts_remaining_today: profile.gift_history.as_ref().map(|h| h.daily_remaining()),
            receipts: profile.receipt_ids.len(),
            banned: profile.ban_status.is_some(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CampaignSummary {
    pub level: i64,
    pub xp: i64,
    pub items: usize,
    pub cosmetics: usize,
    pub total_days_logged_in: Option<i64>,
}

impl CampaignSummary {
    pub fn new(profile: &SaveTheWorldProfile) -> Self {
        Self {
            level: profile.level,
            xp: profile.xp,
            items: profile.items.len(),
            cosmetics: profile.cosmetics(&[]).len(),
            total_days_logged_in: profile
                .daily_rewards
                .as_ref()
                .map(|rewards| rewards.total_days_logged_in),
        }
    }
}

/// Execute `fortdata profile`.
pub fn run(
    kind: ProfileKind,
    path: &Path,
    full: bool,
    pretty: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let raw = read_document(path)?;
    let doc = profile_document(&raw);
    let context = || format!("Failed to parse {} as a {kind:?} profile", path.display());

    match kind {
        ProfileKind::Athena => {
            let profile = BattleRoyaleProfile::from_value(doc).with_context(context)?;
            if full {
                write_json(out, &profile, pretty)
            } else {
                write_json(out, &AthenaSummary::new(&profile)?, pretty)
            }
        }
        ProfileKind::CommonCore => {
            let profile = CommonCoreProfile::from_value(doc).with_context(context)?;
            if full {
                write_json(out, &profile, pretty)
            } else {
                write_json(out, &CommonCoreSummary::new(&profile)?, pretty)
            }
        }
        ProfileKind::Campaign => {
            let profile = SaveTheWorldProfile::from_value(doc).with_context(context)?;
            if full {
                write_json(out, &profile, pretty)
            } else {
                write_json(out, &CampaignSummary::new(&profile), pretty)
            }
        }
    }
}
