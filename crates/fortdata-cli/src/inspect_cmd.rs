//! Document inspection subcommands: locker, vbucks, code, store, discovery.
//!
//! Each command parses one document and writes its typed form as JSON through
//! [`write_json`].

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use fortdata_core::creative::CreativeDiscovery;
use fortdata_core::profile::{BattleRoyaleProfile, CommonCoreProfile, ProfileItems, profile_document};
use fortdata_core::store::Store;
use fortdata_core::{Code, SaveTheWorldProfile, VBucksPlatform};

use crate::output::{read_document, write_json};

/// Print the locker loadout of an athena or campaign profile.
///
/// The profile is picked from `profileId`; anything but `campaign` is read as athena.
pub fn locker(path: &Path, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let raw = read_document(path)?;
    let doc = profile_document(&raw);
    let profile_id = doc.get("profileId").and_then(Value::as_str).unwrap_or("athena");
    info!(profile_id, "Reading locker");

    let locker = if profile_id == "campaign" {
        SaveTheWorldProfile::from_value(doc)?.locker()
    } else {
        BattleRoyaleProfile::from_value(doc)?.locker()
    }
    .with_context(|| format!("No locker in {}", path.display()))?;
    write_json(out, &locker, pretty)
}

#[derive(Debug, Serialize)]
pub struct VBucksReport {
    pub platform: Option<VBucksPlatform>,
    pub strict: bool,
    pub save_the_world: i64,
    pub purchased: i64,
    pub free_obtained: i64,
    pub debt: i64,
    pub overall: i64,
}

impl VBucksReport {
    pub fn new(
        profile: &CommonCoreProfile,
        platform: Option<VBucksPlatform>,
        strict: bool,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            platform,
            strict,
            save_the_world: profile.save_the_world_vbucks(),
            purchased: profile.purchased_vbucks(platform, strict)?,
            free_obtained: profile.free_obtained_vbucks(),
            debt: profile.vbucks_debt(),
            overall: profile.overall_vbucks_count(platform, strict)?,
        })
    }
}

/// Print the V-Bucks breakdown of a `common_core` profile.
pub fn vbucks(
    path: &Path,
    platform: Option<VBucksPlatform>,
    strict: bool,
    pretty: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let raw = read_document(path)?;
    let profile = CommonCoreProfile::from_value(profile_document(&raw))
        .with_context(|| format!("Failed to parse {} as a common_core profile", path.display()))?;
    write_json(out, &VBucksReport::new(&profile, platform, strict)?, pretty)
}

pub fn code(path: &Path, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let raw = read_document(path)?;
    let code = Code::from_value(&raw)
        .with_context(|| format!("Failed to parse {} as a code", path.display()))?;
    write_json(out, &code, pretty)
}

pub fn store(path: &Path, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let raw = read_document(path)?;
    let store = Store::from_value(&raw)
        .with_context(|| format!("Failed to parse {} as a store catalog", path.display()))?;
    write_json(out, &store, pretty)
}

pub fn discovery(path: &Path, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let raw = read_document(path)?;
    let discovery = CreativeDiscovery::from_value(&raw)
        .with_context(|| format!("Failed to parse {} as creative discovery", path.display()))?;
    write_json(out, &discovery, pretty)
}
