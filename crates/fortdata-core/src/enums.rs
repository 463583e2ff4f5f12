//! Closed classification enumerations used by the profile queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Cosmetic item categories, keyed by their template type prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CosmeticType {
    #[serde(rename = "AthenaCharacter")]
    Outfit,
    #[serde(rename = "AthenaBackpack")]
    Backpack,
    #[serde(rename = "AthenaPickaxe")]
    HarvestingTool,
    #[serde(rename = "AthenaGlider")]
    Glider,
    #[serde(rename = "AthenaSkyDiveContrail")]
    Contrail,
    #[serde(rename = "AthenaDance")]
    Emote,
    #[serde(rename = "AthenaItemWrap")]
    Wrap,
    #[serde(rename = "AthenaMusicPack")]
    Music,
    #[serde(rename = "AthenaLoadingScreen")]
    LoadingScreen,
}

impl CosmeticType {
    pub const ALL: &'static [Self] = &[
        Self::Outfit,
        Self::Backpack,
        Self::HarvestingTool,
        Self::Glider,
        Self::Contrail,
        Self::Emote,
        Self::Wrap,
        Self::Music,
        Self::LoadingScreen,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outfit => "AthenaCharacter",
            Self::Backpack => "AthenaBackpack",
            Self::HarvestingTool => "AthenaPickaxe",
            Self::Glider => "AthenaGlider",
            Self::Contrail => "AthenaSkyDiveContrail",
            Self::Emote => "AthenaDance",
            Self::Wrap => "AthenaItemWrap",
            Self::Music => "AthenaMusicPack",
            Self::LoadingScreen => "AthenaLoadingScreen",
        }
    }
}

impl fmt::Display for CosmeticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CosmeticType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "cosmetic type",
                value: s.to_string(),
            })
    }
}

/// Storefront platform a V-Bucks balance was purchased on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VBucksPlatform {
    #[serde(rename = "EpicPC")]
    EpicPc,
    #[serde(rename = "EpicPCKorea")]
    EpicPcKorea,
    Epic,
    EpicAndroid,
    #[serde(rename = "PSN")]
    Psn,
    Live,
    #[serde(rename = "IOSAppStore")]
    IosAppStore,
    Nintendo,
    Samsung,
    Shared,
}

impl VBucksPlatform {
    pub const ALL: &'static [Self] = &[
        Self::EpicPc,
        Self::EpicPcKorea,
        Self::Epic,
        Self::EpicAndroid,
        Self::Psn,
        Self::Live,
        Self::IosAppStore,
        Self::Nintendo,
        Self::Samsung,
        Self::Shared,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EpicPc => "EpicPC",
            Self::EpicPcKorea => "EpicPCKorea",
            Self::Epic => "Epic",
            Self::EpicAndroid => "EpicAndroid",
            Self::Psn => "PSN",
            Self::Live => "Live",
            Self::IosAppStore => "IOSAppStore",
            Self::Nintendo => "Nintendo",
            Self::Samsung => "Samsung",
            Self::Shared => "Shared",
        }
    }
}

impl fmt::Display for VBucksPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VBucksPlatform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "V-Bucks platform",
                value: s.to_string(),
            })
    }
}

/// Save the World founder pack tier; ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SaveTheWorldFounderPack {
    Standard = 1,
    Deluxe = 2,
    SuperDeluxe = 3,
    Limited = 4,
    Ultimate = 5,
}

impl SaveTheWorldFounderPack {
    pub const fn tier(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for SaveTheWorldFounderPack {
    type Error = Error;

    fn try_from(tier: i64) -> Result<Self, Self::Error> {
        match tier {
            1 => Ok(Self::Standard),
            2 => Ok(Self::Deluxe),
            3 => Ok(Self::SuperDeluxe),
            4 => Ok(Self::Limited),
            5 => Ok(Self::Ultimate),
            other => Err(Error::UnknownVariant {
                kind: "founder pack tier",
                value: other.to_string(),
            }),
        }
    }
}
