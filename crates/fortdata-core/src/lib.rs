//! fortdata Core Library
//!
//! Typed views over Fortnite backend documents:
//! - Redeemable codes
//! - MCP profiles (athena, `common_core`, campaign), their items, lockers and histories
//! - Item shop catalog and creative discovery
//! - Configuration resolution and tracing setup shared with the CLI

pub mod code;
pub mod config;
pub mod creative;
pub mod enums;
pub mod error;
pub mod fields;
pub mod profile;
pub mod store;
pub mod tracing_init;

pub use code::Code;
pub use config::Config;
pub use enums::{CosmeticType, SaveTheWorldFounderPack, VBucksPlatform};
pub use error::{Error, Result};
pub use profile::{BattleRoyaleProfile, CommonCoreProfile, ProfileItems, SaveTheWorldProfile};
