//! Top-level subcommands of the `fortdata` binary.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use fortdata_core::VBucksPlatform;

use crate::inspect_cmd;
use crate::profile_cmd::{self, ProfileKind};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize an MCP profile (bare profile or QueryProfile response)
    Profile {
        /// Profile the document holds
        #[arg(value_enum)]
        kind: ProfileKind,
        /// Path to the JSON document
        file: PathBuf,
        /// Print the whole typed profile instead of a summary
        #[arg(long)]
        full: bool,
    },
    /// Print the cosmetic locker of an athena or campaign profile
    Locker {
        file: PathBuf,
    },
    /// Break down V-Bucks balances of a common_core profile
    Vbucks {
        file: PathBuf,
        /// Only count balances purchased on this platform (e.g. EpicPC, PSN, Nintendo)
        #[arg(short, long)]
        platform: Option<VBucksPlatform>,
        /// Count the given platform only, without pooling shared platforms
        #[arg(long, requires = "platform")]
        strict: bool,
    },
    /// Parse a redeemable code record
    Code {
        file: PathBuf,
    },
    /// Parse an item shop catalog
    Store {
        file: PathBuf,
    },
    /// Parse a creative discovery response
    Discovery {
        file: PathBuf,
    },
}

/// Execute a subcommand, writing its JSON output to `out`.
pub fn run(command: Command, pretty: bool, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Profile { kind, file, full } => profile_cmd::run(kind, &file, full, pretty, out),
        Command::Locker { file } => inspect_cmd::locker(&file, pretty, out),
        Command::Vbucks {
            file,
            platform,
            strict,
        } => inspect_cmd::vbucks(&file, platform, strict, pretty, out),
        Command::Code { file } => inspect_cmd::code(&file, pretty, out),
        Command::Store { file } => inspect_cmd::store(&file, pretty, out),
        Command::Discovery { file } => inspect_cmd::discovery(&file, pretty, out),
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Test wrapper to parse CLI arguments.
    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn parse_profile_kind() {
        let cli = TestCli::parse_from(["test", "profile", "common-core", "cc.json", "--full"]);
        match cli.command {
            Command::Profile { kind, file, full } => {
                assert_eq!(kind, ProfileKind::CommonCore);
                assert_eq!(file, PathBuf::from("cc.json"));
                assert!(full);
            }
            other => panic!("Expected Profile, got {other:?}"),
        }
    }

    #[test]
    fn parse_vbucks_platform() {
        let cli = TestCli::parse_from(["test", "vbucks", "cc.json", "--platform", "PSN", "--strict"]);
        match cli.command {
            Command::Vbucks {
                platform, strict, ..
            } => {
                assert_eq!(platform, Some(VBucksPlatform::Psn));
                assert!(strict);
            }
            other => panic!("Expected Vbucks, got {other:?}"),
        }
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert!(TestCli::try_parse_from(["test", "vbucks", "cc.json", "--platform", "Dreamcast"]).is_err());
    }

    #[test]
    fn strict_requires_platform() {
        assert!(TestCli::try_parse_from(["test", "vbucks", "cc.json", "--strict"]).is_err());
    }

    #[test]
    fn unknown_profile_kind_is_rejected() {
        assert!(TestCli::try_parse_from(["test", "profile", "theater", "p.json"]).is_err());
    }
}
