//! Document input and JSON output helpers shared by the subcommands.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

/// Read and parse a JSON document.
pub fn read_document(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Write `value` as JSON followed by a newline.
pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_and_pretty_output() {
        let value = json!({"a": 1});
        let mut compact = Vec::new();
        write_json(&mut compact, &value, false).unwrap();
        assert_eq!(String::from_utf8(compact).unwrap(), "{\"a\":1}\n");

        let mut pretty = Vec::new();
        write_json(&mut pretty, &value, true).unwrap();
        assert_eq!(String::from_utf8(pretty).unwrap(), "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn read_document_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));

        let missing = tmp.path().join("missing.json");
        assert!(read_document(&missing).is_err());
    }
}
