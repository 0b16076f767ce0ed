#![deny(missing_docs)]

//! # Metadata Flags
//!
//! Parses the `key="value"` pair syntax of `--info` and `--servers`.
//!
//! ```text
//! --info    title="My API",version="2.0"
//! --servers url="https://a",description="Prod";url="https://b"
//! ```
//!
//! Values may be quoted; quoted values can contain `,` and `;`.

use crate::error::{CliError, CliResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

static PAIR_RE: OnceLock<Regex> = OnceLock::new();

fn pair_regex() -> &'static Regex {
    PAIR_RE.get_or_init(|| {
        Regex::new(r#"\s*([,;]?)\s*([A-Za-z_][A-Za-z0-9_.-]*)\s*=\s*(?:"([^"]*)"|([^,;"]*))"#)
            .expect("Invalid regex")
    })
}

/// One `key=value` pair and the separator that preceded it.
struct Pair {
    separator: Option<char>,
    key: String,
    value: String,
}

fn parse_pairs(text: &str) -> CliResult<Vec<Pair>> {
    let mut pairs = Vec::new();
    let mut cursor = 0;

    for caps in pair_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() != cursor {
            return Err(malformed(text, cursor));
        }
        let separator = caps.get(1).and_then(|m| m.as_str().chars().next());
        if pairs.is_empty() != separator.is_none() {
            return Err(malformed(text, whole.start()));
        }
        let value = caps
            .get(3)
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        pairs.push(Pair {
            separator,
            key: caps[2].to_string(),
            value: value.to_string(),
        });
        cursor = whole.end();
    }

    if !text[cursor..].trim().is_empty() {
        return Err(malformed(text, cursor));
    }
    Ok(pairs)
}

fn malformed(text: &str, at: usize) -> CliError {
    CliError::General(format!(
        "Malformed metadata '{}' near position {}; expected key=\"value\" pairs",
        text, at
    ))
}

/// Parses `title="My API",version="2.0"` into an ordered map.
///
/// Later keys overwrite earlier ones.
pub fn parse_info(text: &str) -> CliResult<BTreeMap<String, String>> {
    let mut info = BTreeMap::new();
    for pair in parse_pairs(text)? {
        if pair.separator == Some(';') {
            return Err(CliError::General(format!(
                "--info takes a single entry, found ';' in '{}'",
                text
            )));
        }
        info.insert(pair.key, pair.value);
    }
    Ok(info)
}

/// Parses `;`-separated server entries, each a `,`-separated pair list.
pub fn parse_servers(text: &str) -> CliResult<Vec<BTreeMap<String, String>>> {
    let mut servers: Vec<BTreeMap<String, String>> = Vec::new();
    for pair in parse_pairs(text)? {
        if pair.separator != Some(',') {
            servers.push(BTreeMap::new());
        }
        if let Some(server) = servers.last_mut() {
            server.insert(pair.key, pair.value);
        }
    }
    Ok(servers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_info() {
        let info = parse_info(r#"title="My API", version="2.0""#).unwrap();
        assert_eq!(info["title"], "My API");
        assert_eq!(info["version"], "2.0");
    }

    #[test]
    fn test_parse_info_unquoted_and_quoted_separators() {
        let info = parse_info(r#"title="Shop, Inc.",version=3"#).unwrap();
        assert_eq!(info["title"], "Shop, Inc.");
        assert_eq!(info["version"], "3");
    }

    #[test]
    fn test_parse_info_rejects_garbage() {
        assert!(parse_info("title").is_err());
        assert!(parse_info(r#"title="A" junk"#).is_err());
        assert!(parse_info(r#"title="A";version="1""#).is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_info("").unwrap().is_empty());
        assert!(parse_servers("  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_servers() {
        let servers =
            parse_servers(r#"url="https://a",description="Prod";url="https://b""#).unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0]["url"], "https://a");
        assert_eq!(servers[0]["description"], "Prod");
        assert_eq!(servers[1]["url"], "https://b");
        assert!(!servers[1].contains_key("description"));
    }
}
