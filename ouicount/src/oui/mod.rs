//! IEEE OUI registry (MA-L) parsing.
//!
//! Only `(hex)` lines of the registry text dump are significant:
//!
//! ```text
//! 00-50-56   (hex)		VMware, Inc.
//! 005056     (base 16)		VMware, Inc.
//! ```
//!
//! The base-16 duplicate, address lines and the header are ignored.
pub mod fetch;

use std::collections::HashMap;

use tracing::debug;

use crate::error::OuiCountError;
use crate::mac::Prefix;

const HEX_MARKER: &str = "(hex)";

/// Prefix → organization name, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<Prefix, String>,
}

impl ReferenceTable {
    /// Parse registry text. Later entries for a prefix replace earlier ones.
    pub fn parse(content: &str) -> Result<Self, OuiCountError> {
        let mut entries = HashMap::new();

        for (idx, line) in content.lines().enumerate() {
            if !line.contains(HEX_MARKER) {
                continue;
            }

            let (hex, rest) = next_token(line);
            let prefix = parse_prefix(hex).ok_or_else(|| OuiCountError::MalformedRegistryLine {
                line_no: idx + 1,
                line: line.to_string(),
            })?;
            // Skip the "(hex)" tag itself.
            let (_, name) = next_token(rest);

            if let Some(previous) = entries.insert(prefix, name.trim().to_string()) {
                debug!(%prefix, %previous, "Duplicate registry prefix overwritten");
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, prefix: &Prefix) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Prefix, String)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (Prefix, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Split off the first whitespace-delimited token, returning it and the rest.
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Parse `XX-XX-XX` into a prefix. Each group must be exactly two hex digits.
fn parse_prefix(hex: &str) -> Option<Prefix> {
    let groups: Vec<&str> = hex.split('-').collect();
    if groups.len() != 3 {
        return None;
    }

    let mut octets = [0u8; 3];
    for (slot, group) in octets.iter_mut().zip(&groups) {
        if group.len() != 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        *slot = u8::from_str_radix(group, 16).ok()?;
    }
    Some(Prefix::from(octets))
}
