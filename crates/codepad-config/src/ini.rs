//! Minimal reader for the sectioned key-value files used by syntax themes.
//!
//! ```text
//! [colors]
//! keyword = #FF79C6
//! ; comments start with ';' or '#'
//! comment: #6272A4
//! ```
//!
//! Section names are kept as written, keys are lower-cased, values are
//! trimmed. A later duplicate key replaces the earlier one.

use std::collections::HashMap;

use anyhow::{bail, Result};

/// Parsed key-value document: section name -> (key -> value).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniDocument {
    /// Parses `text`, failing on lines that are neither a header, a
    /// key/value pair, a comment nor blank, and on keys outside a section.
    pub fn parse(text: &str) -> Result<Self> {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let Some(name) = rest.strip_suffix(']') else {
                    bail!("line {line_no}: unterminated section header");
                };
                let name = name.trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let Some(split_at) = line.find(|c: char| c == '=' || c == ':') else {
                bail!("line {line_no}: expected `key = value`, found {line:?}");
            };
            let key = line[..split_at].trim().to_lowercase();
            let value = line[split_at + 1..].trim().to_string();
            if key.is_empty() {
                bail!("line {line_no}: empty key");
            }
            let Some(section) = current.as_ref() else {
                bail!("line {line_no}: key {key:?} appears before any section header");
            };
            sections.entry(section.clone()).or_default().insert(key, value);
        }

        Ok(Self { sections })
    }

    /// Returns the value of `key` (case-insensitive) in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)?
            .get(&key.to_lowercase())
            .map(String::as_str)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Iterates the key/value pairs of one section in arbitrary order.
    pub fn section(&self, section: &str) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(|s| s.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}
