//! Section-based `key = value` documents
//!
//! Values are read with `rust-ini`: `[SECTION]` headers, `key = value` or
//! `key: value` entries, full-line `#`/`;` comments and indented continuation
//! lines. Section and key names are case-sensitive and values are trimmed.
//!
//! Before handing text to the INI reader, [`check_structure`] rejects
//! duplicate sections or keys, entries outside a section and lines without a
//! delimiter. Those are fatal, with the offending line number.

use crate::error::{Result, SeedVaultError};
use ini::{Ini, ParseOption};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// One `[NAME]` block with its entries in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: Vec::new() }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }
}

/// Ordered collection of sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: Vec<Section>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a document from a file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
            return Err(SeedVaultError::ConfigNotFound { path });
        }

        let file = fs::File::open(path).map_err(|e| SeedVaultError::ConfigUnreadable {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_reader(file)
    }

    /// Read a document from an open stream
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| SeedVaultError::ConfigUnreadable { reason: e.to_string() })?;
        Self::parse(&text)
    }

    /// Parse document text
    pub fn parse(text: &str) -> Result<Self> {
        check_structure(text)?;

        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, options)
            .map_err(|e| syntax(e.line, e.msg.to_string()))?;

        let mut doc = ConfigDocument::new();
        for (name, properties) in ini.iter() {
            // Entries outside a section were rejected above
            let Some(name) = name else { continue };
            let mut section = Section::new(name.trim());
            for (key, value) in properties.iter() {
                section.entries.push((key.trim().to_string(), clean_value(value)));
            }
            doc.sections.push(section);
        }
        Ok(doc)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Raw value of `key` in `section`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Create `name` if it does not exist yet
    pub fn add_section(&mut self, name: &str) {
        if !self.has_section(name) {
            self.sections.push(Section::new(name));
        }
    }

    /// Set a value, creating the section when needed
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.add_section(section);
        if let Some(target) = self.sections.iter_mut().find(|s| s.name == section) {
            target.set(key, value.into());
        }
    }

    /// Render as text; multi-line values are written as continuation lines
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
            for (key, value) in &section.entries {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(&value.replace('\n', "\n\t"));
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Write the rendered document to `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

impl FromStr for ConfigDocument {
    type Err = SeedVaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Line-level checks the INI reader does not make
fn check_structure(text: &str) -> Result<()> {
    let mut sections: HashSet<&str> = HashSet::new();
    let mut keys: HashSet<&str> = HashSet::new();
    let mut current: Option<&str> = None;
    let mut in_entry = false;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim_end_matches('\r');
        let trimmed = line.trim();

        if trimmed.is_empty() {
            in_entry = false;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }
        if in_entry && line.starts_with(char::is_whitespace) {
            continue;
        }

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let name = trimmed[1..trimmed.len() - 1].trim();
            if name.is_empty() {
                return Err(syntax(line_no, "empty section name"));
            }
            if !sections.insert(name) {
                return Err(syntax(line_no, format!("section '{}' already exists", name)));
            }
            current = Some(name);
            keys.clear();
            in_entry = false;
            continue;
        }

        let Some(section) = current else {
            return Err(syntax(line_no, "entry found before any [SECTION] header"));
        };
        let Some(split) = trimmed.find(['=', ':']) else {
            return Err(syntax(line_no, format!("expected 'key = value', found '{}'", trimmed)));
        };
        let key = trimmed[..split].trim();
        if key.is_empty() {
            return Err(syntax(line_no, "entry has an empty key"));
        }
        if !keys.insert(key) {
            return Err(syntax(
                line_no,
                format!("key '{}' already exists in section '{}'", key, section),
            ));
        }
        in_entry = true;
    }
    Ok(())
}

/// Trim every line of a value and drop blank continuation lines
fn clean_value(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn syntax(line: usize, reason: impl Into<String>) -> SeedVaultError {
    SeedVaultError::ConfigSyntax { line, reason: reason.into() }
}
