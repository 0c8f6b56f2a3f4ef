//! # Phone Profile Module
//!
//! Phone color profiles live in plain text files, one profile per line:
//!
//! ```text
//! ProfileName | Temperature | WBCorrection | TintCorrection
//! ```
//!
//! The temperature is kept as the raw label (a Kelvin number or `NA`).
//! Several files may exist in the profiles directory; the user picks one
//! by file name.

use crate::color::Correction;
use crate::error::ParseError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Temperature label used when a profile carries no temperature.
pub const NO_TEMPERATURE: &str = "NA";

/// A single phone profile record.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneProfile {
    pub name: String,
    /// Raw temperature label, e.g. "6500" or "NA".
    pub temperature: String,
    pub correction: Correction,
}

impl PhoneProfile {
    /// Formats the profile as a file line (without newline).
    pub fn to_line(&self) -> String {
        format!(
            "{} | {} | {:.1} | {:.1}",
            self.name, self.temperature, self.correction.white_balance, self.correction.tint
        )
    }
}

/// The profiles of one file, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSet {
    profiles: Vec<PhoneProfile>,
}

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a profile. A profile with the same name is replaced in place.
    pub fn insert(&mut self, profile: PhoneProfile) {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PhoneProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn first(&self) -> Option<&PhoneProfile> {
        self.profiles.first()
    }

    pub fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhoneProfile> {
        self.profiles.iter()
    }

    /// Parses a profile file. Lines with too few fields or bad numbers are skipped.
    pub fn parse(text: &str) -> Self {
        let mut set = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok(profile) => set.insert(profile),
                Err(e) => debug!("Skipping profile line {:?}: {}", line, e),
            }
        }
        set
    }
}

/// Splits a profile line into its trimmed `|` separated fields.
fn split_fields(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

/// Parses one `name | temperature | wb | tint` line. Extra fields are ignored.
pub fn parse_line(line: &str) -> Result<PhoneProfile, ParseError> {
    let fields = split_fields(line.trim());
    if fields.len() < 4 {
        return Err(ParseError::TooFewFields(fields.len()));
    }
    Ok(PhoneProfile {
        name: fields[0].to_string(),
        temperature: fields[1].to_string(),
        correction: Correction::new(parse_correction(fields[2])?, parse_correction(fields[3])?),
    })
}

/// Empty and `NA` corrections count as zero.
fn parse_correction(field: &str) -> Result<f32, ParseError> {
    if field.is_empty() || field == "NA" {
        return Ok(0.0);
    }
    field
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(field.to_string()))
}

/// Rewrites the line(s) of `profile.name` in a profile file's contents.
///
/// Blank lines are dropped, lines with fewer than four fields and lines of
/// other profiles are kept verbatim.
pub fn rewrite(text: &str, profile: &PhoneProfile) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fields = split_fields(trimmed);
        if fields.len() >= 4 && fields[0] == profile.name {
            out.push_str(&profile.to_line());
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// Directory of phone profile files.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Lists the `*.txt` profile files, creating the directory if it is missing.
    pub fn list_files(&self) -> Result<Vec<String>> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create profiles directory {}", self.dir.display()))?;
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list profiles directory {}", self.dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_txt = path.extension().is_some_and(|ext| ext == "txt");
            if !is_txt || !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        debug!("Found {} profile files in {}", names.len(), self.dir.display());
        Ok(names)
    }

    /// Loads the profiles of one file. A missing file has no profiles.
    pub fn load(&self, file_name: &str) -> Result<ProfileSet> {
        let path = self.file_path(file_name);
        if !path.exists() {
            warn!("Profile file {} does not exist", path.display());
            return Ok(ProfileSet::new());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        let set = ProfileSet::parse(&text);
        info!("Loaded {} profiles from {}", set.len(), path.display());
        Ok(set)
    }

    /// Writes one profile back into its file, leaving every other line untouched.
    ///
    /// The corrections are stored with one decimal place; the stored profile is returned.
    pub fn save_profile(&self, file_name: &str, profile: &PhoneProfile) -> Result<PhoneProfile> {
        let path = self.file_path(file_name);
        let stored = PhoneProfile {
            name: profile.name.clone(),
            temperature: profile.temperature.trim().to_string(),
            correction: profile.correction.rounded(),
        };
        let text = if path.exists() {
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read profile file {}", path.display()))?
        } else {
            String::new()
        };
        fs::write(&path, rewrite(&text, &stored))
            .with_context(|| format!("Failed to write profile file {}", path.display()))?;
        info!("Profile {:?} saved to {}", stored.name, path.display());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Vivid | 7000 | 2.5 | -1.0
Natural | NA | NA |
broken line
Cinema | 6500 | 0.0 | 3.5 | extra

Natural | 6000 | 1.0 | 1.0
Weird | 5000 | abc | 1.0
";

    #[test]
    fn test_parse_profiles() {
        let set = ProfileSet::parse(SAMPLE);
        assert_eq!(set.names(), vec!["Vivid", "Natural", "Cinema"]);

        let vivid = set.get("Vivid").unwrap();
        assert_eq!(vivid.temperature, "7000");
        assert_eq!(vivid.correction, Correction::new(2.5, -1.0));

        // The later "Natural" line replaces the first one in place.
        let natural = set.get("Natural").unwrap();
        assert_eq!(natural.temperature, "6000");
        assert_eq!(natural.correction, Correction::new(1.0, 1.0));

        let cinema = set.get("Cinema").unwrap();
        assert_eq!(cinema.correction, Correction::new(0.0, 3.5));
        assert!(set.get("Weird").is_none());
    }

    #[test]
    fn test_na_and_empty_corrections_are_zero() {
        let profile = parse_line("Plain | NA | NA |").unwrap();
        assert_eq!(profile.temperature, "NA");
        assert_eq!(profile.correction, Correction::ZERO);
    }

    #[test]
    fn test_parse_line_too_few_fields() {
        assert_eq!(parse_line("a | b | c"), Err(ParseError::TooFewFields(3)));
    }

    #[test]
    fn test_rewrite_replaces_only_matching_line() {
        let text = "Vivid | 7000 | 2.5 | -1.0\n\nnote without fields\nCinema | 6500 | 0.0 | 3.5\n";
        let updated = PhoneProfile {
            name: "Cinema".to_string(),
            temperature: "5600".to_string(),
            correction: Correction::new(-4.0, 0.24),
        };
        let out = rewrite(text, &updated);
        assert_eq!(
            out,
            "Vivid | 7000 | 2.5 | -1.0\nnote without fields\nCinema | 5600 | -4.0 | 0.2\n"
        );
    }

    #[test]
    fn test_rewrite_unknown_profile_keeps_lines() {
        let text = "Vivid | 7000 | 2.5 | -1.0\n";
        let updated = PhoneProfile {
            name: "Missing".to_string(),
            temperature: NO_TEMPERATURE.to_string(),
            correction: Correction::ZERO,
        };
        assert_eq!(rewrite(text, &updated), text);
    }
}
