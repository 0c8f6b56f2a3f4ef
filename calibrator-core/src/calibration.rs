//! # Monitor Calibration Module
//!
//! Stores the per-tier white balance and tint corrections recorded by the
//! calibration wizard, and reads/writes them as a flat text file with one
//! `level:white_balance,tint` line per tier.

use crate::color::Correction;
use crate::error::ParseError;
use crate::tier::Tier;
use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Monitor calibration: one correction per recorded tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorCalibration {
    // BTreeMap keeps tiers in luminance order when saving.
    levels: BTreeMap<Tier, Correction>,
}

impl MonitorCalibration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the correction for a tier, replacing any previous value.
    pub fn insert(&mut self, tier: Tier, correction: Correction) {
        self.levels.insert(tier, correction);
    }

    /// Correction stored for a tier, or zero if the tier was never calibrated.
    pub fn get(&self, tier: Tier) -> Correction {
        self.levels.get(&tier).copied().unwrap_or(Correction::ZERO)
    }

    pub fn contains(&self, tier: Tier) -> bool {
        self.levels.contains_key(&tier)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, Correction)> + '_ {
        self.levels.iter().map(|(tier, correction)| (*tier, *correction))
    }

    /// Parses a calibration file. Malformed lines are logged and skipped.
    pub fn parse(text: &str) -> Self {
        let mut calibration = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok((tier, correction)) => calibration.insert(tier, correction),
                Err(e) => warn!("Error parsing calibration line {:?}: {}", line, e),
            }
        }
        calibration
    }

    /// Formats the calibration as file contents, one line per recorded tier.
    pub fn format(&self) -> String {
        let mut out = String::new();
        for (tier, correction) in self.iter() {
            let _ = writeln!(
                out,
                "{}:{:.1},{:.1}",
                tier.key(),
                correction.white_balance,
                correction.tint
            );
        }
        out
    }
}

/// Parses a single `level:white_balance,tint` line.
pub fn parse_line(line: &str) -> Result<(Tier, Correction), ParseError> {
    let (level, params) = line
        .split_once(':')
        .ok_or(ParseError::MissingLevelSeparator)?;
    let (wb, tint) = params
        .split_once(',')
        .ok_or_else(|| ParseError::MalformedPair(params.trim().to_string()))?;
    if tint.contains(',') {
        return Err(ParseError::MalformedPair(params.trim().to_string()));
    }
    let tier = Tier::from_key(level).ok_or_else(|| ParseError::UnknownLevel(level.trim().to_string()))?;
    Ok((tier, Correction::new(parse_number(wb)?, parse_number(tint)?)))
}

fn parse_number(field: &str) -> Result<f32, ParseError> {
    let field = field.trim();
    field
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(field.to_string()))
}

/// File-backed storage for the monitor calibration.
#[derive(Debug, Clone)]
pub struct CalibrationStore {
    path: PathBuf,
}

impl CalibrationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when a non-empty calibration file is present, meaning the wizard can be skipped.
    pub fn exists_with_data(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.is_file() && meta.len() > 0)
            .unwrap_or(false)
    }

    /// Loads the calibration. A missing file yields an empty calibration.
    pub fn load(&self) -> Result<MonitorCalibration> {
        if !self.path.exists() {
            return Ok(MonitorCalibration::new());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read calibration file {}", self.path.display()))?;
        let calibration = MonitorCalibration::parse(&text);
        info!("Loaded {} calibration levels from {}", calibration.len(), self.path.display());
        Ok(calibration)
    }

    /// Overwrites the calibration file, creating its directory if needed.
    pub fn save(&self, calibration: &MonitorCalibration) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        fs::write(&self.path, calibration.format())
            .with_context(|| format!("Failed to write calibration file {}", self.path.display()))?;
        info!("Monitor calibration saved to {}: {:?}", self.path.display(), calibration);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_file() {
        let text = "black:1.5,-2.0\ndark gray:0.0,3.2\n\nGray : -10.0 , 4.0\n";
        let calibration = MonitorCalibration::parse(text);
        assert_eq!(calibration.len(), 3);
        assert_eq!(calibration.get(Tier::Black), Correction::new(1.5, -2.0));
        assert_eq!(calibration.get(Tier::DarkGray), Correction::new(0.0, 3.2));
        assert_eq!(calibration.get(Tier::Gray), Correction::new(-10.0, 4.0));
        assert_eq!(calibration.get(Tier::White), Correction::ZERO);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "black 1,2\nwhite:1\ngray:a,b\nmagenta:1,2\nlight gray:1,2,3\nwhite:2.5,-1.0\n";
        let calibration = MonitorCalibration::parse(text);
        assert_eq!(calibration.len(), 1);
        assert_eq!(calibration.get(Tier::White), Correction::new(2.5, -1.0));
    }

    #[test]
    fn test_parse_line_errors() {
        assert_eq!(parse_line("black"), Err(ParseError::MissingLevelSeparator));
        assert_eq!(
            parse_line("black:1"),
            Err(ParseError::MalformedPair("1".to_string()))
        );
        assert_eq!(
            parse_line("purple:1,2"),
            Err(ParseError::UnknownLevel("purple".to_string()))
        );
        assert_eq!(
            parse_line("gray:1,x"),
            Err(ParseError::InvalidNumber("x".to_string()))
        );
    }

    #[test]
    fn test_format_orders_by_tier() {
        let mut calibration = MonitorCalibration::new();
        calibration.insert(Tier::White, Correction::new(-0.3, 12.0));
        calibration.insert(Tier::Black, Correction::new(1.0, 0.0));
        assert_eq!(calibration.format(), "black:1.0,0.0\nwhite:-0.3,12.0\n");
    }

    #[test]
    fn test_format_then_parse_round_trip() {
        let mut calibration = MonitorCalibration::new();
        for (i, tier) in Tier::ALL.into_iter().enumerate() {
            calibration.insert(tier, Correction::new(i as f32 * 10.5 - 20.0, -(i as f32) * 3.3));
        }
        let reparsed = MonitorCalibration::parse(&calibration.format());
        for tier in Tier::ALL {
            let a = calibration.get(tier);
            let b = reparsed.get(tier);
            assert!((a.white_balance - b.white_balance).abs() < 0.051);
            assert!((a.tint - b.tint).abs() < 0.051);
        }
    }
}
