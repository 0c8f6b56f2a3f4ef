//! # Setup Panel
//!
//! State behind the second stage. The displayed color blends three sources:
//!
//! 1. the stored monitor calibration for the selected test color,
//! 2. a white balance offset derived from the temperature field,
//! 3. the live user sliders (populated from the selected phone profile).
//!
//! The panel owns the [`ProfileStore`] so selecting a file or saving a
//! profile goes straight to disk.

use crate::calibration::MonitorCalibration;
use crate::color::{Correction, Rgb8, clamp_correction, compute_color, temperature_correction};
use crate::profile::{NO_TEMPERATURE, PhoneProfile, ProfileSet, ProfileStore};
use crate::tier::Tier;
use anyhow::Result;
use log::{info, warn};

/// Test color selected when the panel opens.
pub const DEFAULT_TEST_COLOR: Tier = Tier::Gray;

#[derive(Debug, Clone)]
pub struct SetupPanel {
    calibration: MonitorCalibration,
    store: ProfileStore,

    test_color: Tier,
    profile_files: Vec<String>,
    selected_file: Option<String>,
    profiles: ProfileSet,
    selected_profile: Option<String>,
    temperature: String,
    user: Correction,
}

impl SetupPanel {
    /// Creates the panel without touching the disk.
    pub fn new(calibration: MonitorCalibration, store: ProfileStore) -> Self {
        Self {
            calibration,
            store,
            test_color: DEFAULT_TEST_COLOR,
            profile_files: Vec::new(),
            selected_file: None,
            profiles: ProfileSet::new(),
            selected_profile: None,
            temperature: NO_TEMPERATURE.to_string(),
            user: Correction::ZERO,
        }
    }

    /// Creates the panel and loads the profile file list (and the first file's profiles).
    pub fn open(calibration: MonitorCalibration, store: ProfileStore) -> Result<Self> {
        let mut panel = Self::new(calibration, store);
        panel.refresh_files()?;
        Ok(panel)
    }

    // --- Accessors ---

    pub fn calibration(&self) -> &MonitorCalibration {
        &self.calibration
    }

    pub fn test_color(&self) -> Tier {
        self.test_color
    }

    pub fn profile_files(&self) -> &[String] {
        &self.profile_files
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.profiles.names()
    }

    pub fn selected_profile(&self) -> Option<&str> {
        self.selected_profile.as_deref()
    }

    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    pub fn user_correction(&self) -> Correction {
        self.user
    }

    /// Placeholder shown in the file picker when nothing is selected.
    pub fn file_placeholder(&self) -> &'static str {
        if self.profile_files.is_empty() {
            "No files found"
        } else {
            "Select Phone Profile File"
        }
    }

    /// Placeholder shown in the profile picker when nothing is selected.
    pub fn profile_placeholder(&self) -> &'static str {
        if self.selected_file.is_some() && self.profiles.is_empty() {
            "No profiles"
        } else {
            "Select Phone Profile"
        }
    }

    // --- Event handlers ---

    pub fn select_test_color(&mut self, tier: Tier) {
        self.test_color = tier;
    }

    /// Sets the temperature field. `|` is the profile file delimiter and is dropped.
    pub fn set_temperature(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        text.retain(|c| c != '|');
        self.temperature = text;
    }

    pub fn set_user_white_balance(&mut self, value: f32) {
        self.user.white_balance = clamp_correction(value);
    }

    pub fn set_user_tint(&mut self, value: f32) {
        self.user.tint = clamp_correction(value);
    }

    /// Re-reads the profile directory and selects the first file, if any.
    pub fn refresh_files(&mut self) -> Result<()> {
        let files = self.store.list_files()?;
        self.set_profile_files(files);
        if let Some(first) = self.selected_file.clone() {
            self.select_file(&first)?;
        }
        Ok(())
    }

    /// Replaces the known profile files. The first one becomes selected.
    ///
    /// The caller is responsible for loading its profiles (see [`Self::select_file`]).
    pub fn set_profile_files(&mut self, files: Vec<String>) {
        self.selected_file = files.first().cloned();
        self.profile_files = files;
        if self.selected_file.is_none() {
            self.profiles = ProfileSet::new();
            self.selected_profile = None;
        }
    }

    /// Selects a profile file and loads its profiles from disk.
    pub fn select_file(&mut self, file_name: &str) -> Result<()> {
        let profiles = self.store.load(file_name)?;
        self.selected_file = Some(file_name.to_string());
        self.set_profiles(profiles);
        Ok(())
    }

    /// Replaces the loaded profiles and applies the first one.
    pub fn set_profiles(&mut self, profiles: ProfileSet) {
        self.profiles = profiles;
        self.selected_profile = None;
        if let Some(first) = self.profiles.first().map(|p| p.name.clone()) {
            self.select_profile(&first);
        }
    }

    /// Selects a profile and copies its temperature and corrections into the fields.
    ///
    /// Returns false (and changes nothing) if the name is unknown.
    pub fn select_profile(&mut self, name: &str) -> bool {
        let Some(profile) = self.profiles.get(name) else {
            warn!("Unknown phone profile {:?}", name);
            return false;
        };
        self.user = profile.correction;
        self.temperature = profile.temperature.clone();
        self.selected_profile = Some(profile.name.clone());
        true
    }

    // --- Derived values ---

    /// White balance offset from the temperature field.
    pub fn temperature_offset(&self) -> f32 {
        temperature_correction(&self.temperature)
    }

    /// Monitor calibration + temperature offset + user sliders.
    pub fn combined_correction(&self) -> Correction {
        let monitor = self.calibration.get(self.test_color);
        let temperature = Correction::new(self.temperature_offset(), 0.0);
        monitor + temperature + self.user
    }

    /// Background color for the current selections.
    pub fn display_color(&self) -> Rgb8 {
        let combined = self.combined_correction();
        compute_color(
            self.test_color.base_value(),
            combined.white_balance,
            combined.tint,
        )
    }

    // --- Persistence ---

    /// Writes the temperature field and sliders back into the selected profile's line.
    ///
    /// Returns the stored profile, or `None` when no file or profile is selected.
    pub fn save_selected(&mut self) -> Result<Option<PhoneProfile>> {
        let (Some(file), Some(name)) = (self.selected_file.clone(), self.selected_profile.clone()) else {
            info!("Nothing to save: no profile file or profile selected");
            return Ok(None);
        };
        let edited = PhoneProfile {
            name,
            temperature: self.temperature.clone(),
            correction: self.user,
        };
        let stored = self.store.save_profile(&file, &edited)?;
        self.profiles.insert(stored.clone());
        Ok(Some(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profiles() -> ProfileSet {
        ProfileSet::parse("Vivid | 7000 | 2.5 | -1.0\nPlain | NA | NA | NA\n")
    }

    fn panel_with_calibration() -> SetupPanel {
        let mut calibration = MonitorCalibration::new();
        calibration.insert(Tier::Gray, Correction::new(3.0, -2.0));
        calibration.insert(Tier::White, Correction::new(-1.0, 1.0));
        SetupPanel::new(calibration, ProfileStore::new("unused"))
    }

    #[test]
    fn test_defaults() {
        let panel = panel_with_calibration();
        assert_eq!(panel.test_color(), Tier::Gray);
        assert_eq!(panel.temperature(), "NA");
        assert_eq!(panel.user_correction(), Correction::ZERO);
        // Gray + monitor calibration only.
        assert_eq!(panel.display_color(), Rgb8::new(131, 126, 125));
        assert_eq!(panel.file_placeholder(), "No files found");
    }

    #[test]
    fn test_set_profiles_applies_first() {
        let mut panel = panel_with_calibration();
        panel.set_profiles(sample_profiles());
        assert_eq!(panel.selected_profile(), Some("Vivid"));
        assert_eq!(panel.temperature(), "7000");
        assert_eq!(panel.user_correction(), Correction::new(2.5, -1.0));
    }

    #[test]
    fn test_select_profile_populates_fields_exactly() {
        let mut panel = panel_with_calibration();
        panel.set_profiles(sample_profiles());
        panel.set_user_white_balance(20.0);
        assert!(panel.select_profile("Plain"));
        assert_eq!(panel.temperature(), "NA");
        assert_eq!(panel.user_correction(), Correction::ZERO);

        assert!(!panel.select_profile("Missing"));
        assert_eq!(panel.selected_profile(), Some("Plain"));
    }

    #[test]
    fn test_display_color_blends_all_sources() {
        let mut panel = panel_with_calibration();
        panel.set_temperature("7000"); // +5 white balance
        panel.set_user_white_balance(2.0);
        panel.set_user_tint(4.0);
        // wb = 3 + 5 + 2 = 10, tint = -2 + 4 = 2
        assert_eq!(panel.combined_correction(), Correction::new(10.0, 2.0));
        assert_eq!(panel.display_color(), Rgb8::new(138, 130, 118));

        panel.select_test_color(Tier::White);
        // wb = -1 + 5 + 2 = 6, tint = 1 + 4 = 5
        assert_eq!(panel.display_color(), Rgb8::new(255, 255, 249));
    }

    #[test]
    fn test_bad_temperature_is_ignored() {
        let mut panel = panel_with_calibration();
        panel.set_temperature("hot");
        assert_eq!(panel.temperature_offset(), 0.0);
        panel.set_temperature("");
        assert_eq!(panel.temperature_offset(), 0.0);
    }

    #[test]
    fn test_temperature_drops_field_delimiter() {
        let mut panel = panel_with_calibration();
        panel.set_temperature("65|00");
        assert_eq!(panel.temperature(), "6500");
        assert_eq!(panel.temperature_offset(), 0.0);

        // The saved line must still parse back into the same four fields.
        let profile = PhoneProfile {
            name: "Vivid".to_string(),
            temperature: panel.temperature().to_string(),
            correction: Correction::new(1.0, 2.0),
        };
        let reparsed = crate::profile::parse_line(&profile.to_line()).unwrap();
        assert_eq!(reparsed, profile);
    }

    #[test]
    fn test_empty_file_list() {
        let mut panel = panel_with_calibration();
        panel.set_profile_files(vec![]);
        assert_eq!(panel.selected_file(), None);
        assert_eq!(panel.file_placeholder(), "No files found");
    }

    #[test]
    fn test_save_without_selection_is_noop() {
        let mut panel = panel_with_calibration();
        assert!(panel.save_selected().unwrap().is_none());
    }
}
