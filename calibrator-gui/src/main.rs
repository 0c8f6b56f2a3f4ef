//! # Display Calibrator - Two Stage Calibration GUI
//!
//! This module contains the main GUI application for the display calibrator.
//! It first walks the user through a full-screen monitor calibration, then
//! opens a setup panel where test colors are adjusted with phone profiles.
//!
//! ## Architecture
//! - **Stage one**: full-screen wizard over five gray levels, saved to the calibration file
//! - **Stage two**: maximized window whose background shows the blended test color
//! - **State**: all state lives in `CalibratorApp`; every widget event is a `Message`
//! - **Persistence**: synchronous file I/O inside `update`, errors are logged

mod ui;

use calibrator_core::{
    config::CONFIG_FILE, AppConfig, CalibrationStore, CalibrationWizard, MonitorCalibration,
    ProfileStore, SetupPanel, Tier, WizardStep,
};
use iced::{window, Element, Task, Theme};
use log::{debug, error, info, warn};
use std::path::Path;
use ui::{setup_view::create_setup_view, wizard_view::create_wizard_view};

/// Main entry point for the display calibrator.
///
/// Initializes logging and the Iced application. The initial task switches
/// the window to full-screen (calibration) or maximized (setup).
pub fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    info!("Starting Display Calibrator v{}", env!("CARGO_PKG_VERSION"));
    let result = iced::application(CalibratorApp::title, CalibratorApp::update, CalibratorApp::view)
        .theme(CalibratorApp::theme)
        .run_with(CalibratorApp::new);
    info!("Application finished with result: {:?}", result);
    result
}

/// Application message types.
///
/// Wizard messages are only meaningful in stage one, setup messages only in
/// stage two; messages arriving in the wrong stage are ignored.
#[derive(Debug, Clone)]
pub enum Message {
    // --- Stage one: monitor calibration ---
    WhiteBalanceChanged(f32),
    TintChanged(f32),
    NextLevel,

    // --- Stage two: setup panel ---
    TestColorSelected(Tier),
    ProfileFileSelected(String),
    ProfileSelected(String),
    TemperatureChanged(String),
    UserWhiteBalanceChanged(f32),
    UserTintChanged(f32),
    SaveProfile,
    FinishSetup,
}

/// The active stage.
#[derive(Debug)]
enum Stage {
    Calibration(CalibrationWizard),
    Setup(SetupPanel),
}

/// Main application state for the display calibrator.
#[derive(Debug)]
struct CalibratorApp {
    calibration_store: CalibrationStore,
    profile_store: ProfileStore,
    stage: Stage,
}

impl CalibratorApp {
    /// Creates the application from the configuration on disk.
    ///
    /// A non-empty calibration file skips straight to the setup stage.
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load_or_default(Path::new(CONFIG_FILE));
        let calibration_store = CalibrationStore::new(&config.calibration_file);
        let profile_store = ProfileStore::new(&config.profiles_dir);

        if calibration_store.exists_with_data() {
            let calibration = calibration_store.load().unwrap_or_else(|e| {
                error!("{:#}", e);
                MonitorCalibration::new()
            });
            info!("Existing monitor calibration found, opening setup");
            let stage = Stage::Setup(open_setup_panel(calibration, &profile_store));
            let app = Self { calibration_store, profile_store, stage };
            (app, enter_windowed_mode())
        } else {
            info!("No monitor calibration found, starting calibration");
            let app = Self {
                calibration_store,
                profile_store,
                stage: Stage::Calibration(CalibrationWizard::new()),
            };
            (app, set_window_mode(window::Mode::Fullscreen))
        }
    }

    fn title(&self) -> String {
        match &self.stage {
            Stage::Calibration(wizard) => wizard.title(),
            Stage::Setup(_) => "Color Generator - Stage Two".to_string(),
        }
    }

    /// Handles application state updates based on incoming messages.
    fn update(&mut self, message: Message) -> Task<Message> {
        debug!("Received message: {:?}", message);

        match &mut self.stage {
            Stage::Calibration(wizard) => match message {
                Message::WhiteBalanceChanged(value) => wizard.set_white_balance(value),
                Message::TintChanged(value) => wizard.set_tint(value),
                Message::NextLevel => {
                    if let WizardStep::Finished(calibration) = wizard.advance() {
                        return self.finish_calibration(calibration);
                    }
                }
                other => warn!("Ignoring {:?} during calibration", other),
            },
            Stage::Setup(panel) => match message {
                Message::TestColorSelected(tier) => panel.select_test_color(tier),
                Message::ProfileFileSelected(file) => {
                    if let Err(e) = panel.select_file(&file) {
                        error!("Error loading profile file {}: {:#}", file, e);
                    }
                }
                Message::ProfileSelected(name) => {
                    panel.select_profile(&name);
                }
                Message::TemperatureChanged(text) => panel.set_temperature(text),
                Message::UserWhiteBalanceChanged(value) => panel.set_user_white_balance(value),
                Message::UserTintChanged(value) => panel.set_user_tint(value),
                Message::SaveProfile => match panel.save_selected() {
                    Ok(Some(profile)) => info!("Profile changes saved: {}", profile.to_line()),
                    Ok(None) => {}
                    Err(e) => error!("Error saving profile: {:#}", e),
                },
                Message::FinishSetup => {
                    info!("Setup finished, closing");
                    return window::get_oldest().and_then(window::close);
                }
                other => warn!("Ignoring {:?} during setup", other),
            },
        }
        Task::none()
    }

    /// Saves the freshly recorded calibration and switches to the setup stage.
    fn finish_calibration(&mut self, calibration: MonitorCalibration) -> Task<Message> {
        if let Err(e) = self.calibration_store.save(&calibration) {
            error!("Error saving monitor calibration: {:#}", e);
        }
        self.stage = Stage::Setup(open_setup_panel(calibration, &self.profile_store));
        enter_windowed_mode()
    }

    /// Renders the active stage.
    fn view(&self) -> Element<'_, Message> {
        match &self.stage {
            Stage::Calibration(wizard) => create_wizard_view(wizard),
            Stage::Setup(panel) => create_setup_view(panel),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Opens the setup panel, falling back to an empty panel if the profile directory is unusable.
fn open_setup_panel(calibration: MonitorCalibration, store: &ProfileStore) -> SetupPanel {
    match SetupPanel::open(calibration.clone(), store.clone()) {
        Ok(panel) => panel,
        Err(e) => {
            error!("Error loading phone profiles: {:#}", e);
            SetupPanel::new(calibration, store.clone())
        }
    }
}

fn set_window_mode(mode: window::Mode) -> Task<Message> {
    window::get_oldest().and_then(move |id| window::change_mode(id, mode))
}

/// Leaves full-screen and maximizes the window so it can be moved and resized.
fn enter_windowed_mode() -> Task<Message> {
    set_window_mode(window::Mode::Windowed)
        .chain(window::get_oldest().and_then(|id| window::maximize(id, true)))
}
