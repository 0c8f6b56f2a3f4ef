// calibrator-core/src/lib.rs

//! The core logic for the display calibrator.
//! This crate is responsible for the color arithmetic, the calibration and
//! phone profile files, and the state of both calibration stages. It is
//! completely headless and contains no GUI code.

pub mod calibration;
pub mod color;
pub mod config;
pub mod error;
pub mod panel;
pub mod profile;
pub mod tier;
pub mod wizard;

pub use calibration::{CalibrationStore, MonitorCalibration};
pub use color::{Correction, Rgb8};
pub use config::AppConfig;
pub use error::ParseError;
pub use panel::SetupPanel;
pub use profile::{PhoneProfile, ProfileSet, ProfileStore};
pub use tier::Tier;
pub use wizard::{CalibrationWizard, WizardStep};
