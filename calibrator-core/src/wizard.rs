//! # Calibration Wizard
//!
//! Steps through the five luminance tiers. At each tier the user nudges
//! white balance and tint until the preview looks neutral, then advances.
//! After the last tier the collected corrections are handed back as a
//! [`MonitorCalibration`].

use crate::calibration::MonitorCalibration;
use crate::color::{Correction, Rgb8, clamp_correction, compute_color};
use crate::tier::Tier;
use log::info;

/// Result of advancing the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    /// Moved on to the given tier.
    Next(Tier),
    /// All tiers recorded.
    Finished(MonitorCalibration),
}

/// State of the brightness-level calibration wizard.
#[derive(Debug, Clone)]
pub struct CalibrationWizard {
    tier: Tier,
    current: Correction,
    recorded: MonitorCalibration,
    finished: bool,
}

impl Default for CalibrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationWizard {
    pub fn new() -> Self {
        Self {
            tier: Tier::ALL[0],
            current: Correction::ZERO,
            recorded: MonitorCalibration::new(),
            finished: false,
        }
    }

    pub fn current_tier(&self) -> Tier {
        self.tier
    }

    pub fn current_correction(&self) -> Correction {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 1-based step number and total number of steps.
    pub fn progress(&self) -> (usize, usize) {
        (self.tier.index() + 1, Tier::ALL.len())
    }

    pub fn is_last_step(&self) -> bool {
        self.tier.next().is_none()
    }

    /// Window title for the current step, e.g. "Calibration: Dark gray".
    pub fn title(&self) -> String {
        format!("Calibration: {}", capitalize(self.tier.key()))
    }

    pub fn set_white_balance(&mut self, value: f32) {
        self.current.white_balance = clamp_correction(value);
    }

    pub fn set_tint(&mut self, value: f32) {
        self.current.tint = clamp_correction(value);
    }

    /// Color shown behind the controls for the current tier and sliders.
    pub fn preview_color(&self) -> Rgb8 {
        compute_color(
            self.tier.base_value(),
            self.current.white_balance,
            self.current.tint,
        )
    }

    /// Records the current sliders for the current tier and moves on.
    ///
    /// Sliders reset to zero for the next tier. Advancing a finished wizard
    /// returns the same calibration again.
    pub fn advance(&mut self) -> WizardStep {
        if self.finished {
            return WizardStep::Finished(self.recorded.clone());
        }
        self.recorded.insert(self.tier, self.current);
        info!("Recorded {}: {:?}", self.tier.key(), self.current);

        match self.tier.next() {
            Some(next) => {
                self.tier = next;
                self.current = Correction::ZERO;
                WizardStep::Next(next)
            }
            None => {
                self.finished = true;
                WizardStep::Finished(self.recorded.clone())
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
