//! # Calibration Wizard View
//!
//! The whole window shows the preview color of the current gray level.
//! A small control card in the middle holds the two sliders and the
//! button that records the level and moves on.

use calibrator_core::color::{CORRECTION_MAX, CORRECTION_MIN, CORRECTION_STEP};
use calibrator_core::CalibrationWizard;
use iced::widget::{button, column, container, row, slider, text, Space};
use iced::{Alignment, Element, Length};

use super::{color_backdrop, correction_meter::CorrectionMeter};
use crate::Message;

/// Creates the full-screen calibration view for the current wizard step.
pub fn create_wizard_view(wizard: &CalibrationWizard) -> Element<'_, Message> {
    let (step, total) = wizard.progress();
    let correction = wizard.current_correction();

    let header = row![
        text(wizard.title()).size(22),
        Space::with_width(Length::Fill),
        text(format!("{} / {}", step, total)).size(16),
    ]
    .align_y(Alignment::Center);

    let next_label = if wizard.is_last_step() { "Finish" } else { "Next" };

    let card = column![
        header,
        Space::with_height(10),
        labeled_slider(
            "White Balance Correction",
            correction.white_balance,
            Message::WhiteBalanceChanged
        ),
        labeled_slider("Tint Correction", correction.tint, Message::TintChanged),
        CorrectionMeter::new(correction).view(),
        Space::with_height(5),
        text(wizard.preview_color().to_hex()).size(14),
        button(text(next_label).size(16))
            .padding([8, 24])
            .on_press(Message::NextLevel),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    let overlay = container(card)
        .padding(20)
        .width(Length::Fixed(460.0))
        .style(container::rounded_box);

    color_backdrop(overlay, wizard.preview_color())
}

/// A label with the current value above a -50..50 slider.
pub fn labeled_slider<'a>(
    label: &'a str,
    value: f32,
    on_change: fn(f32) -> Message,
) -> Element<'a, Message> {
    column![
        row![
            text(label).size(14),
            Space::with_width(Length::Fill),
            text(format!("{:+.1}", value)).size(14),
        ],
        slider(CORRECTION_MIN..=CORRECTION_MAX, value, on_change).step(CORRECTION_STEP),
    ]
    .spacing(4)
    .into()
}
