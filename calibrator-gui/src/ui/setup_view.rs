//! # Setup View
//!
//! Second stage: the window background shows the selected test color with
//! monitor calibration, phone profile temperature and user corrections
//! applied. The control panel sits on top of it.

use calibrator_core::{SetupPanel, Tier};
use iced::widget::{button, column, container, pick_list, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

use super::{color_backdrop, correction_meter::CorrectionMeter, wizard_view::labeled_slider};
use crate::Message;

const LABEL_WIDTH: f32 = 200.0;

/// Creates the second stage view.
pub fn create_setup_view(panel: &SetupPanel) -> Element<'_, Message> {
    let user = panel.user_correction();
    let combined = panel.combined_correction();
    let display_color = panel.display_color();

    let test_color = pick_list(
        Tier::ALL,
        Some(panel.test_color()),
        Message::TestColorSelected,
    )
    .width(Length::Fill);

    let profile_file = pick_list(
        panel.profile_files(),
        panel.selected_file().map(str::to_string),
        Message::ProfileFileSelected,
    )
    .placeholder(panel.file_placeholder())
    .width(Length::Fill);

    let profile = pick_list(
        panel.profile_names(),
        panel.selected_profile().map(str::to_string),
        Message::ProfileSelected,
    )
    .placeholder(panel.profile_placeholder())
    .width(Length::Fill);

    let temperature = text_input("NA", panel.temperature())
        .on_input(Message::TemperatureChanged)
        .width(Length::Fill);

    let save_button = if panel.selected_profile().is_some() {
        button(text("Save changes to profile")).on_press(Message::SaveProfile)
    } else {
        button(text("Save changes to profile"))
    };

    let summary = row![
        text(format!(
            "Total WB {:+.1}  Tint {:+.1}",
            combined.white_balance, combined.tint
        ))
        .size(14),
        Space::with_width(Length::Fill),
        text(display_color.to_hex()).size(14),
    ];

    let card = column![
        text("Second Stage Setup").size(22),
        Space::with_height(5),
        form_row("Test Color:", test_color),
        form_row("Phone Profile File:", profile_file),
        form_row("Phone Profile:", profile),
        form_row("Temperature (Kelvin):", temperature),
        labeled_slider(
            "User White Balance Correction",
            user.white_balance,
            Message::UserWhiteBalanceChanged
        ),
        labeled_slider("User Tint Correction", user.tint, Message::UserTintChanged),
        summary,
        CorrectionMeter::new(combined).view(),
        row![
            save_button.padding([6, 12]),
            Space::with_width(Length::Fill),
            button(text("Finish setup"))
                .padding([6, 12])
                .on_press(Message::FinishSetup),
        ],
    ]
    .spacing(10);

    let overlay = container(card)
        .padding(20)
        .width(Length::Fixed(520.0))
        .style(container::rounded_box);

    color_backdrop(overlay, display_color)
}

/// A fixed-width label followed by a control.
fn form_row<'a>(
    label: &'static str,
    control: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    row![
        text(label).size(14).width(Length::Fixed(LABEL_WIDTH)),
        control.into(),
    ]
    .align_y(Alignment::Center)
    .spacing(10)
    .into()
}
