//! # UI Module
//!
//! This module contains all UI components for the display calibrator.

pub mod correction_meter;
pub mod setup_view;
pub mod wizard_view;

use calibrator_core::Rgb8;
use iced::widget::container;
use iced::{Background, Color, Element, Length};

/// Converts a computed 8-bit color into an Iced color.
pub fn to_iced_color(color: Rgb8) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}

/// Fills the whole window with `color` and centers `content` on top of it.
pub fn color_backdrop<'a>(
    content: impl Into<Element<'a, crate::Message>>,
    color: Rgb8,
) -> Element<'a, crate::Message> {
    let background = to_iced_color(color);
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(background)),
            ..container::Style::default()
        })
        .into()
}
