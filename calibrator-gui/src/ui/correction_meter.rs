//! # Correction Meter Widget
//!
//! Shows the white balance and tint corrections as two needles on a
//! -50..+50 scale. The upper lane is white balance (warm needle to the
//! right, cool to the left), the lower lane is tint. A combined correction
//! that leaves the slider range is pinned to the edge and drawn in red.

use calibrator_core::color::{CORRECTION_MAX, CORRECTION_MIN};
use calibrator_core::Correction;
use iced::widget::canvas::{self, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{mouse, Color, Element, Point, Rectangle, Renderer, Size, Theme};

const LANE_GAP: f32 = 4.0;
const NEEDLE_WIDTH: f32 = 4.0;

/// Correction meter widget.
pub struct CorrectionMeter {
    correction: Correction,
}

impl CorrectionMeter {
    pub fn new(correction: Correction) -> Self {
        Self { correction }
    }

    /// Creates the view element for the meter.
    pub fn view(self) -> Element<'static, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fixed(48.0)),
        )
        .into()
    }
}

impl<Message> canvas::Program<Message> for CorrectionMeter {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let background = Path::rectangle(Point::ORIGIN, bounds.size());
        frame.fill(&background, Color::from_rgb8(0x40, 0x40, 0x40));

        let center_x = bounds.width / 2.0;
        let center_line = Path::line(
            Point::new(center_x, 0.0),
            Point::new(center_x, bounds.height),
        );
        frame.stroke(
            &center_line,
            Stroke::default().with_width(2.0).with_color(Color::WHITE),
        );

        let lane_height = (bounds.height - LANE_GAP) / 2.0;
        let wb = self.correction.white_balance;
        let wb_color = if wb >= 0.0 {
            Color::from_rgb8(0xFF, 0x8C, 0x42) // Warm
        } else {
            Color::from_rgb8(0x4A, 0x90, 0xE2) // Cool
        };
        draw_needle(&mut frame, bounds.width, 0.0, lane_height, wb, wb_color);
        draw_needle(
            &mut frame,
            bounds.width,
            lane_height + LANE_GAP,
            lane_height,
            self.correction.tint,
            Color::from_rgb8(0x34, 0xDB, 0x98), // Green
        );

        vec![frame.into_geometry()]
    }
}

fn draw_needle(frame: &mut canvas::Frame, width: f32, top: f32, height: f32, value: f32, color: Color) {
    let range = CORRECTION_MAX - CORRECTION_MIN;
    let clamped = value.clamp(CORRECTION_MIN, CORRECTION_MAX);
    let x = (clamped - CORRECTION_MIN) / range * width;
    let color = if value < CORRECTION_MIN || value > CORRECTION_MAX {
        Color::from_rgb8(0xFF, 0x33, 0x33) // Out of slider range
    } else {
        color
    };
    let needle = Path::rectangle(
        Point::new(x - NEEDLE_WIDTH / 2.0, top),
        Size::new(NEEDLE_WIDTH, height),
    );
    frame.fill(&needle, color);
}
