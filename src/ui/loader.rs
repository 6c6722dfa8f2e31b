/// Loading indicator: a rotating arc drawn on a canvas
use std::f32::consts::PI;

use iced::widget::canvas::{self, path::Arc, Path, Stroke};
use iced::{Color, Point, Radians, Rectangle};

/// Radians advanced per animation tick
const STEP: f32 = PI / 24.0;
/// Length of the visible arc
const SWEEP: f32 = PI * 1.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    rotation: f32,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the animation by one frame
    pub fn tick(&mut self) {
        self.rotation = (self.rotation + STEP) % (2.0 * PI);
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl<Message> canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let stroke_width = 4.0;
        let radius = (bounds.width.min(bounds.height) / 2.0 - stroke_width).max(1.0);
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);

        // Faint full track, then the moving arc on top
        let track = Path::circle(center, radius);
        frame.stroke(
            &track,
            Stroke::default()
                .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.15))
                .with_width(stroke_width),
        );

        let rotation = self.rotation();
        let arc = Path::new(|builder| {
            builder.arc(Arc {
                center,
                radius,
                start_angle: Radians(rotation),
                end_angle: Radians(rotation + SWEEP),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_color(Color::from_rgb8(0x3f, 0x51, 0xb5))
                .with_width(stroke_width),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps() {
        let mut spinner = Spinner::new();
        for _ in 0..48 {
            spinner.tick();
        }
        assert!(spinner.rotation() < 2.0 * PI);
        assert!(spinner.rotation() < 0.001 || (2.0 * PI - spinner.rotation()) < 0.001);
    }
}
