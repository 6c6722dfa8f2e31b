/// Full-size image viewer shown as a modal overlay
use iced::widget::image::Handle;
use iced::widget::{center, column, container, image, mouse_area, opaque, text};
use iced::{Color, Element, Length, Theme};

use crate::Message;

#[derive(Debug, Clone)]
pub enum Content {
    Loading,
    Ready(Handle),
    Failed,
}

/// The image currently open in the viewer
#[derive(Debug, Clone)]
pub struct Viewer {
    pub image_id: u64,
    pub tags: String,
    pub content: Content,
}

impl Viewer {
    pub fn open(image_id: u64, tags: impl Into<String>) -> Self {
        Self {
            image_id,
            tags: tags.into(),
            content: Content::Loading,
        }
    }

    /// Store the downloaded image. Results for another image are ignored.
    pub fn loaded(&mut self, image_id: u64, handle: Option<Handle>) {
        if image_id != self.image_id {
            return;
        }
        self.content = match handle {
            Some(handle) => Content::Ready(handle),
            None => Content::Failed,
        };
    }

    /// Overlay layer; clicking the backdrop closes the viewer
    pub fn view(&self) -> Element<'_, Message> {
        let picture: Element<'_, Message> = match &self.content {
            Content::Loading => text("Loading…").size(20).into(),
            Content::Ready(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            Content::Failed => text("Could not load this image").size(20).into(),
        };

        let card = container(
            column![
                container(picture)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .center_x(Length::Fill)
                    .center_y(Length::Fill),
                text(&self.tags).size(14),
            ]
            .spacing(8),
        )
        .max_width(1200.0)
        .max_height(860.0)
        .padding(12);

        opaque(
            mouse_area(center(opaque(card)).style(|_theme: &Theme| container::Style {
                background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.8).into()),
                ..container::Style::default()
            }))
            .on_press(Message::CloseViewer),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_starts_loading() {
        let viewer = Viewer::open(7, "sea, beach");
        assert_eq!(viewer.image_id, 7);
        assert!(matches!(viewer.content, Content::Loading));
    }

    #[test]
    fn test_loaded_ignores_other_images() {
        let mut viewer = Viewer::open(7, "sea");
        viewer.loaded(8, None);
        assert!(matches!(viewer.content, Content::Loading));

        viewer.loaded(7, None);
        assert!(matches!(viewer.content, Content::Failed));
    }
}
