/// Thumbnail grid and "Load more" button
use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, canvas, column, container, image, scrollable, text, Column};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::data::ImageHit;
use crate::state::gallery::{Gallery, Status};
use crate::ui::loader::Spinner;
use crate::Message;

/// Width of a gallery tile
const TILE_WIDTH: f32 = 280.0;
/// Height of a gallery tile
const TILE_HEIGHT: f32 = 200.0;

/// Download state of one tile's thumbnail
#[derive(Debug, Clone)]
pub enum Thumbnail {
    Loading,
    Ready(Handle),
    Failed,
}

pub fn view<'a>(
    gallery: &'a Gallery,
    thumbnails: &'a HashMap<u64, Thumbnail>,
    spinner: &'a Spinner,
) -> Element<'a, Message> {
    let mut content: Column<'a, Message> = column![]
        .spacing(20)
        .padding(20)
        .width(Length::Fill)
        .align_x(Alignment::Center);

    if gallery.status() == Status::Success {
        let tiles: Vec<Element<'a, Message>> = gallery
            .images()
            .iter()
            .map(|hit| item(hit, thumbnails.get(&hit.id)))
            .collect();

        content = content.push(Wrap::with_elements(tiles).spacing(12.0).line_spacing(12.0));
    }

    if gallery.is_loading() {
        content = content.push(
            canvas(*spinner)
                .width(Length::Fixed(48.0))
                .height(Length::Fixed(48.0)),
        );
    }

    if gallery.has_more() && !gallery.is_loading() {
        content = content.push(
            button(text("Load more").size(16))
                .on_press(Message::LoadMore)
                .padding([10, 24]),
        );
    }

    scrollable(content).height(Length::Fill).into()
}

/// One clickable tile
fn item<'a>(hit: &'a ImageHit, thumbnail: Option<&'a Thumbnail>) -> Element<'a, Message> {
    let inner: Element<'a, Message> = match thumbnail {
        Some(Thumbnail::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(iced::ContentFit::Cover)
            .into(),
        Some(Thumbnail::Failed) => text(&hit.tags).size(14).into(),
        Some(Thumbnail::Loading) | None => text("…").size(24).into(),
    };

    button(
        container(inner)
            .width(Length::Fixed(TILE_WIDTH))
            .height(Length::Fixed(TILE_HEIGHT))
            .center_x(Length::Fixed(TILE_WIDTH))
            .center_y(Length::Fixed(TILE_HEIGHT))
            .style(container::rounded_box),
    )
    .padding(0)
    .style(button::text)
    .on_press(Message::OpenImage(hit.id))
    .into()
}
