/// Search bar at the top of the window
use iced::widget::{button, container, row, text_input};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Normalise what the user typed. Returns `None` for a blank query.
pub fn normalize_query(input: &str) -> Option<String> {
    let query = input.trim();
    if query.is_empty() {
        None
    } else {
        Some(query.to_string())
    }
}

pub fn view(input: &str) -> Element<'_, Message> {
    let field = text_input("Search images and photos", input)
        .on_input(Message::QueryChanged)
        .on_submit(Message::SearchSubmitted)
        .padding(10)
        .size(18)
        .width(Length::Fill);

    let submit = button("Search")
        .on_press(Message::SearchSubmitted)
        .padding(10);

    let bar = container(
        row![field, submit]
            .spacing(10)
            .align_y(Alignment::Center),
    )
    .max_width(640.0);

    container(bar)
        .padding(16)
        .center_x(Length::Fill)
        .into()
}
