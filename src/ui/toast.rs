/// Toast notifications
///
/// Toasts stack in the bottom-right corner and are dismissed either by
/// their timer or by clicking them.
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, column, container, text, Column};
use iced::{Border, Color, Element, Length, Theme};

use crate::state::notice::{Level, Notice};
use crate::Message;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice and return the id to dismiss it with
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, notice });
        id
    }

    /// Remove a toast. Unknown ids (already dismissed) are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Overlay layer with every visible toast
    pub fn view(&self) -> Element<'_, Message> {
        let stack: Column<'_, Message> = column(self.items().iter().map(toast_view))
            .spacing(8)
            .width(Length::Fixed(320.0));

        container(stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .align_x(Horizontal::Right)
            .align_y(Vertical::Bottom)
            .into()
    }
}

fn accent(level: Level) -> Color {
    match level {
        Level::Success => Color::from_rgb8(0x07, 0xbc, 0x0c),
        Level::Info => Color::from_rgb8(0x34, 0x98, 0xdb),
        Level::Warning => Color::from_rgb8(0xf1, 0xc4, 0x0f),
        Level::Error => Color::from_rgb8(0xe7, 0x4c, 0x3c),
    }
}

fn toast_view(toast: &Toast) -> Element<'_, Message> {
    let color = accent(toast.notice.level);

    let body = container(text(&toast.notice.text).size(15))
        .padding(12)
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Color::from_rgb8(0x12, 0x12, 0x12).into()),
            text_color: Some(Color::WHITE),
            border: Border {
                color,
                width: 2.0,
                radius: 6.0.into(),
            },
            ..container::Style::default()
        });

    button(body)
        .padding(0)
        .style(button::text)
        .on_press(Message::DismissToast(toast.id))
        .into()
}
