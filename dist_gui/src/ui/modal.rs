//! Modal dialog component
//!
//! Overlay shown on top of the dashboard. Clicking the backdrop or the
//! Aceptar button closes it.

use iced::widget::{button, column, container, text, Space};
use iced::{Element, Length, Padding};

use crate::Message;

/// Types of modal dialogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalType {
    /// Validation, calculation or file error
    Error { title: String, message: String },
}

/// Render a modal backdrop (semi-transparent overlay that catches clicks)
pub fn view_backdrop() -> Element<'static, Message> {
    button(Space::new())
        .on_press(Message::CloseModal)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_, _| {
            iced::widget::button::Style::default()
                .with_background(iced::Color::from_rgba(0.0, 0.0, 0.0, 0.5))
        })
        .into()
}

/// Render a modal dialog based on its type
pub fn view_modal(modal_type: &ModalType) -> Element<'_, Message> {
    match modal_type {
        ModalType::Error { title, message } => view_error_modal(title, message),
    }
}

fn view_error_modal<'a>(title: &'a str, message: &'a str) -> Element<'a, Message> {
    let ok_button = button(text("Aceptar").size(11))
        .on_press(Message::CloseModal)
        .padding(Padding::from([6, 16]))
        .style(button::primary);

    let content = column![
        text(title).size(18).color([0.8, 0.2, 0.2]),
        Space::new().height(12),
        text(message).size(12),
        Space::new().height(20),
        container(ok_button)
            .align_x(iced::alignment::Horizontal::Right)
            .width(Length::Fill),
    ]
    .width(Length::Fixed(400.0));

    let modal_box = container(content)
        .padding(20)
        .style(container::bordered_box);

    // Center the modal in the screen
    container(modal_box)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .into()
}
