//! Small building blocks shared by the input and result views

use iced::widget::{button, column, row, text, text_input, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::Message;

const LABEL_WIDTH: f32 = 170.0;

/// Text input with a fixed-width label and a gray hint underneath
pub fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    hint: &'a str,
    value: &'a str,
    on_change: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let input_row = row![
        text(label).size(11).width(Length::Fixed(LABEL_WIDTH)),
        text_input(placeholder, value)
            .on_input(on_change)
            .on_submit(Message::Submit)
            .width(Length::Fill)
            .padding(4)
            .size(11),
    ]
    .align_y(Alignment::Center);

    if hint.is_empty() {
        input_row.into()
    } else {
        column![
            input_row,
            row![
                Space::new().width(Length::Fixed(LABEL_WIDTH)),
                text(hint).size(9).color([0.5, 0.5, 0.5]),
            ],
        ]
        .spacing(2)
        .into()
    }
}

/// "label: value" line in a results view
pub fn stat_row<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![
        text(label).size(11).width(Length::Fixed(LABEL_WIDTH)),
        text(value).size(11),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// CALCULAR / LIMPIAR buttons
pub fn action_buttons(calculate: Message, clear: Message) -> Element<'static, Message> {
    row![
        button(text("CALCULAR").size(12))
            .on_press(calculate)
            .padding(Padding::from([6, 18]))
            .style(button::primary),
        Space::new().width(8),
        button(text("LIMPIAR").size(12))
            .on_press(clear)
            .padding(Padding::from([6, 18]))
            .style(button::secondary),
    ]
    .align_y(Alignment::Center)
    .into()
}
