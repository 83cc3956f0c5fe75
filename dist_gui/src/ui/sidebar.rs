//! Sidebar (Left)
//!
//! Lists the calculators; the selected one is highlighted.

use iced::widget::{button, column, container, rule, text, Column, Space};
use iced::{Element, Length, Padding};

use crate::{EditorSelection, Message};

/// Render the sidebar
pub fn view_sidebar(selection: EditorSelection, width: f32) -> Element<'static, Message> {
    let mut panel_content: Column<'_, Message> = column![
        text("Calculadoras").size(12),
        Space::new().height(4),
    ]
    .spacing(4);

    for &item in EditorSelection::ALL {
        let style = if item == selection {
            button::primary
        } else {
            button::secondary
        };
        let btn = button(text(item.label()).size(11))
            .on_press(Message::Select(item))
            .padding(Padding::from([6, 10]))
            .style(style)
            .width(Length::Fill);
        panel_content = panel_content.push(btn);
    }

    panel_content = panel_content
        .push(Space::new().height(8))
        .push(rule::horizontal(1))
        .push(Space::new().height(4))
        .push(text(selection.description()).size(10).color([0.5, 0.5, 0.5]));

    container(panel_content.padding(4))
        .width(Length::Fixed(width))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(4)
        .into()
}
