//! Toolbar component
//!
//! Application header plus the theme toggle and the report and chart export
//! buttons.

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::{EditorSelection, Message};

/// Render the application header with the current calculator title
pub fn view_header(selection: EditorSelection) -> Element<'static, Message> {
    row![
        text("Distribuciones").size(28),
        Space::new().width(Length::Fill),
        text(selection.title()).size(14),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Render the toolbar; exports are only enabled when there is a result to export
pub fn view_toolbar(dark_mode: bool, can_export: bool) -> Element<'static, Message> {
    let export_button = button(text("Exportar resultados").size(11))
        .on_press_maybe(can_export.then_some(Message::ExportReport))
        .padding(Padding::from([4, 8]))
        .style(button::primary);

    let chart_button = button(text("Guardar gráfica").size(11))
        .on_press_maybe(can_export.then_some(Message::ExportChart))
        .padding(Padding::from([4, 8]))
        .style(button::primary);

    let theme_label = if dark_mode { "Modo claro" } else { "Modo oscuro" };
    let theme_button = button(text(theme_label).size(11))
        .on_press(Message::ToggleDarkMode)
        .padding(Padding::from([4, 8]))
        .style(button::secondary);

    row![
        export_button,
        chart_button,
        Space::new().width(Length::Fill),
        theme_button,
    ]
    .spacing(6)
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}
