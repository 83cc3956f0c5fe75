//! Input view for the file analysis flow
//!
//! Load an Excel or CSV file, pick a column, pick the category counted as success. The row
//! count is the population N and the category frequency is K; the user adds
//! the sample size n and the desired successes x.

use iced::widget::{button, column, pick_list, row, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::ui::shared::fields::{action_buttons, labeled_input, stat_row};
use crate::{DatasetForm, Message};

/// Render the file analysis inputs
pub fn view(form: &DatasetForm) -> Column<'_, Message> {
    let file_label = match &form.dataset {
        Some(dataset) => dataset.summary().label(),
        None => "Ningún archivo cargado".to_string(),
    };

    let file_row = row![
        button(text("Cargar archivo").size(11))
            .on_press(Message::OpenDataset)
            .padding(Padding::from([4, 8]))
            .style(button::primary),
        Space::new().width(8),
        text(file_label).size(10).color([0.5, 0.5, 0.5]),
    ]
    .align_y(Alignment::Center);

    let mut content = column![text("Datos").size(13), Space::new().height(4), file_row].spacing(6);

    let Some(dataset) = &form.dataset else {
        return content;
    };

    content = content.push(selector_row(
        "Columna:",
        pick_list(dataset.headers(), form.column.clone(), Message::ColumnSelected)
            .placeholder("-- Seleccione una columna --")
            .width(Length::Fill)
            .text_size(11)
            .into(),
    ));

    if form.column.is_none() {
        return content;
    }

    let categories: Vec<String> = form.frequencies.iter().map(|(value, _)| value.clone()).collect();
    content = content.push(selector_row(
        "Categoría de éxito:",
        pick_list(categories, form.category.clone(), Message::CategorySelected)
            .placeholder("-- Seleccione una categoría --")
            .width(Length::Fill)
            .text_size(11)
            .into(),
    ));

    let successes = form
        .category_count()
        .map(|count| count.to_string())
        .unwrap_or_else(|| "--".to_string());

    content
        .push(Space::new().height(6))
        .push(text("Parámetros").size(13))
        .push(stat_row("Población (N):", dataset.row_count().to_string()))
        .push(stat_row("Éxitos en población (K):", successes))
        .push(labeled_input(
            "Tamaño de muestra (n):",
            "Ej: 10",
            "",
            &form.sample,
            Message::DatasetSampleChanged,
        ))
        .push(labeled_input(
            "Éxitos deseados (x):",
            "Ej: 2",
            "Entre 0 y min(n, K)",
            &form.x,
            Message::DatasetXChanged,
        ))
        .push(Space::new().height(12))
        .push(action_buttons(Message::CalculateDataset, Message::ClearDataset))
}

fn selector_row<'a>(label: &'a str, selector: Element<'a, Message>) -> Element<'a, Message> {
    row![text(label).size(11).width(Length::Fixed(170.0)), selector]
        .align_y(Alignment::Center)
        .into()
}
