//! Results Panel (Right Side)
//!
//! Dispatches to the results view for the selected calculator, or a hint
//! when nothing has been calculated yet.

use iced::widget::{column, container, scrollable, text, Column, Space};
use iced::{Element, Length};

use crate::{App, EditorSelection, Message};
use super::{result_binomial, result_dataset, result_hypergeometric};

/// Render the results panel based on current selection and calculation state
///
/// This panel uses the complementary ratio (1 - input_ratio).
pub fn view_results_panel(app: &App, input_ratio: f32) -> Element<'_, Message> {
    let content: Column<'_, Message> = match app.selection {
        EditorSelection::Binomial => match &app.binomial_result {
            Some(result) => result_binomial::view(result, &app.config.display, &app.binomial_chart),
            None => placeholder("Ingrese n y p y presione CALCULAR"),
        },
        EditorSelection::Hypergeometric => match &app.hypergeometric_result {
            Some(summary) => result_hypergeometric::view(summary, &app.config.display, &app.hypergeometric_chart),
            None => placeholder("Ingrese N, K, n y x y presione CALCULAR"),
        },
        EditorSelection::Dataset => match &app.dataset_result {
            Some(summary) => result_hypergeometric::view(summary, &app.config.display, &app.dataset_chart),
            None => match &app.dataset.dataset {
                Some(dataset) => result_dataset::view(dataset, &app.dataset),
                None => placeholder("Cargue un archivo Excel o CSV para comenzar"),
            },
        },
    };

    // Use complementary ratio (scale to 0-100 for better precision)
    let portion = ((1.0 - input_ratio) * 100.0) as u16;

    container(scrollable(content.padding(8)))
        .width(Length::FillPortion(portion))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn placeholder(hint: &str) -> Column<'_, Message> {
    column![
        text("Resultados").size(14),
        Space::new().height(8),
        text(hint).size(12).color([0.5, 0.5, 0.5]),
    ]
}
