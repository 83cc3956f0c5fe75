//! Input Panel (Center)
//!
//! Dispatches to the input editor for the selected calculator:
//! - Binomial -> input_binomial
//! - Hypergeometric -> input_hypergeometric
//! - Dataset -> input_dataset

use iced::widget::{column, container, scrollable, text, Column, Space};
use iced::{Element, Length};

use crate::{App, EditorSelection, Message};
use super::{input_binomial, input_dataset, input_hypergeometric};

/// Render the input panel based on current selection
///
/// The `ratio` parameter determines the relative size of this panel vs results panel.
pub fn view_input_panel(app: &App, ratio: f32) -> Element<'_, Message> {
    let editor: Column<'_, Message> = match app.selection {
        EditorSelection::Binomial => input_binomial::view(&app.binomial),
        EditorSelection::Hypergeometric => input_hypergeometric::view(&app.hypergeometric),
        EditorSelection::Dataset => input_dataset::view(&app.dataset),
    };

    let panel = column![
        text(app.selection.title()).size(16),
        Space::new().height(10),
        editor,
    ];

    // Convert ratio to fill portion (scale to 0-100 for better precision)
    let portion = (ratio * 100.0) as u16;

    container(scrollable(panel.padding(8)))
        .width(Length::FillPortion(portion))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}
