//! Status Bar (Bottom)
//!
//! Displays the active calculator and the summary of the last result
//! (or the last status message).

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use crate::{EditorSelection, Message};

/// Render the status bar
pub fn view_status_bar(selection: EditorSelection, status: &str) -> Element<'_, Message> {
    row![
        text(selection.label()).size(10).color([0.5, 0.5, 0.5]),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
