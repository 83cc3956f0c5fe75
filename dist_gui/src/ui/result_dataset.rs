//! Results view for a loaded file before any calculation
//!
//! Shows the frequencies of the selected column and a preview of the first
//! rows of the table.

use iced::widget::{column, row, scrollable, text, Column, Row, Space};
use iced::{Element, Length};

use dist_core::dataset::{frequency_percent, Dataset, PREVIEW_ROWS};

use crate::{DatasetForm, Message};

const CELL_WIDTH: f32 = 110.0;

/// Render frequencies and the table preview
pub fn view<'a>(dataset: &'a Dataset, form: &'a DatasetForm) -> Column<'a, Message> {
    let summary = dataset.summary();

    let mut content = column![
        text(summary.label()).size(14),
        text(format!("Celdas vacías: {}", summary.empty_cells)).size(10).color([0.5, 0.5, 0.5]),
        Space::new().height(10),
    ]
    .spacing(2);

    if let Some(column_name) = &form.column {
        content = content
            .push(text(format!("Frecuencias de '{}'", column_name)).size(12))
            .push(text(format!("Total de registros (N): {}", dataset.row_count())).size(11));

        let total: usize = form.frequencies.iter().map(|(_, count)| count).sum();
        for (value, count) in &form.frequencies {
            let line = text(format!("• {}: {} ({})", value, count, frequency_percent(*count, total))).size(11);
            let line = if form.category.as_deref() == Some(value.as_str()) {
                line.color([0.2, 0.6, 0.2])
            } else {
                line
            };
            content = content.push(line);
        }
        content = content.push(Space::new().height(12));
    }

    let preview = dataset.preview(PREVIEW_ROWS);
    let info = if dataset.row_count() > PREVIEW_ROWS {
        format!("Mostrando {} de {} filas", PREVIEW_ROWS, dataset.row_count())
    } else {
        format!("Total: {} filas | {} columnas", dataset.row_count(), dataset.headers().len())
    };

    let mut table: Column<'a, Message> = column![table_row(dataset.headers(), 11.0)].spacing(2);
    for cells in preview {
        table = table.push(table_row(cells, 10.0));
    }

    content
        .push(text("Datos").size(12))
        .push(text(info).size(10).color([0.5, 0.5, 0.5]))
        .push(Space::new().height(4))
        .push(scrollable(table).direction(scrollable::Direction::Horizontal(scrollable::Scrollbar::default())))
}

fn table_row(cells: &[String], size: f32) -> Element<'_, Message> {
    let mut cells_row: Row<'_, Message> = row![].spacing(6);
    for cell in cells {
        cells_row = cells_row.push(text(cell.as_str()).size(size).width(Length::Fixed(CELL_WIDTH)));
    }
    cells_row.into()
}
