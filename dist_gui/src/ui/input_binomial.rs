//! Input view for the binomial calculator
//!
//! Fields: sample size n, success probability p, optional population N and
//! the X values to evaluate.

use iced::widget::{column, text, Column, Space};

use crate::ui::shared::fields::{action_buttons, labeled_input};
use crate::{BinomialForm, Message};

/// Render the binomial input fields
pub fn view(form: &BinomialForm) -> Column<'_, Message> {
    column![
        text("Parámetros").size(13),
        Space::new().height(4),
        labeled_input(
            "Tamaño de muestra (n):",
            "Ej: 10",
            "",
            &form.n,
            Message::BinomialNChanged,
        ),
        labeled_input(
            "Probabilidad de éxito (p):",
            "Ej: 0.5",
            "Entre 0 y 1; se acepta coma decimal",
            &form.p,
            Message::BinomialPChanged,
        ),
        labeled_input(
            "Población (N):",
            "Ej: 100",
            "Opcional; vacío o 0 = población infinita",
            &form.population,
            Message::BinomialPopulationChanged,
        ),
        labeled_input(
            "Valores de X:",
            "Ej: 0,1,2,3 o 'todos'",
            "Lista separada por coma, un número k (0..k) o 'todos'",
            &form.x,
            Message::BinomialXChanged,
        ),
        Space::new().height(12),
        action_buttons(Message::CalculateBinomial, Message::ClearBinomial),
    ]
    .spacing(6)
}
