//! Input view for the hypergeometric calculator

use iced::widget::{column, text, Column, Space};

use dist_core::calculations::hypergeometric::HYPERGEOMETRIC_THRESHOLD;
use dist_core::format::format_percent;

use crate::ui::shared::fields::{action_buttons, labeled_input};
use crate::{HypergeometricForm, Message};

/// Render the hypergeometric input fields
pub fn view(form: &HypergeometricForm) -> Column<'_, Message> {
    column![
        text("Parámetros").size(13),
        Space::new().height(4),
        labeled_input(
            "Población (N):",
            "Ej: 20",
            "",
            &form.population,
            Message::HypergeometricPopulationChanged,
        ),
        labeled_input(
            "Éxitos en población (K):",
            "Ej: 6",
            "",
            &form.successes,
            Message::HypergeometricSuccessesChanged,
        ),
        labeled_input(
            "Tamaño de muestra (n):",
            "Ej: 5",
            "",
            &form.sample,
            Message::HypergeometricSampleChanged,
        ),
        labeled_input(
            "Éxitos deseados (x):",
            "Ej: 2",
            "Entre 0 y min(n, K)",
            &form.x,
            Message::HypergeometricXChanged,
        ),
        Space::new().height(4),
        text(format!(
            "Se usa el modelo hipergeométrico cuando n/N ≥ {}; si no, binomial con p = K/N.",
            format_percent(HYPERGEOMETRIC_THRESHOLD, 0)
        ))
        .size(10)
        .color([0.5, 0.5, 0.5]),
        Space::new().height(12),
        action_buttons(Message::CalculateHypergeometric, Message::ClearHypergeometric),
    ]
    .spacing(6)
}
