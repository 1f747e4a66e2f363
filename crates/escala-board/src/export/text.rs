//! Chat-markup text export (`*bold*`, `_italic_`).

use crate::export::{ExportInput, ScheduleView, build_view};
use crate::navigation::ViewMode;

const EMPTY_NOTICE: &str = "_Nenhum funcionário escalado_";

/// ## Summary
/// Renders the board as chat markup.
///
/// Days without any assigned shift are left out; an entirely empty window
/// renders the header and a notice.
#[must_use]
pub fn render_text(input: &ExportInput<'_>) -> String {
    render_view(&build_view(input))
}

/// ## Summary
/// Renders an already-resolved view.
#[must_use]
pub fn render_view(view: &ScheduleView) -> String {
    let title = match view.mode {
        ViewMode::Weekly => "*ESCALA SEMANAL*",
        ViewMode::PointInTime => "*ESCALA PONTUAL*",
    };

    let mut blocks = vec![format!("{title}\n_{}_", view.period_label())];

    if view.is_empty() {
        blocks.push(EMPTY_NOTICE.to_string());
        return blocks.join("\n\n");
    }

    for day in view.days.iter().filter(|d| !d.shifts.is_empty()) {
        let mut lines = vec![format!(
            "*{} ({})*",
            day.day.weekday_name(),
            day.day.short_label()
        )];
        for (index, shift) in day.shifts.iter().enumerate() {
            if index > 0 {
                lines.push(String::new());
            }
            lines.push(format!("_{}_", shift.title));
            lines.extend(shift.names.iter().map(|name| format!("• {name}")));
        }
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}

/// Editable copy of the generated text.
///
/// The user may rewrite the text freely before copying it; `restore` throws
/// the edits away and regenerates from the live board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDraft {
    generated: String,
    current: String,
}

impl TextDraft {
    #[must_use]
    pub fn generate(input: &ExportInput<'_>) -> Self {
        let generated = render_text(input);
        Self {
            current: generated.clone(),
            generated,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.current
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.current = text.into();
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.current != self.generated
    }

    /// ## Summary
    /// Discards edits and regenerates from `input`.
    pub fn restore(&mut self, input: &ExportInput<'_>) {
        *self = Self::generate(input);
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.current
    }
}
