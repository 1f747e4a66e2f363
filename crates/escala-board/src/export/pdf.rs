//! PDF rendering of a [`DocumentLayout`].

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::day::DayKey;
use crate::export::layout::{DocumentLayout, layout_document};
use crate::export::{ExportError, ExportInput, ExportResult, build_view};
use crate::navigation::ViewMode;

/// ## Summary
/// Download name for the export, e.g. `escala-semanal-03-06-2024.pdf`.
#[must_use]
pub fn file_name(mode: ViewMode, start: DayKey) -> String {
    let kind = match mode {
        ViewMode::Weekly => "semanal",
        ViewMode::PointInTime => "pontual",
    };
    format!("escala-{kind}-{}.pdf", start.file_label())
}

/// ## Summary
/// Lays out and renders the board as a PDF document.
///
/// ## Errors
/// Returns `ExportError::Pdf` if the document cannot be produced.
pub fn render_pdf(input: &ExportInput<'_>) -> ExportResult<Vec<u8>> {
    let layout = layout_document(&build_view(input));
    render_layout(&layout)
}

/// ## Summary
/// Writes each laid-out page with the built-in Helvetica faces.
///
/// ## Errors
/// Returns `ExportError::Pdf` if a font cannot be registered or the document
/// cannot be serialized.
#[tracing::instrument(skip(layout), fields(pages = layout.pages.len()))]
pub fn render_layout(layout: &DocumentLayout) -> ExportResult<Vec<u8>> {
    let width = Mm(layout.geometry.width_mm);
    let height = Mm(layout.geometry.height_mm);

    let (doc, first_page, first_layer) =
        PdfDocument::new(layout.title.as_str(), width, height, "Camada 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("failed to add regular font: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("failed to add bold font: {e}")))?;

    for (index, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, format!("Camada {}", index + 1))
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for item in &page.items {
            let font: &IndirectFontRef = if item.style.bold() { &bold } else { &regular };
            layer.use_text(
                item.text.as_str(),
                item.style.font_size_pt(),
                Mm(item.x_mm),
                Mm(layout.geometry.height_mm - item.baseline_mm),
                font,
            );
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::Pdf(format!("failed to serialize document: {e}")))?;

    tracing::debug!(size = bytes.len(), "PDF rendered");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::*;
    use crate::navigation::{DateWindow, Navigator};
    use crate::shift::default_shifts;

    #[test]
    fn test_file_names() {
        assert_eq!(
            file_name(ViewMode::Weekly, day("2024-06-03")),
            "escala-semanal-03-06-2024.pdf"
        );
        assert_eq!(
            file_name(ViewMode::PointInTime, day("2024-06-05")),
            "escala-pontual-05-06-2024.pdf"
        );
    }

    #[test_log::test]
    fn test_render_weekly_pdf() {
        let map = week_map();
        let shifts = default_shifts();
        let dir = directory();
        let input = ExportInput {
            mode: ViewMode::Weekly,
            window: Navigator::new(day("2024-06-03")).window(),
            map: &map,
            shifts: &shifts,
            directory: &dir,
        };

        let bytes = render_pdf(&input).expect("pdf renders");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_daily_pdf() {
        let map = week_map();
        let shifts = default_shifts();
        let dir = directory();
        let input = ExportInput {
            mode: ViewMode::PointInTime,
            window: DateWindow::for_mode(ViewMode::PointInTime, day("2024-06-05")),
            map: &map,
            shifts: &shifts,
            directory: &dir,
        };

        let bytes = render_pdf(&input).expect("pdf renders");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
