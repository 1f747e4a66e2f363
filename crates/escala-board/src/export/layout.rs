//! Page layout for the PDF export.
//!
//! Positions are in millimetres from the top-left corner of an A4 page. The
//! body is a grid of fixed-height rows; content that runs past the last row of
//! a page continues on the next page in the same column.
//!
//! - Weekly: landscape, seven day columns.
//! - Daily: portrait, shift cards two per row. A row of cards moves to a fresh
//!   page instead of being split, unless it is taller than a whole page.

use crate::export::{DaySection, ScheduleView, ShiftSection};
use crate::navigation::ViewMode;

pub const A4_SHORT_MM: f32 = 210.0;
pub const A4_LONG_MM: f32 = 297.0;

const MARGIN_MM: f32 = 12.0;
const HEADER_MM: f32 = 12.0;
const LINE_MM: f32 = 5.5;
const GUTTER_MM: f32 = 6.0;
const COLUMN_PADDING_MM: f32 = 1.5;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_EM: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    PageNumber,
    DayHeader,
    DayDate,
    ShiftHeader,
    Body,
    Placeholder,
}

impl TextStyle {
    #[must_use]
    pub const fn font_size_pt(self) -> f32 {
        match self {
            Self::Title => 14.0,
            Self::DayHeader => 10.0,
            Self::ShiftHeader => 8.5,
            Self::PageNumber => 8.0,
            Self::DayDate | Self::Body | Self::Placeholder => 9.0,
        }
    }

    #[must_use]
    pub const fn bold(self) -> bool {
        matches!(self, Self::Title | Self::DayHeader | Self::ShiftHeader)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x_mm: f32,
    /// Baseline, measured down from the top edge.
    pub baseline_mm: f32,
    pub style: TextStyle,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PlacedText>,
}

impl Page {
    pub fn texts(&self, style: TextStyle) -> impl Iterator<Item = &PlacedText> {
        self.items.iter().filter(move |item| item.style == style)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageGeometry {
    #[must_use]
    pub const fn for_mode(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Weekly => Self {
                width_mm: A4_LONG_MM,
                height_mm: A4_SHORT_MM,
            },
            ViewMode::PointInTime => Self {
                width_mm: A4_SHORT_MM,
                height_mm: A4_LONG_MM,
            },
        }
    }

    #[must_use]
    pub const fn is_landscape(self) -> bool {
        self.width_mm > self.height_mm
    }

    /// Number of body rows that fit under the page header.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rows_per_page(self) -> usize {
        let usable = self.height_mm - 2.0 * MARGIN_MM - HEADER_MM;
        ((usable / LINE_MM).floor() as usize).max(1)
    }

    fn content_width(self) -> f32 {
        self.width_mm - 2.0 * MARGIN_MM
    }

    fn baseline(self, row: usize) -> f32 {
        MARGIN_MM + HEADER_MM + mm(row) * LINE_MM + LINE_MM * 0.75
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

/// ## Summary
/// Lays out a resolved schedule onto A4 pages.
#[must_use]
pub fn layout_document(view: &ScheduleView) -> DocumentLayout {
    let geometry = PageGeometry::for_mode(view.mode);
    let mut flow = Flow::new(geometry);

    match view.mode {
        ViewMode::Weekly => layout_weekly(&mut flow, &view.days),
        ViewMode::PointInTime => {
            let shifts = view.days.first().map_or(&[][..], |d| d.shifts.as_slice());
            layout_daily(&mut flow, shifts);
        }
    }

    let title = match view.mode {
        ViewMode::Weekly => format!("ESCALA SEMANAL - {}", view.period_label()),
        ViewMode::PointInTime => format!("ESCALA PONTUAL - {}", view.period_label()),
    };

    let mut pages = flow.pages;
    if pages.is_empty() {
        pages.push(Page::default());
    }
    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        let title_baseline = MARGIN_MM + 6.0;
        page.items.insert(
            0,
            PlacedText {
                x_mm: MARGIN_MM,
                baseline_mm: title_baseline,
                style: TextStyle::Title,
                text: title.clone(),
            },
        );
        page.items.insert(
            1,
            PlacedText {
                x_mm: geometry.width_mm - MARGIN_MM - 22.0,
                baseline_mm: title_baseline,
                style: TextStyle::PageNumber,
                text: format!("Página {}/{total}", index + 1),
            },
        );
    }

    DocumentLayout {
        title,
        geometry,
        pages,
    }
}

fn layout_weekly(flow: &mut Flow, days: &[DaySection]) {
    let column_width = flow.geometry.content_width() / 7.0;

    for (column, day) in days.iter().enumerate() {
        let x = MARGIN_MM + mm(column) * column_width + COLUMN_PADDING_MM;
        let width = column_width - 2.0 * COLUMN_PADDING_MM;

        let mut lines = vec![
            (TextStyle::DayHeader, day.day.weekday_name().to_string()),
            (TextStyle::DayDate, day.day.short_label()),
        ];
        if day.shifts.is_empty() {
            lines.push((TextStyle::Placeholder, "-".to_string()));
        }
        for (index, shift) in day.shifts.iter().enumerate() {
            if index > 0 {
                lines.push((TextStyle::Body, String::new()));
            }
            lines.extend(card_lines(shift));
        }

        let mut cursor = Cursor::default();
        for (style, text) in lines {
            cursor.wrap(flow.rows_per_page);
            flow.place(cursor, x, width, style, &text);
            cursor.row += 1;
        }
    }
}

fn layout_daily(flow: &mut Flow, shifts: &[ShiftSection]) {
    if shifts.is_empty() {
        flow.place(
            Cursor::default(),
            MARGIN_MM,
            flow.geometry.content_width(),
            TextStyle::Placeholder,
            "Nenhum funcionário escalado",
        );
        return;
    }

    let column_width = (flow.geometry.content_width() - GUTTER_MM) / 2.0;
    let columns = [MARGIN_MM, MARGIN_MM + column_width + GUTTER_MM];
    let mut cursor = Cursor::default();

    for row_cards in shifts.chunks(2) {
        let cards: Vec<Vec<(TextStyle, String)>> = row_cards.iter().map(card_lines).collect();
        let height = cards.iter().map(Vec::len).max().unwrap_or(0);

        if cursor.row > 0 && cursor.row + height > flow.rows_per_page {
            cursor = cursor.next_page();
        }

        for line in 0..height {
            cursor.wrap(flow.rows_per_page);
            for (card, x) in cards.iter().zip(columns) {
                if let Some((style, text)) = card.get(line) {
                    flow.place(cursor, x, column_width, *style, text);
                }
            }
            cursor.row += 1;
        }

        // spacer between card rows
        cursor.row += 1;
    }
}

fn card_lines(shift: &ShiftSection) -> Vec<(TextStyle, String)> {
    std::iter::once((TextStyle::ShiftHeader, shift.title.clone()))
        .chain(shift.names.iter().map(|name| (TextStyle::Body, name.clone())))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cursor {
    page: usize,
    row: usize,
}

impl Cursor {
    const fn next_page(self) -> Self {
        Self {
            page: self.page + 1,
            row: 0,
        }
    }

    fn wrap(&mut self, rows_per_page: usize) {
        if self.row >= rows_per_page {
            *self = self.next_page();
        }
    }
}

struct Flow {
    geometry: PageGeometry,
    rows_per_page: usize,
    pages: Vec<Page>,
}

impl Flow {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            rows_per_page: geometry.rows_per_page(),
            pages: Vec::new(),
        }
    }

    fn place(&mut self, cursor: Cursor, x_mm: f32, width_mm: f32, style: TextStyle, text: &str) {
        if text.is_empty() {
            return;
        }
        while self.pages.len() <= cursor.page {
            self.pages.push(Page::default());
        }
        let baseline_mm = self.geometry.baseline(cursor.row);
        self.pages[cursor.page].items.push(PlacedText {
            x_mm,
            baseline_mm,
            style,
            text: fit_text(text, width_mm, style),
        });
    }
}

/// ## Summary
/// Shortens `text` with "..." so that it roughly fits `width_mm`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fit_text(text: &str, width_mm: f32, style: TextStyle) -> String {
    let glyph_mm = style.font_size_pt() * PT_TO_MM * GLYPH_EM;
    let max_chars = ((width_mm / glyph_mm).floor().max(0.0) as usize).max(4);
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept.trim_end())
}

#[expect(clippy::cast_precision_loss)]
fn mm(count: usize) -> f32 {
    count as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::AssignmentMap;
    use crate::export::fixtures::*;
    use crate::export::{ExportInput, build_view};
    use crate::navigation::{DateWindow, Navigator};
    use crate::shift::default_shifts;

    fn layout(mode: ViewMode, anchor: &str, map: &AssignmentMap) -> DocumentLayout {
        let shifts = default_shifts();
        let dir = directory();
        let window = match mode {
            ViewMode::Weekly => Navigator::new(day(anchor)).window(),
            ViewMode::PointInTime => DateWindow::for_mode(mode, day(anchor)),
        };
        let input = ExportInput {
            mode,
            window,
            map,
            shifts: &shifts,
            directory: &dir,
        };
        layout_document(&build_view(&input))
    }

    fn crowded_map(d: &str, shift: &str, count: usize) -> AssignmentMap {
        let mut map = AssignmentMap::new();
        for i in 0..count {
            map.assign(key(d, shift), emp(&format!("emp-{i:03}")));
        }
        map
    }

    #[test]
    fn test_weekly_is_landscape_with_seven_columns() {
        let doc = layout(ViewMode::Weekly, "2024-06-03", &week_map());
        assert!(doc.geometry.is_landscape());
        assert_eq!(doc.pages.len(), 1);

        let headers: Vec<_> = doc.pages[0].texts(TextStyle::DayHeader).collect();
        assert_eq!(headers.len(), 7);
        assert_eq!(headers[0].text, "Segunda-feira");
        assert!(headers.windows(2).all(|w| w[0].x_mm < w[1].x_mm));

        // Tuesday has nothing assigned
        assert_eq!(doc.pages[0].texts(TextStyle::Placeholder).count(), 5);
    }

    #[test]
    fn test_weekly_overflow_continues_in_same_column() {
        let rows = PageGeometry::for_mode(ViewMode::Weekly).rows_per_page();
        let map = crowded_map("2024-06-04", "t2", rows + 5);
        let doc = layout(ViewMode::Weekly, "2024-06-03", &map);
        assert_eq!(doc.pages.len(), 2);

        let tuesday_x = doc.pages[0]
            .texts(TextStyle::DayHeader)
            .nth(1)
            .map(|t| t.x_mm)
            .expect("tuesday header");
        let spill: Vec<_> = doc.pages[1].texts(TextStyle::Body).collect();
        assert!(!spill.is_empty());
        assert!(spill.iter().all(|t| (t.x_mm - tuesday_x).abs() < f32::EPSILON));

        // Lines on page one plus lines on page two account for every name
        let body_total: usize = doc.pages.iter().map(|p| p.texts(TextStyle::Body).count()).sum();
        assert_eq!(body_total, rows + 5);
    }

    #[test]
    fn test_every_page_has_title_and_counter() {
        let rows = PageGeometry::for_mode(ViewMode::Weekly).rows_per_page();
        let map = crowded_map("2024-06-04", "t2", rows * 2);
        let doc = layout(ViewMode::Weekly, "2024-06-03", &map);
        assert_eq!(doc.pages.len(), 3);

        for (index, page) in doc.pages.iter().enumerate() {
            let title = page.texts(TextStyle::Title).next().expect("title");
            assert_eq!(title.text, "ESCALA SEMANAL - 03/06/2024 a 09/06/2024");
            let counter = page.texts(TextStyle::PageNumber).next().expect("counter");
            assert_eq!(counter.text, format!("Página {}/3", index + 1));
        }
    }

    #[test]
    fn test_daily_is_portrait_two_column_grid() {
        let mut map = AssignmentMap::new();
        map.assign(key("2024-06-05", "t1"), emp("emp-A"));
        map.assign(key("2024-06-05", "t2"), emp("emp-B"));
        map.assign(key("2024-06-05", "t4"), emp("emp-C"));
        let doc = layout(ViewMode::PointInTime, "2024-06-05", &map);
        assert!(!doc.geometry.is_landscape());
        assert_eq!(doc.pages.len(), 1);

        let cards: Vec<_> = doc.pages[0].texts(TextStyle::ShiftHeader).collect();
        assert_eq!(cards.len(), 3);
        // t1 and t2 share a row, t4 starts the next one in the left column
        assert!((cards[0].baseline_mm - cards[1].baseline_mm).abs() < f32::EPSILON);
        assert!(cards[0].x_mm < cards[1].x_mm);
        assert!((cards[2].x_mm - cards[0].x_mm).abs() < f32::EPSILON);
        assert!(cards[2].baseline_mm > cards[0].baseline_mm);
    }

    #[test]
    fn test_daily_card_row_moves_to_next_page_when_it_does_not_fit() {
        let rows = PageGeometry::for_mode(ViewMode::PointInTime).rows_per_page();
        let per_card = rows * 2 / 3;
        let mut map = AssignmentMap::new();
        for shift in ["t1", "t2", "t3"] {
            for i in 0..per_card {
                map.assign(key("2024-06-05", shift), emp(&format!("{shift}-{i:03}")));
            }
        }
        let doc = layout(ViewMode::PointInTime, "2024-06-05", &map);
        assert_eq!(doc.pages.len(), 2);

        let first_row = PageGeometry::for_mode(ViewMode::PointInTime).baseline(0);
        let second_page_card = doc.pages[1]
            .texts(TextStyle::ShiftHeader)
            .next()
            .expect("t3 card on page two");
        assert!(second_page_card.text.starts_with("3º Turno"));
        assert!((second_page_card.baseline_mm - first_row).abs() < f32::EPSILON);
    }

    #[test]
    fn test_daily_empty_has_placeholder() {
        let doc = layout(ViewMode::PointInTime, "2024-06-05", &AssignmentMap::new());
        assert_eq!(doc.pages.len(), 1);
        let placeholder = doc.pages[0]
            .texts(TextStyle::Placeholder)
            .next()
            .expect("placeholder");
        assert_eq!(placeholder.text, "Nenhum funcionário escalado");
    }

    #[test]
    fn test_fit_text_truncates_long_names() {
        assert_eq!(fit_text("Ana S.", 30.0, TextStyle::Body), "Ana S.");
        let long = "Um nome de turno extremamente comprido que não cabe";
        let fitted = fit_text(long, 20.0, TextStyle::Body);
        assert!(fitted.ends_with("..."));
        assert!(fitted.chars().count() < long.chars().count());
    }
}
