use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Title line, filter bar and a spacer.
pub const HEADER_HEIGHT: u16 = 3;
/// Pagination controls and key hints.
pub const FOOTER_HEIGHT: u16 = 2;
/// Borders plus five content lines.
pub const CARD_HEIGHT: u16 = 7;

/// Column count by terminal width: one column on narrow terminals, two on
/// medium ones, four on wide ones.
pub fn columns_for_width(width: u16) -> usize {
    if width >= 160 {
        4
    } else if width >= 90 {
        2
    } else {
        1
    }
}

pub fn grid_height(term_height: u16) -> u16 {
    term_height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT)
}

pub struct FrameAreas {
    pub header: Rect,
    pub grid: Rect,
    pub footer: Rect,
}

pub fn split_frame(area: Rect) -> FrameAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);
    FrameAreas {
        header: chunks[0],
        grid: chunks[1],
        footer: chunks[2],
    }
}

/// Row/column arrangement of the card grid for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardGrid {
    pub columns: usize,
    pub visible_rows: usize,
    pub total_rows: usize,
}

impl CardGrid {
    pub fn new(width: u16, height: u16, card_count: usize) -> Self {
        let columns = columns_for_width(width);
        let visible_rows = ((height / CARD_HEIGHT) as usize).max(1);
        let total_rows = card_count.div_ceil(columns);
        Self {
            columns,
            visible_rows,
            total_rows,
        }
    }

    pub fn for_terminal(term_width: u16, term_height: u16, card_count: usize) -> Self {
        Self::new(term_width, grid_height(term_height), card_count)
    }

    pub fn max_scroll(&self) -> usize {
        self.total_rows.saturating_sub(self.visible_rows)
    }

    /// Indices of the cards on screen when scrolled to `scroll_row`.
    pub fn visible_range(&self, scroll_row: usize, card_count: usize) -> std::ops::Range<usize> {
        let first_row = scroll_row.min(self.max_scroll());
        let start = (first_row * self.columns).min(card_count);
        let end = ((first_row + self.visible_rows) * self.columns).min(card_count);
        start..end
    }
}
