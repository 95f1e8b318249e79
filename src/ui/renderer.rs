use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::Character;
use crate::core::app::App;
use crate::core::constants::APP_TITLE;
use crate::core::filter::FilterField;
use crate::ui::layout::{split_frame, CardGrid, CARD_HEIGHT};
use crate::ui::theme::Theme;
use crate::utils::text::truncate_to_width;

const STATUS_DOT: &str = "●";

pub fn ui(f: &mut Frame, app: &App) {
    let theme = &app.ui.theme;
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        f.area(),
    );

    let areas = split_frame(f.area());
    render_header(f, app, areas.header);
    render_grid(f, app, areas.grid);
    render_footer(f, app, areas.footer);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![title_line(app), filter_bar_line(app), Line::from("")];
    f.render_widget(Paragraph::new(lines), area);
}

pub fn title_line(app: &App) -> Line<'static> {
    let theme = &app.ui.theme;
    let mut page_text = format!("Page {}", app.pagination.page());
    if let Some(info) = &app.page_info {
        page_text.push_str(&format!(" of {} · {} characters", info.pages, info.count));
    }

    let mut spans = vec![
        Span::styled(APP_TITLE.to_string(), theme.title_style),
        Span::styled("  ".to_string(), theme.hint_style),
        Span::styled(page_text, theme.hint_style),
    ];
    if app.is_loading() {
        spans.push(Span::styled("  loading…".to_string(), theme.loading_style));
    }
    Line::from(spans)
}

pub fn filter_bar_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, field) in [FilterField::Status, FilterField::Gender].into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("    "));
        }
        spans.extend(filter_control_spans(app, field));
    }
    Line::from(spans)
}

fn filter_control_spans(app: &App, field: FilterField) -> Vec<Span<'static>> {
    let theme = &app.ui.theme;
    let value_style = if app.ui.focus == field {
        theme.filter_focused_style
    } else {
        theme.filter_value_style
    };

    let mut spans = vec![
        Span::styled(format!("{}: ", field.label()), theme.filter_label_style),
        Span::styled(format!("[{}]", app.selection.get(field)), value_style),
    ];
    if app.is_selection_stale(field) {
        spans.push(Span::styled(
            " (not on this page)".to_string(),
            theme.filter_stale_style,
        ));
    }
    spans
}

fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    if app.visible.is_empty() {
        let message = if app.loaded_page.is_none() {
            "Loading characters..."
        } else {
            "No characters match the current filters."
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(message, theme.card_muted_style)))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let grid = CardGrid::new(area.width, area.height, app.visible.len());
    let range = grid.visible_range(app.ui.scroll_row, app.visible.len());

    for (slot, character) in app.visible[range].iter().enumerate() {
        let row = slot / grid.columns;
        let column = slot % grid.columns;
        let rect = card_rect(area, grid.columns, row, column);
        if rect.height == 0 || rect.width == 0 {
            continue;
        }
        render_card(f, app, character, rect);
    }
}

fn card_rect(area: Rect, columns: usize, row: usize, column: usize) -> Rect {
    let columns = columns as u16;
    let column = column as u16;
    let base_width = area.width / columns;
    let x = area.x + base_width * column;
    let width = if column + 1 == columns {
        area.width - base_width * column
    } else {
        base_width
    };

    let y_offset = (row as u16).saturating_mul(CARD_HEIGHT);
    if y_offset >= area.height {
        return Rect::new(x, area.y, width, 0);
    }
    let height = CARD_HEIGHT.min(area.height - y_offset);
    Rect::new(x, area.y + y_offset, width, height)
}

fn render_card(f: &mut Frame, app: &App, character: &Character, rect: Rect) {
    let theme = &app.ui.theme;
    let inner_width = rect.width.saturating_sub(2) as usize;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border_style);
    let lines = card_lines(app, character, inner_width);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

/// Content lines of one character card, each fitted to `width` columns.
pub fn card_lines(app: &App, character: &Character, width: usize) -> Vec<Line<'static>> {
    let theme: &Theme = &app.ui.theme;
    let episode = app.episode_label(character);

    let status_text = truncate_to_width(
        &format!("{} - {}", character.status, character.species),
        width.saturating_sub(2),
    );

    vec![
        Line::from(Span::styled(
            truncate_to_width(&character.name, width),
            theme.card_name_style,
        )),
        Line::from(vec![
            Span::styled(STATUS_DOT, theme.status_style(&character.status)),
            Span::raw(" "),
            Span::styled(status_text, theme.card_text_style),
        ]),
        Line::from(Span::styled(
            truncate_to_width(
                &format!("Last known location: {}", character.location.name),
                width,
            ),
            theme.card_text_style,
        )),
        Line::from(Span::styled(
            truncate_to_width(&format!("First seen in: {episode}"), width),
            theme.card_text_style,
        )),
        Line::from(Span::styled(
            truncate_to_width(&character.image, width),
            theme.card_muted_style,
        )),
    ]
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let theme = &app.ui.theme;
    if let Some(previous) = previous_control(app) {
        f.render_widget(Paragraph::new(previous), halves[0]);
    }
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(" Next → ", theme.control_style)))
            .alignment(Alignment::Right),
        halves[1],
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(hint_text(app), theme.hint_style))),
        rows[1],
    );
}

/// The "Previous" control, absent on the first page.
pub fn previous_control(app: &App) -> Option<Line<'static>> {
    if !app.pagination.has_previous() {
        return None;
    }
    Some(Line::from(Span::styled(
        " ← Previous ",
        app.ui.theme.control_style,
    )))
}

fn hint_text(app: &App) -> String {
    let pages = if app.pagination.has_previous() {
        "n/→ next  p/← previous"
    } else {
        "n/→ next"
    };
    format!("{pages}  s/g cycle status/gender  Tab focus  ↑/↓ change  j/k scroll  q quit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PageInfo;
    use crate::core::fetcher::FetchedPage;
    use crate::core::filter::FilterSelection;
    use crate::utils::test_utils::{create_test_app, sample_character, sample_page, with_episodes};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn loaded_app(characters: Vec<Character>) -> App {
        let mut app = create_test_app();
        let request = app.fetcher.begin(1);
        app.fetcher.finish(request.request_id);
        app.apply_page(FetchedPage::from_response(1, sample_page(characters)));
        app
    }

    #[test]
    fn card_shows_all_fields() {
        let rick = sample_character(1, "Rick Sanchez", "Alive", "Male");
        let app = loaded_app(vec![rick.clone()]);

        let lines: Vec<String> = card_lines(&app, &rick, 80).iter().map(text).collect();
        assert_eq!(lines[0], "Rick Sanchez");
        assert_eq!(lines[1], "● Alive - Human");
        assert_eq!(lines[2], "Last known location: Earth (C-137)");
        assert_eq!(lines[3], "First seen in: Loading episode...");
        assert!(lines[4].ends_with("/avatar/1.jpeg"));
    }

    #[test]
    fn card_status_dot_uses_status_color() {
        let dead = sample_character(2, "Birdperson", "Dead", "Male");
        let app = loaded_app(vec![dead.clone()]);
        let lines = card_lines(&app, &dead, 40);
        assert_eq!(lines[1].spans[0].style, app.ui.theme.status_dead_style);
    }

    #[test]
    fn card_without_episodes_says_so() {
        let loner = with_episodes(sample_character(3, "Loner", "unknown", "unknown"), &[]);
        let app = loaded_app(vec![loner.clone()]);
        let lines: Vec<String> = card_lines(&app, &loner, 80).iter().map(text).collect();
        assert_eq!(lines[3], "First seen in: No episode data");
    }

    #[test]
    fn card_lines_fit_narrow_width() {
        let rick = sample_character(1, "Rick Sanchez", "Alive", "Male");
        let app = loaded_app(vec![rick.clone()]);
        for line in card_lines(&app, &rick, 10) {
            assert!(unicode_width::UnicodeWidthStr::width(text(&line).as_str()) <= 10);
        }
    }

    #[test]
    fn previous_control_hidden_on_first_page() {
        let mut app = create_test_app();
        assert!(previous_control(&app).is_none());
        app.pagination.next();
        assert!(previous_control(&app).is_some());
    }

    #[test]
    fn title_includes_page_totals_and_loading_marker() {
        let mut app = create_test_app();
        app.page_info = Some(PageInfo {
            count: 826,
            pages: 42,
            next: None,
            prev: None,
        });
        app.fetcher.begin(1);

        let title = text(&title_line(&app));
        assert!(title.starts_with("Rick and Morty Characters"));
        assert!(title.contains("Page 1 of 42 · 826 characters"));
        assert!(title.contains("loading"));
    }

    #[test]
    fn filter_bar_marks_stale_selection() {
        let mut app = loaded_app(vec![sample_character(1, "Rick Sanchez", "Alive", "Male")]);
        app.selection = FilterSelection::new("Dead", "All");

        let bar = text(&filter_bar_line(&app));
        assert_eq!(bar, "Status: [Dead] (not on this page)    Gender: [All]");
    }

    #[test]
    fn card_rect_splits_columns_and_clips_rows() {
        let area = Rect::new(0, 3, 101, 10);
        assert_eq!(card_rect(area, 2, 0, 0), Rect::new(0, 3, 50, 7));
        assert_eq!(card_rect(area, 2, 0, 1), Rect::new(50, 3, 51, 7));
        assert_eq!(card_rect(area, 2, 1, 0), Rect::new(0, 10, 50, 3));
        assert_eq!(card_rect(area, 2, 2, 0).height, 0);
    }
}
