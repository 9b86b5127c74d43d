use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::controller::{CandidateSource, ViewMode};
use crate::io::store::Store;
use crate::util::unicode::{display_width, truncate_to_width};

use super::app::App;

const INPUT_PLACEHOLDER: &str = "What's your focus?";

/// Main render function: header, input line, active list, key hints
pub fn render<S: Store>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(1), // input
            Constraint::Length(1), // list title
            Constraint::Min(1),    // list
            Constraint::Length(1), // hints
        ])
        .split(area);

    app.layout.header = chunks[0];
    app.layout.input = chunks[1];
    app.layout.list = chunks[3];

    render_header(frame, app, chunks[0]);
    render_input(frame, app, chunks[1]);
    render_list_title(frame, app, chunks[2]);
    render_list(frame, app, chunks[3]);
    render_hints(frame, app, chunks[4]);
}

fn render_header<S: Store>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(" Category: ", Style::default().fg(theme.dim))];
    match app.controller.active_category() {
        Some(cat) => spans.push(Span::styled(
            format!("{} \u{25be}", cat.name),
            Style::default()
                .fg(theme.category_color(cat))
                .add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled(
            "No Category Found",
            Style::default().fg(theme.dim),
        )),
    }

    let marked = app.controller.marked_count();
    if marked > 0 {
        let label = format!("{} done ", marked);
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let pad = (area.width as usize).saturating_sub(used + display_width(&label));
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(label, Style::default().fg(theme.green)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input<S: Store>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let focused = app.controller.mode() == ViewMode::InputSuggest;
    let text = app.controller.text();

    let prompt_style = if focused {
        Style::default().fg(theme.highlight)
    } else {
        Style::default().fg(theme.dim)
    };
    let mut spans = vec![Span::styled(" > ", prompt_style)];

    if text.is_empty() && !focused {
        spans.push(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(theme.dim)));
    } else {
        let input = app.controller.input();
        // Split off the open tag so it reads as a tag, not item text
        let tag_start = input
            .is_tag_active
            .then(|| text.rfind(app.controller.trigger()))
            .flatten();
        match tag_start {
            Some(pos) => {
                spans.push(Span::styled(&text[..pos], Style::default().fg(theme.text_bright)));
                spans.push(Span::styled(&text[pos..], Style::default().fg(theme.highlight)));
            }
            None => spans.push(Span::styled(text, Style::default().fg(theme.text_bright))),
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if focused {
        let x = area.x + 3 + display_width(text) as u16;
        if x < area.x + area.width {
            frame.set_cursor_position((x, area.y));
        }
    }
}

fn render_list_title<S: Store>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let title = match app.controller.candidate_source() {
        CandidateSource::Items => "Todos".to_string(),
        CandidateSource::AllCategories => "Categories".to_string(),
        CandidateSource::TaggedCategories => format!(
            "Tag {}{}",
            app.controller.trigger(),
            app.controller.input().tag_query
        ),
        CandidateSource::Suggestions => "Suggestions".to_string(),
    };
    let line = Line::from(Span::styled(
        format!(" {}", title),
        Style::default()
            .fg(app.theme.dim)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list<S: Store>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let len = app.controller.candidates().len();
    let height = area.height as usize;
    app.sync_scroll(len, height);

    let app = &*app;
    let theme = &app.theme;
    let mode = app.controller.mode();
    let highlighted = app.controller.highlighted(mode);
    let width = area.width as usize;

    let mut lines: Vec<Line> = Vec::new();
    if len == 0 {
        let empty = match app.controller.candidate_source() {
            CandidateSource::TaggedCategories => " No matching category",
            CandidateSource::Suggestions => " Enter adds a new todo",
            _ => " Nothing here yet",
        };
        lines.push(Line::from(Span::styled(empty, Style::default().fg(theme.dim))));
    }

    for index in app.scroll_offset..(app.scroll_offset + height).min(len) {
        let is_cursor = highlighted == Some(index);
        let marker = if is_cursor { " \u{25b6} " } else { "   " };
        let row_style = if is_cursor {
            Style::default().bg(theme.selection_bg).fg(theme.text_bright)
        } else {
            Style::default().fg(theme.text)
        };

        let mut spans = vec![Span::styled(marker, row_style.fg(theme.highlight))];
        match app.controller.candidate_source() {
            CandidateSource::Items | CandidateSource::Suggestions => {
                let items = match app.controller.candidate_source() {
                    CandidateSource::Items => app.controller.items(),
                    _ => app.controller.suggestions(),
                };
                let item = &items[index];
                let check = if mode == ViewMode::MainList && app.controller.is_marked(&item.id) {
                    Span::styled("[x] ", row_style.fg(theme.green))
                } else {
                    Span::styled("[ ] ", row_style)
                };
                spans.push(check);
                let category = app.controller.category(&item.category);
                let tag = category.map(|c| c.name.as_str()).unwrap_or("");
                let name_budget = width.saturating_sub(7 + display_width(tag) + 2);
                spans.push(Span::styled(truncate_to_width(&item.name, name_budget), row_style));
                if let Some(cat) = category {
                    spans.push(Span::styled("  ", row_style));
                    spans.push(Span::styled(
                        cat.name.clone(),
                        row_style.fg(theme.category_color(cat)),
                    ));
                }
            }
            CandidateSource::AllCategories | CandidateSource::TaggedCategories => {
                let cats = match app.controller.candidate_source() {
                    CandidateSource::AllCategories => app.controller.categories(),
                    _ => app.controller.filtered_categories(),
                };
                let cat = &cats[index];
                spans.push(Span::styled("\u{25cf} ", row_style.fg(theme.category_color(cat))));
                spans.push(Span::styled(
                    truncate_to_width(&cat.name, width.saturating_sub(5)),
                    row_style,
                ));
            }
        }

        // Fill the rest of the row so the selection background spans it
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), row_style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_hints<S: Store>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let hints = match app.controller.mode() {
        ViewMode::MainList => " \u{2191}\u{2193} move  enter done  i add  c category  q quit",
        ViewMode::CategoryPicker => " \u{2191}\u{2193} move  enter choose  esc back",
        ViewMode::InputSuggest if app.controller.is_tagging() => {
            " \u{2191}\u{2193} move  enter tag  esc cancel"
        }
        ViewMode::InputSuggest => " \u{2191}\u{2193} move  enter add  @ tag  esc cancel",
    };
    let line = Line::from(Span::styled(hints, Style::default().fg(app.theme.dim)));
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Controller, HoverGate, Signal, ViewAction};
    use crate::io::store::MemoryStore;
    use crate::model::{Category, CategoryId, InputConfig, Item};
    use crate::tui::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const TERM_W: u16 = 60;
    const TERM_H: u16 = 12;

    fn app() -> App<MemoryStore> {
        let store = MemoryStore::new(
            vec![
                Category::new("work", "Work", "#4488FF"),
                Category::new("personal", "Personal", "#44FF88"),
            ],
            vec![
                Item::new("Review PRs", CategoryId::new("work")),
                Item::new("Gym", CategoryId::new("personal")),
            ],
        );
        let controller = Controller::new(store, HoverGate::default(), &InputConfig::default());
        App::new(controller, Theme::default())
    }

    /// Render into an in-memory buffer and return plain text (no styles).
    fn render_to_string(app: &mut App<MemoryStore>) -> String {
        let backend = TestBackend::new(TERM_W, TERM_H);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buf = terminal.backend().buffer().clone();
        let w = buf.area.width as usize;
        let lines: Vec<String> = buf
            .content
            .chunks(w)
            .map(|row| {
                let s: String = row.iter().map(|cell| cell.symbol()).collect();
                s.trim_end().to_string()
            })
            .collect();
        lines.join("\n")
    }

    #[test]
    fn main_list_shows_items_and_category() {
        let mut app = app();
        let out = render_to_string(&mut app);
        assert!(out.contains("Category: Work"), "{out}");
        assert!(out.contains(INPUT_PLACEHOLDER));
        assert!(out.contains("Todos"));
        assert!(out.contains("[ ] Review PRs  Work"), "{out}");
        assert!(out.contains("[ ] Gym  Personal"), "{out}");
    }

    #[test]
    fn cursor_row_has_marker() {
        let mut app = app();
        app.controller.handle_signal(Signal::MoveDown);
        app.controller.handle_signal(Signal::MoveDown);
        app.controller.drain();
        let out = render_to_string(&mut app);
        assert!(out.contains("\u{25b6} [ ] Gym"), "{out}");
        assert!(!out.contains("\u{25b6} [ ] Review"), "{out}");
    }

    #[test]
    fn tagging_shows_filtered_categories() {
        let mut app = app();
        app.controller.apply(ViewAction::FocusInput);
        app.controller.set_text("Plan@pe");
        let out = render_to_string(&mut app);
        assert!(out.contains("> Plan@pe"), "{out}");
        assert!(out.contains("Tag @pe"), "{out}");
        assert!(out.contains("\u{25b6} \u{25cf} Personal"), "{out}");
        assert!(!out.contains("\u{25cf} Work"), "{out}");
    }

    #[test]
    fn empty_suggestions_hint() {
        let mut app = app();
        app.controller.apply(ViewAction::FocusInput);
        app.controller.set_text("zzz");
        let out = render_to_string(&mut app);
        assert!(out.contains("Enter adds a new todo"), "{out}");
    }

    #[test]
    fn render_records_layout() {
        let mut app = app();
        render_to_string(&mut app);
        assert_eq!(app.layout.header.y, 0);
        assert_eq!(app.layout.input.y, 1);
        assert_eq!(app.layout.list.y, 3);
        assert_eq!(app.layout.list.height, TERM_H - 4);
    }
}
