use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::controller::{Ack, PointerVisibility, Signal, ViewAction, ViewMode};
use crate::io::store::Store;
use crate::util::unicode::pop_grapheme;

use super::app::App;

/// Handle a key press. Navigation and confirm keys only enqueue a signal;
/// the controller applies it when the event loop drains.
pub fn handle_key<S: Store>(app: &mut App<S>, key: KeyEvent) -> Ack {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return Ack::Ignored;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ack::Handled;
    }

    let mode = app.controller.mode();
    match (mode, key.code) {
        (_, KeyCode::Up) => app.controller.handle_signal(Signal::MoveUp),
        (_, KeyCode::Down) => app.controller.handle_signal(Signal::MoveDown),
        (_, KeyCode::Enter) => app.controller.handle_signal(Signal::Confirm),
        (ViewMode::MainList, KeyCode::Esc) => Ack::Ignored,
        (_, KeyCode::Esc) => {
            app.controller.apply(ViewAction::Dismiss);
            Ack::Handled
        }
        (ViewMode::InputSuggest, KeyCode::Backspace) => {
            let text = pop_grapheme(app.controller.text()).to_string();
            app.controller.set_text(text);
            Ack::Handled
        }
        (ViewMode::InputSuggest, KeyCode::Char(c))
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let mut text = app.controller.text().to_string();
            text.push(c);
            app.controller.set_text(text);
            Ack::Handled
        }
        (ViewMode::MainList | ViewMode::CategoryPicker, KeyCode::Char('i' | '/')) => {
            app.controller.apply(ViewAction::FocusInput);
            Ack::Handled
        }
        (ViewMode::MainList, KeyCode::Char('c')) => {
            app.controller.apply(ViewAction::OpenCategoryPicker);
            Ack::Handled
        }
        (ViewMode::MainList, KeyCode::Char('q')) => {
            app.should_quit = true;
            Ack::Handled
        }
        _ => Ack::Ignored,
    }
}

/// Handle a mouse event: movement re-arms hover, clicks select or switch
/// modes.
pub fn handle_mouse<S: Store>(app: &mut App<S>, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => {
            let was_hidden = !app.controller.pointer().is_visible();
            app.controller.pointer_moved();
            let mode = app.controller.mode();
            let row = app.row_at(mouse.column, mouse.row);
            if row == app.hovered {
                // The keyboard took the highlight; give it back to this row
                if let (true, Some(current)) = (was_hidden, row) {
                    app.controller.hover(current, mode, true);
                }
            } else {
                if let Some(prev) = app.hovered {
                    app.controller.hover(prev, mode, false);
                }
                if let Some(next) = row {
                    app.controller.hover(next, mode, true);
                }
                app.hovered = row;
            }
        }
        MouseEventKind::Down(MouseButton::Left) => click(app, mouse.column, mouse.row),
        _ => {}
    }
}

fn click<S: Store>(app: &mut App<S>, column: u16, row: u16) {
    if let Some(index) = app.row_at(column, row) {
        if let Some(selection) = app.controller.candidates().selection_at(index) {
            app.controller.commit(selection);
        }
        return;
    }
    let hit = |r: ratatui::layout::Rect| {
        column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
    };
    let action = if hit(app.layout.header) {
        ViewAction::OpenCategoryPicker
    } else if hit(app.layout.input) {
        ViewAction::FocusInput
    } else {
        ViewAction::BackgroundTap
    };
    app.controller.apply(action);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Controller, HoverGate, NO_SELECTION};
    use crate::io::store::MemoryStore;
    use crate::model::{Category, CategoryId, InputConfig, Item};
    use crate::tui::theme::Theme;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

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
        let mut app = App::new(controller, Theme::default());
        app.layout.header = Rect::new(0, 0, 40, 1);
        app.layout.input = Rect::new(0, 1, 40, 1);
        app.layout.list = Rect::new(0, 3, 40, 10);
        app
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) -> Ack {
        let key = KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        handle_key(app, key)
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn arrow_is_acknowledged_but_applied_on_drain() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Down), Ack::Handled);
        assert_eq!(app.controller.cursor().index(), NO_SELECTION);
        app.controller.drain();
        assert_eq!(app.controller.cursor().index(), 0);
    }

    #[test]
    fn typing_requires_focus() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('x')), Ack::Ignored);
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.controller.mode(), ViewMode::InputSuggest);
        type_text(&mut app, "Plan@pe");
        assert_eq!(app.controller.text(), "Plan@pe");
        assert!(app.controller.is_tagging());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller.text(), "Plan@p");
    }

    #[test]
    fn full_keyboard_flow_creates_item() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "Stretch@pe");
        press(&mut app, KeyCode::Enter);
        app.controller.drain();
        assert_eq!(app.controller.active_category().unwrap().name, "Personal");
        assert_eq!(app.controller.text(), "Stretch");

        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Enter);
        app.controller.drain();
        let first = &app.controller.items()[0];
        assert_eq!(first.name, "Stretch");
        assert_eq!(first.category, CategoryId::new("personal"));
        assert_eq!(app.controller.mode(), ViewMode::MainList);
    }

    #[test]
    fn esc_dismisses_and_q_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.controller.mode(), ViewMode::CategoryPicker);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.controller.mode(), ViewMode::MainList);
        assert_eq!(press(&mut app, KeyCode::Esc), Ack::Ignored);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn q_is_text_inside_input() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.controller.text(), "q");
    }

    #[test]
    fn hover_after_pointer_move() {
        let mut app = app();
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 2, 4));
        assert_eq!(app.controller.cursor().index(), 1);
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 2, 20));
        assert_eq!(app.controller.cursor().index(), NO_SELECTION);
    }

    #[test]
    fn pointer_reclaims_row_after_keyboard() {
        let mut app = app();
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 2, 4));
        assert_eq!(app.controller.cursor().index(), 1);

        press(&mut app, KeyCode::Up);
        app.controller.drain();
        assert_eq!(app.controller.cursor().index(), 0);
        assert!(!app.controller.pointer().is_visible());

        // A small move inside the same row takes the highlight back
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 5, 4));
        assert_eq!(app.controller.cursor().index(), 1);

        // Once visible, moving within the row changes nothing
        press(&mut app, KeyCode::Up);
        app.controller.drain();
        app.controller.pointer_moved();
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 6, 4));
        assert_eq!(app.controller.cursor().index(), 0);
    }

    #[test]
    fn click_row_commits_and_click_header_opens_picker() {
        let mut app = app();
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 2, 3));
        assert!(app.controller.is_marked(&app.controller.items()[0].id));

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 2, 0));
        assert_eq!(app.controller.mode(), ViewMode::CategoryPicker);

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 2, 30));
        assert_eq!(app.controller.mode(), ViewMode::MainList);
    }
}
