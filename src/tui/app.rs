use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::controller::{Controller, HoverGate, ViewMode};
use crate::io::store::Store;

use super::input;
use super::render;
use super::theme::Theme;

/// Screen regions from the last draw, used for pointer hit tests
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenLayout {
    pub header: Rect,
    pub input: Rect,
    pub list: Rect,
}

/// Main application state
pub struct App<S: Store> {
    pub controller: Controller<S, HoverGate>,
    pub theme: Theme,
    pub should_quit: bool,
    /// First visible row of the candidate list
    pub scroll_offset: usize,
    /// Mode the scroll offset belongs to
    pub scroll_mode: ViewMode,
    /// Row under the pointer, if any
    pub hovered: Option<usize>,
    pub layout: ScreenLayout,
}

impl<S: Store> App<S> {
    pub fn new(controller: Controller<S, HoverGate>, theme: Theme) -> Self {
        App {
            controller,
            theme,
            should_quit: false,
            scroll_offset: 0,
            scroll_mode: ViewMode::MainList,
            hovered: None,
            layout: ScreenLayout::default(),
        }
    }

    /// Keep the scroll offset valid for a list of `len` rows shown in
    /// `height` rows, following the controller's scroll target.
    pub fn sync_scroll(&mut self, len: usize, height: usize) {
        let mode = self.controller.mode();
        if mode != self.scroll_mode {
            self.scroll_mode = mode;
            self.scroll_offset = 0;
            self.hovered = None;
        }
        if height == 0 {
            return;
        }
        if let Some(target) = self.controller.scroll_target_for(mode) {
            if target < self.scroll_offset {
                self.scroll_offset = target;
            } else if target >= self.scroll_offset + height {
                self.scroll_offset = target + 1 - height;
            }
        }
        self.scroll_offset = self.scroll_offset.min(len.saturating_sub(height));
    }

    /// Candidate row under screen position `(column, row)`, if any
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let list = self.layout.list;
        let inside = column >= list.x
            && column < list.x + list.width
            && row >= list.y
            && row < list.y + list.height;
        if !inside {
            return None;
        }
        let index = self.scroll_offset + usize::from(row - list.y);
        (index < self.controller.candidates().len()).then_some(index)
    }
}

/// Run the TUI application
pub fn run<S: Store>(
    controller: Controller<S, HoverGate>,
    theme: Theme,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(controller, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop<S: Store>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // Signals accepted during this dispatch take effect now, before the
        // next draw.
        for event in app.controller.drain() {
            tracing::debug!(?event, "controller");
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
