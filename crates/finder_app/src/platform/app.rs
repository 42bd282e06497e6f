use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use finder_core::{update, AppState, AppViewModel, Msg};
use finder_logging::{finder_debug, finder_info, finder_warn};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::logging;
use super::ui::layout::{Hit, ScreenLayout};
use super::ui::{render, Focus, UiState};

const TICK: Duration = Duration::from_millis(50);

pub fn run_app() -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve the working directory")?;
    let (config, config_error) = match config::load_config(&cwd) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    logging::initialize(&config.log_file, config.verbose);
    if let Some(err) = config_error {
        finder_warn!("{}; using default settings", err);
    }
    finder_info!(
        "book_finder {} starting endpoint={}",
        env!("CARGO_PKG_VERSION"),
        config.search_endpoint
    );

    let effects =
        EffectRunner::new(config.fetch_settings()).context("failed to start the search engine")?;
    let mut app = App::new(AppState::with_settings(config.search_settings()), effects);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    finder_info!("book_finder exiting");
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let mut drawn = None;
        terminal.draw(|frame| drawn = Some(render::draw(frame, &app.view, &app.ui)))?;
        if let Some(layout) = drawn {
            app.layout = layout;
        }

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
        if app.should_quit {
            return Ok(());
        }

        for msg in app.effects.drain_events() {
            app.dispatch(msg);
        }
        app.dispatch(Msg::Tick);
    }
}

struct App {
    state: AppState,
    view: AppViewModel,
    ui: UiState,
    layout: ScreenLayout,
    effects: EffectRunner,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, effects: EffectRunner) -> Self {
        let view = state.view();
        Self {
            state,
            view,
            ui: UiState::default(),
            layout: ScreenLayout::default(),
            effects,
            should_quit: false,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if matches!(msg, Msg::SearchSubmitted | Msg::SuggestionActivated(_)) {
            self.ui.highlight = 0;
            self.ui.scroll_row = 0;
        }

        let state = std::mem::take(&mut self.state);
        let (next, effects) = update(state, msg);
        self.state = next;
        self.effects.run(effects);

        if self.state.consume_dirty() {
            self.refresh_view();
        }
    }

    fn refresh_view(&mut self) {
        self.view = self.state.view();
        self.ui.cursor = self.ui.cursor.min(self.view.query.chars().count());

        let count = self.grid_len();
        if count == 0 {
            self.ui.highlight = 0;
            if self.ui.focus == Focus::Grid {
                self.ui.focus = Focus::Input;
            }
        } else {
            self.ui.highlight = self.ui.highlight.min(count - 1);
        }
    }

    /// Cards when there are results, otherwise the suggestions.
    fn grid_len(&self) -> usize {
        if !self.view.cards.is_empty() {
            self.view.cards.len()
        } else {
            self.view.suggestions.as_ref().map_or(0, Vec::len)
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        if self.view.detail.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('x') => self.dispatch(Msg::CloseClicked),
                KeyCode::Char('o') => self.dispatch(Msg::OpenCatalogPageClicked),
                KeyCode::Char('c') => self.dispatch(Msg::OpenCoverClicked),
                _ => {}
            }
            return;
        }

        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        match self.ui.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Grid => self.handle_grid_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let mut query: Vec<char> = self.view.query.chars().collect();
        let cursor = self.ui.cursor.min(query.len());

        match key.code {
            KeyCode::Enter => self.dispatch(Msg::SearchSubmitted),
            KeyCode::Tab | KeyCode::Down => {
                if self.grid_len() > 0 {
                    self.ui.focus = Focus::Grid;
                }
            }
            KeyCode::Left => self.ui.cursor = cursor.saturating_sub(1),
            KeyCode::Right => self.ui.cursor = (cursor + 1).min(query.len()),
            KeyCode::Home => self.ui.cursor = 0,
            KeyCode::End => self.ui.cursor = query.len(),
            KeyCode::Backspace if cursor > 0 => {
                query.remove(cursor - 1);
                self.ui.cursor = cursor - 1;
                self.dispatch(Msg::QueryChanged(query.into_iter().collect()));
            }
            KeyCode::Delete if cursor < query.len() => {
                query.remove(cursor);
                self.dispatch(Msg::QueryChanged(query.into_iter().collect()));
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                query.insert(cursor, c);
                self.ui.cursor = cursor + 1;
                self.dispatch(Msg::QueryChanged(query.into_iter().collect()));
            }
            _ => {}
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        let count = self.grid_len();
        if count == 0 {
            self.ui.focus = Focus::Input;
            return;
        }
        let columns = self.layout.grid_columns.max(1);
        let highlight = self.ui.highlight.min(count - 1);

        match key.code {
            KeyCode::Tab => self.ui.focus = Focus::Input,
            KeyCode::Left => self.move_highlight(highlight.saturating_sub(1)),
            KeyCode::Right => self.move_highlight((highlight + 1).min(count - 1)),
            KeyCode::Up if highlight < columns => self.ui.focus = Focus::Input,
            KeyCode::Up => self.move_highlight(highlight - columns),
            KeyCode::Down => self.move_highlight((highlight + columns).min(count - 1)),
            KeyCode::Enter => self.activate(highlight),
            _ => {}
        }
    }

    fn move_highlight(&mut self, highlight: usize) {
        self.ui.highlight = highlight;
        if !self.view.cards.is_empty() {
            self.ui.scroll_row = self.layout.scroll_for(highlight, self.ui.scroll_row);
        }
    }

    fn activate(&mut self, index: usize) {
        if !self.view.cards.is_empty() {
            self.dispatch(Msg::BookClicked(index));
        } else {
            self.activate_suggestion(index);
        }
    }

    fn activate_suggestion(&mut self, index: usize) {
        self.dispatch(Msg::SuggestionActivated(index));
        self.ui.focus = Focus::Input;
        self.ui.cursor = self.view.query.chars().count();
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.layout.hit(mouse.column, mouse.row);
                finder_debug!("click ({}, {}) -> {:?}", mouse.column, mouse.row, hit);
                self.handle_hit(hit);
            }
            MouseEventKind::ScrollDown if self.view.detail.is_none() => self.scroll_by(1),
            MouseEventKind::ScrollUp if self.view.detail.is_none() => self.scroll_by(-1),
            _ => {}
        }
    }

    fn handle_hit(&mut self, hit: Hit) {
        match hit {
            Hit::SearchInput => {
                self.ui.focus = Focus::Input;
                self.ui.cursor = self.view.query.chars().count();
            }
            Hit::SearchButton => {
                if self.view.search_enabled {
                    self.dispatch(Msg::SearchSubmitted);
                }
            }
            Hit::Card(index) => {
                self.ui.focus = Focus::Grid;
                self.ui.highlight = index;
                self.dispatch(Msg::BookClicked(index));
            }
            Hit::Suggestion(index) => self.activate_suggestion(index),
            Hit::DetailClose => self.dispatch(Msg::CloseClicked),
            Hit::DetailCover => self.dispatch(Msg::OpenCoverClicked),
            Hit::DetailLink => self.dispatch(Msg::OpenCatalogPageClicked),
            Hit::DetailPanel => self.dispatch(Msg::PanelClicked),
            Hit::Backdrop => self.dispatch(Msg::BackdropClicked),
            Hit::Nothing => {}
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let count = self.view.cards.len();
        if count == 0 {
            return;
        }
        let columns = self.layout.grid_columns.max(1);
        let total_rows = count.div_ceil(columns);
        let max_scroll = total_rows.saturating_sub(self.layout.grid_rows.max(1));
        self.ui.scroll_row = self
            .ui
            .scroll_row
            .saturating_add_signed(delta)
            .min(max_scroll);
    }
}
