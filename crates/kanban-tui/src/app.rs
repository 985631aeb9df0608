use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kanban_core::{AppConfig, EditBuffer, KanbanError, KanbanResult, Point, ThemeMode};
use kanban_domain::{Board, CardId, ColumnKind, DragController, DropOutcome, HitTest};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::events::{Event, EventHandler};
use crate::hit_map::{ElementKind, HitMap};
use crate::preview::FloatingPreview;
use crate::surface::BoardSurface;
use crate::ui;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

pub struct App {
    pub should_quit: bool,
    pub board: Board,
    pub drag: DragController,
    pub surface: BoardSurface,
    pub hit_map: HitMap,
    pub preview: FloatingPreview,
    pub theme: ThemeMode,
    pub show_help: bool,
    pub config: AppConfig,
    last_click: Option<(CardId, Instant)>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            should_quit: false,
            board: Board::new(),
            drag: DragController::new(),
            surface: BoardSurface::new(),
            hit_map: HitMap::new(),
            preview: FloatingPreview::new(),
            theme: config.theme,
            show_help: config.show_help,
            config,
            last_click: None,
        }
    }

    /// Adds view-mode cards to a column; blank texts are skipped.
    pub fn seed<S: AsRef<str>>(&mut self, kind: ColumnKind, texts: &[S]) {
        let column_id = self.board.column_by_kind(kind).id;
        for text in texts {
            self.board
                .add_by_text(column_id, text.as_ref(), &mut self.surface);
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!("Theme switched to {:?}", self.theme);
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
            }
            Event::Tick => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.surface.editor().is_some() {
            match key.code {
                KeyCode::Enter => self.commit_active_edit(),
                KeyCode::Esc => self.cancel_active_edit(),
                code => {
                    if let Some(editor) = self.surface.editor_mut() {
                        apply_edit_key(&mut editor.buffer, code);
                    }
                }
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                let column_id = self.board.columns()[index].id;
                self.board.add_inline(column_id, &mut self.surface);
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let pos = Point::new(mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(pos),
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag.on_pointer_move(pos, &mut self.preview);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let outcome = self.drag.on_pointer_up(
                    pos,
                    &mut self.board,
                    &self.hit_map,
                    &mut self.surface,
                    &mut self.preview,
                );
                if outcome != DropOutcome::NotDragging {
                    tracing::debug!("Drop at ({}, {}): {:?}", pos.x, pos.y, outcome);
                }
            }
            MouseEventKind::ScrollDown => self.scroll_at(pos, 1),
            MouseEventKind::ScrollUp => self.scroll_at(pos, -1),
            _ => {}
        }
    }

    fn pointer_down(&mut self, pos: Point) {
        // A release outside the terminal never reaches us; until the next
        // Up, every press belongs to the drag in progress.
        if let Some(session) = self.drag.session() {
            tracing::debug!(active = %session.card_id, "pointer down ignored, drag in progress");
            return;
        }
        let Some(hit) = self.hit_map.hit_test(pos) else {
            self.commit_active_edit();
            return;
        };
        let Some(kind) = self.hit_map.get(hit).map(|e| e.kind) else {
            return;
        };
        if let ElementKind::EditField(_) = kind {
            return;
        }
        // Clicking anywhere but the edit field takes focus away from it.
        self.commit_active_edit();

        match kind {
            ElementKind::ThemeButton => self.toggle_theme(),
            ElementKind::AddButton(column_id) => {
                self.board.add_inline(column_id, &mut self.surface);
            }
            ElementKind::DeleteButton(card_id) => {
                self.board.request_delete(card_id, &mut self.surface);
            }
            _ => {
                let Some((card_id, origin)) = self
                    .hit_map
                    .enclosing(hit, |k| matches!(k, ElementKind::Card(_)))
                    .and_then(|e| match e.kind {
                        ElementKind::Card(id) => Some((id, e.origin)),
                        _ => None,
                    })
                else {
                    return;
                };
                if self.register_click(card_id) {
                    self.board.begin_edit(card_id, &mut self.surface);
                    return;
                }
                self.drag
                    .on_pointer_down(&self.board, card_id, origin, pos, &mut self.preview);
            }
        }
    }

    /// Records a click on a card; returns true when it completes a double click.
    fn register_click(&mut self, card_id: CardId) -> bool {
        let now = Instant::now();
        let is_double = matches!(
            self.last_click,
            Some((last, at)) if last == card_id && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
        );
        self.last_click = if is_double { None } else { Some((card_id, now)) };
        is_double
    }

    fn scroll_at(&mut self, pos: Point, delta: i32) {
        if let Some(column_id) = self.board.locate_column_at_screen_point(pos, &self.hit_map) {
            self.surface.scroll_by(column_id, delta);
        }
    }

    pub fn commit_active_edit(&mut self) {
        if let Some(editor) = self.surface.take_editor() {
            let text = editor.buffer.text();
            self.board
                .commit_edit(editor.card_id, &text, &mut self.surface);
        }
    }

    pub fn cancel_active_edit(&mut self) {
        if let Some(editor) = self.surface.take_editor() {
            self.board.cancel_edit(editor.card_id, &mut self.surface);
        }
    }

    /// Draws a frame. When the column geometry changed the board is
    /// re-rendered so scroll affordances match the new size.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| ui::render(self, frame))?;
        if self.surface.take_geometry_changed() {
            self.board.refresh_all(&mut self.surface);
            terminal.draw(|frame| ui::render(self, frame))?;
        }
        Ok(())
    }

    pub async fn run(&mut self) -> KanbanResult<()> {
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new();

        let result = self.event_loop(&mut terminal, &mut events).await;

        events.stop();
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &mut EventHandler,
    ) -> KanbanResult<()> {
        while !self.should_quit {
            self.draw(terminal).map_err(terminal_error("draw frame"))?;
            match events.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        Ok(())
    }
}

fn apply_edit_key(buffer: &mut EditBuffer, code: KeyCode) {
    match code {
        KeyCode::Char(c) => buffer.insert(c),
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Delete => buffer.delete(),
        KeyCode::Left => buffer.move_left(),
        KeyCode::Right => buffer.move_right(),
        KeyCode::Home => buffer.move_home(),
        KeyCode::End => buffer.move_end(),
        _ => {}
    }
}

fn terminal_error(action: &'static str) -> impl FnOnce(io::Error) -> KanbanError {
    move |e| KanbanError::Terminal(format!("failed to {}: {}", action, e))
}

fn setup_terminal() -> KanbanResult<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().map_err(terminal_error("enable raw mode"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(terminal_error("enter alternate screen"))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(terminal_error("create terminal"))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> KanbanResult<()> {
    disable_raw_mode().map_err(terminal_error("disable raw mode"))?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .map_err(terminal_error("leave alternate screen"))?;
    terminal
        .show_cursor()
        .map_err(terminal_error("show cursor"))?;
    Ok(())
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
