//! Full-screen Wheel of Fortune table drawn with Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the table and reads input, implementing
//!   `GameInterface` so the same game loop drives it as the line CLI.
//!
//! # State Machine
//! - `Watching`: events scroll past, keys are ignored
//! - `Prompting`: a question is shown and a line of input is edited
//!
//! The game loop moves the UI between the two: every `prompt` call enters
//! `Prompting` and returns to `Watching` once ENTER or ESC is pressed.

use crate::game_state::{BoardView, GameEvent, GameInterface};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const MAX_INPUT_LENGTH: usize = 48;
const MAX_LOG_LINES: usize = 200;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const PAUSE_POLL_TIMEOUT_MS: u64 = 10;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const TILE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::White);
const TILE_WIDTH: usize = 3;

const MENU_LINES: [&str; 5] = [
    "1. Player vs Player",
    "2. Player vs AI",
    "3. Player vs Random",
    "4. Custom Game",
    "5. Exit",
];

#[derive(Debug, PartialEq)]
enum TuiState {
    Watching,
    Prompting,
}

/// Owned copy of the last board the game loop showed.
#[derive(Debug, Default)]
struct BoardSnapshot {
    obscured: String,
    guessed: String,
    players: Vec<PlayerLine>,
}

#[derive(Debug)]
struct PlayerLine {
    label: String,
    prizes: String,
    is_current: bool,
}

impl BoardSnapshot {
    fn from_view(board: &BoardView<'_>) -> Self {
        let players = board
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| PlayerLine {
                label: p.to_string(),
                prizes: p.prizes().join(", "),
                is_current: i == board.current,
            })
            .collect();
        Self {
            obscured: board.obscured.to_string(),
            guessed: board.guessed_list(),
            players,
        }
    }
}

/// Lays the board out as tiles, starting a new line between words whenever
/// the next word would not fit in `width` columns.
fn tile_lines(obscured: &str, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for word in obscured.split(' ').filter(|w| !w.is_empty()) {
        let word_width = word.chars().count() * TILE_WIDTH;
        if used > 0 && used + TILE_WIDTH + word_width > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        if used > 0 {
            current.push(Span::raw(" ".repeat(TILE_WIDTH)));
            used += TILE_WIDTH;
        }
        current.extend(word.chars().map(|c| Span::styled(format!(" {c} "), TILE_STYLE)));
        used += word_width;
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

enum InputResult {
    Submitted(String),
    Cancelled,
}

/// Borrowed view of the interface state for one frame.
struct RenderContext<'a> {
    board: Option<&'a BoardSnapshot>,
    show_menu: bool,
    log: &'a [String],
    state: &'a TuiState,
    question: &'a str,
    current_input: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Raw-mode terminal front end. Restores the terminal when dropped.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: Option<BoardSnapshot>,
    show_menu: bool,
    log: Vec<String>,
    state: TuiState,
    question: String,
    current_input: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            board: None,
            show_menu: false,
            log: Vec::new(),
            state: TuiState::Watching,
            question: String::new(),
            current_input: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            board: self.board.as_ref(),
            show_menu: self.show_menu,
            log: &self.log,
            state: &self.state,
            question: &self.question,
            current_input: &self.current_input,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(7), // Phrase board
                Constraint::Min(8),    // Players + messages
                Constraint::Length(3), // Input line
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx.board);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[2]);
        Self::render_players(f, middle[0], ctx.board, ctx.show_menu);
        Self::render_log(f, middle[1], ctx.log);

        Self::render_input(
            f,
            chunks[3],
            ctx.state,
            ctx.question,
            ctx.current_input,
            ctx.error_message,
        );
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WHEEL OF FORTUNE - SUSTAINABILITY EDITION")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, board: Option<&BoardSnapshot>) {
        let lines = match board {
            Some(board) => {
                let width = usize::from(area.width.saturating_sub(2));
                let mut lines = tile_lines(&board.obscured, width);
                lines.push(Line::from(format!("Guessed: {}", board.guessed)));
                lines
            }
            None => vec![Line::from("No round in progress")],
        };
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Phrase").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_players(f: &mut Frame, area: Rect, board: Option<&BoardSnapshot>, show_menu: bool) {
        let mut lines = Vec::new();
        if show_menu {
            lines.push(Line::from(vec![Span::styled("Main Menu", HEADER_STYLE)]));
            for entry in MENU_LINES {
                lines.push(Line::from(format!("  {entry}")));
            }
        } else if let Some(board) = board {
            for player in &board.players {
                let style = if player.is_current { SUCCESS_STYLE } else { Style::default() };
                let marker = if player.is_current { "> " } else { "  " };
                lines.push(Line::from(vec![Span::styled(
                    format!("{marker}{}", player.label),
                    style,
                )]));
                if !player.prizes.is_empty() {
                    lines.push(Line::from(vec![Span::styled(
                        format!("    Prizes: {}", player.prizes),
                        INFO_STYLE,
                    )]));
                }
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Players").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_log(f: &mut Frame, area: Rect, log: &[String]) {
        let visible = area.height.saturating_sub(2) as usize;
        let skip = log.len().saturating_sub(visible);
        let lines: Vec<Line> = log
            .iter()
            .skip(skip)
            .map(|l| Line::from(vec![Span::styled(l.as_str(), MESSAGE_STYLE)]))
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_input(
        f: &mut Frame,
        area: Rect,
        state: &TuiState,
        question: &str,
        current_input: &str,
        error_message: &str,
    ) {
        let line = if !error_message.is_empty() {
            Line::from(vec![Span::styled(error_message, ERROR_STYLE)])
        } else if *state == TuiState::Prompting {
            Line::from(vec![
                Span::styled(question, INFO_STYLE),
                Span::raw(current_input),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ])
        } else {
            Line::from("")
        };
        let paragraph =
            Paragraph::new(line).block(Block::default().title("Input").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::Prompting => {
                "Type your answer | ENTER: Submit | BACKSPACE: Delete | ESC: Leave"
            }
            TuiState::Watching => "Watching the wheel...",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<InputResult>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        // Mouse, focus, paste and resize events carry no answer
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };

        // Press only; Release and Repeat would double the input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Filter out garbage from terminal focus escape sequences (alt-tab)
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        if self.state == TuiState::Prompting {
            return Ok(self.handle_prompt_input(key));
        }
        Ok(None)
    }

    fn handle_prompt_input(&mut self, key: KeyEvent) -> Option<InputResult> {
        self.error_message.clear();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                info_log!("handle_prompt_input() - Ctrl-C pressed, cancelling");
                Some(InputResult::Cancelled)
            }
            KeyCode::Char(_) if Self::has_modifier_keys(&key) => {
                debug_log!(
                    "handle_prompt_input() - Ignoring key with modifier: {:?}",
                    key.modifiers
                );
                None
            }
            KeyCode::Char(c) if self.current_input.len() < MAX_INPUT_LENGTH => {
                self.current_input.push(c);
                None
            }
            KeyCode::Char(_) => {
                self.error_message = format!("Input is limited to {MAX_INPUT_LENGTH} characters!");
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.current_input);
                info_log!("handle_prompt_input() - Submitted '{}'", input);
                Some(InputResult::Submitted(input.trim().to_string()))
            }
            KeyCode::Esc => {
                info_log!("handle_prompt_input() - ESC pressed, cancelling");
                Some(InputResult::Cancelled)
            }
            _ => {
                debug_log!("handle_prompt_input() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }
}

impl GameInterface for TuiInterface {
    fn prompt(&mut self, message: &str) -> Option<String> {
        self.state = TuiState::Prompting;
        self.question = message.to_string();
        self.current_input.clear();
        self.status = "Waiting for input...".to_string();

        let result = loop {
            if self.draw().is_err() {
                info_log!("prompt() - Draw failed, cancelling");
                break None;
            }
            match self.handle_input() {
                Ok(Some(InputResult::Submitted(input))) => {
                    self.push_log(format!("{}{}", self.question, input));
                    break Some(input);
                }
                Ok(Some(InputResult::Cancelled)) => break None,
                Ok(None) => {}
                Err(e) => {
                    debug_log!("prompt() - Input error: {}", e);
                    break None;
                }
            }
        };

        self.state = TuiState::Watching;
        self.question.clear();
        self.draw_or_log();
        result
    }

    fn display_menu(&mut self) {
        self.show_menu = true;
        self.board = None;
        self.status = "Choose a game mode".to_string();
        self.draw_or_log();
    }

    fn display_board(&mut self, board: &BoardView<'_>) {
        self.show_menu = false;
        self.board = Some(BoardSnapshot::from_view(board));
        if let Some(player) = board.current_player() {
            self.status = format!("{}'s turn", player.name);
        }
        self.draw_or_log();
    }

    fn display_event(&mut self, event: &GameEvent) {
        let text = event.to_string();
        if matches!(
            event,
            GameEvent::Won { .. } | GameEvent::NoPlayersLeft | GameEvent::TurnLimitReached { .. }
        ) {
            self.status = text.clone();
        }
        if matches!(event, GameEvent::RoundStart { .. }) {
            self.show_menu = false;
        }
        self.push_log(text);
        self.draw_or_log();
    }

    fn pause(&mut self, delay: Duration) {
        self.draw_or_log();
        let deadline = Instant::now() + delay;
        while Instant::now() < deadline {
            // Drain keys typed while the computer is thinking.
            match event::poll(Duration::from_millis(PAUSE_POLL_TIMEOUT_MS)) {
                Ok(true) => {
                    let _ = event::read();
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
