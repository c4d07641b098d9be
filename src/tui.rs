//! TUI (Terminal User Interface) for Bagels with Words
//!
//! A full-screen front end built on Ratatui. Each scored guess is drawn as a
//! row of letter tiles coloured by its clue, followed by the clue text.
//!
//! # State Machine
//! - `EnteringLength` → `EnteringGuess` → (`AskingReplay` → `EnteringGuess`)
//! - `Finished` once the player leaves

use crate::clues::{Clue, ClueResult};
use crate::cli::{INTRO_LEGEND, parse_word_length};
use crate::config::DEFAULT_WORD_LENGTH;
use crate::game_state::{GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
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

// Guess input accepts at least this many letters, more for longer words
const MAX_INPUT_LEN: usize = 32;
const MAX_LENGTH_DIGITS: usize = 3;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

fn clue_colors(clue: Clue) -> (Color, Color) {
    match clue {
        Clue::Fermi => (Color::Green, Color::Black),
        Clue::Pico => (Color::Yellow, Color::Black),
        Clue::Bruno => (Color::Gray, Color::White),
    }
}

#[derive(Debug)]
struct GuessRow {
    guess: String,
    result: ClueResult,
}

/// Longest guess the input row accepts for a given word length.
fn guess_input_limit(word_length: usize) -> usize {
    word_length.max(MAX_INPUT_LEN)
}

/// Effect of one key press on the text being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputEdit {
    Submit,
    Changed,
    Disallowed(char),
    Ignored,
}

fn apply_key(
    input: &mut String,
    code: KeyCode,
    max_len: usize,
    accept: fn(char) -> bool,
) -> InputEdit {
    match code {
        KeyCode::Enter => InputEdit::Submit,
        KeyCode::Backspace => {
            input.pop();
            InputEdit::Changed
        }
        KeyCode::Char(c) if accept(c) && input.chars().count() < max_len => {
            input.push(c.to_ascii_lowercase());
            InputEdit::Changed
        }
        KeyCode::Char(c) => InputEdit::Disallowed(c),
        _ => InputEdit::Ignored,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringLength,
    EnteringGuess { attempt: usize },
    AskingReplay,
    Finished,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    rows: &'a [GuessRow],
    word_length: usize,
    length_default: usize,
    current_input: &'a str,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rows: Vec<GuessRow>,
    word_length: usize,
    length_default: usize,
    current_input: String,
    state: TuiState,
    message: String,
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
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            rows: Vec::new(),
            word_length: DEFAULT_WORD_LENGTH,
            length_default: DEFAULT_WORD_LENGTH,
            current_input: String::new(),
            state: TuiState::EnteringLength,
            message: String::new(),
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

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            word_length: self.word_length,
            length_default: self.length_default,
            current_input: &self.current_input,
            state: self.state,
            message: &self.message,
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

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Guesses
                Constraint::Length(8), // Messages
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx.message, ctx.error_message);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("BAGELS WITH WORDS")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn tile(letter: char, bg: Color, fg: Color) -> Span<'static> {
        Span::styled(format!(" {letter} "), Style::default().fg(fg).bg(bg))
    }

    fn guess_line(row: &GuessRow, number: usize) -> Line<'static> {
        let labels = row.result.labels(row.guess.chars().count());
        let mut spans = vec![Span::raw(format!("{number:>3}. "))];
        for (letter, clue) in row.guess.chars().zip(labels) {
            let (bg, fg) = clue_colors(clue);
            spans.push(Self::tile(letter.to_ascii_uppercase(), bg, fg));
            spans.push(Span::raw(" "));
        }
        let style = if row.result.is_win() {
            SUCCESS_STYLE
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("  {}", row.result), style));
        Line::from(spans)
    }

    fn input_line(current_input: &str, word_length: usize, attempt: usize) -> Line<'static> {
        let mut spans = vec![Span::raw(format!("{attempt:>3}. "))];
        let shown = word_length.max(current_input.chars().count());
        for i in 0..shown {
            let letter = current_input.chars().nth(i).unwrap_or(' ');
            spans.push(Self::tile(
                letter.to_ascii_uppercase(),
                Color::DarkGray,
                Color::White,
            ));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner_height = block.inner(area).height as usize;

        let mut lines: Vec<Line> = ctx
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| Self::guess_line(row, i + 1))
            .collect();

        match ctx.state {
            TuiState::EnteringGuess { attempt } => {
                lines.push(Self::input_line(ctx.current_input, ctx.word_length, attempt));
            }
            TuiState::EnteringLength => {
                lines.push(Line::from(vec![
                    Span::styled("Word length: ", INFO_STYLE),
                    Span::raw(ctx.current_input.to_string()),
                    Span::raw("_"),
                ]));
            }
            TuiState::AskingReplay | TuiState::Finished => {}
        }

        // Keep the most recent rows visible
        let skip = lines.len().saturating_sub(inner_height);
        let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
        f.render_widget(Paragraph::new(visible).block(block), area);
    }

    fn render_info(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let mut lines: Vec<Line> = message
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), MESSAGE_STYLE)))
            .collect();
        if !error_message.is_empty() {
            lines.push(Line::from(Span::styled(error_message.to_string(), ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let text = match ctx.state {
            TuiState::EnteringLength => format!(
                "Type the word length | ENTER: Confirm (blank = {}) | ESC: Quit",
                ctx.length_default
            ),
            TuiState::EnteringGuess { .. } => format!(
                "Type your {}-letter guess | ENTER: Submit | ESC: Quit",
                ctx.word_length
            ),
            TuiState::AskingReplay => "Y: Play again | any other key: Quit".to_string(),
            TuiState::Finished => "Goodbye".to_string(),
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

    /// Block until the next key press.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
                Event::Resize(_, _) => self.draw()?,
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn is_interrupt(key: &KeyEvent) -> bool {
        key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c' | 'd')))
    }

    /// Collect a line of text, accepting characters that pass `accept`.
    ///
    /// Returns `None` when the player presses Esc or Ctrl-C.
    fn read_text(&mut self, max_len: usize, accept: fn(char) -> bool) -> Option<String> {
        self.current_input.clear();
        loop {
            self.draw_or_log();
            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    debug_log!("read_text() - Input error: {}", e);
                    return None;
                }
            };
            if Self::is_interrupt(&key) {
                info_log!("read_text() - interrupted");
                return None;
            }
            if Self::has_modifier_keys(&key) {
                continue;
            }
            match apply_key(&mut self.current_input, key.code, max_len, accept) {
                InputEdit::Submit => return Some(std::mem::take(&mut self.current_input)),
                InputEdit::Changed => self.error_message.clear(),
                InputEdit::Disallowed(c) => {
                    self.error_message = format!("'{c}' is not allowed here");
                }
                InputEdit::Ignored => {}
            }
        }
    }

    /// Ask for the word length until a positive integer (or blank) is given.
    pub fn read_word_length(&mut self, default: usize) -> Option<usize> {
        self.state = TuiState::EnteringLength;
        self.length_default = default;
        self.message = "How many letters should the secret word be?".to_string();
        self.status = format!("Press ENTER for the default of {default}");
        loop {
            let input = self.read_text(MAX_LENGTH_DIGITS, |c| c.is_ascii_digit())?;
            match parse_word_length(&input, default) {
                Some(length) => {
                    self.word_length = length;
                    self.error_message.clear();
                    return Some(length);
                }
                None => self.error_message = "Please enter a positive integer".to_string(),
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_intro(&mut self, word_length: usize) {
        self.word_length = word_length;
        self.message = format!("I am thinking of a {word_length}-letter word.\n{INTRO_LEGEND}");
        self.draw_or_log();
    }

    fn display_round_start(&mut self, max_guesses: usize) {
        self.rows.clear();
        self.error_message.clear();
        self.message =
            format!("I have thought up a word.\nYou have {max_guesses} guesses to get it.");
        self.draw_or_log();
    }

    fn read_guess(&mut self, attempt: usize) -> UserAction {
        self.state = TuiState::EnteringGuess { attempt };
        self.status = format!("Guess #{attempt}");
        match self.read_text(guess_input_limit(self.word_length), |c| c.is_alphabetic()) {
            Some(guess) => {
                info_log!("read_guess() - guess #{} entered", attempt);
                self.status = "Checking the dictionary...".to_string();
                self.draw_or_log();
                UserAction::Guess(guess)
            }
            None => UserAction::Exit,
        }
    }

    fn display_length_reminder(&mut self, word_length: usize) {
        self.error_message = format!("Remember: {word_length}-letter word.");
    }

    fn display_unrecognized_word(&mut self, guess: &str) {
        self.error_message = format!("I don't recognize \"{guess}\".");
    }

    fn display_clues(&mut self, guess: &str, clues: &ClueResult) {
        self.error_message.clear();
        self.rows.push(GuessRow {
            guess: guess.to_string(),
            result: clues.clone(),
        });
        self.status = clues.to_string();
        self.draw_or_log();
    }

    fn display_out_of_guesses(&mut self, secret: &str) {
        self.status = format!("You ran out of guesses. The answer was {secret}.");
        self.draw_or_log();
    }

    fn confirm_play_again(&mut self) -> bool {
        self.state = TuiState::AskingReplay;
        self.message = "Do you want to play again? (yes or no)".to_string();
        self.draw_or_log();
        let again = match self.next_key() {
            Ok(key) => matches!(key.code, KeyCode::Char('y' | 'Y')),
            Err(e) => {
                debug_log!("confirm_play_again() - Input error: {}", e);
                false
            }
        };
        if again {
            self.message.clear();
        }
        again
    }

    fn display_farewell(&mut self) {
        self.state = TuiState::Finished;
        self.message = "Thanks for playing!".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
