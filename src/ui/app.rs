use std::io;
use std::time::{Duration, Instant};

use crate::ai::{Agent, MinimaxAgent};
use crate::config::AppConfig;
use crate::game::{Controller, GameMode, GameOutcome, GameState, MoveError, PlayError, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use super::game_view::{self, GameView};

pub struct App {
    game_state: GameState,
    config: AppConfig,
    agent: MinimaxAgent,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    /// Computer plays both sides until the game ends or it is toggled off.
    autoplay: bool,
    show_result: bool,
    next_computer_move: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let agent = MinimaxAgent::new(config.search.depth);
        let mut app = App {
            game_state: GameState::initial(),
            autoplay: config.game.mode == GameMode::ComputerVsComputer,
            config,
            agent,
            selected_column: 3, // Start in middle
            should_quit: false,
            message: None,
            show_result: false,
            next_computer_move: None,
        };
        app.schedule_computer(Instant::now());
        app
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.show_result {
            match key.code {
                KeyCode::Char('r') => self.restart(now),
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Esc | KeyCode::Enter => self.show_result = false,
                _ => {}
            }
            return;
        }

        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.human_move(now);
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = (c as usize) - ('1' as usize);
                self.human_move(now);
            }
            KeyCode::Char('r') => {
                self.restart(now);
                self.message = Some("New game started!".to_string());
            }
            KeyCode::Char('a') => {
                self.toggle_autoplay(now);
            }
            _ => {}
        }
    }

    /// Play a pending computer move once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        match self.next_computer_move {
            Some(due) if now >= due => {
                self.next_computer_move = None;
                self.computer_move(now);
            }
            _ => {}
        }
    }

    fn controller(&self) -> Controller {
        if self.autoplay {
            return Controller::Computer;
        }
        match self.config.game.mode {
            // Stopped autoplay hands both sides to the keyboard.
            GameMode::ComputerVsComputer => Controller::Human,
            mode => mode.controller(self.game_state.current_side()),
        }
    }

    fn schedule_computer(&mut self, now: Instant) {
        if self.game_state.is_terminal() || self.controller() != Controller::Computer {
            self.next_computer_move = None;
            return;
        }
        let delay_ms = if self.autoplay {
            self.config.ui.autoplay_interval_ms
        } else {
            self.config.ui.computer_delay_ms
        };
        self.next_computer_move = Some(now + Duration::from_millis(delay_ms));
    }

    fn human_move(&mut self, now: Instant) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.controller() == Controller::Computer {
            self.message = Some("Computer is thinking...".to_string());
            return;
        }
        self.play(self.selected_column, now);
    }

    fn computer_move(&mut self, now: Instant) {
        if self.game_state.is_terminal() {
            return;
        }
        if let Some(column) = self.agent.select_action(&self.game_state) {
            self.selected_column = column;
            self.play(column, now);
        }
    }

    /// Drop the current side's disc in `column`
    fn play(&mut self, column: usize, now: Instant) {
        match self.game_state.apply_move(column) {
            Ok(_) => {
                if let Some(outcome) = self.game_state.outcome() {
                    self.finish(outcome);
                } else {
                    self.schedule_computer(now);
                }
            }
            Err(PlayError::Move(MoveError::ColumnFull)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(PlayError::Move(MoveError::InvalidColumn)) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(PlayError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        let text = self.outcome_text(outcome);
        log::info!(
            "game over after {} moves: {}",
            self.game_state.move_count(),
            text
        );
        self.message = Some(text);
        self.show_result = true;
        self.autoplay = false;
        self.next_computer_move = None;
    }

    fn outcome_text(&self, outcome: GameOutcome) -> String {
        match outcome {
            GameOutcome::Winner(side) => {
                format!("{} Wins!", self.config.game.player_name(side))
            }
            GameOutcome::Draw => "It's a Draw!".to_string(),
        }
    }

    fn restart(&mut self, now: Instant) {
        self.game_state.reset();
        self.selected_column = 3;
        self.message = None;
        self.show_result = false;
        self.autoplay = self.config.game.mode == GameMode::ComputerVsComputer;
        self.schedule_computer(now);
    }

    fn toggle_autoplay(&mut self, now: Instant) {
        if self.autoplay {
            self.autoplay = false;
            log::info!("computer vs computer stopped");
            self.schedule_computer(now);
        } else {
            self.restart(now);
            self.autoplay = true;
            log::info!("computer vs computer started");
            self.schedule_computer(now);
        }
    }

    fn status(&self) -> String {
        if self.game_state.is_terminal() {
            return "Game Over".to_string();
        }
        if self.autoplay {
            return "Computer vs Computer running...".to_string();
        }
        let name = self
            .config
            .game
            .player_name(self.game_state.current_side());
        format!("{name}'s Turn")
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let status = self.status();
        let view = GameView {
            game_state: &self.game_state,
            selected_column: self.selected_column,
            message: self.message.as_deref(),
            status: &status,
            mode: self.config.game.mode.label(),
            depth: self.agent.depth(),
            result: self.show_result.then_some(self.message.as_deref()).flatten(),
        };
        game_view::render(frame, &view);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
