//! App: terminal init, main loop, fixed-rate stepping and input handling.

use crate::Args;
use crate::input::{Action, key_to_action, mouse_click};
use crate::theme::Theme;
use crate::ui::{self, ClearFade};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use hanafuda_pon::grid::{GRID_COLS, GRID_ROWS};
use hanafuda_pon::{Card, CellPos, Game, GameConfig, GameEvent};
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// Clicks buffered between steps beyond this are dropped.
const MAX_PENDING_CLICKS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    GameOver,
}

pub struct App {
    args: Args,
    theme: Theme,
    game: Game,
    screen: Screen,
    cursor: CellPos,
    /// Clicks waiting for the next step; one is consumed per step.
    pending_clicks: VecDeque<CellPos>,
    step_interval: Duration,
    last_step: Instant,
    /// Steps spent on the title screen, for its animation.
    title_frame: u64,
    /// Cards cleared by the last combo, faded out by TachyonFX.
    cleared: Vec<(CellPos, Card)>,
    clear_effect: Option<Effect>,
    clear_effect_process_time: Option<Instant>,
}

impl App {
    pub fn new(args: Args, config: GameConfig, theme: Theme) -> Self {
        let fps = if args.fps.is_finite() && args.fps > 0.0 {
            args.fps
        } else {
            30.0
        };
        let screen = if args.no_title {
            Screen::Playing
        } else {
            Screen::Title
        };
        let game = Game::new(config);
        log::info!("session seed {}", game.seed());
        Self {
            args,
            theme,
            game,
            screen,
            cursor: CellPos::new(0, 0),
            pending_clicks: VecDeque::with_capacity(MAX_PENDING_CLICKS),
            step_interval: Duration::from_secs_f64(1.0 / fps),
            last_step: Instant::now(),
            title_frame: 0,
            cleared: Vec::new(),
            clear_effect: None,
            clear_effect_process_time: None,
        }
    }

    fn reset_fade(&mut self) {
        self.cleared.clear();
        self.clear_effect = None;
        self.clear_effect_process_time = None;
    }

    fn start_round(&mut self) {
        self.game.start_round();
        self.screen = Screen::Playing;
        self.pending_clicks.clear();
        self.cursor = CellPos::new(0, 0);
        self.last_step = Instant::now();
        self.reset_fade();
    }

    fn queue_click(&mut self, pos: CellPos) {
        if self.pending_clicks.len() < MAX_PENDING_CLICKS {
            self.pending_clicks.push_back(pos);
        }
    }

    fn move_cursor(&mut self, dc: i8, dr: i8) {
        let col = (self.cursor.col as i8 + dc).clamp(0, GRID_COLS as i8 - 1);
        let row = (self.cursor.row as i8 + dr).clamp(0, GRID_ROWS as i8 - 1);
        self.cursor = CellPos::new(col as u8, row as u8);
    }

    /// One engine step; events drive the fade effect and the screen switch.
    fn step(&mut self) {
        if self.screen == Screen::Title {
            self.title_frame = self.title_frame.wrapping_add(1);
            return;
        }
        let click = if self.screen == Screen::Playing {
            self.pending_clicks.pop_front()
        } else {
            None
        };
        for event in self.game.step(click) {
            match event {
                GameEvent::Resolved { cells, cards, .. } => {
                    self.reset_fade();
                    self.cleared = cells.into_iter().zip(cards).collect();
                }
                GameEvent::RoundOver { .. } => {
                    self.screen = Screen::GameOver;
                    self.pending_clicks.clear();
                }
                GameEvent::CardSpawned { .. } | GameEvent::Missed { .. } => {}
            }
        }
    }

    /// Returns false when the app should exit.
    fn handle_action(&mut self, action: Action) -> bool {
        if action == Action::Quit {
            return false;
        }
        match self.screen {
            Screen::Title => {
                if action == Action::Toggle {
                    self.start_round();
                }
            }
            Screen::Playing => match action {
                Action::CursorLeft => self.move_cursor(-1, 0),
                Action::CursorRight => self.move_cursor(1, 0),
                Action::CursorUp => self.move_cursor(0, -1),
                Action::CursorDown => self.move_cursor(0, 1),
                Action::Toggle => self.queue_click(self.cursor),
                Action::Restart => self.start_round(),
                Action::Quit | Action::None => {}
            },
            Screen::GameOver => {
                if action == Action::Restart {
                    if self.args.no_title {
                        self.start_round();
                    } else {
                        self.screen = Screen::Title;
                        self.title_frame = 0;
                        self.reset_fade();
                    }
                }
            }
        }
        true
    }

    fn handle_mouse(&mut self, column: u16, row: u16) {
        match self.screen {
            Screen::Title => self.start_round(),
            Screen::Playing => {
                let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
                let area = Rect::new(0, 0, cols, rows);
                if let Some(pos) = ui::cell_at(area, column, row) {
                    self.cursor = pos;
                    self.queue_click(pos);
                }
            }
            Screen::GameOver => {}
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{DisableMouseCapture, EnableMouseCapture},
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        terminal.show_cursor()?;

        if let Err(ref e) = result {
            log::error!("exiting on error: {e:#}");
        }
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            terminal.draw(|f| {
                ui::draw(
                    f,
                    self.screen,
                    &self.game,
                    &self.theme,
                    self.cursor,
                    self.title_frame,
                    ClearFade {
                        cells: &self.cleared,
                        effect: &mut self.clear_effect,
                        process_time: &mut self.clear_effect_process_time,
                    },
                    now,
                    self.args.no_animation,
                );
            })?;

            if self.args.no_animation || self.clear_effect.as_ref().is_some_and(Effect::done) {
                self.reset_fade();
            }

            let timeout = (self.last_step + self.step_interval).saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            if !self.handle_action(key_to_action(key)) {
                                return Ok(());
                            }
                        }
                        Event::Mouse(mouse) => {
                            if let Some((column, row)) = mouse_click(mouse) {
                                self.handle_mouse(column, row);
                            }
                        }
                        _ => {}
                    }
                }
            }

            // Fixed timestep; after a long stall, resync instead of replaying every missed step.
            let mut steps = 0;
            while self.last_step.elapsed() >= self.step_interval {
                self.last_step += self.step_interval;
                self.step();
                steps += 1;
                if steps >= 5 {
                    self.last_step = Instant::now();
                    break;
                }
            }
        }
    }
}
