//! Game session: one explicit object owning deck, grid, selection, score and particles.
//!
//! Each call to [`Game::step`] is one frame: spawn first, then the click (checked
//! against the grid as it stood before this step's spawn), then the countdowns.
//! Particles tick on every step, including after the round is over.

use crate::card::Card;
use crate::combo::{Combo, evaluate};
use crate::deck::Deck;
use crate::grid::{CellPos, Grid, SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_START, Spawner};
use crate::particles::ParticleSystem;
use crate::rng::RngState;
use crate::score::ScoreSession;
use crate::selection::{Selection, SelectionEvent};

/// Options that shape a session (seed, spawn schedule).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub spawn_interval: u32,
    pub min_spawn_interval: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spawn_interval: SPAWN_INTERVAL_START,
            min_spawn_interval: SPAWN_INTERVAL_MIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Active,
    Over,
}

/// What happened during a step, for the front end (sound, flashes, logs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    CardSpawned {
        cell: CellPos,
        card: Card,
    },
    /// Cards scored and were removed from the grid.
    Resolved {
        cells: Vec<CellPos>,
        cards: Vec<Card>,
        combo: Combo,
        /// Points added, bonus multiplier included.
        points: u64,
        special: bool,
    },
    /// Three cards that form nothing; selection dropped, cards stay.
    Missed {
        cells: Vec<CellPos>,
    },
    RoundOver {
        score: u64,
    },
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    rng: RngState,
    deck: Deck,
    grid: Grid,
    spawner: Spawner,
    selection: Selection,
    score: ScoreSession,
    particles: ParticleSystem,
    state: RoundState,
    frame: u64,
}

impl Game {
    /// New session with a round already started.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        let deck = Deck::new(&mut rng);
        let spawner = Spawner::new(config.spawn_interval, config.min_spawn_interval);
        Self {
            config,
            rng,
            deck,
            grid: Grid::new(),
            spawner,
            selection: Selection::new(),
            score: ScoreSession::new(),
            particles: ParticleSystem::new(),
            state: RoundState::Active,
            frame: 0,
        }
    }

    /// Reset every component and begin a new round. The RNG stream continues.
    pub fn start_round(&mut self) {
        self.deck.reset(&mut self.rng);
        self.grid = Grid::new();
        self.spawner = Spawner::new(self.config.spawn_interval, self.config.min_spawn_interval);
        self.selection = Selection::new();
        self.score = ScoreSession::new();
        self.particles.clear();
        self.state = RoundState::Active;
        self.frame = 0;
        log::info!("round started (seed {})", self.rng.seed());
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == RoundState::Over
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_cards(&self) -> Vec<Card> {
        self.selection.cards(&self.grid)
    }

    pub fn score(&self) -> &ScoreSession {
        &self.score
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn spawn_interval(&self) -> u32 {
        self.spawner.interval()
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Steps played this round.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame and optionally handle one click.
    ///
    /// The grid-full check runs before the click, so a click on the step that
    /// fills the last cell is dropped; a pair it would have cleared does not
    /// keep the round alive.
    pub fn step(&mut self, click: Option<CellPos>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state == RoundState::Active {
            self.frame += 1;
            let spawned = self.spawn_phase(&mut events);
            if self.grid.is_full() {
                self.finish_round(&mut events);
            } else {
                if let Some(pos) = click {
                    if spawned != Some(pos) {
                        self.handle_click(pos, &mut events);
                    }
                }
                self.score.tick();
            }
        }
        self.particles.tick();
        events
    }

    fn spawn_phase(&mut self, events: &mut Vec<GameEvent>) -> Option<CellPos> {
        let placed = self
            .spawner
            .tick(&mut self.grid, &mut self.deck, &mut self.rng)?;
        log::debug!(
            "spawned {} at ({}, {}), next interval {}",
            placed.card,
            placed.cell.col,
            placed.cell.row,
            self.spawner.interval()
        );
        events.push(GameEvent::CardSpawned {
            cell: placed.cell,
            card: placed.card,
        });
        Some(placed.cell)
    }

    fn finish_round(&mut self, events: &mut Vec<GameEvent>) {
        self.state = RoundState::Over;
        self.selection.clear(&mut self.grid);
        log::info!("round over: grid full, score {}", self.score.score());
        events.push(GameEvent::RoundOver {
            score: self.score.score(),
        });
    }

    /// Toggle the card at `pos` and resolve the selection if it triggers.
    fn handle_click(&mut self, pos: CellPos, events: &mut Vec<GameEvent>) {
        let event = self.selection.toggle(&mut self.grid, pos);
        log::debug!("toggle ({}, {}): {:?}", pos.col, pos.row, event);
        if event != SelectionEvent::Selected {
            return;
        }
        match self.selection.len() {
            2 => self.resolve(false, events),
            3 => self.resolve(true, events),
            _ => {}
        }
    }

    /// Two cards resolve only on a match; three always resolve.
    fn resolve(&mut self, force: bool, events: &mut Vec<GameEvent>) {
        let cards = self.selection.cards(&self.grid);
        let result = match evaluate(&cards) {
            Ok(result) => result,
            Err(err) => {
                log::warn!("skipping evaluation: {err}");
                return;
            }
        };
        let combo = match result.combo {
            Some(combo) if result.is_match() => combo,
            _ => {
                if force {
                    let cells = self.selection.cells().to_vec();
                    self.selection.clear(&mut self.grid);
                    log::debug!("no combination in {} cards", cells.len());
                    events.push(GameEvent::Missed { cells });
                }
                return;
            }
        };

        let multiplier = self.score.bonus_multiplier();
        let points = self.score.apply_result(result.score, Some(combo), multiplier);
        let special = combo.is_special();
        let cells = self.selection.take();
        for &cell in &cells {
            self.particles.burst_at(cell, special, &mut self.rng);
            self.grid.remove(cell);
        }
        log::info!(
            "{} for {} (x{}), total {}",
            combo,
            points,
            multiplier,
            self.score.score()
        );
        events.push(GameEvent::Resolved {
            cells,
            cards,
            combo,
            points,
            special,
        });
    }

    /// Put `card` at `pos` directly, bypassing the deck. For scripted setups.
    pub fn place_card(&mut self, card: Card, pos: CellPos) -> bool {
        self.grid.place(card, pos)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
