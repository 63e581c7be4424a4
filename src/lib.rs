//! Hanafuda Pon engine: cards spawn on an 8×4 grid, the player picks up to
//! three, and a fixed rule table decides whether the pick scores and clears.
//!
//! The engine has no I/O. A front end drives a [`Game`] one frame at a time
//! with [`Game::step`] and reads the grid, selection, score and particles back
//! for drawing.
//!
//! ```
//! use hanafuda_pon::{Card, CellPos, Game, GameConfig, GameEvent, Group};
//!
//! let mut game = Game::new(GameConfig { seed: Some(7), ..GameConfig::default() });
//! game.place_card(Card::new(Group::Cherry, 0), CellPos::new(0, 0));
//! game.place_card(Card::new(Group::Chrysanthemum, 0), CellPos::new(1, 0));
//! game.step(Some(CellPos::new(0, 0)));
//! let events = game.step(Some(CellPos::new(1, 0)));
//! assert!(matches!(events[0], GameEvent::Resolved { points: 500, .. }));
//! ```

pub mod card;
pub mod combo;
pub mod deck;
pub mod game;
pub mod grid;
pub mod particles;
pub mod rng;
pub mod score;
pub mod selection;

pub use card::{Card, Group, Kind, card_kind};
pub use combo::{Combo, CombinationRule, EvaluateError, Evaluation, RULES, evaluate};
pub use deck::Deck;
pub use game::{Game, GameConfig, GameEvent, RoundState};
pub use grid::{CellPos, GRID_CAPACITY, GRID_COLS, GRID_ROWS, Grid, PlacedCard, Spawner};
pub use particles::{Particle, ParticleSystem};
pub use rng::RngState;
pub use score::ScoreSession;
pub use selection::{Selection, SelectionEvent};
