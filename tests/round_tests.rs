//! Whole-round behaviour driven through the public `Game` API.

use hanafuda_pon::{
    Card, CellPos, Combo, GRID_CAPACITY, Game, GameConfig, GameEvent, Group, RoundState,
    SelectionEvent, evaluate,
};

fn game_with_interval(seed: u64, interval: u32) -> Game {
    Game::new(GameConfig {
        seed: Some(seed),
        spawn_interval: interval,
        min_spawn_interval: interval,
    })
}

fn no_spawns() -> Game {
    game_with_interval(3, u32::MAX)
}

fn select_all(game: &mut Game, cells: &[CellPos]) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for &cell in cells {
        events.extend(game.step(Some(cell)));
    }
    events
}

#[test]
fn test_round_terminates_exactly_when_full() {
    let mut game = game_with_interval(99, 1);
    let mut steps = 0;
    while game.state() == RoundState::Active {
        game.step(None);
        steps += 1;
        assert!(steps <= GRID_CAPACITY, "round should end by step {GRID_CAPACITY}");
    }
    assert_eq!(steps, GRID_CAPACITY);
    assert!(game.grid().is_full());

    // no more spawns, no more scoring
    let before = game.grid().occupied();
    let events = game.step(Some(CellPos::new(0, 0)));
    assert!(events.is_empty());
    assert_eq!(game.grid().occupied(), before);
    assert!(game.selection().is_empty());
}

#[test]
fn test_default_schedule_spawns_fill_board_in_order() {
    let mut game = Game::new(GameConfig {
        seed: Some(2024),
        ..GameConfig::default()
    });
    let mut spawn_frames = Vec::new();
    while !game.is_over() {
        for event in game.step(None) {
            if let GameEvent::CardSpawned { .. } = event {
                spawn_frames.push(game.frame());
            }
        }
    }
    assert_eq!(spawn_frames.len(), GRID_CAPACITY);
    // intervals 90, 89, 88, ...
    let gaps: Vec<u64> = spawn_frames
        .windows(2)
        .map(|w| w[1] - w[0])
        .collect();
    assert_eq!(spawn_frames[0], 90);
    assert_eq!(gaps[0], 89);
    assert!(gaps.windows(2).all(|w| w[1] == w[0] - 1));
}

#[test]
fn test_priority_three_brights_over_same_month() {
    let bright = Card::new(Group::Pine, 0);
    let result = evaluate(&[bright, bright, bright]).unwrap();
    assert_eq!(result.score, 1000);
    assert_eq!(result.combo, Some(Combo::ThreeBrights));

    let mut game = no_spawns();
    let cells = [CellPos::new(0, 0), CellPos::new(1, 0), CellPos::new(2, 0)];
    for &cell in &cells {
        game.place_card(bright, cell);
    }
    let events = select_all(&mut game, &cells);
    assert!(matches!(
        events.as_slice(),
        [GameEvent::Resolved { combo: Combo::ThreeBrights, points: 1000, special: true, .. }]
    ));
}

#[test]
fn test_fixed_set_exactness() {
    let mut game = no_spawns();
    let blossom = [CellPos::new(3, 3), CellPos::new(4, 3)];
    game.place_card(Card::new(Group::Cherry, 0), blossom[0]);
    game.place_card(Card::new(Group::Chrysanthemum, 0), blossom[1]);
    let events = select_all(&mut game, &blossom);
    match events.as_slice() {
        [GameEvent::Resolved { combo, points, .. }] => {
            assert_eq!(combo.id(), "Viewing-Blossoms");
            assert_eq!(*points, 500);
        }
        other => panic!("expected a resolution, got {other:?}"),
    }

    let wrong = [CellPos::new(0, 1), CellPos::new(1, 1)];
    game.place_card(Card::new(Group::Cherry, 0), wrong[0]);
    game.place_card(Card::new(Group::Cherry, 1), wrong[1]);
    assert!(select_all(&mut game, &wrong).is_empty());
    assert_eq!(game.score().score(), 500);
}

#[test]
fn test_toggle_pair_restores_selection() {
    let mut game = no_spawns();
    let a = CellPos::new(0, 0);
    let b = CellPos::new(6, 2);
    game.place_card(Card::new(Group::Willow, 1), a);
    game.place_card(Card::new(Group::Iris, 2), b);
    game.step(Some(a));

    let cells_before = game.selection().cells().to_vec();
    let flags_before: Vec<bool> = game.grid().cards().map(|c| c.selected).collect();
    game.step(Some(b));
    game.step(Some(b));
    assert_eq!(game.selection().cells(), cells_before.as_slice());
    let flags_after: Vec<bool> = game.grid().cards().map(|c| c.selected).collect();
    assert_eq!(flags_after, flags_before);
}

#[test]
fn test_selection_rejects_fourth_card() {
    let mut grid = hanafuda_pon::Grid::new();
    let mut sel = hanafuda_pon::Selection::new();
    for col in 0..4 {
        grid.place(Card::new(Group::ALL[col as usize], 3), CellPos::new(col, 0));
    }
    for col in 0..3 {
        assert_eq!(sel.toggle(&mut grid, CellPos::new(col, 0)), SelectionEvent::Selected);
    }
    assert_eq!(sel.toggle(&mut grid, CellPos::new(3, 0)), SelectionEvent::Rejected);
}

#[test]
fn test_bonus_window_in_game() {
    let mut game = no_spawns();
    let bdb = [CellPos::new(0, 0), CellPos::new(1, 0), CellPos::new(2, 0)];
    game.place_card(Card::new(Group::BushClover, 0), bdb[0]);
    game.place_card(Card::new(Group::Maple, 0), bdb[1]);
    game.place_card(Card::new(Group::Peony, 0), bdb[2]);
    select_all(&mut game, &bdb);
    assert_eq!(game.score().score(), 2000);
    assert_eq!(game.score().bonus_multiplier(), 2);
    // the resolving step already counted one frame of the window
    assert_eq!(game.score().bonus_frames_remaining(), 599);

    for _ in 0..598 {
        game.step(None);
    }
    assert_eq!(game.score().bonus_multiplier(), 2);
    game.step(None);
    assert_eq!(game.score().bonus_multiplier(), 1);
}

#[test]
fn test_message_shows_combo_and_base_score() {
    let mut game = no_spawns();
    let moon = [CellPos::new(5, 1), CellPos::new(6, 1)];
    game.place_card(Card::new(Group::Pampas, 0), moon[0]);
    game.place_card(Card::new(Group::Chrysanthemum, 0), moon[1]);
    select_all(&mut game, &moon);
    assert_eq!(game.score().message(), Some("Viewing-Moon - 500 pts"));
}

#[test]
fn test_same_seed_same_round() {
    let run = |seed| {
        let mut game = game_with_interval(seed, 3);
        let mut spawned = Vec::new();
        while !game.is_over() {
            for event in game.step(None) {
                if let GameEvent::CardSpawned { cell, card } = event {
                    spawned.push((cell, card));
                }
            }
        }
        spawned
    };
    assert_eq!(run(17), run(17));
    assert_ne!(run(17), run(18));
}
