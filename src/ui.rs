//! Layout and drawing: title, card grid, particles, combo banner, sidebar, game over.

use crate::app::Screen;
use crate::theme::Theme;
use hanafuda_pon::grid::{GRID_COLS, GRID_ROWS};
use hanafuda_pon::particles::{CELL_WORLD_HEIGHT, CELL_WORLD_WIDTH};
use hanafuda_pon::score::BONUS_FRAMES;
use hanafuda_pon::selection::MAX_SELECTION;
use hanafuda_pon::{Card, CellPos, Game, GRID_CAPACITY, Group};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Widget};
use std::collections::HashSet;
use std::time::Instant;
use tachyonfx::{
    CellFilter, Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx, ref_count,
};

/// One card in terminal cells (border included).
const CARD_WIDTH: u16 = 7;
const CARD_HEIGHT: u16 = 4;

const SIDEBAR_WIDTH: u16 = 26;

/// Duration of the fade over cleared cards (TachyonFX).
const CLEAR_FADE_MS: u32 = 450;

/// Board size in terminal cells, border included.
fn board_outer_size() -> (u16, u16) {
    (
        GRID_COLS as u16 * CARD_WIDTH + 2,
        GRID_ROWS as u16 * CARD_HEIGHT + 2,
    )
}

/// Board (with border) and sidebar, centred in `area`.
fn game_layout(area: Rect) -> (Rect, Rect) {
    let (bw, bh) = board_outer_size();
    let total_w = bw + SIDEBAR_WIDTH;

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(bh),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);
    (inner[0], inner[1])
}

/// Board inner rect (cards only, no border); matches draw_game layout.
pub fn board_rect(area: Rect) -> Rect {
    let (outer, _) = game_layout(area);
    Rect {
        x: outer.x + 1,
        y: outer.y + 1,
        width: outer.width.saturating_sub(2),
        height: outer.height.saturating_sub(2),
    }
}

/// Grid cell under a terminal position, if any.
pub fn cell_at(area: Rect, column: u16, row: u16) -> Option<CellPos> {
    let board = board_rect(area);
    if !board.contains(Position { x: column, y: row }) {
        return None;
    }
    let pos = CellPos::new(
        ((column - board.x) / CARD_WIDTH) as u8,
        ((row - board.y) / CARD_HEIGHT) as u8,
    );
    pos.in_bounds().then_some(pos)
}

fn cell_rect(board: Rect, pos: CellPos) -> Rect {
    let r = Rect {
        x: board.x + u16::from(pos.col) * CARD_WIDTH,
        y: board.y + u16::from(pos.row) * CARD_HEIGHT,
        width: CARD_WIDTH,
        height: CARD_HEIGHT,
    };
    r.intersection(board)
}

/// Buffer positions covered by the given cells.
fn clearing_buffer_positions(board: Rect, cells: &[(CellPos, Card)]) -> HashSet<(u16, u16)> {
    let mut set = HashSet::new();
    for &(pos, _) in cells {
        let r = cell_rect(board, pos);
        for x in r.x..r.x + r.width {
            for y in r.y..r.y + r.height {
                set.insert((x, y));
            }
        }
    }
    set
}

/// Cleared cards being faded out, plus their TachyonFX state.
pub struct ClearFade<'a> {
    pub cells: &'a [(CellPos, Card)],
    pub effect: &'a mut Option<Effect>,
    pub process_time: &'a mut Option<Instant>,
}

/// Draw the current screen. On the playing screen, freshly cleared cards are
/// drawn once more and faded to the background unless `no_animation`.
pub fn draw(
    frame: &mut Frame,
    screen: Screen,
    game: &Game,
    theme: &Theme,
    cursor: CellPos,
    title_frame: u64,
    fade: ClearFade<'_>,
    now: Instant,
    no_animation: bool,
) {
    let area = frame.area();
    match screen {
        Screen::Title => draw_title(frame, theme, area, title_frame),
        Screen::Playing => {
            draw_game(frame, game, theme, area, Some(cursor));
            if !fade.cells.is_empty() && !no_animation {
                apply_clear_effect(frame, game, theme, area, fade, now);
            }
            draw_particles(frame, game, theme, area);
            draw_combo_banner(frame, game, theme, area);
        }
        Screen::GameOver => {
            draw_game(frame, game, theme, area, None);
            draw_particles(frame, game, theme, area);
            draw_game_over(frame, game, theme, area);
        }
    }
}

fn draw_title(frame: &mut Frame, theme: &Theme, area: Rect, title_frame: u64) {
    let buf = frame.buffer_mut();
    Block::default()
        .style(Style::default().bg(theme.bg))
        .render(area, buf);

    let title_style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);
    let fg = Style::default().fg(theme.main_fg);
    let mid = area.y + area.height / 2;

    let top = Rect {
        y: mid.saturating_sub(10).max(area.y),
        height: 3,
        ..area
    };
    Paragraph::new(vec![
        Line::from(Span::styled("H A N A F U D A   P O N", title_style)),
        Line::from(""),
        Line::from(Span::styled("Matching Game", Style::default().fg(theme.kinds[5]))),
    ])
    .alignment(Alignment::Center)
    .render(top.intersection(area), buf);

    // Bobbing row of brights and seeds, one per second month.
    let count = 6u16;
    let row_w = count * (CARD_WIDTH + 2);
    let x0 = area.x + area.width.saturating_sub(row_w) / 2;
    let base_y = top.y + 4;
    for i in 0..count {
        let phase = title_frame as f64 * 0.05 + f64::from(i) * 0.5;
        let dy = (phase.sin() + 1.0).round() as u16;
        let rect = Rect {
            x: x0 + i * (CARD_WIDTH + 2),
            y: base_y + dy,
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
        }
        .intersection(area);
        let card = Card::new(Group::ALL[(i * 2) as usize], 0);
        draw_card(buf, rect, card, theme, false, false);
    }

    let mut lines = vec![
        Line::from(Span::styled("How to Play:", title_style)),
        Line::from(Span::styled("Same month: select 3 cards", fg)),
        Line::from(Span::styled("Special combos: select specific cards", fg)),
        Line::from(Span::styled(
            "Red/Blue ribbons: 800   Boar-Deer-Butterfly: 2000",
            fg,
        )),
        Line::from(Span::styled("Three brights: 1000   Viewings: 500", fg)),
        Line::from(""),
    ];
    if (title_frame / 8) % 2 == 0 {
        lines.push(Line::from(Span::styled("SPACE or CLICK to Start", title_style)));
    } else {
        lines.push(Line::from(""));
    }
    let help = Rect {
        y: base_y + CARD_HEIGHT + 3,
        height: lines.len() as u16,
        ..area
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(help.intersection(area), buf);
}

/// One card box: group on the first line, kind on the second.
fn draw_card(buf: &mut Buffer, rect: Rect, card: Card, theme: &Theme, selected: bool, cursor: bool) {
    if rect.width < 3 || rect.height < 3 {
        return;
    }
    let kind_color = theme.kind_color(card.kind());
    let (border_type, border_color) = match (selected, cursor) {
        (true, true) => (BorderType::Double, theme.title),
        (true, false) => (BorderType::Double, theme.selected),
        (false, true) => (BorderType::Thick, theme.title),
        (false, false) => (BorderType::Rounded, kind_color),
    };
    let mut fill = Style::default().bg(theme.bg);
    if selected {
        fill = fill.add_modifier(Modifier::BOLD);
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color).bg(theme.bg))
        .style(fill);
    let inner = block.inner(rect);
    block.render(rect, buf);
    let text = Text::from(vec![
        Line::from(Span::styled(card.group.short_name(), Style::default().fg(theme.main_fg))),
        Line::from(Span::styled(card.kind().label(), Style::default().fg(kind_color))),
    ]);
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

fn draw_empty_cell(buf: &mut Buffer, rect: Rect, theme: &Theme, cursor: bool) {
    if !cursor {
        return;
    }
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(theme.inactive_fg).bg(theme.bg))
        .render(rect, buf);
}

/// Draw game: board + sidebar.
fn draw_game(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect, cursor: Option<CellPos>) {
    let (board_outer, sidebar) = game_layout(area);
    let buf = frame.buffer_mut();
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .style(Style::default().bg(theme.bg))
        .title(Span::styled(" Hanafuda Pon ", Style::default().fg(theme.title)))
        .render(board_outer, buf);

    let board = board_rect(area);
    for pos in CellPos::all() {
        let rect = cell_rect(board, pos);
        let at_cursor = cursor == Some(pos);
        match game.grid().get(pos) {
            Some(placed) => draw_card(buf, rect, placed.card, theme, placed.selected, at_cursor),
            None => draw_empty_cell(buf, rect, theme, at_cursor),
        }
    }
    draw_sidebar(buf, game, theme, sidebar);
}

fn sidebar_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line))
}

fn draw_sidebar(buf: &mut Buffer, game: &Game, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let dim_style = Style::default().fg(theme.inactive_fg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Score
            Constraint::Length(4), // Bonus (label + gauge)
            Constraint::Length(6), // Selection (n/3 + up to three cards)
            Constraint::Length(4), // Pace (interval, grid fill)
        ])
        .split(area);

    // --- Score ---
    let score = game.score();
    let block = sidebar_block(theme);
    let inner = block.inner(chunks[0]);
    block.render(chunks[0], buf);
    Paragraph::new(vec![
        Line::from(Span::styled("Score", title_style)),
        Line::from(Span::styled(format!("{:06}", score.score()), fg_style)),
    ])
    .render(inner, buf);

    // --- Bonus: label above, remaining window below ---
    let block = sidebar_block(theme);
    let inner = block.inner(chunks[1]);
    block.render(chunks[1], buf);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    let (label, style) = if score.bonus_active() {
        (
            format!("BONUS x{}!", score.bonus_multiplier()),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )
    } else {
        ("Bonus".to_string(), dim_style)
    };
    Paragraph::new(Line::from(Span::styled(label, style))).render(rows[0], buf);
    let ratio = (f64::from(score.bonus_frames_remaining()) / f64::from(BONUS_FRAMES)).min(1.0);
    let bar_color = if ratio > 0.6 {
        Color::Green
    } else if ratio > 0.3 {
        Color::Yellow
    } else {
        Color::Red
    };
    Gauge::default()
        .ratio(ratio)
        .label("")
        .gauge_style(Style::default().fg(bar_color))
        .render(rows[1], buf);

    // --- Selection ---
    let block = sidebar_block(theme);
    let inner = block.inner(chunks[2]);
    block.render(chunks[2], buf);
    let selected = game.selected_cards();
    let mut lines = vec![Line::from(vec![
        Span::styled("Selected ", title_style),
        Span::styled(format!("{}/{}", selected.len(), MAX_SELECTION), fg_style),
    ])];
    for card in &selected {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", card.group), fg_style),
            Span::styled(
                card.kind().label(),
                Style::default().fg(theme.kind_color(card.kind())),
            ),
        ]));
    }
    Paragraph::new(lines).render(inner, buf);

    // --- Pace ---
    let block = sidebar_block(theme);
    let inner = block.inner(chunks[3]);
    block.render(chunks[3], buf);
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Cards ", title_style),
            Span::styled(
                format!("{}/{}", game.grid().occupied(), GRID_CAPACITY),
                fg_style,
            ),
        ]),
        Line::from(vec![
            Span::styled("Spawn ", title_style),
            Span::styled(format!("every {} steps", game.spawn_interval()), fg_style),
        ]),
    ])
    .render(inner, buf);
}

/// Particles in world units mapped onto the board; glyph by size class.
fn draw_particles(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect) {
    let board = board_rect(area);
    let buf = frame.buffer_mut();
    for p in game.particles().particles() {
        let color_index = p.faded_color();
        if color_index == 0 {
            continue;
        }
        let tx = f32::from(board.x) + p.x / CELL_WORLD_WIDTH * f32::from(CARD_WIDTH);
        let ty = f32::from(board.y) + p.y / CELL_WORLD_HEIGHT * f32::from(CARD_HEIGHT);
        if tx < 0.0 || ty < 0.0 {
            continue;
        }
        let pos = Position {
            x: tx as u16,
            y: ty as u16,
        };
        if !area.contains(pos) {
            continue;
        }
        let glyph = match p.size {
            1 => '·',
            2 => '•',
            _ => '●',
        };
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(glyph).set_fg(theme.particle_color(color_index));
        }
    }
}

fn draw_combo_banner(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect) {
    let Some(message) = game.score().message() else {
        return;
    };
    let board = board_rect(area);
    let w = (message.chars().count() as u16 + 4).min(board.width);
    let popup = Rect {
        x: board.x + board.width.saturating_sub(w) / 2,
        y: board.y + board.height.saturating_sub(3) / 2,
        width: w,
        height: 3.min(board.height),
    };
    Paragraph::new(Line::from(Span::styled(
        message,
        Style::default()
            .fg(theme.kinds[5])
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.kinds[5]).bg(Color::Black))
            .style(Style::default().bg(Color::Black)),
    )
    .render(popup, frame.buffer_mut());
}

/// Redraw the cleared cards and fade them to the board background (TachyonFX).
fn apply_clear_effect(
    frame: &mut Frame,
    game: &Game,
    theme: &Theme,
    area: Rect,
    fade: ClearFade<'_>,
    now: Instant,
) {
    let board = board_rect(area);
    for &(pos, card) in fade.cells {
        if game.grid().get(pos).is_none() {
            draw_card(frame.buffer_mut(), cell_rect(board, pos), card, theme, true, false);
        }
    }

    let delta = fade
        .process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    let tfx_delta = TfxDuration::from_millis(delta_ms);
    *fade.process_time = Some(now);

    if fade.effect.is_none() {
        let clearing_set = clearing_buffer_positions(board, fade.cells);
        let filter = CellFilter::PositionFn(ref_count(move |pos: Position| {
            clearing_set.contains(&(pos.x, pos.y))
        }));
        let bg = theme.bg;
        let effect = fx::fade_to(bg, bg, (CLEAR_FADE_MS, Interpolation::Linear))
            .with_filter(filter)
            .with_area(board);
        *fade.effect = Some(effect);
    }

    if let Some(effect) = fade.effect {
        frame.render_effect(effect, board, tfx_delta);
    }
}

fn draw_game_over(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect) {
    let popup_w = 34u16;
    let popup_h = 9u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let fg = Style::default().fg(theme.main_fg);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Game Over ",
            Style::default().fg(Color::White).bg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Final score: {} ", game.score().score()),
            fg,
        )),
        Line::from(Span::styled(format!(" Seed: {} ", game.seed()), Style::default().fg(theme.inactive_fg))),
        Line::from(""),
        Line::from(Span::styled(" R: Restart    Q: Quit ", fg)),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
                .style(Style::default().bg(theme.bg))
                .title(Span::styled(" Hanafuda Pon ", Style::default().fg(theme.title))),
        )
        .render(popup, frame.buffer_mut());
}
