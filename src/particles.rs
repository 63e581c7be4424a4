//! Particle bursts for cleared cards. Cosmetic only; nothing reads them back.

use crate::grid::CellPos;
use crate::rng::RngState;

/// World units spanned by one grid cell.
pub const CELL_WORLD_WIDTH: f32 = 32.0;
pub const CELL_WORLD_HEIGHT: f32 = 53.0;

const GRAVITY: f32 = 0.1;
const AIR_DRAG: f32 = 0.98;
const LIFE_MIN: u32 = 30;
const LIFE_MAX: u32 = 60;
const ORIGIN_JITTER: i32 = 8;

pub const SPECIAL_BURST: usize = 15;
pub const ORDINARY_BURST: usize = 8;

/// 16-colour palette indices.
pub const SPECIAL_PALETTE: &[u8] = &[8, 9, 10, 11, 12, 14, 15];
pub const ORDINARY_PALETTE: &[u8] = &[7, 8, 10, 11, 14];

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    life: u32,
    max_life: u32,
    /// Palette index.
    pub color: u8,
    /// 1..=3.
    pub size: u8,
}

impl Particle {
    fn new(x: f32, y: f32, color: u8, rng: &mut RngState) -> Self {
        let life = rng.range_u32(LIFE_MIN..=LIFE_MAX);
        Self {
            x,
            y,
            vx: rng.range_f32(-3.0, 3.0),
            vy: rng.range_f32(-4.0, -1.0),
            life,
            max_life: life,
            color,
            size: rng.range_u32(1..=3) as u8,
        }
    }

    /// Advance one step; false once the particle has expired.
    fn update(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
        self.vx *= AIR_DRAG;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    /// 0 = full colour, 3 = faded out.
    pub fn fade_level(&self) -> u8 {
        let ratio = self.life as f32 / self.max_life.max(1) as f32;
        if ratio > 0.7 {
            0
        } else if ratio > 0.4 {
            1
        } else if ratio > 0.2 {
            2
        } else {
            3
        }
    }

    /// Palette index after fading; 0 is black.
    pub fn faded_color(&self) -> u8 {
        match self.fade_level() {
            0 => self.color,
            1 => self.color.saturating_sub(1),
            2 => self.color.saturating_sub(2),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn emit(&mut self, x: f32, y: f32, count: usize, palette: &[u8], rng: &mut RngState) {
        self.particles.reserve(count);
        for _ in 0..count {
            let color = rng.choose(palette).copied().unwrap_or(7);
            self.particles.push(Particle::new(x, y, color, rng));
        }
    }

    /// Burst centred on a cell, each particle jittered a little around the centre.
    pub fn burst_at(&mut self, cell: CellPos, special: bool, rng: &mut RngState) {
        let (count, palette) = if special {
            (SPECIAL_BURST, SPECIAL_PALETTE)
        } else {
            (ORDINARY_BURST, ORDINARY_PALETTE)
        };
        let cx = f32::from(cell.col) * CELL_WORLD_WIDTH + CELL_WORLD_WIDTH / 2.0;
        let cy = f32::from(cell.row) * CELL_WORLD_HEIGHT + CELL_WORLD_HEIGHT / 2.0;
        for _ in 0..count {
            let x = cx + rng.range_i32(-ORIGIN_JITTER..=ORIGIN_JITTER) as f32;
            let y = cy + rng.range_i32(-ORIGIN_JITTER..=ORIGIN_JITTER) as f32;
            self.emit(x, y, 1, palette, rng);
        }
    }

    pub fn tick(&mut self) {
        self.particles.retain_mut(Particle::update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_respects_count_and_palette() {
        let mut rng = RngState::from_seed(8);
        let mut ps = ParticleSystem::new();
        ps.emit(10.0, 10.0, 12, ORDINARY_PALETTE, &mut rng);
        assert_eq!(ps.len(), 12);
        for p in ps.particles() {
            assert!(ORDINARY_PALETTE.contains(&p.color));
            assert!((1..=3).contains(&p.size));
            assert!((LIFE_MIN..=LIFE_MAX).contains(&p.life()));
        }
    }

    #[test]
    fn burst_size_depends_on_special() {
        let mut rng = RngState::from_seed(8);
        let mut ps = ParticleSystem::new();
        ps.burst_at(CellPos::new(0, 0), true, &mut rng);
        assert_eq!(ps.len(), SPECIAL_BURST);
        ps.burst_at(CellPos::new(7, 3), false, &mut rng);
        assert_eq!(ps.len(), SPECIAL_BURST + ORDINARY_BURST);
        let last = &ps.particles()[ps.len() - 1];
        assert!(last.x >= 7.0 * CELL_WORLD_WIDTH + 16.0 - 8.0);
    }

    #[test]
    fn all_particles_expire_by_max_life() {
        let mut rng = RngState::from_seed(2);
        let mut ps = ParticleSystem::new();
        ps.emit(0.0, 0.0, 40, SPECIAL_PALETTE, &mut rng);
        for _ in 0..LIFE_MIN - 1 {
            ps.tick();
        }
        assert_eq!(ps.len(), 40);
        for _ in LIFE_MIN - 1..LIFE_MAX {
            ps.tick();
        }
        assert!(ps.is_empty());
    }

    #[test]
    fn gravity_pulls_down() {
        let mut rng = RngState::from_seed(3);
        let mut ps = ParticleSystem::new();
        ps.emit(0.0, 0.0, 1, &[7], &mut rng);
        let vy0 = ps.particles()[0].vy;
        assert!(vy0 < 0.0);
        ps.tick();
        let p = &ps.particles()[0];
        assert!((p.vy - (vy0 + GRAVITY)).abs() < 1e-6);
        assert!(p.y < 0.0);
    }

    #[test]
    fn fade_levels_step_down() {
        let mut rng = RngState::from_seed(4);
        let mut p = Particle::new(0.0, 0.0, 10, &mut rng);
        assert_eq!(p.fade_level(), 0);
        assert_eq!(p.faded_color(), 10);
        while p.update() {}
        assert_eq!(p.fade_level(), 3);
        assert_eq!(p.faded_color(), 0);
    }
}
