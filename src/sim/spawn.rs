//! Entry edges and off-screen spawn points for new letters
//!
//! Coordinates are screen pixels relative to the base, which sits at the
//! viewport center: +x right, +y down.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Edge a letter enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Unit vector pointing from the base toward the entry edge
    pub fn outward(&self) -> Vec2 {
        match self {
            Direction::Top => Vec2::NEG_Y,
            Direction::Bottom => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// Visible play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }
}

/// Where a letter appears and where its flight ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPath {
    pub entry: Vec2,
    pub destination: Vec2,
}

impl SpawnPath {
    /// Linear interpolation along the flight, `t` clamped to [0, 1]
    pub fn lerp(&self, t: f32) -> Vec2 {
        self.entry.lerp(self.destination, t.clamp(0.0, 1.0))
    }
}

/// Uniformly pick one of the four entry edges
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::ALL[rng.random_range(0..Direction::ALL.len())]
}

/// Entry point just beyond the `direction` edge, randomized along the other axis
///
/// The glyph is pushed a full `letter_extent` past the edge so no part of it
/// is visible on the first frame.
pub fn spawn_position<R: Rng + ?Sized>(
    direction: Direction,
    viewport: Viewport,
    tuning: &Tuning,
    rng: &mut R,
) -> SpawnPath {
    let half = viewport.half_extents();
    let mut across = |full: f32| {
        let span = (full - tuning.spawn_margin).max(0.0);
        rng.random::<f32>() * span - span / 2.0
    };

    let entry = match direction {
        Direction::Top | Direction::Bottom => {
            let x = across(viewport.width);
            Vec2::new(x, 0.0) + direction.outward() * (half.y + tuning.letter_extent)
        }
        Direction::Left | Direction::Right => {
            let y = across(viewport.height);
            Vec2::new(0.0, y) + direction.outward() * (half.x + tuning.letter_extent)
        }
    };

    SpawnPath {
        entry,
        destination: Vec2::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_direction_covers_all_edges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(random_direction(&mut rng));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_entry_is_fully_off_screen() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(800.0, 600.0);
        let half = viewport.half_extents();
        let glyph = tuning.letter_extent / 2.0;
        let mut rng = Pcg32::seed_from_u64(42);

        for _ in 0..500 {
            let dir = random_direction(&mut rng);
            let path = spawn_position(dir, viewport, &tuning, &mut rng);
            let e = path.entry;
            match dir {
                Direction::Top => assert!(e.y + glyph < -half.y),
                Direction::Bottom => assert!(e.y - glyph > half.y),
                Direction::Left => assert!(e.x + glyph < -half.x),
                Direction::Right => assert!(e.x - glyph > half.x),
            }
            assert_eq!(path.destination, Vec2::ZERO);
        }
    }

    #[test]
    fn test_perpendicular_axis_respects_margin() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(3);

        for _ in 0..200 {
            let top = spawn_position(Direction::Top, viewport, &tuning, &mut rng);
            assert!(top.entry.x.abs() <= (800.0 - tuning.spawn_margin) / 2.0);
            let left = spawn_position(Direction::Left, viewport, &tuning, &mut rng);
            assert!(left.entry.y.abs() <= (600.0 - tuning.spawn_margin) / 2.0);
        }
    }

    #[test]
    fn test_tiny_viewport_spawns_on_axis() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let path = spawn_position(Direction::Right, Viewport::new(50.0, 50.0), &tuning, &mut rng);
        assert_eq!(path.entry.y, 0.0);
        assert!(path.entry.x > 25.0);
    }

    #[test]
    fn test_lerp_clamps() {
        let path = SpawnPath {
            entry: Vec2::new(0.0, -100.0),
            destination: Vec2::ZERO,
        };
        assert_eq!(path.lerp(0.5), Vec2::new(0.0, -50.0));
        assert_eq!(path.lerp(2.0), Vec2::ZERO);
    }
}
