use super::{GameObject, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in screen space (y grows downward).
    pub fn delta(self) -> (f64, f64) {
        match self {
            Self::Up    => (0.0, -1.0),
            Self::Down  => (0.0, 1.0),
            Self::Left  => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

pub fn nudge(obj: &mut GameObject, dir: Direction, speed: f64) {
    let (dx, dy) = dir.delta();
    obj.x += dx * speed;
    obj.y += dy * speed;
}

/// Name of the first object, in insertion order, whose box contains the point.
pub fn hit_test(scene: &Scene, x: f64, y: f64) -> Option<&str> {
    scene.iter().find(|(_, obj)| obj.contains(x, y)).map(|(name, _)| name)
}
