//! The scene model: named game objects in insertion order.
//!
//! Written by the interpreter during a parse, by the collision pass (color
//! only) and, between parses, by the input and animation collaborators.

pub mod animation;
pub mod collision;
pub mod input;

use std::collections::HashMap;

use crate::config::ObjectDefaults;

// ─── Shapes ──────────────────────────────────────────────────────────────────

/// Shape keyword given to `object.create`. Matching is case-sensitive; any
/// other token is kept verbatim and rendered like a square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Square,
    Circle,
    Triangle,
    Unknown(String),
}

impl Shape {
    pub fn from_token(token: &str) -> Self {
        match token {
            "square"   => Self::Square,
            "circle"   => Self::Circle,
            "triangle" => Self::Triangle,
            other      => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Square     => "square",
            Self::Circle     => "circle",
            Self::Triangle   => "triangle",
            Self::Unknown(s) => s,
        }
    }
}

// ─── Objects ─────────────────────────────────────────────────────────────────

/// Edge length used in place of a zero or NaN `size`.
pub const FALLBACK_SIZE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub shape: Shape,
    pub x: f64,
    pub y: f64,
    /// Raw color token from the script; never validated.
    pub color: String,
    pub opacity: f64,
    pub size: f64,
    pub collidable: bool,
}

impl GameObject {
    pub fn new(shape: Shape, defaults: &ObjectDefaults) -> Self {
        Self {
            shape,
            x: defaults.x,
            y: defaults.y,
            color: defaults.color.clone(),
            opacity: defaults.opacity,
            size: defaults.size,
            collidable: defaults.collidable,
        }
    }

    /// Edge length for hit-testing, collisions and painting.
    pub fn extent(&self) -> f64 {
        if self.size == 0.0 || self.size.is_nan() { FALLBACK_SIZE } else { self.size }
    }

    /// Axis-aligned `extent × extent` box anchored at the top-left `(x, y)`.
    pub fn bounds(&self) -> Bounds {
        let size = self.extent();
        Bounds {
            left: self.x,
            top: self.y,
            right: self.x + size,
            bottom: self.y + size,
        }
    }

    /// Point-in-box test, inclusive on every edge.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let b = self.bounds();
        px >= b.left && px <= b.right && py >= b.top && py <= b.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

// ─── Scene ───────────────────────────────────────────────────────────────────

/// Insertion-ordered map of object name → object. Re-inserting an existing
/// name replaces the object but keeps its original position in the order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<(String, GameObject)>,
    index: HashMap<String, usize>,
}

impl Scene {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, name: impl Into<String>, object: GameObject) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.objects[i].1 = object,
            None => {
                self.index.insert(name.clone(), self.objects.len());
                self.objects.push((name, object));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&GameObject> {
        self.index.get(name).map(|&i| &self.objects[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.index.get(name).map(|&i| &mut self.objects[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize { self.objects.len() }

    pub fn is_empty(&self) -> bool { self.objects.is_empty() }

    /// Name of the earliest-inserted object.
    pub fn first_name(&self) -> Option<&str> {
        self.objects.first().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GameObject)> {
        self.objects.iter().map(|(name, obj)| (name.as_str(), obj))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|(name, _)| name.as_str())
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.index.clear();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
