//! Per-frame sensor data.
//!
//! Observations live only as long as the frame that carries them; nothing
//! in this crate retains them after reconciliation.

use serde::Serialize;

// ════════════════════════════════════════════════════════════════════════════
// Vec3
// ════════════════════════════════════════════════════════════════════════════

/// A point in sensor space (millimetres).
///
/// `y` points up away from the device; `z` is the depth axis, negative
/// toward the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vec3 { x, y, z }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vec3 { x: x as f64, y: y as f64, z: z as f64 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Observation
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Finger,
    Palm,
}

/// One tracked point inside a frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Observation {
    pub category: Category,
    pub position: Vec3,
}

impl Observation {
    pub fn finger(position: Vec3) -> Self {
        Observation { category: Category::Finger, position }
    }

    pub fn palm(position: Vec3) -> Self {
        Observation { category: Category::Palm, position }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// One snapshot from the event source.
///
/// Both lists keep the order the source emitted them in.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Frame {
    pub id:           u64,
    /// Device timestamp in microseconds.
    pub timestamp_us: u64,
    pub fingers:      Vec<Observation>,
    pub palms:        Vec<Observation>,
}

impl Frame {
    pub fn new(id: u64, timestamp_us: u64) -> Self {
        Frame { id, timestamp_us, ..Frame::default() }
    }

    pub fn with_finger(mut self, position: Vec3) -> Self {
        self.fingers.push(Observation::finger(position));
        self
    }

    pub fn with_palm(mut self, position: Vec3) -> Self {
        self.palms.push(Observation::palm(position));
        self
    }

    /// Observations of one category, in emission order.
    pub fn observations(&self, category: Category) -> &[Observation] {
        match category {
            Category::Finger => &self.fingers,
            Category::Palm   => &self.palms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fingers.is_empty() && self.palms.is_empty()
    }
}
