use glam::Vec2;

/// The four food categories.
/// The category decides both the per-tick behavior rule and whether gravity applies.
/// Order matches the feeder row left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FoodColor {
    /// Steers toward the pet.
    Homing = 0,
    /// Random kicks every tick.
    Jitter,
    /// Floats upward, ignores gravity.
    Floater,
    /// Drifts toward the nearest particle of its own color.
    Flocking,
}

impl FoodColor {
    pub const ALL: [FoodColor; 4] = [Self::Homing, Self::Jitter, Self::Floater, Self::Flocking];

    /// Position in the feeder row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// CSS hex color used by hosts that draw with web colors.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Homing => "#4fc3f7",
            Self::Jitter => "#ffb74d",
            Self::Floater => "#81c784",
            Self::Flocking => "#e57373",
        }
    }

    /// Whether the global gravity term applies to this color.
    pub fn feels_gravity(self) -> bool {
        !matches!(self, Self::Floater)
    }
}

/// Something that happened during the current frame.
/// Cleared by `Simulation::begin_frame`; hosts may read it for sounds or stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// A feeder released a batch of food.
    Fed { color: FoodColor, count: usize },
    /// The pet ate a food particle at `pos`.
    Consumed { color: FoodColor, pos: Vec2 },
    /// A food particle ran out of life.
    Expired { color: FoodColor },
    /// A trail marker outlived the trail duration.
    TrailFaded { color: FoodColor },
}
