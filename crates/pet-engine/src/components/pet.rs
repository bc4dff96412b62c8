use glam::Vec2;

/// Which way the pet is currently being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetMode {
    /// Heading for a pointer target.
    Seeking,
    /// No target; drifting on random impulses.
    Wandering,
}

/// The pet's motion state. Exactly one per simulation.
/// Its visual handle lives next to it in the simulation context.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    /// Top-left corner of the pet sprite in viewport space.
    pub pos: Vec2,
    pub vel: Vec2,
    /// Pointer target, if one is pending.
    pub target: Option<Vec2>,
}

impl Pet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            target: None,
        }
    }

    pub fn mode(&self) -> PetMode {
        if self.target.is_some() {
            PetMode::Seeking
        } else {
            PetMode::Wandering
        }
    }

    /// Point the pet at `target`, overriding any wander or earlier target.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = Some(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pet_wanders() {
        let pet = Pet::new(Vec2::new(10.0, 10.0), Vec2::ZERO);
        assert_eq!(pet.mode(), PetMode::Wandering);
    }

    #[test]
    fn set_target_switches_to_seeking_and_overrides() {
        let mut pet = Pet::new(Vec2::ZERO, Vec2::ZERO);
        pet.set_target(Vec2::new(5.0, 5.0));
        pet.set_target(Vec2::new(9.0, 1.0));
        assert_eq!(pet.mode(), PetMode::Seeking);
        assert_eq!(pet.target, Some(Vec2::new(9.0, 1.0)));
    }
}
